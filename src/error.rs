//! Error types for the output side of rendering.
//!
//! Tracing itself cannot fail: a miss or an absorbed ray is a normal
//! outcome. Only writing the image can.

use std::io;

/// Errors raised while emitting a rendered image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing to the output stream or file failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Encoding or saving a PNG failed
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    /// A sink received more pixels than its image holds
    #[error("Pixel {index} is outside the {width}x{height} image")]
    PixelOutOfBounds {
        /// Zero-based row-major index of the rejected pixel
        index: u32,
        /// Image width announced by `begin`
        width: u32,
        /// Image height announced by `begin`
        height: u32,
    },
    /// Output path has an extension no sink handles
    #[error("Unsupported output format '{0}' (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

/// Result alias for fallible output operations.
pub type RenderResult<T> = Result<T, RenderError>;
