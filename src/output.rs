//! # Output Module
//!
//! Destinations for rendered pixels:
//! - `PpmSink` streams a plain-text PPM (`P3`) as pixels are produced
//! - `PngSink` buffers an 8-bit image and encodes it as PNG when rendering ends
//!
//! Both apply the same gamma correction and quantization from [`crate::color`].

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::{debug, info};

use crate::color::{to_rgb8, write_color};
use crate::error::{RenderError, RenderResult};
use crate::material::Color;

/// Receives pixels in row-major order, top row first.
pub trait ImageSink {
    /// Called once before the first pixel.
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Called once per pixel with the averaged linear color.
    fn write_pixel(&mut self, pixel_color: Color) -> RenderResult<()>;

    /// Called once after the last pixel.
    fn finish(&mut self) -> RenderResult<()>;
}

/// Streams a plain-text PPM image to any writer.
pub struct PpmSink<W: Write> {
    out: W,
}

impl<W: Write> PpmSink<W> {
    /// Wrap a writer. Buffer it if it is a file or stdout.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ImageSink for PpmSink<W> {
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()> {
        write!(self.out, "P3\n{} {}\n255\n", width, height)?;
        Ok(())
    }

    fn write_pixel(&mut self, pixel_color: Color) -> RenderResult<()> {
        write_color(&mut self.out, pixel_color)?;
        Ok(())
    }

    fn finish(&mut self) -> RenderResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Collects pixels into an 8-bit RGB buffer and saves it as PNG.
pub struct PngSink {
    path: PathBuf,
    image: RgbImage,
    next: u32,
}

impl PngSink {
    /// Sink that will save to `path` once rendering finishes.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            image: RgbImage::new(0, 0),
            next: 0,
        }
    }

    /// Pixels received so far.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

impl ImageSink for PngSink {
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.image = RgbImage::new(width, height);
        self.next = 0;
        Ok(())
    }

    fn write_pixel(&mut self, pixel_color: Color) -> RenderResult<()> {
        let (width, height) = self.image.dimensions();
        if self.next >= width.saturating_mul(height) {
            return Err(RenderError::PixelOutOfBounds {
                index: self.next,
                width,
                height,
            });
        }
        let (x, y) = (self.next % width, self.next / width);
        self.image.put_pixel(x, y, Rgb(to_rgb8(pixel_color)));
        self.next += 1;
        Ok(())
    }

    fn finish(&mut self) -> RenderResult<()> {
        debug!("Encoding {}x{} PNG", self.image.width(), self.image.height());
        self.image.save(&self.path)?;
        info!("Image saved to {}", self.path.display());
        Ok(())
    }
}

/// Pick a sink from the output path: `-` or `.ppm` for PPM, `.png` for PNG.
pub fn sink_for_path(path: &str) -> RenderResult<Box<dyn ImageSink>> {
    if path == "-" {
        return Ok(Box::new(PpmSink::new(BufWriter::new(io::stdout().lock()))));
    }

    let extension = Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let file = File::create(path)?;
            info!("Writing PPM to {}", path);
            Ok(Box::new(PpmSink::new(BufWriter::new(file))))
        }
        "png" => Ok(Box::new(PngSink::new(path))),
        _ => Err(RenderError::UnsupportedFormat(extension)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppm_header_and_pixels() {
        let mut sink = PpmSink::new(Vec::new());
        sink.begin(2, 1).unwrap();
        sink.write_pixel(Color::ONE).unwrap();
        sink.write_pixel(Color::ZERO).unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n0 0 0\n");
    }

    #[test]
    fn test_png_sink_places_pixels_row_major() {
        let mut sink = PngSink::new("unused.png");
        sink.begin(2, 2).unwrap();
        for c in [Color::ZERO, Color::ONE, Color::ONE, Color::ZERO] {
            sink.write_pixel(c).unwrap();
        }
        assert_eq!(sink.image().get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(sink.image().get_pixel(0, 1), &Rgb([255, 255, 255]));
        assert_eq!(sink.image().get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_png_sink_rejects_pixels_past_the_end() {
        let mut sink = PngSink::new("unused.png");
        sink.begin(1, 1).unwrap();
        sink.write_pixel(Color::ONE).unwrap();

        match sink.write_pixel(Color::ZERO) {
            Err(RenderError::PixelOutOfBounds { index, width, height }) => {
                assert_eq!((index, width, height), (1, 1, 1));
            }
            other => panic!("expected an out of bounds error, got {:?}", other),
        }
        assert_eq!(sink.image().get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_png_sink_rejects_pixels_before_begin() {
        let mut sink = PngSink::new("unused.png");
        assert!(matches!(
            sink.write_pixel(Color::ONE),
            Err(RenderError::PixelOutOfBounds { index: 0, width: 0, height: 0 })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        match sink_for_path("render.exr") {
            Err(RenderError::UnsupportedFormat(ext)) => assert_eq!(ext, "exr"),
            _ => panic!("expected an unsupported format error"),
        }
    }
}
