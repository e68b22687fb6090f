//! Conversion of linear colors into 8-bit display values.

use std::io::Write;

use crate::interval::Interval;
use crate::material::Color;

/// Gamma 2 transform. Non-positive components map to 0.
pub fn linear_to_gamma(linear_component: f64) -> f64 {
    if linear_component > 0.0 {
        linear_component.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct and quantize a linear color to bytes in [0, 255].
pub fn to_rgb8(pixel_color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.000, 0.999);

    let quantize = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [
        quantize(pixel_color.x),
        quantize(pixel_color.y),
        quantize(pixel_color.z),
    ]
}

/// Write one pixel as an `R G B` text line.
pub fn write_color<W: Write + ?Sized>(out: &mut W, pixel_color: Color) -> std::io::Result<()> {
    let [r, g, b] = to_rgb8(pixel_color);
    writeln!(out, "{} {} {}", r, g, b)
}
