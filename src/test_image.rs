//! Synthetic test images.
//!
//! Used by the native binary when no input file is given, and by tests that
//! need images whose pixels can be told apart by position.

use image::{Rgba, RgbaImage};

/// A color gradient: red grows left to right, green top to bottom, blue
/// follows a coarse checkerboard so that neighbouring tiles differ in hue.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x as f32 / w * 255.0) as u8;
        let g = (y as f32 / h * 255.0) as u8;
        let b = if ((x / 32) + (y / 32)) % 2 == 0 { 200 } else { 40 };
        Rgba([r, g, b, 255])
    })
}

/// A single-color image.
pub fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_dimensions_and_corners() {
        let img = gradient(64, 32);
        assert_eq!(img.dimensions(), (64, 32));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 200, 255]);
        assert_eq!(img.get_pixel(32, 0).0[2], 40);
        assert!(img.get_pixel(63, 31).0[0] > 240);
    }

    #[test]
    fn test_solid() {
        let img = solid(3, 3, [1, 2, 3, 4]);
        assert!(img.pixels().all(|p| p.0 == [1, 2, 3, 4]));
    }
}
