//! Cropping the selection out of the origin image.
//!
//! While the user is still dragging, hosts typically re-fetch the selection
//! on every pointer move to drive a live preview. Large crops are shrunk in
//! that phase so the preview cost stays bounded; once the drag ends the crop
//! is always returned at full resolution.

use image::imageops;
use image::RgbaImage;

use crate::coords::Rect;
use crate::rescale::ResizeFilter;

/// A whole-pixel region of the origin image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRegion {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Round `image_rect` outward to whole pixels and clip it to an image of
/// `dimensions`. Returns `None` when nothing of the image is covered.
pub fn crop_region(image_rect: Rect, dimensions: (u32, u32)) -> Option<PixelRegion> {
    let r = image_rect.normalized();
    let (w, h) = (dimensions.0 as f64, dimensions.1 as f64);

    let x0 = (r.left as f64).floor().clamp(0.0, w);
    let y0 = (r.top as f64).floor().clamp(0.0, h);
    let x1 = (r.right as f64).ceil().clamp(0.0, w);
    let y1 = (r.bottom as f64).ceil().clamp(0.0, h);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(PixelRegion {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

/// Per-axis shrink factor for a crop of `area` pixels.
///
/// `None` means "return the crop as is": either the drag is over or the crop
/// is strictly below `budget`. At or above the budget during a drag the
/// factor is `sqrt(area / budget)`.
pub fn downsample_factor(area: u64, dragging: bool, budget: f64) -> Option<f64> {
    let area = area as f64;
    if !dragging || area < budget {
        return None;
    }
    Some((area / budget).sqrt())
}

/// Dimensions of a `width` x `height` crop shrunk by `factor` (at least 1x1).
pub fn downsampled_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let shrink = |d: u32| ((d as f64 / factor).floor() as u32).max(1);
    (shrink(width), shrink(height))
}

/// Crop `origin` to `image_rect`, downsampling mid-drag crops above `budget`.
pub fn export_selection(
    origin: &RgbaImage,
    image_rect: Rect,
    dragging: bool,
    budget: f64,
    filter: ResizeFilter,
) -> Option<RgbaImage> {
    let region = crop_region(image_rect, origin.dimensions())?;
    let crop =
        imageops::crop_imm(origin, region.x, region.y, region.width, region.height).to_image();

    match downsample_factor(region.area(), dragging, budget) {
        None => Some(crop),
        Some(factor) => {
            let (w, h) = downsampled_dimensions(region.width, region.height, factor);
            log::debug!(
                "Downsampling {}x{} selection by {:.3} to {}x{} during drag",
                region.width,
                region.height,
                factor,
                w,
                h
            );
            Some(imageops::resize(&crop, w, h, filter.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_SELECTION_PIXEL_BUDGET as BUDGET;
    use crate::test_image;

    #[test]
    fn test_crop_region_rounds_outward() {
        let region = crop_region(Rect::new(10.2, 5.9, 20.1, 8.0), (100, 100)).expect("region");
        assert_eq!(
            region,
            PixelRegion {
                x: 10,
                y: 5,
                width: 11,
                height: 3
            }
        );
    }

    #[test]
    fn test_crop_region_clips_to_image() {
        let region = crop_region(Rect::new(-20.0, 90.0, 30.0, 150.0), (100, 100)).expect("region");
        assert_eq!(
            region,
            PixelRegion {
                x: 0,
                y: 90,
                width: 30,
                height: 10
            }
        );
        assert!(crop_region(Rect::new(120.0, 0.0, 200.0, 50.0), (100, 100)).is_none());
    }

    #[test]
    fn test_zero_area_rect_has_no_region() {
        assert!(crop_region(Rect::new(12.0, 12.0, 12.0, 12.0), (100, 100)).is_none());
        assert!(crop_region(Rect::new(12.0, 3.0, 12.0, 40.0), (100, 100)).is_none());
    }

    #[test]
    fn test_budget_boundary() {
        assert!(BUDGET > 23_333.0 && BUDGET < 23_334.0);
        // Strictly below the budget: untouched even while dragging
        assert_eq!(downsample_factor(23_333, true, BUDGET), None);
        // At or above the budget: shrunk while dragging
        assert!(downsample_factor(23_334, true, BUDGET).is_some());
        assert_eq!(downsample_factor(100, true, 100.0), Some(1.0));
        assert_eq!(downsample_factor(99, true, 100.0), None);
        // Never shrunk once the drag is over
        assert_eq!(downsample_factor(10_000_000, false, BUDGET), None);
    }

    #[test]
    fn test_million_pixel_factor() {
        let factor = downsample_factor(1_000_000, true, BUDGET).expect("factor");
        assert!((factor - 6.5465).abs() < 1e-3, "factor {}", factor);
        assert_eq!(downsampled_dimensions(1000, 1000, factor), (152, 152));
    }

    #[test]
    fn test_export_million_pixels() {
        let origin = test_image::gradient(1200, 1100);
        let rect = Rect::new(0.0, 0.0, 1000.0, 1000.0);

        let dragging = export_selection(&origin, rect, true, BUDGET, ResizeFilter::Triangle)
            .expect("crop");
        assert_eq!(dragging.dimensions(), (152, 152));

        let done = export_selection(&origin, rect, false, BUDGET, ResizeFilter::Triangle)
            .expect("crop");
        assert_eq!(done.dimensions(), (1000, 1000));
        assert_eq!(done.get_pixel(999, 999), origin.get_pixel(999, 999));
    }

    #[test]
    fn test_export_copies_pixels_at_offset() {
        let origin = test_image::gradient(64, 64);
        let crop = export_selection(
            &origin,
            Rect::new(40.0, 30.0, 10.0, 20.0),
            true,
            BUDGET,
            ResizeFilter::Nearest,
        )
        .expect("crop");
        assert_eq!(crop.dimensions(), (30, 10));
        assert_eq!(crop.get_pixel(0, 0), origin.get_pixel(10, 20));
        assert_eq!(crop.get_pixel(29, 9), origin.get_pixel(39, 29));
    }

    #[test]
    fn test_export_thin_strip_at_boundary() {
        let origin = test_image::gradient(23_333, 2);
        let crop = export_selection(
            &origin,
            Rect::new(0.0, 0.0, 23_333.0, 1.0),
            true,
            BUDGET,
            ResizeFilter::Nearest,
        )
        .expect("crop");
        assert_eq!(crop.dimensions(), (23_333, 1));
    }
}
