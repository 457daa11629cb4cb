//! Owned canvas state.
//!
//! Everything the canvas knows lives in one struct that is passed by
//! reference to the transform functions, so the rescale/selection logic can
//! be exercised without a surface or a host window.

use image::RgbaImage;
use selview_ui::Size;

use crate::coords::{Rect, Scale};
use crate::hsv::HsvShifter;
use crate::selection::SelectionController;

#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    /// Full-resolution image as loaded
    pub(crate) origin: Option<RgbaImage>,
    /// Origin fitted to the widget, HSV shift applied
    pub(crate) display: Option<RgbaImage>,
    /// `origin / display` along the fitted axis; `None` until the first rescale
    pub(crate) scale: Option<Scale>,
    pub(crate) widget_size: Size,
    pub(crate) selection: SelectionController,
    pub(crate) shifter: HsvShifter,
}

impl CanvasState {
    pub fn new(widget_size: Size, shifter: HsvShifter) -> Self {
        Self {
            widget_size,
            shifter,
            ..Self::default()
        }
    }

    pub fn origin(&self) -> Option<&RgbaImage> {
        self.origin.as_ref()
    }

    pub fn display(&self) -> Option<&RgbaImage> {
        self.display.as_ref()
    }

    pub fn scale(&self) -> Option<Scale> {
        self.scale
    }

    pub fn widget_size(&self) -> Size {
        self.widget_size
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn shifter(&self) -> &HsvShifter {
        &self.shifter
    }

    /// Selection rectangle in origin-image coordinates.
    pub fn selection_image_rect(&self) -> Option<Rect> {
        self.selection.selection().map(|s| s.image_rect())
    }

    /// Selection rectangle in display coordinates, derived from the image
    /// rectangle and the current scale.
    pub fn selection_display_rect(&self) -> Option<Rect> {
        let scale = self.scale?;
        self.selection.selection().map(|s| s.display_rect(scale))
    }

    /// Replace the origin image, dropping everything derived from the old one.
    pub(crate) fn replace_origin(&mut self, origin: RgbaImage) {
        self.origin = Some(origin);
        self.display = None;
        self.scale = None;
        self.selection.clear();
    }
}
