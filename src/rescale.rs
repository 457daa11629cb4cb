//! Fitting the origin image into the widget.
//!
//! The display buffer keeps the origin's aspect ratio and touches the widget
//! edges along one axis: an image that is relatively wider than the widget is
//! fitted to the widget width, anything else to the widget height.

use image::imageops::{self, FilterType};
use selview_ui::Size;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::constants::status as messages;
use crate::coords::Scale;
use crate::state::CanvasState;
use crate::status::StatusSink;

/// Resampling filter used when producing the display buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    pub fn name(&self) -> &'static str {
        match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Triangle => "triangle",
            ResizeFilter::CatmullRom => "catmullrom",
            ResizeFilter::Gaussian => "gaussian",
            ResizeFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// The axis the display buffer is fitted along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitAxis {
    Width,
    Height,
}

/// Display dimensions and scale for one widget size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub scale: Scale,
    pub width: u32,
    pub height: u32,
    pub axis: FitAxis,
}

/// Compute how an `origin`-sized image fits a widget of size `widget`.
///
/// Widget dimensions are rounded to whole pixels. Returns `None` for an empty
/// image or a widget smaller than one pixel on either axis.
pub fn fit_to_widget(origin: (u32, u32), widget: Size) -> Option<Fit> {
    let (origin_w, origin_h) = origin;
    if origin_w == 0 || origin_h == 0 || widget.is_degenerate() {
        return None;
    }
    let widget_w = widget.width.round() as u32;
    let widget_h = widget.height.round() as u32;

    let widget_aspect = widget_w as f64 / widget_h as f64;
    let image_aspect = origin_w as f64 / origin_h as f64;

    if image_aspect > widget_aspect {
        let height = (origin_h as f64 * widget_w as f64 / origin_w as f64).round() as u32;
        Some(Fit {
            scale: Scale::from_dimensions(origin_w, widget_w)?,
            width: widget_w,
            height: height.max(1),
            axis: FitAxis::Width,
        })
    } else {
        let width = (origin_w as f64 * widget_h as f64 / origin_h as f64).round() as u32;
        Some(Fit {
            scale: Scale::from_dimensions(origin_h, widget_h)?,
            width: width.max(1),
            height: widget_h,
            axis: FitAxis::Height,
        })
    }
}

/// Regenerates the display buffer from the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct RescaleEngine {
    filter: ResizeFilter,
}

impl RescaleEngine {
    pub fn new(filter: ResizeFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> ResizeFilter {
        self.filter
    }

    /// Rebuild `display` and `scale` for the current widget size and recolor
    /// the new buffer with the active HSV shift.
    ///
    /// Does nothing (and returns `false`) with no image loaded or a degenerate
    /// widget; the previous display is kept in the latter case. The selection
    /// lives in image space, so its display rectangle follows the new scale
    /// automatically.
    pub fn rescale(&self, state: &mut CanvasState, status: &dyn StatusSink) -> bool {
        let Some(origin) = state.origin.as_ref() else {
            return false;
        };
        let Some(fit) = fit_to_widget(origin.dimensions(), state.widget_size) else {
            log::debug!(
                "Skipping rescale for widget size {}x{}",
                state.widget_size.width,
                state.widget_size.height
            );
            return false;
        };

        status.report_progress(messages::RESCALING);
        let start = Instant::now();

        let mut display = imageops::resize(origin, fit.width, fit.height, self.filter.into());
        state.shifter.rebase();
        state.shifter.apply(&mut display, status);

        log::info!(
            "Rescaled {}x{} -> {}x{} (fit to {:?}, scale {:.4}, {}) in {:?}",
            origin.width(),
            origin.height(),
            fit.width,
            fit.height,
            fit.axis,
            fit.scale.get(),
            self.filter.name(),
            start.elapsed()
        );

        state.display = Some(display);
        state.scale = Some(fit.scale);

        status.report_progress(messages::READY);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{from_image_rect, Rect};
    use crate::hsv::HsvDelta;
    use crate::status::NullStatus;
    use crate::test_image;
    use image::{Rgba, RgbaImage};
    use std::cell::RefCell;

    fn state_with(width: u32, height: u32, widget: Size) -> CanvasState {
        let mut state = CanvasState::default();
        state.origin = Some(test_image::gradient(width, height));
        state.widget_size = widget;
        state
    }

    #[test]
    fn test_wide_image_fits_width() {
        let fit = fit_to_widget((2000, 500), Size::new(800.0, 600.0)).expect("fit");
        assert_eq!(fit.axis, FitAxis::Width);
        assert_eq!((fit.width, fit.height), (800, 200));
        assert_eq!(fit.scale.get(), 2.5);
    }

    #[test]
    fn test_tall_image_fits_height() {
        let fit = fit_to_widget((500, 2000), Size::new(800.0, 600.0)).expect("fit");
        assert_eq!(fit.axis, FitAxis::Height);
        assert_eq!((fit.width, fit.height), (150, 600));
        assert!((fit.scale.get() - 2000.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_aspect_fits_height() {
        let fit = fit_to_widget((400, 300), Size::new(800.0, 600.0)).expect("fit");
        assert_eq!(fit.axis, FitAxis::Height);
        assert_eq!((fit.width, fit.height), (800, 600));
        assert_eq!(fit.scale.get(), 0.5);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(fit_to_widget((0, 10), Size::new(100.0, 100.0)).is_none());
        assert!(fit_to_widget((10, 10), Size::new(0.0, 100.0)).is_none());
        assert!(fit_to_widget((10, 10), Size::new(100.0, 0.4)).is_none());
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        let fit = fit_to_widget((10_000, 1), Size::new(100.0, 100.0)).expect("fit");
        assert_eq!((fit.width, fit.height), (100, 1));
    }

    #[test]
    fn test_display_keeps_aspect_ratio() {
        let sizes = [
            Size::new(800.0, 600.0),
            Size::new(333.0, 777.0),
            Size::new(1021.0, 97.0),
            Size::new(64.0, 64.0),
        ];
        for (ow, oh) in [(1024u32, 768u32), (301, 999), (1600, 90), (17, 17)] {
            for widget in sizes {
                let mut state = state_with(ow, oh, widget);
                assert!(RescaleEngine::default().rescale(&mut state, &NullStatus));
                let display = state.display().expect("display");
                let (dw, dh) = display.dimensions();

                assert!(dw as f32 <= widget.width && dh as f32 <= widget.height);
                // Within one pixel of the origin aspect on the derived axis
                let expected_h = dw as f64 * oh as f64 / ow as f64;
                let expected_w = dh as f64 * ow as f64 / oh as f64;
                assert!(
                    (dh as f64 - expected_h).abs() <= 1.0 || (dw as f64 - expected_w).abs() <= 1.0,
                    "{}x{} in {:?} gave {}x{}",
                    ow,
                    oh,
                    widget,
                    dw,
                    dh
                );
            }
        }
    }

    #[test]
    fn test_no_origin_is_noop() {
        let mut state = CanvasState::default();
        state.widget_size = Size::new(100.0, 100.0);
        let calls = RefCell::new(0);
        let sink = |_: &str| *calls.borrow_mut() += 1;

        assert!(!RescaleEngine::default().rescale(&mut state, &sink));
        assert!(state.display().is_none());
        assert!(state.scale().is_none());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_status_brackets_the_pass() {
        let mut state = state_with(40, 20, Size::new(20.0, 20.0));
        let seen = RefCell::new(Vec::new());
        let sink = |m: &str| seen.borrow_mut().push(m.to_string());

        RescaleEngine::default().rescale(&mut state, &sink);
        let seen = seen.borrow();
        assert_eq!(seen.first().map(String::as_str), Some(messages::RESCALING));
        assert_eq!(seen.last().map(String::as_str), Some(messages::READY));
    }

    #[test]
    fn test_shift_is_reapplied_to_every_new_display() {
        let mut state = CanvasState::default();
        state.origin = Some(RgbaImage::from_pixel(40, 40, Rgba([255, 0, 0, 255])));
        state.widget_size = Size::new(20.0, 20.0);
        state.shifter.set_delta(HsvDelta::new(120, 0, 0));

        let engine = RescaleEngine::new(ResizeFilter::Nearest);
        engine.rescale(&mut state, &NullStatus);
        assert!(!state.shifter().is_dirty());
        assert_eq!(state.display().expect("display").get_pixel(3, 3).0, [0, 255, 0, 255]);

        state.widget_size = Size::new(10.0, 30.0);
        engine.rescale(&mut state, &NullStatus);
        assert!(!state.shifter().is_dirty());
        let display = state.display().expect("display");
        assert_eq!(display.dimensions(), (10, 10));
        assert_eq!(display.get_pixel(3, 3).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_selection_follows_rescale() {
        let mut state = state_with(1000, 500, Size::new(500.0, 500.0));
        let engine = RescaleEngine::default();
        engine.rescale(&mut state, &NullStatus);

        let image_rect = Rect::new(100.0, 50.0, 300.0, 250.0);
        state.selection.select_image_rect(image_rect);

        for widget in [Size::new(250.0, 400.0), Size::new(900.0, 300.0)] {
            state.widget_size = widget;
            engine.rescale(&mut state, &NullStatus);
            let scale = state.scale().expect("scale");
            let display_rect = state.selection_display_rect().expect("display rect");
            assert_eq!(display_rect, from_image_rect(image_rect, scale));
            assert_eq!(state.selection_image_rect(), Some(image_rect));
        }
    }

}
