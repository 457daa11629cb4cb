//! The image canvas widget.
//!
//! [`ImageCanvas`] ties the pieces together: it owns the [`CanvasState`],
//! runs the [`RescaleEngine`] on load/resize/HSV changes, feeds mouse input
//! to the [`SelectionController`](crate::selection::SelectionController) and
//! crops the exported selection. Hosts drive it either through the direct
//! `on_*` methods (widget-local coordinates) or through [`Widget::on_event`]
//! (window coordinates plus the widget's bounds).


use image::RgbaImage;
use selview_ui::{Bounds, Callback, Color, Event, MouseButton, MouseButtons, Point, Size, Surface, Widget};

use crate::config::CanvasConfig;
use crate::coords::{Rect, Scale};
use crate::error::CanvasError;
use crate::export::export_selection;
use crate::hsv::{HsvDelta, HsvShifter};
use crate::rescale::RescaleEngine;
use crate::selection::Transition;
use crate::state::CanvasState;
use crate::status::{LogStatus, StatusSink};

/// Outline of the selection overlay.
pub const SELECTION_BORDER: Color = Color::from_rgba8(0, 0, 255, 128);

/// Fill of the selection overlay.
pub const SELECTION_FILL: Color = Color::from_rgba8(0, 0, 128, 128);

/// Payload of the selection-changed notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionChange {
    pub transition: Transition,
    /// Selection in origin-image coordinates, normalized
    pub image_rect: Rect,
    /// True until the primary button is released
    pub dragging: bool,
}

/// Interactive image view with rubber-band selection and HSV shifting.
pub struct ImageCanvas<M> {
    state: CanvasState,
    engine: RescaleEngine,
    status: Box<dyn StatusSink>,
    on_selection_change: Callback<SelectionChange, M>,
    pixel_budget: f64,
    reset_hsv_on_load: bool,
    placeholder: String,
    needs_redraw: bool,
}

impl<M> ImageCanvas<M> {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            state: CanvasState::new(
                Size::default(),
                HsvShifter::new(config.progress_step_percent),
            ),
            engine: RescaleEngine::new(config.resize_filter),
            status: Box::new(LogStatus),
            on_selection_change: Callback::none(),
            pixel_budget: config.selection_pixel_budget,
            reset_hsv_on_load: config.reset_hsv_on_load,
            placeholder: config.placeholder_text.clone(),
            needs_redraw: true,
        }
    }

    /// Set the initial widget size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.on_resize(size);
        self
    }

    /// Route progress messages to `status` instead of the log.
    pub fn with_status(mut self, status: impl StatusSink + 'static) -> Self {
        self.status = Box::new(status);
        self
    }

    /// Register the selection-changed handler.
    pub fn on_selection_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(SelectionChange) -> M + 'static,
    {
        self.on_selection_change = Callback::new(handler);
        self
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn has_image(&self) -> bool {
        self.state.origin.is_some()
    }

    pub fn scale(&self) -> Option<Scale> {
        self.state.scale
    }

    pub fn is_dragging(&self) -> bool {
        self.state.selection.is_dragging()
    }

    pub fn selection_image_rect(&self) -> Option<Rect> {
        self.state.selection_image_rect()
    }

    pub fn selection_display_rect(&self) -> Option<Rect> {
        self.state.selection_display_rect()
    }

    /// Whether something changed since the last [`take_redraw`](Self::take_redraw).
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Consume the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Show a new image. Clears the selection and rebuilds the display.
    ///
    /// The active HSV shift carries over to the new image unless the canvas
    /// was configured with `reset_hsv_on_load`.
    pub fn load_image(&mut self, image: RgbaImage) {
        log::info!("Loading {}x{} image", image.width(), image.height());
        self.state.replace_origin(image);
        if self.reset_hsv_on_load {
            self.state.shifter.set_delta(HsvDelta::IDENTITY);
        }
        self.rescale();
    }

    /// The widget was resized to `size` (widget-local pixels).
    pub fn on_resize(&mut self, size: Size) {
        self.state.widget_size = size;
        self.rescale();
    }

    fn rescale(&mut self) {
        self.engine.rescale(&mut self.state, self.status.as_ref());
        self.needs_redraw = true;
    }

    /// Replace the active HSV shift and recolor the display.
    pub fn set_hsv_shift(&mut self, delta: impl Into<HsvDelta>) {
        let delta = delta.into();
        log::debug!("HSV shift set to ({})", delta);
        self.state.shifter.set_delta(delta);
        self.rescale();
    }

    /// [`set_hsv_shift`](Self::set_hsv_shift) from loosely shaped input.
    ///
    /// Fails without touching any state unless exactly three components are
    /// given.
    pub fn set_hsv_shift_components(&mut self, components: &[i32]) -> Result<(), CanvasError> {
        let delta = HsvDelta::try_from(components)?;
        self.set_hsv_shift(delta);
        Ok(())
    }

    pub fn hsv_shift(&self) -> HsvDelta {
        self.state.shifter.delta()
    }

    /// Programmatically select `rect` (origin-image coordinates).
    /// Ignored when no image is loaded.
    pub fn set_selection(&mut self, rect: Rect) {
        if !self.has_image() {
            return;
        }
        self.state.selection.select_image_rect(rect);
        self.needs_redraw = true;
    }

    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
        self.needs_redraw = true;
    }

    /// Mouse button pressed at `position` (widget-local).
    pub fn on_press(&mut self, position: Point, button: MouseButton) -> Option<M> {
        if !self.has_image() {
            return None;
        }
        self.needs_redraw = true;
        let transition = self
            .state
            .selection
            .press(position, button, self.state.scale);
        self.notify(transition)
    }

    /// Pointer moved to `position` (widget-local) with `held` buttons down.
    pub fn on_move(&mut self, position: Point, held: MouseButtons) -> Option<M> {
        if !self.has_image() {
            return None;
        }
        self.needs_redraw = true;
        let transition = self
            .state
            .selection
            .drag_to(position, held, self.state.scale);
        self.notify(transition)
    }

    /// Mouse button released at `position` (widget-local).
    pub fn on_release(&mut self, position: Point, button: MouseButton) -> Option<M> {
        if !self.has_image() {
            return None;
        }
        self.needs_redraw = true;
        let transition = self
            .state
            .selection
            .release(position, button, self.state.scale);
        self.notify(transition)
    }

    fn notify(&self, transition: Option<Transition>) -> Option<M> {
        let transition = transition?;
        let image_rect = self.state.selection_image_rect()?;
        log::debug!("Selection {:?}: {:?}", transition, image_rect);
        self.on_selection_change.call(SelectionChange {
            transition,
            image_rect,
            dragging: self.is_dragging(),
        })
    }

    /// The selected part of the origin image.
    ///
    /// While a drag is in progress, crops at or above the configured pixel
    /// budget are downsampled; after release the crop is full resolution.
    /// `None` with no image, no selection, or a selection covering no pixels.
    pub fn selected(&self) -> Option<RgbaImage> {
        let origin = self.state.origin.as_ref()?;
        let rect = self.state.selection_image_rect()?;
        export_selection(
            origin,
            rect,
            self.is_dragging(),
            self.pixel_budget,
            self.engine.filter(),
        )
    }

    /// Paint the canvas with its top-left corner at the surface origin.
    pub fn render(&self, surface: &mut dyn Surface) {
        self.paint(surface, Bounds::from_size(self.state.widget_size));
    }

    fn paint(&self, surface: &mut dyn Surface, bounds: Bounds) {
        if !self.has_image() {
            surface.draw_centered_text(&self.placeholder, bounds);
            return;
        }
        if let Some(display) = self.state.display.as_ref() {
            surface.draw_pixel_buffer(display, bounds.origin());
        }
        if let Some(rect) = self.state.selection_display_rect() {
            let local = rect.to_bounds();
            let overlay = Bounds::new(
                bounds.x + local.x,
                bounds.y + local.y,
                local.width,
                local.height,
            );
            surface.draw_filled_rect(overlay, SELECTION_BORDER, SELECTION_FILL);
        }
    }
}

impl<M> Widget<M> for ImageCanvas<M> {
    fn draw(&self, surface: &mut dyn Surface, bounds: Bounds) {
        self.paint(surface, bounds);
    }

    fn on_event(&mut self, event: &Event, bounds: Bounds) -> Option<M> {
        let origin = bounds.origin();
        match event {
            Event::MousePressed { button, position } => {
                self.on_press(position.relative_to(origin), *button)
            }
            Event::MouseMoved { position, held } => {
                self.on_move(position.relative_to(origin), *held)
            }
            Event::MouseReleased { button, position } => {
                self.on_release(position.relative_to(origin), *button)
            }
            Event::Resized { size } => {
                self.on_resize(*size);
                None
            }
        }
    }
}

impl<M> std::fmt::Debug for ImageCanvas<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCanvas")
            .field("state", &self.state)
            .field("engine", &self.engine)
            .field("on_selection_change", &self.on_selection_change)
            .field("pixel_budget", &self.pixel_budget)
            .field("needs_redraw", &self.needs_redraw)
            .finish_non_exhaustive()
    }
}
