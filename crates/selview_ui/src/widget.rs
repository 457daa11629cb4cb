//! Widget trait

use crate::event::Event;
use crate::layout::Bounds;
use crate::renderer::Surface;

/// A UI element embedded in a host-managed area of a window.
///
/// `bounds` is the area the host assigned to the widget, in window space.
pub trait Widget<M> {
    /// Paint the widget onto the surface
    fn draw(&self, surface: &mut dyn Surface, bounds: Bounds);

    /// Handle an event, optionally producing a message for the host
    fn on_event(&mut self, event: &Event, bounds: Bounds) -> Option<M> {
        let _ = (event, bounds);
        None
    }
}
