//! selview_ui - backend-agnostic widget plumbing for selview
//!
//! Geometry, input events, drawing surfaces and handler callbacks shared by
//! widgets that are embedded in a host window. The host decodes its native
//! events into [`Event`]s and supplies a [`Surface`] to paint on.

mod callback;
mod event;
mod layout;
mod raster;
mod renderer;
mod widget;

pub use callback::Callback;
pub use event::{Event, MouseButton, MouseButtons};
pub use layout::{Bounds, Point, Size};
pub use raster::PixmapSurface;
pub use renderer::{Color, DrawCommand, RecordingSurface, Surface};
pub use widget::Widget;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::callback::Callback;
    pub use crate::event::{Event, MouseButton, MouseButtons};
    pub use crate::layout::{Bounds, Point, Size};
    pub use crate::renderer::{Color, Surface};
    pub use crate::widget::Widget;
}
