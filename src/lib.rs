//! selview - an embeddable image canvas
//!
//! Shows an image scaled to fit its widget, lets the user drag out a
//! rectangular selection and exports the selected region of the full
//! resolution image. A hue/saturation/value shift can be applied to the
//! displayed pixels.

pub mod canvas;
pub mod config;
pub mod constants;
pub mod coords;
pub mod error;
pub mod export;
pub mod hsv;
pub mod logging;
pub mod rescale;
pub mod selection;
pub mod state;
pub mod status;
pub mod test_image;

pub use canvas::{ImageCanvas, SelectionChange};
pub use config::{CanvasConfig, ConfigError, LogLevel};
pub use coords::{Rect, Scale};
pub use error::CanvasError;
pub use hsv::HsvDelta;
pub use rescale::ResizeFilter;
pub use selection::Transition;
pub use status::StatusSink;
