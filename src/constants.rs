//! Global constants for selview

/// Pixel count above which a selection exported mid-drag is downsampled.
pub const DEFAULT_SELECTION_PIXEL_BUDGET: f64 = 700_000.0 / 30.0;

/// Minimum percentage between two recolor progress reports.
pub const DEFAULT_PROGRESS_STEP_PERCENT: u8 = 5;

/// Label drawn while no image is loaded.
pub const PLACEHOLDER_TEXT: &str = "Open image";

/// Status messages reported around a rescale pass.
pub mod status {
    pub const RESCALING: &str = "Rescaling...";
    pub const READY: &str = "Ready";
}

/// Default size of the headless render target
pub const DEFAULT_WIDGET_WIDTH: u32 = 800;
pub const DEFAULT_WIDGET_HEIGHT: u32 = 600;

/// Default generated test image size
pub const DEFAULT_TEST_WIDTH: u32 = 1024;
pub const DEFAULT_TEST_HEIGHT: u32 = 768;
