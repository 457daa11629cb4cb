//! Logger setup for native entry points.

use log::LevelFilter;

/// Install an env_logger at `level`.
///
/// `RUST_LOG` still overrides per-module levels. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_logging(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();

    if result.is_ok() {
        log::debug!("Logging initialized at {}", level);
    }
}
