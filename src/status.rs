//! Status reporting towards the host's status bar.

/// Receives short, human-readable progress messages.
///
/// Reporting is fire-and-forget: implementations must not block and any
/// failure on their side is swallowed.
pub trait StatusSink {
    fn report_progress(&self, message: &str);
}

impl<F> StatusSink for F
where
    F: Fn(&str),
{
    fn report_progress(&self, message: &str) {
        self(message)
    }
}

/// Forwards status messages to the log at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStatus;

impl StatusSink for LogStatus {
    fn report_progress(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStatus;

impl StatusSink for NullStatus {
    fn report_progress(&self, _message: &str) {}
}
