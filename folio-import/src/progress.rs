//! Driver progress reporting.

/// Receives one line per target as a driver runs.
pub trait DriverProgress {
    /// A phase starts (e.g. "Scraping Branded listing").
    fn on_phase(&self, message: &str);

    /// Work on one target begins.
    fn on_target(&self, current: usize, total: usize, id: &str);

    /// A field or asset changed for a target.
    fn on_update(&self, id: &str, message: &str);

    /// A target was left alone (already complete, no page, ...).
    fn on_skip(&self, id: &str, reason: &str);

    /// A step failed for a target; the driver carries on.
    fn on_failure(&self, id: &str, message: &str);

    /// The driver finished.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl DriverProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_target(&self, _current: usize, _total: usize, _id: &str) {}
    fn on_update(&self, _id: &str, _message: &str) {}
    fn on_skip(&self, _id: &str, _reason: &str) {}
    fn on_failure(&self, _id: &str, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl DriverProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_target(&self, current: usize, total: usize, id: &str) {
        log::info!("  [{}/{}] {}", current, total, id);
    }

    fn on_update(&self, id: &str, message: &str) {
        log::info!("    {}: {}", id, message);
    }

    fn on_skip(&self, id: &str, reason: &str) {
        log::debug!("    {}: skipped ({})", id, reason);
    }

    fn on_failure(&self, id: &str, message: &str) {
        log::warn!("    {}: {}", id, message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
