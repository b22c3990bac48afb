//! Terminal progress for driver runs.
//!
//! On a terminal one spinner line shows the current target and per-target
//! results are logged above it, so the scrollback keeps one line per change.
//! Piped or redirected output gets plain log lines instead.

use std::time::Duration;

use folio_import::{DriverProgress, LogProgress};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// The reporter for one driver run.
pub(crate) fn driver_progress(quiet: bool, terminal: bool) -> Box<dyn DriverProgress> {
    if terminal {
        Box::new(SpinnerProgress::new(quiet))
    } else {
        Box::new(LogProgress)
    }
}

pub(crate) struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    /// When `quiet` is true the spinner is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new_spinner()
        };
        bar.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        Self { bar }
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl DriverProgress for SpinnerProgress {
    fn on_phase(&self, message: &str) {
        self.bar.suspend(|| {
            log::info!("{}", message.if_supports_color(Stdout, |t| t.bold()));
        });
    }

    fn on_target(&self, current: usize, total: usize, id: &str) {
        if self.bar.is_finished() {
            self.bar.reset();
        }
        self.bar.enable_steady_tick(Duration::from_millis(100));
        self.bar.set_message(format!("[{}/{}] {}", current, total, id));
    }

    fn on_update(&self, id: &str, message: &str) {
        self.bar.suspend(|| {
            log::info!(
                "  {} {}: {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                id,
                message,
            );
        });
    }

    fn on_skip(&self, id: &str, reason: &str) {
        self.bar.suspend(|| {
            log::debug!(
                "  {} {}: {}",
                "-".if_supports_color(Stdout, |t| t.dimmed()),
                id,
                reason.if_supports_color(Stdout, |t| t.dimmed()),
            );
        });
    }

    fn on_failure(&self, id: &str, message: &str) {
        self.bar.suspend(|| {
            log::warn!(
                "  {} {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.bright_red()),
                id,
                message,
            );
        });
    }

    fn on_complete(&self, message: &str) {
        self.bar.disable_steady_tick();
        self.bar.set_message("");
        self.bar.finish_and_clear();
        log::info!("{}", message);
    }
}
