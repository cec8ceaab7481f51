//! Pass progress reporting.

use log::debug;

/// Logs how far a pass has got through its snapshot
///
/// A line is emitted only when the integer percentage changes, and only
/// when enabled (verbose runs).
#[derive(Debug)]
pub struct PassProgress {
    pass: &'static str,
    total: usize,
    enabled: bool,
    last_percent: Option<usize>,
}

impl PassProgress {
    pub fn new(pass: &'static str, total: usize, enabled: bool) -> Self {
        Self {
            pass,
            total,
            enabled,
            last_percent: None,
        }
    }

    /// Record that `done` records have been processed
    ///
    /// Returns the percentage if a status line was emitted.
    pub fn tick(&mut self, done: usize) -> Option<usize> {
        if !self.enabled || self.total == 0 {
            return None;
        }

        let percent = done.min(self.total) * 100 / self.total;
        if self.last_percent == Some(percent) {
            return None;
        }

        self.last_percent = Some(percent);
        debug!("{}: {}% ({}/{})", self.pass, percent, done, self.total);
        Some(percent)
    }
}
