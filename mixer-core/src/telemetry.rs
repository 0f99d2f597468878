//! Telemetry Scheduler: fixed-rate level report of all slider values.

/// Rate limiter for the periodic analog report.
///
/// The report is unconditional once due: it always carries the latest
/// samples, whether or not anything moved since the last one.
#[derive(Debug, Clone)]
pub struct TelemetryScheduler {
    interval_ms: u64,
    /// Time of the last emitted report, `None` before the first.
    last_emit: Option<u64>,
}

impl TelemetryScheduler {
    /// Create a scheduler that is due on its first poll.
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_emit: None,
        }
    }

    /// Decide whether a report goes out now.
    ///
    /// Returns the samples to report and restarts the interval when due.
    /// With no sliders configured nothing is ever due and the clock is left
    /// untouched.
    pub fn poll<'a>(&mut self, now_ms: u64, samples: &'a [u16]) -> Option<&'a [u16]> {
        if samples.is_empty() {
            return None;
        }

        let due = self
            .last_emit
            .map_or(true, |t| now_ms.saturating_sub(t) >= self.interval_ms);

        if due {
            self.last_emit = Some(now_ms);
            Some(samples)
        } else {
            None
        }
    }

    /// Reporting interval in milliseconds.
    #[inline]
    #[must_use]
    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
