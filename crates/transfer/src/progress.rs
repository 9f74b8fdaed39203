use std::collections::VecDeque;
use std::time::{Duration, Instant};

use vidpush_protocol::ProgressEvent;

/// Default sliding window for rate calculation.
const DEFAULT_WINDOW: Duration = Duration::from_secs(10);

/// Default cap on retained samples.
const DEFAULT_MAX_SAMPLES: usize = 64;

#[derive(Debug, Clone, Copy)]
struct Sample {
    bytes_uploaded: u64,
    at: Instant,
}

/// Estimates upload rate from the cumulative byte counts of progress events.
///
/// Samples older than the window are pruned on every observation, so the
/// rate reflects recent throughput rather than the whole upload.
#[derive(Debug)]
pub struct SpeedCalculator {
    samples: VecDeque<Sample>,
    window: Duration,
    max_samples: usize,
}

impl Default for SpeedCalculator {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl SpeedCalculator {
    /// Creates a calculator.
    ///
    /// - `window`: time window for the rate (default 10 s).
    /// - `max_samples`: maximum retained samples (default 64).
    pub fn new(window: Option<Duration>, max_samples: Option<usize>) -> Self {
        Self {
            samples: VecDeque::new(),
            window: window.unwrap_or(DEFAULT_WINDOW),
            max_samples: max_samples.unwrap_or(DEFAULT_MAX_SAMPLES).max(2),
        }
    }

    /// Records a progress event observed now.
    pub fn observe(&mut self, event: &ProgressEvent) {
        self.observe_at(event.bytes_uploaded, Instant::now());
    }

    fn observe_at(&mut self, bytes_uploaded: u64, at: Instant) {
        self.samples.push_back(Sample { bytes_uploaded, at });

        // Keep at least two samples so a slow upload still has a rate.
        while self.samples.len() > 2
            && self
                .samples
                .front()
                .is_some_and(|s| at.duration_since(s.at) > self.window)
        {
            self.samples.pop_front();
        }
        while self.samples.len() > self.max_samples {
            self.samples.pop_front();
        }
    }

    /// Average rate in bytes/second within the window.
    ///
    /// Returns 0.0 with fewer than two samples.
    pub fn bytes_per_second(&self) -> f64 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let elapsed = last.at.duration_since(first.at);
        if elapsed.is_zero() {
            return 0.0;
        }
        let bytes = last.bytes_uploaded.saturating_sub(first.bytes_uploaded);
        bytes as f64 / elapsed.as_secs_f64()
    }

    /// Estimated time to upload `remaining_bytes`, or `None` without a rate.
    pub fn eta(&self, remaining_bytes: u64) -> Option<Duration> {
        let speed = self.bytes_per_second();
        if speed <= 0.0 {
            return None;
        }
        Some(Duration::from_secs_f64(remaining_bytes as f64 / speed))
    }
}
