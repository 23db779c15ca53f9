//! Clock Port
//!
//! Time source and timer used for the minimum-spinner rule. Timestamps are
//! plain milliseconds so the browser build can back them with `Date.now()`.

use std::time::Duration;

use async_trait::async_trait;

/// Shortest time a loading spinner stays visible
pub const MIN_SPINNER: Duration = Duration::from_millis(200);

#[async_trait(?Send)]
pub trait Clock {
    /// Monotonic-enough milliseconds
    fn now_ms(&self) -> f64;

    async fn sleep(&self, duration: Duration);
}

/// Remaining time to reach `minimum`, or `None` if it already elapsed
pub fn remaining(started_ms: f64, now_ms: f64, minimum: Duration) -> Option<Duration> {
    let elapsed = (now_ms - started_ms).max(0.0);
    let min_ms = minimum.as_millis() as f64;
    if elapsed < min_ms {
        Some(Duration::from_millis((min_ms - elapsed).ceil() as u64))
    } else {
        None
    }
}

/// `tokio`-backed clock for native builds
#[cfg(feature = "native")]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

#[cfg(feature = "native")]
impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

#[cfg(feature = "native")]
impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "native")]
#[async_trait(?Send)]
impl Clock for TokioClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_pads_fast_operations() {
        let min = Duration::from_millis(200);
        assert_eq!(remaining(1000.0, 1050.0, min), Some(Duration::from_millis(150)));
        assert_eq!(remaining(1000.0, 1200.0, min), None);
        assert_eq!(remaining(1000.0, 1500.0, min), None);
    }

    #[test]
    fn test_remaining_handles_clock_going_backwards() {
        let min = Duration::from_millis(200);
        assert_eq!(remaining(1000.0, 900.0, min), Some(Duration::from_millis(200)));
    }
}
