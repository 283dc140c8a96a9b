//! Time source and suspension seam.
//!
//! Every pause in the pipeline (warm-up pause, scheduled wait, quote spacing)
//! goes through a [`Clock`], so tests can run a full pipeline against a
//! [`ManualClock`] without sleeping in real time.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use time::OffsetDateTime;

/// Wall-clock reader plus a non-cancelable sleep.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> OffsetDateTime;

    fn sleep<'a>(&'a self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// Real clock backed by the system time and the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn sleep<'a>(&'a self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Deterministic clock for offline tests.
///
/// `sleep` returns immediately, records the requested duration and moves
/// the clock forward by that amount.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(start),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += duration;
    }

    /// Every duration passed to `sleep`, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn total_slept(&self) -> Duration {
        self.sleeps().into_iter().sum()
    }
}

impl Clock for ManualClock {
    fn now_utc(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sleep<'a>(&'a self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        self.advance(duration);
        Box::pin(async {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[tokio::test]
    async fn manual_clock_advances_on_sleep() {
        let clock = ManualClock::new(datetime!(2024-05-02 03:40:00 UTC));

        clock.sleep(Duration::from_secs(90)).await;
        clock.sleep(Duration::from_millis(500)).await;

        assert_eq!(clock.now_utc(), datetime!(2024-05-02 03:41:30.5 UTC));
        assert_eq!(
            clock.sleeps(),
            vec![Duration::from_secs(90), Duration::from_millis(500)]
        );
        assert_eq!(clock.total_slept(), Duration::from_millis(90_500));
    }
}
