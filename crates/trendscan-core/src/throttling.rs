use std::sync::Arc;
use std::time::Duration;

use governor::clock::Clock as LimiterClock;
use governor::middleware::NoOpMiddleware;
use governor::nanos::Nanos;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use time::OffsetDateTime;

use crate::clock::Clock;

type DirectRateLimiter =
    RateLimiter<NotKeyed, InMemoryState, ClockAdapter, NoOpMiddleware<Nanos>>;

/// Reads the injected [`Clock`] as nanoseconds since the limiter was built.
#[derive(Clone)]
struct ClockAdapter {
    clock: Arc<dyn Clock>,
    origin: OffsetDateTime,
}

impl LimiterClock for ClockAdapter {
    type Instant = Nanos;

    fn now(&self) -> Nanos {
        let elapsed =
            Duration::try_from(self.clock.now_utc() - self.origin).unwrap_or(Duration::ZERO);
        Nanos::from(elapsed)
    }
}

/// Request throttle for the live-quote loop.
///
/// Every request is followed by a fixed, unconditional pause. On top of that
/// a single-cell GCRA quota guarantees two request starts are never closer
/// than the pause, whatever the caller does between them. A zero pause
/// disables both.
pub struct QuoteThrottle {
    clock: Arc<dyn Clock>,
    pause: Duration,
    limiter: Option<(DirectRateLimiter, ClockAdapter)>,
}

impl QuoteThrottle {
    pub fn new(clock: Arc<dyn Clock>, pause: Duration) -> Self {
        let limiter = Quota::with_period(pause).map(|quota| {
            let adapter = ClockAdapter {
                clock: clock.clone(),
                origin: clock.now_utc(),
            };
            (RateLimiter::direct_with_clock(quota, &adapter), adapter)
        });

        Self {
            clock,
            pause,
            limiter,
        }
    }

    /// Waits until the quota admits another request start.
    pub async fn until_ready(&self) {
        let Some((limiter, adapter)) = &self.limiter else {
            return;
        };
        while let Err(not_until) = limiter.check() {
            let wait = not_until.wait_time_from(adapter.now());
            self.clock.sleep(wait).await;
        }
    }

    /// Fixed pause taken after every request, including the last one.
    pub async fn pause(&self) {
        if !self.pause.is_zero() {
            self.clock.sleep(self.pause).await;
        }
    }
}
