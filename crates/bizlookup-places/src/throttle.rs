//! Minimum spacing between provider requests.
//!
//! A single [`RequestThrottle`] is shared by every in-flight resolution, so
//! the configured delay limits the aggregate request rate no matter how many
//! queries run concurrently.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

pub struct RequestThrottle {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// A throttle that never waits.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the caller may start its request.
    ///
    /// Slots are handed out in call order; the lock is released before
    /// sleeping so waiting callers do not block slot reservation.
    pub async fn acquire(&self) {
        if self.min_interval.is_zero() {
            return;
        }
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(reserved) if reserved > now => reserved,
                _ => now,
            };
            *next = Some(slot + self.min_interval);
            slot
        };
        tokio::time::sleep_until(slot).await;
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::disabled()
    }
}
