//! Minimal rate-limiting debouncer with an optional sticky latch.

use crate::stable::DEFAULT_EXECUTE_FREQUENCY_MS;
use crate::time::{TimeDuration, TimeInstant, TimeSource, has_elapsed};

/// Runs an action at most once per bounce window.
///
/// Two independent guards are kept: the rate-limit timestamp checked by
/// [`bounce`](Self::bounce), and a "perma-bounced" latch checked by
/// [`perma_bounce`](Self::perma_bounce) that stays set until
/// [`reset`](Self::reset). Used where start/stop stabilisation is not needed,
/// such as throttling sensor reads or status reports.
pub struct Debouncer<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    bounce_time: I::Duration,
    last_bounce: Option<I>,
    perma_bounced: bool,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> Debouncer<'t, I, T> {
    /// Creates a debouncer with the default 1 second window.
    pub fn new(time_source: &'t T) -> Self {
        Self::with_frequency(
            time_source,
            I::Duration::from_millis(DEFAULT_EXECUTE_FREQUENCY_MS),
        )
    }

    /// Creates a debouncer that waits `bounce_time` between invocations.
    pub fn with_frequency(time_source: &'t T, bounce_time: I::Duration) -> Self {
        Self {
            time_source,
            bounce_time,
            last_bounce: None,
            perma_bounced: false,
        }
    }

    /// Runs `action` unless the last invocation is inside the bounce window.
    pub fn bounce<F: FnOnce()>(&mut self, action: F) {
        let now = self.time_source.now();
        if !self.is_bounced_at(now) {
            action();
            self.mark_bounced(now);
        }
    }

    /// Runs `action` only if nothing has run since construction or the last
    /// [`reset`](Self::reset).
    pub fn perma_bounce<F: FnOnce()>(&mut self, action: F) {
        if !self.perma_bounced {
            let now = self.time_source.now();
            action();
            self.mark_bounced(now);
        }
    }

    /// Returns true if [`bounce`](Self::bounce) would currently skip its action.
    pub fn is_bounced(&self) -> bool {
        self.is_bounced_at(self.time_source.now())
    }

    /// Returns true if an action has run since construction or the last reset.
    pub fn is_perma_bounced(&self) -> bool {
        self.perma_bounced
    }

    /// Clears both the rate-limit timestamp and the latch.
    pub fn reset(&mut self) {
        self.last_bounce = None;
        self.perma_bounced = false;
    }

    /// Returns the configured bounce window.
    pub fn bounce_time(&self) -> I::Duration {
        self.bounce_time
    }

    fn is_bounced_at(&self, now: I) -> bool {
        !has_elapsed(now, self.last_bounce, self.bounce_time)
    }

    fn mark_bounced(&mut self, now: I) {
        self.last_bounce = Some(now);
        self.perma_bounced = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{Millis, MillisDuration};
    use core::cell::Cell;

    struct MockTimeSource {
        current_time: Cell<u32>,
    }

    impl TimeSource<Millis> for MockTimeSource {
        fn now(&self) -> Millis {
            Millis(self.current_time.get())
        }
    }

    #[test]
    fn fresh_debouncer_is_not_bounced() {
        let timer = MockTimeSource {
            current_time: Cell::new(0),
        };
        let debouncer = Debouncer::with_frequency(&timer, MillisDuration(500));
        assert!(!debouncer.is_bounced());
        assert!(!debouncer.is_perma_bounced());
    }

    #[test]
    fn bounce_sets_both_guards() {
        let timer = MockTimeSource {
            current_time: Cell::new(0),
        };
        let mut debouncer = Debouncer::with_frequency(&timer, MillisDuration(500));
        debouncer.bounce(|| {});
        assert!(debouncer.is_bounced());
        assert!(debouncer.is_perma_bounced());

        timer.current_time.set(500);
        assert!(!debouncer.is_bounced());
        assert!(debouncer.is_perma_bounced());
    }

    #[test]
    fn default_window_is_one_second() {
        let timer = MockTimeSource {
            current_time: Cell::new(0),
        };
        let debouncer = Debouncer::new(&timer);
        assert_eq!(debouncer.bounce_time(), MillisDuration(1000));
    }
}
