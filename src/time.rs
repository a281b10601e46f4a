//! Time abstraction traits for platform-agnostic timing.
//!
//! The debounce engines only ever ask two questions of a clock: "what time is
//! it" and "how long since then". Implement [`TimeSource`] for your timer and
//! the engines work unchanged on any platform.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    ///
    /// Must never go backwards, but may wrap around if the instant type does.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations backed by a wrapping counter must use wrapping
    /// subtraction so the result stays correct across the wrap.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Returns true if at least `window` has passed between `since` and `now`.
///
/// An unset `since` counts as "long ago".
#[inline]
pub(crate) fn has_elapsed<I: TimeInstant>(now: I, since: Option<I>, window: I::Duration) -> bool {
    match since {
        Some(earlier) => now.duration_since(earlier).as_millis() >= window.as_millis(),
        None => true,
    }
}

/// Millisecond duration matching the [`Millis`] counter width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u32);

impl TimeDuration for MillisDuration {
    const ZERO: Self = MillisDuration(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        // Longer windows than the counter can express saturate.
        MillisDuration(u32::try_from(millis).unwrap_or(u32::MAX))
    }
}

/// Instant from a free-running 32-bit millisecond counter.
///
/// This is the shape of the usual SysTick `millis()` counter: it wraps after
/// ~49.7 days, which `duration_since` handles transparently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// Returns the raw counter value.
    pub fn as_millis(&self) -> u32 {
        self.0
    }
}

impl TimeInstant for Millis {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0.wrapping_sub(earlier.0))
    }
}
