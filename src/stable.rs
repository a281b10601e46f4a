//! Stable debounce engine with start/stop stabilisation, rate limiting,
//! sticky single-shot mode and post-reset cooldown.
//!
//! Provides [`StableDebouncer`], the state machine every button path of the
//! thermostat is built on. The caller samples its raw condition once per
//! control-loop tick and calls exactly one of [`StableDebouncer::execute`]
//! (condition true) or [`StableDebouncer::reset`] (condition false). The
//! engine alone decides whether "now" is a valid moment to run the action.
//!
//! ```text
//!            execute            execute (past start delay)
//!   Idle ─────────────▶ StartDelay ──────────────▶ Executing ◀──┐
//!    ▲        reset        │                        │  │        │ execute
//!    └─────────────────────┘              sticky ◀──┘  │ reset  │
//!    ▲                                    Executed ────┴──▶ StopDelay
//!    │  cooldown elapsed                                        │ past stop delay
//!    └────────────────────── ResetCooldown ◀────────────────────┘
//! ```

use crate::time::{TimeDuration, TimeInstant, TimeSource, has_elapsed};

/// Default spacing between two invocations while a request stream is held.
pub const DEFAULT_EXECUTE_FREQUENCY_MS: u64 = 1000;

/// The current state of a [`StableDebouncer`].
///
/// Exactly one state is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// No activity; nothing pending.
    Idle,
    /// Execute requests have started but are not yet trusted.
    StartDelay,
    /// Steady state; the action may run, subject to the rate limit.
    Executing,
    /// Sticky engine that already ran its action this cycle.
    Executed,
    /// Reset requests have started but are not yet trusted. The action may
    /// still run here unless the engine is sticky.
    StopDelay,
    /// A reset completed; execute requests are ignored until the cooldown ends.
    ResetCooldown,
}

/// Timing configuration of a [`StableDebouncer`].
///
/// Zero windows are allowed and mean "no wait". A zero `execute_frequency`
/// makes every tick in `Executing`/`StopDelay` eligible; picking a sensible
/// value is the caller's job, nothing is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StableDebounceConfig<D> {
    /// Minimum spacing between two consecutive invocations.
    pub execute_frequency: D,
    /// Uninterrupted execute requests required before the first invocation.
    pub start_delay: D,
    /// Uninterrupted reset requests required before a reset is real.
    pub stop_delay: D,
    /// Idle time after a completed reset before a new cycle may start.
    pub reset_cooldown: D,
    /// Run the action at most once per execute/reset cycle.
    pub sticky: bool,
}

impl<D: TimeDuration> Default for StableDebounceConfig<D> {
    fn default() -> Self {
        Self {
            execute_frequency: D::from_millis(DEFAULT_EXECUTE_FREQUENCY_MS),
            start_delay: D::ZERO,
            stop_delay: D::ZERO,
            reset_cooldown: D::ZERO,
            sticky: false,
        }
    }
}

/// Debounces an action behind start/stop delays, a rate limit and a cooldown.
///
/// The engine holds no heap memory and only reads the shared clock. It is
/// not reentrant: an action must not call back into the same engine.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct StableDebouncer<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    config: StableDebounceConfig<I::Duration>,
    state: DebounceState,
    executed: bool,
    execute_start: Option<I>,
    last_execution: Option<I>,
    reset_start: Option<I>,
    last_reset: Option<I>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> StableDebouncer<'t, I, T> {
    /// Creates an idle engine with the default configuration.
    pub fn new(time_source: &'t T) -> Self {
        Self::with_config(time_source, StableDebounceConfig::default())
    }

    /// Creates an idle engine that repeats at most once per `execute_frequency`.
    pub fn with_frequency(time_source: &'t T, execute_frequency: I::Duration) -> Self {
        Self::with_config(
            time_source,
            StableDebounceConfig {
                execute_frequency,
                ..StableDebounceConfig::default()
            },
        )
    }

    /// Creates an idle engine from a full configuration.
    pub fn with_config(time_source: &'t T, config: StableDebounceConfig<I::Duration>) -> Self {
        Self {
            time_source,
            config,
            state: DebounceState::Idle,
            executed: false,
            execute_start: None,
            last_execution: None,
            reset_start: None,
            last_reset: None,
        }
    }

    /// Sets how long execute requests must persist before the first invocation.
    pub fn set_start_delay(&mut self, start_delay: I::Duration) {
        self.config.start_delay = start_delay;
    }

    /// Sets how long reset requests must persist before a reset completes.
    pub fn set_stop_delay(&mut self, stop_delay: I::Duration) {
        self.config.stop_delay = stop_delay;
    }

    /// Sets the idle time enforced after a completed reset.
    pub fn set_reset_cooldown(&mut self, reset_cooldown: I::Duration) {
        self.config.reset_cooldown = reset_cooldown;
    }

    /// Enables or disables single-shot-per-cycle mode.
    pub fn set_sticky(&mut self, sticky: bool) {
        self.config.sticky = sticky;
    }

    /// Requests the action. Call once per tick while the raw condition holds.
    ///
    /// Advances the state machine, then runs `action` if the engine is in
    /// `Executing` or `StopDelay`, the rate limit has elapsed, and a sticky
    /// engine has not already run it this cycle.
    pub fn execute<F: FnOnce()>(&mut self, action: F) {
        let now = self.time_source.now();
        self.advance_execute(now);

        if self.should_execute(now) {
            action();
            self.executed = true;
            self.last_execution = Some(now);
        }
    }

    /// Signals that the raw condition is false. Call once per tick instead of
    /// [`execute`](Self::execute). Never runs the action.
    pub fn reset(&mut self) {
        let now = self.time_source.now();
        self.advance_reset(now);
    }

    /// Returns the current state.
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Returns the timing configuration.
    pub fn config(&self) -> &StableDebounceConfig<I::Duration> {
        &self.config
    }

    /// Returns true if the action ran during the current cycle.
    pub fn has_executed(&self) -> bool {
        self.executed
    }

    fn advance_execute(&mut self, now: I) {
        match self.state {
            DebounceState::Idle => {
                self.execute_start = Some(now);
                let next = if self.past_start(now) {
                    DebounceState::Executing
                } else {
                    DebounceState::StartDelay
                };
                self.transition(next);
            }
            DebounceState::StartDelay => {
                if self.past_start(now) {
                    self.transition(DebounceState::Executing);
                }
            }
            DebounceState::Executing => {
                if self.config.sticky {
                    self.transition(DebounceState::Executed);
                }
            }
            DebounceState::Executed => {}
            DebounceState::StopDelay => {
                // Release was bounce; the press is still trusted.
                self.reset_start = None;
                let next = if self.config.sticky {
                    DebounceState::Executed
                } else {
                    DebounceState::Executing
                };
                self.transition(next);
            }
            DebounceState::ResetCooldown => {
                if self.past_cooldown(now) {
                    // Re-enter the start flow on this same tick.
                    self.transition(DebounceState::Idle);
                    self.advance_execute(now);
                }
            }
        }
    }

    fn advance_reset(&mut self, now: I) {
        match self.state {
            DebounceState::Idle => {}
            DebounceState::StartDelay => {
                self.execute_start = None;
                self.transition(DebounceState::Idle);
            }
            DebounceState::Executing | DebounceState::Executed => {
                self.reset_start = Some(now);
                if self.past_stop(now) {
                    self.complete_reset(now);
                } else {
                    self.transition(DebounceState::StopDelay);
                }
            }
            DebounceState::StopDelay => {
                if self.past_stop(now) {
                    self.complete_reset(now);
                }
            }
            DebounceState::ResetCooldown => {
                if self.past_cooldown(now) {
                    self.transition(DebounceState::Idle);
                }
            }
        }
    }

    fn complete_reset(&mut self, now: I) {
        self.executed = false;
        self.execute_start = None;
        self.last_execution = None;
        self.reset_start = None;
        self.last_reset = Some(now);

        let next = if self.past_cooldown(now) {
            DebounceState::Idle
        } else {
            DebounceState::ResetCooldown
        };
        self.transition(next);
    }

    fn should_execute(&self, now: I) -> bool {
        let active = matches!(
            self.state,
            DebounceState::Executing | DebounceState::StopDelay
        );

        active
            && !(self.config.sticky && self.executed)
            && has_elapsed(now, self.last_execution, self.config.execute_frequency)
    }

    fn past_start(&self, now: I) -> bool {
        has_elapsed(now, self.execute_start, self.config.start_delay)
    }

    fn past_stop(&self, now: I) -> bool {
        has_elapsed(now, self.reset_start, self.config.stop_delay)
    }

    fn past_cooldown(&self, now: I) -> bool {
        has_elapsed(now, self.last_reset, self.config.reset_cooldown)
    }

    fn transition(&mut self, next: DebounceState) {
        if next != self.state {
            trace!("debounce {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
