//! Frame-rate limited display redraws.

use crate::config::ThermostatConfig;
use crate::stable::{DebounceState, StableDebounceConfig, StableDebouncer};
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Trait for abstracting the display driver.
///
/// Implement this for your screen; everything about what a frame contains
/// lives in the implementation.
pub trait FrameRenderer {
    /// Draws and flushes one animation frame.
    fn draw_frame(&mut self);
}

/// Redraws the display at most once per frame interval.
pub struct DisplayController<'t, I: TimeInstant, T: TimeSource<I>, R: FrameRenderer> {
    renderer: R,
    redraw: StableDebouncer<'t, I, T>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, R: FrameRenderer> DisplayController<'t, I, T, R> {
    /// Creates a controller redrawing at the configured frame interval.
    pub fn new(time_source: &'t T, renderer: R, config: &ThermostatConfig) -> Self {
        Self {
            renderer,
            redraw: StableDebouncer::with_config(time_source, config.display_frames()),
        }
    }

    /// Creates a controller redrawing once per `frame_interval`.
    pub fn with_frame_interval(time_source: &'t T, renderer: R, frame_interval: I::Duration) -> Self {
        Self {
            renderer,
            redraw: StableDebouncer::with_config(
                time_source,
                StableDebounceConfig {
                    execute_frequency: frame_interval,
                    start_delay: I::Duration::ZERO,
                    stop_delay: I::Duration::ZERO,
                    reset_cooldown: I::Duration::ZERO,
                    sticky: false,
                },
            ),
        }
    }

    /// Draws a frame if the frame interval has passed.
    pub fn loop_handler(&mut self) {
        let Self { renderer, redraw } = self;
        redraw.execute(|| renderer.draw_frame());
    }

    /// Stops animating. The next [`loop_handler`](Self::loop_handler) call
    /// draws immediately.
    pub fn pause(&mut self) {
        self.redraw.reset();
    }

    /// Returns true while the animation is running.
    pub fn is_animating(&self) -> bool {
        self.redraw.state() == DebounceState::Executing
    }

    /// Gives access to the renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
