//! Thermostat configuration and its factory defaults.

use crate::stable::StableDebounceConfig;
use crate::time::TimeDuration;

/// Tunable constants for the whole thermostat.
///
/// Timings are in milliseconds and converted into the clock's duration type
/// when the controllers are built. Temperatures are in Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermostatConfig {
    /// Setpoint change per up/down press.
    pub setpoint_step_c: f32,
    /// Initial heating setpoint.
    pub default_heat_setpoint_c: f32,
    /// Initial cooling setpoint.
    pub default_cool_setpoint_c: f32,
    /// Hysteresis margin around the setpoint.
    pub hysteresis_buffer_c: f32,
    /// Minimum time between HVAC relay updates. Setting this too low can
    /// damage the equipment.
    pub hvac_change_interval_ms: u64,
    /// Time between status reports.
    pub status_interval_ms: u64,
    /// Repeat interval while an up/down button is held.
    pub button_repeat_ms: u64,
    /// How long a press must be stable before it is trusted.
    pub button_start_delay_ms: u64,
    /// How long a release must be stable before it is trusted.
    pub button_stop_delay_ms: u64,
    /// Dead time after a completed release before a new press counts.
    pub button_reset_cooldown_ms: u64,
    /// Time between sensor reads.
    pub sensor_read_interval_ms: u64,
    /// Time between display redraws.
    pub display_frame_interval_ms: u64,
}

impl ThermostatConfig {
    /// Factory defaults.
    pub const DEFAULT: Self = Self {
        setpoint_step_c: 0.5,
        default_heat_setpoint_c: 21.0,
        default_cool_setpoint_c: 21.0,
        hysteresis_buffer_c: 0.5,
        hvac_change_interval_ms: 5000,
        status_interval_ms: 1000,
        button_repeat_ms: 1000,
        button_start_delay_ms: 50,
        button_stop_delay_ms: 50,
        button_reset_cooldown_ms: 100,
        sensor_read_interval_ms: 500,
        display_frame_interval_ms: 100,
    };

    /// Engine timing for buttons that repeat while held (setpoint up/down).
    pub fn repeat_button<D: TimeDuration>(&self) -> StableDebounceConfig<D> {
        StableDebounceConfig {
            execute_frequency: D::from_millis(self.button_repeat_ms),
            start_delay: D::from_millis(self.button_start_delay_ms),
            stop_delay: D::from_millis(self.button_stop_delay_ms),
            reset_cooldown: D::from_millis(self.button_reset_cooldown_ms),
            sticky: false,
        }
    }

    /// Engine timing for buttons that act once per press (mode and unit).
    pub fn toggle_button<D: TimeDuration>(&self) -> StableDebounceConfig<D> {
        StableDebounceConfig {
            sticky: true,
            ..self.repeat_button()
        }
    }

    /// Engine timing for the display redraw loop.
    pub fn display_frames<D: TimeDuration>(&self) -> StableDebounceConfig<D> {
        StableDebounceConfig {
            execute_frequency: D::from_millis(self.display_frame_interval_ms),
            ..StableDebounceConfig::default()
        }
    }
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
