//! Front-panel settings: setpoints, HVAC mode and display unit.
//!
//! [`SettingsController`] owns one [`StableDebouncer`] per button. Up/down
//! repeat while held; mode and unit are sticky so they act once per press.

use crate::config::ThermostatConfig;
use crate::error::ThermostatError;
use crate::modes::{HvacMode, TemperatureUnit};
use crate::pin::Button;
use crate::stable::StableDebouncer;
use crate::time::{TimeInstant, TimeSource};
use embedded_hal::digital::InputPin;

/// User-adjustable thermostat settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermostatSettings {
    heat_setpoint_c: f32,
    cool_setpoint_c: f32,
    setpoint_step_c: f32,
    hvac_mode: HvacMode,
    unit: TemperatureUnit,
}

impl ThermostatSettings {
    /// Creates settings from the configured defaults, with the HVAC off.
    pub fn new(config: &ThermostatConfig) -> Self {
        Self {
            heat_setpoint_c: config.default_heat_setpoint_c,
            cool_setpoint_c: config.default_cool_setpoint_c,
            setpoint_step_c: config.setpoint_step_c,
            hvac_mode: HvacMode::Off,
            unit: TemperatureUnit::Celsius,
        }
    }

    /// Heating target in Celsius.
    pub fn heat_setpoint_c(&self) -> f32 {
        self.heat_setpoint_c
    }

    /// Cooling target in Celsius.
    pub fn cool_setpoint_c(&self) -> f32 {
        self.cool_setpoint_c
    }

    /// Current HVAC mode.
    pub fn hvac_mode(&self) -> HvacMode {
        self.hvac_mode
    }

    /// Unit used for presentation.
    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Setpoint of the active mode, or `None` when the HVAC is off.
    pub fn active_setpoint_c(&self) -> Option<f32> {
        match self.hvac_mode {
            HvacMode::Heat => Some(self.heat_setpoint_c),
            HvacMode::Cool => Some(self.cool_setpoint_c),
            HvacMode::Off => None,
        }
    }

    /// Raises the active setpoint by one step. No-op when off.
    pub fn step_up(&mut self) {
        self.adjust(self.setpoint_step_c);
    }

    /// Lowers the active setpoint by one step. No-op when off.
    pub fn step_down(&mut self) {
        self.adjust(-self.setpoint_step_c);
    }

    /// Advances the HVAC mode: Off → Heat → Cool → Off.
    pub fn cycle_hvac_mode(&mut self) {
        self.hvac_mode = self.hvac_mode.next();
        info!("hvac mode: {:?}", self.hvac_mode);
    }

    /// Switches between Celsius and Fahrenheit presentation.
    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggle();
        info!("display unit: {:?}", self.unit);
    }

    fn adjust(&mut self, delta_c: f32) {
        let setpoint = match self.hvac_mode {
            HvacMode::Heat => &mut self.heat_setpoint_c,
            HvacMode::Cool => &mut self.cool_setpoint_c,
            HvacMode::Off => return,
        };
        *setpoint += delta_c;
        debug!("setpoint {:?}: {}", self.hvac_mode, *setpoint);
    }
}

impl Default for ThermostatSettings {
    fn default() -> Self {
        Self::new(&ThermostatConfig::DEFAULT)
    }
}

/// The four front-panel buttons.
pub struct SettingsButtons<P: InputPin> {
    /// Raises the active setpoint.
    pub up: Button<P>,
    /// Lowers the active setpoint.
    pub down: Button<P>,
    /// Cycles the HVAC mode.
    pub hvac_mode: Button<P>,
    /// Toggles the display unit.
    pub unit: Button<P>,
}

/// Turns button presses into settings changes.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `P` - Button input pin type
pub struct SettingsController<'t, I: TimeInstant, T: TimeSource<I>, P: InputPin> {
    buttons: SettingsButtons<P>,
    increment: StableDebouncer<'t, I, T>,
    decrement: StableDebouncer<'t, I, T>,
    hvac_mode: StableDebouncer<'t, I, T>,
    unit: StableDebouncer<'t, I, T>,
    settings: ThermostatSettings,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, P: InputPin> SettingsController<'t, I, T, P> {
    /// Creates a controller with engines timed from `config`.
    pub fn new(time_source: &'t T, buttons: SettingsButtons<P>, config: &ThermostatConfig) -> Self {
        Self {
            buttons,
            increment: StableDebouncer::with_config(time_source, config.repeat_button()),
            decrement: StableDebouncer::with_config(time_source, config.repeat_button()),
            hvac_mode: StableDebouncer::with_config(time_source, config.toggle_button()),
            unit: StableDebouncer::with_config(time_source, config.toggle_button()),
            settings: ThermostatSettings::new(config),
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &ThermostatSettings {
        &self.settings
    }

    /// Requests a setpoint increase through the increment debouncer.
    pub fn increment_setpoint(&mut self) {
        let Self {
            increment, settings, ..
        } = self;
        increment.execute(|| settings.step_up());
    }

    /// Requests a setpoint decrease through the decrement debouncer.
    pub fn decrement_setpoint(&mut self) {
        let Self {
            decrement, settings, ..
        } = self;
        decrement.execute(|| settings.step_down());
    }

    /// Requests a mode change through the sticky mode debouncer.
    pub fn toggle_hvac_mode(&mut self) {
        let Self {
            hvac_mode, settings, ..
        } = self;
        hvac_mode.execute(|| settings.cycle_hvac_mode());
    }

    /// Requests a unit change through the sticky unit debouncer.
    pub fn toggle_unit(&mut self) {
        let Self { unit, settings, .. } = self;
        unit.execute(|| settings.toggle_unit());
    }

    /// Samples every button once and feeds its debouncer.
    ///
    /// A button that cannot be read counts as released for this tick. All
    /// buttons are still processed; the first read failure is returned.
    pub fn loop_handler(&mut self) -> Result<(), ThermostatError> {
        let mut fault = None;

        if sample(&mut self.buttons.up, &mut fault) {
            self.increment_setpoint();
        } else {
            self.increment.reset();
        }

        if sample(&mut self.buttons.down, &mut fault) {
            self.decrement_setpoint();
        } else {
            self.decrement.reset();
        }

        if sample(&mut self.buttons.hvac_mode, &mut fault) {
            self.toggle_hvac_mode();
        } else {
            self.hvac_mode.reset();
        }

        if sample(&mut self.buttons.unit, &mut fault) {
            self.toggle_unit();
        } else {
            self.unit.reset();
        }

        fault.map_or(Ok(()), Err)
    }
}

fn sample<P: InputPin>(button: &mut Button<P>, fault: &mut Option<ThermostatError>) -> bool {
    button.is_pressed().unwrap_or_else(|err| {
        let err = ThermostatError::input(err);
        warn!("button read failed: {:?}", err);
        fault.get_or_insert(err);
        false
    })
}
