//! The thermostat control loop.
//!
//! [`Thermostat`] wires the controllers together and runs them in a fixed
//! order on every [`tick`](Thermostat::tick): settings, sensor, HVAC, status.
//! Call `tick` from the main loop as often as possible; every controller
//! decides for itself whether anything is due.

use crate::config::ThermostatConfig;
use crate::error::{ThermostatError, keep_first};
use crate::hvac::{HvacController, HvacOutputs, HvacRelays};
use crate::sensor::{ClimateReading, ClimateSensor, SensorController};
use crate::settings::{SettingsButtons, SettingsController, ThermostatSettings};
use crate::status::{StatusReport, StatusReporter, StatusSink};
use crate::time::{TimeInstant, TimeSource};
use embedded_hal::digital::{InputPin, OutputPin};

/// Hardware handed to [`Thermostat::new`].
pub struct ThermostatParts<P: InputPin, R: OutputPin, S: ClimateSensor, W: StatusSink> {
    /// Front-panel buttons.
    pub buttons: SettingsButtons<P>,
    /// HVAC relays.
    pub relays: HvacRelays<R>,
    /// Climate sensor driver.
    pub sensor: S,
    /// Destination for status lines.
    pub status_sink: W,
}

/// A complete thermostat.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `P` - Button input pin type
/// * `R` - Relay output pin type
/// * `S` - Climate sensor type
/// * `W` - Status sink type
pub struct Thermostat<'t, I, T, P, R, S, W>
where
    I: TimeInstant,
    T: TimeSource<I>,
    P: InputPin,
    R: OutputPin,
    S: ClimateSensor,
    W: StatusSink,
{
    settings: SettingsController<'t, I, T, P>,
    sensor: SensorController<'t, I, T, S>,
    hvac: HvacController<'t, I, T, R>,
    status: StatusReporter<'t, I, T, W>,
}

impl<'t, I, T, P, R, S, W> Thermostat<'t, I, T, P, R, S, W>
where
    I: TimeInstant,
    T: TimeSource<I>,
    P: InputPin,
    R: OutputPin,
    S: ClimateSensor,
    W: StatusSink,
{
    /// Builds every controller from `config`, sharing one time source.
    pub fn new(
        time_source: &'t T,
        parts: ThermostatParts<P, R, S, W>,
        config: &ThermostatConfig,
    ) -> Self {
        Self {
            settings: SettingsController::new(time_source, parts.buttons, config),
            sensor: SensorController::new(time_source, parts.sensor, config),
            hvac: HvacController::new(time_source, parts.relays, config),
            status: StatusReporter::new(time_source, parts.status_sink, config),
        }
    }

    /// Puts the outputs in a known state. Call once before the first tick.
    pub fn initialize(&mut self) -> Result<(), ThermostatError> {
        info!("thermostat starting");
        self.hvac.initialize()
    }

    /// Runs one control-loop iteration.
    ///
    /// Every controller runs even if an earlier one failed, so no debouncer
    /// misses its tick. The first failure is returned.
    pub fn tick(&mut self) -> Result<(), ThermostatError> {
        let mut first = None;

        keep_first(&mut first, self.settings.loop_handler());
        keep_first(&mut first, self.sensor.loop_handler());

        // The HVAC decision needs a temperature; until the first reading
        // arrives the relays stay as initialised.
        if let Some(temperature_c) = self.sensor.temperature_c() {
            keep_first(
                &mut first,
                self.hvac.loop_handler(self.settings.settings(), temperature_c),
            );
        }

        let report = StatusReport::new(self.settings.settings(), self.sensor.reading());
        keep_first(&mut first, self.status.loop_handler(&report));

        first.map_or(Ok(()), Err)
    }

    /// Current user settings.
    pub fn settings(&self) -> &ThermostatSettings {
        self.settings.settings()
    }

    /// Latest climate reading.
    pub fn reading(&self) -> Option<ClimateReading> {
        self.sensor.reading()
    }

    /// Relay outputs as last decided.
    pub fn hvac_outputs(&self) -> HvacOutputs {
        self.hvac.outputs()
    }

    /// The status sink.
    pub fn status_sink(&self) -> &W {
        self.status.sink()
    }
}
