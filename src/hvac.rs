//! HVAC relay control with hysteresis and a change-rate guard.
//!
//! Relay outputs are re-evaluated at most once per HVAC change interval.
//! Switching compressors and burners too often damages them, so this
//! interval should stay in the seconds range.

use crate::basic::Debouncer;
use crate::config::ThermostatConfig;
use crate::error::{ThermostatError, keep_first};
use crate::modes::HvacMode;
use crate::pin::Relay;
use crate::settings::ThermostatSettings;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use embedded_hal::digital::OutputPin;

/// Desired state of the three HVAC relays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HvacOutputs {
    /// Heating relay.
    pub heat: bool,
    /// Cooling relay.
    pub cool: bool,
    /// Fan relay.
    pub fan: bool,
}

impl HvacOutputs {
    /// All relays off.
    pub const OFF: Self = Self {
        heat: false,
        cool: false,
        fan: false,
    };

    /// Computes the next outputs from the current ones.
    ///
    /// Heat switches on at `setpoint - buffer` and off at `setpoint + buffer`;
    /// cool mirrors that. Inside the band the current outputs are held.
    pub fn next(self, settings: &ThermostatSettings, temperature_c: f32, buffer_c: f32) -> Self {
        match settings.hvac_mode() {
            HvacMode::Heat => {
                let setpoint = settings.heat_setpoint_c();
                let mut next = Self { cool: false, ..self };
                if temperature_c >= setpoint + buffer_c {
                    next.heat = false;
                    next.fan = false;
                } else if temperature_c <= setpoint - buffer_c {
                    next.heat = true;
                    next.fan = true;
                }
                next
            }
            HvacMode::Cool => {
                let setpoint = settings.cool_setpoint_c();
                let mut next = Self { heat: false, ..self };
                if temperature_c <= setpoint - buffer_c {
                    next.cool = false;
                    next.fan = false;
                } else if temperature_c >= setpoint + buffer_c {
                    next.cool = true;
                    next.fan = true;
                }
                next
            }
            HvacMode::Off => Self::OFF,
        }
    }
}

/// The heat, cool and fan relays.
pub struct HvacRelays<P: OutputPin> {
    /// Heating relay.
    pub heat: Relay<P>,
    /// Cooling relay.
    pub cool: Relay<P>,
    /// Fan relay.
    pub fan: Relay<P>,
}

impl<P: OutputPin> HvacRelays<P> {
    // Every relay is written even if an earlier one fails.
    fn initialize(&mut self) -> Result<(), ThermostatError> {
        let mut first = None;
        keep_first(&mut first, self.cool.initialize().map_err(ThermostatError::output));
        keep_first(&mut first, self.heat.initialize().map_err(ThermostatError::output));
        keep_first(&mut first, self.fan.initialize().map_err(ThermostatError::output));
        first.map_or(Ok(()), Err)
    }

    fn apply(&mut self, outputs: HvacOutputs) -> Result<(), ThermostatError> {
        let mut first = None;
        keep_first(&mut first, self.cool.set(outputs.cool).map_err(ThermostatError::output));
        keep_first(&mut first, self.heat.set(outputs.heat).map_err(ThermostatError::output));
        keep_first(&mut first, self.fan.set(outputs.fan).map_err(ThermostatError::output));
        first.map_or(Ok(()), Err)
    }

    fn current(&self) -> HvacOutputs {
        HvacOutputs {
            heat: self.heat.is_on(),
            cool: self.cool.is_on(),
            fan: self.fan.is_on(),
        }
    }
}

/// Drives the HVAC relays from settings and the measured temperature.
pub struct HvacController<'t, I: TimeInstant, T: TimeSource<I>, P: OutputPin> {
    relays: HvacRelays<P>,
    debouncer: Debouncer<'t, I, T>,
    outputs: HvacOutputs,
    buffer_c: f32,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, P: OutputPin> HvacController<'t, I, T, P> {
    /// Creates a controller timed and buffered from `config`.
    pub fn new(time_source: &'t T, relays: HvacRelays<P>, config: &ThermostatConfig) -> Self {
        Self {
            relays,
            debouncer: Debouncer::with_frequency(
                time_source,
                I::Duration::from_millis(config.hvac_change_interval_ms),
            ),
            outputs: HvacOutputs::OFF,
            buffer_c: config.hysteresis_buffer_c,
        }
    }

    /// Drives every relay to off. A failing relay does not stop the others
    /// from being written; the first failure is returned.
    pub fn initialize(&mut self) -> Result<(), ThermostatError> {
        let result = self.relays.initialize();
        self.outputs = self.relays.current();
        result
    }

    /// Outputs as applied by the last evaluation. A relay whose write failed
    /// keeps its previous state here and is retried on the next evaluation.
    pub fn outputs(&self) -> HvacOutputs {
        self.outputs
    }

    /// Relay states as last written to the pins.
    pub fn relay_states(&self) -> HvacOutputs {
        self.relays.current()
    }

    /// Releases the relays.
    pub fn release(self) -> HvacRelays<P> {
        self.relays
    }

    /// Re-evaluates and writes the relays if the change interval has passed.
    pub fn loop_handler(
        &mut self,
        settings: &ThermostatSettings,
        temperature_c: f32,
    ) -> Result<(), ThermostatError> {
        let Self {
            relays,
            debouncer,
            outputs,
            buffer_c,
        } = self;

        let mut result = Ok(());
        debouncer.bounce(|| {
            let next = outputs.next(settings, temperature_c, *buffer_c);
            if next != *outputs {
                info!(
                    "hvac relays: heat={} cool={} fan={}",
                    next.heat,
                    next.cool,
                    next.fan
                );
            }
            result = relays.apply(next);
            *outputs = relays.current();
        });
        result
    }
}
