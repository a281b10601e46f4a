//! Errors reported by the client adapters.
//!
//! The debounce engines themselves never fail; only the I/O around them can.

use embedded_hal::digital::ErrorKind;

/// Errors that can occur while servicing the thermostat controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermostatError {
    /// Reading a button pin failed. The input was treated as released.
    InputPin(ErrorKind),
    /// Writing a relay pin failed.
    OutputPin(ErrorKind),
    /// The climate sensor could not be read. The previous reading is kept.
    Sensor,
    /// The status sink rejected a report, or the report did not fit.
    StatusWrite,
}

impl ThermostatError {
    pub(crate) fn input<E: embedded_hal::digital::Error>(err: E) -> Self {
        ThermostatError::InputPin(err.kind())
    }

    pub(crate) fn output<E: embedded_hal::digital::Error>(err: E) -> Self {
        ThermostatError::OutputPin(err.kind())
    }
}

impl core::fmt::Display for ThermostatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ThermostatError::InputPin(kind) => write!(f, "button read failed: {}", kind),
            ThermostatError::OutputPin(kind) => write!(f, "relay write failed: {}", kind),
            ThermostatError::Sensor => write!(f, "climate sensor read failed"),
            ThermostatError::StatusWrite => write!(f, "status report could not be written"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThermostatError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ThermostatError::InputPin(kind) => {
                defmt::write!(f, "InputPin({})", defmt::Debug2Format(kind))
            }
            ThermostatError::OutputPin(kind) => {
                defmt::write!(f, "OutputPin({})", defmt::Debug2Format(kind))
            }
            ThermostatError::Sensor => defmt::write!(f, "Sensor"),
            ThermostatError::StatusWrite => defmt::write!(f, "StatusWrite"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ThermostatError {}

/// Keeps the first error seen while every controller still gets its tick.
pub(crate) fn keep_first(first: &mut Option<ThermostatError>, result: Result<(), ThermostatError>) {
    if let Err(err) = result {
        first.get_or_insert(err);
    }
}
