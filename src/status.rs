//! Periodic one-line status reports.

use crate::basic::Debouncer;
use crate::config::ThermostatConfig;
use crate::error::ThermostatError;
use crate::modes::{HvacMode, TemperatureUnit};
use crate::sensor::ClimateReading;
use crate::settings::ThermostatSettings;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use core::fmt::Write;
use heapless::String;

/// Capacity of one rendered status line.
pub const STATUS_LINE_CAPACITY: usize = 64;

/// Snapshot of everything worth reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    /// Latest climate reading, if the sensor has produced one.
    pub climate: Option<ClimateReading>,
    /// Current HVAC mode.
    pub hvac_mode: HvacMode,
    /// Cooling setpoint in Celsius.
    pub cool_setpoint_c: f32,
    /// Heating setpoint in Celsius.
    pub heat_setpoint_c: f32,
    /// Unit temperatures are shown in.
    pub unit: TemperatureUnit,
}

impl StatusReport {
    /// Builds a report from the current settings and reading.
    pub fn new(settings: &ThermostatSettings, climate: Option<ClimateReading>) -> Self {
        Self {
            climate,
            hvac_mode: settings.hvac_mode(),
            cool_setpoint_c: settings.cool_setpoint_c(),
            heat_setpoint_c: settings.heat_setpoint_c(),
            unit: settings.unit(),
        }
    }

    /// Renders the tab-separated status line.
    ///
    /// Fails if the line does not fit in [`STATUS_LINE_CAPACITY`] bytes.
    pub fn to_line(&self) -> Result<String<STATUS_LINE_CAPACITY>, core::fmt::Error> {
        let mut line = String::new();
        write!(line, "{}", self)?;
        Ok(line)
    }
}

impl core::fmt::Display for StatusReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let unit = self.unit;
        match self.climate {
            Some(reading) => write!(
                f,
                "\t{:.1}{}\t{:.1}",
                unit.convert_from_celsius(reading.temperature_c),
                unit.symbol(),
                reading.humidity_rel
            )?,
            None => write!(f, "\t--\t--")?,
        }
        write!(
            f,
            "\t{}\t{:.1}\t{:.1}",
            self.hvac_mode,
            unit.convert_from_celsius(self.cool_setpoint_c),
            unit.convert_from_celsius(self.heat_setpoint_c)
        )
    }
}

/// Trait for abstracting where status lines go (UART, RTT, a log buffer).
pub trait StatusSink {
    /// Sink error type.
    type Error;

    /// Writes one complete status line, without a trailing newline.
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}

/// Writes a status line at most once per status interval.
pub struct StatusReporter<'t, I: TimeInstant, T: TimeSource<I>, W: StatusSink> {
    sink: W,
    debouncer: Debouncer<'t, I, T>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, W: StatusSink> StatusReporter<'t, I, T, W> {
    /// Creates a reporter at the configured status interval.
    pub fn new(time_source: &'t T, sink: W, config: &ThermostatConfig) -> Self {
        Self {
            sink,
            debouncer: Debouncer::with_frequency(
                time_source,
                I::Duration::from_millis(config.status_interval_ms),
            ),
        }
    }

    /// Gives access to the sink.
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Writes `report` if the status interval has passed.
    pub fn loop_handler(&mut self, report: &StatusReport) -> Result<(), ThermostatError> {
        let Self { sink, debouncer } = self;

        let mut result = Ok(());
        debouncer.bounce(|| {
            result = report
                .to_line()
                .map_err(|_| ThermostatError::StatusWrite)
                .and_then(|line| {
                    sink.write_line(line.as_str())
                        .map_err(|_| ThermostatError::StatusWrite)
                });
        });
        result
    }
}
