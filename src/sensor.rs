//! Throttled climate sensor sampling.

use crate::basic::Debouncer;
use crate::config::ThermostatConfig;
use crate::error::ThermostatError;
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// One temperature/humidity sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Temperature in Celsius.
    pub temperature_c: f32,
    /// Relative humidity in percent.
    pub humidity_rel: f32,
}

/// Trait for abstracting the temperature/humidity sensor.
///
/// Implement this for your sensor driver (SHT3x, BME280, ...). Bus setup and
/// unit conversion belong in the implementation.
pub trait ClimateSensor {
    /// Driver error type.
    type Error: core::fmt::Debug;

    /// Performs one measurement.
    fn read(&mut self) -> Result<ClimateReading, Self::Error>;
}

/// Reads the sensor at most once per read interval and keeps the last
/// good reading.
pub struct SensorController<'t, I: TimeInstant, T: TimeSource<I>, S: ClimateSensor> {
    sensor: S,
    debouncer: Debouncer<'t, I, T>,
    reading: Option<ClimateReading>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, S: ClimateSensor> SensorController<'t, I, T, S> {
    /// Creates a controller reading at the configured sensor interval.
    pub fn new(time_source: &'t T, sensor: S, config: &ThermostatConfig) -> Self {
        Self::with_interval(
            time_source,
            sensor,
            I::Duration::from_millis(config.sensor_read_interval_ms),
        )
    }

    /// Creates a controller reading once per `interval`.
    pub fn with_interval(time_source: &'t T, sensor: S, interval: I::Duration) -> Self {
        Self {
            sensor,
            debouncer: Debouncer::with_frequency(time_source, interval),
            reading: None,
        }
    }

    /// Last successful reading, if any.
    pub fn reading(&self) -> Option<ClimateReading> {
        self.reading
    }

    /// Last temperature in Celsius, if any.
    pub fn temperature_c(&self) -> Option<f32> {
        self.reading.map(|r| r.temperature_c)
    }

    /// Last relative humidity, if any.
    pub fn humidity_rel(&self) -> Option<f32> {
        self.reading.map(|r| r.humidity_rel)
    }

    /// Gives access to the sensor driver, e.g. for status registers.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Samples the sensor if the read interval has passed.
    ///
    /// A failed read still consumes the interval, so a broken sensor is
    /// retried at the normal rate instead of every tick.
    pub fn loop_handler(&mut self) -> Result<(), ThermostatError> {
        let Self {
            sensor,
            debouncer,
            reading,
        } = self;

        let mut result = Ok(());
        debouncer.bounce(|| match sensor.read() {
            Ok(sample) => {
                trace!("sensor: {} C {} %", sample.temperature_c, sample.humidity_rel);
                *reading = Some(sample);
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                warn!("sensor read failed: {:?}", defmt::Debug2Format(&err));
                #[cfg(not(feature = "defmt"))]
                warn!("sensor read failed: {:?}", err);
                result = Err(ThermostatError::Sensor);
            }
        });
        result
    }
}
