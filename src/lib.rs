#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`StableDebouncer`**: State machine gating an action behind start/stop delays, a rate limit, sticky single-shot mode and a reset cooldown
//! - **`DebounceState`**: The six states a `StableDebouncer` moves through
//! - **`Debouncer`**: Minimal rate limiter with a "perma-bounce" latch
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`SettingsController`**, **`SensorController`**, **`HvacController`**, **`DisplayController`**, **`StatusReporter`**: Adapters that feed the engines one tick at a time
//! - **`Thermostat`**: The control loop tying the adapters together
//!
//! The engines never perform I/O and never fail. They only need a
//! monotonically non-decreasing clock and a zero-argument action to run.

#[macro_use]
mod fmt;

pub mod basic;
pub mod config;
pub mod display;
pub mod error;
pub mod hvac;
pub mod modes;
pub mod pin;
pub mod sensor;
pub mod settings;
pub mod stable;
pub mod status;
pub mod thermostat;
pub mod time;

pub use basic::Debouncer;
pub use config::ThermostatConfig;
pub use display::{DisplayController, FrameRenderer};
pub use error::ThermostatError;
pub use hvac::{HvacController, HvacOutputs, HvacRelays};
pub use modes::{HvacMode, TemperatureUnit};
pub use pin::{ActiveLevel, Button, Relay};
pub use sensor::{ClimateReading, ClimateSensor, SensorController};
pub use settings::{SettingsButtons, SettingsController, ThermostatSettings};
pub use stable::{DebounceState, StableDebounceConfig, StableDebouncer};
pub use status::{StatusReport, StatusReporter, StatusSink};
pub use thermostat::{Thermostat, ThermostatParts};
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource};
