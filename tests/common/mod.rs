//! Shared test infrastructure for thermostat-io integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use thermostat_io::{
    ClimateReading, ClimateSensor, FrameRenderer, Millis, StatusSink, TimeSource,
};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock millisecond clock with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<u32>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            current_time: Cell::new(millis),
        }
    }

    /// Advance time by the given number of milliseconds, wrapping like a
    /// hardware counter
    pub fn advance(&self, millis: u32) {
        self.current_time
            .set(self.current_time.get().wrapping_add(millis));
    }

    pub fn set_time(&self, millis: u32) {
        self.current_time.set(millis);
    }

    pub fn millis(&self) -> u32 {
        self.current_time.get()
    }
}

impl TimeSource<Millis> for MockTimeSource {
    fn now(&self) -> Millis {
        Millis(self.current_time.get())
    }
}

// ============================================================================
// Fake Pins
// ============================================================================

#[derive(Debug)]
pub struct FakePinError;

impl embedded_hal::digital::Error for FakePinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Digital pin whose level lives in a shared cell, so tests can press
/// buttons and inspect relays while a controller owns the pin
pub struct FakePin<'a> {
    level: &'a Cell<bool>,
    broken: bool,
    fault: Option<&'a Cell<bool>>,
}

impl<'a> FakePin<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self {
            level,
            broken: false,
            fault: None,
        }
    }

    /// A pin whose every access fails
    pub fn broken(level: &'a Cell<bool>) -> Self {
        Self {
            level,
            broken: true,
            fault: None,
        }
    }

    /// A pin that fails while `fault` is set
    pub fn flaky(level: &'a Cell<bool>, fault: &'a Cell<bool>) -> Self {
        Self {
            level,
            broken: false,
            fault: Some(fault),
        }
    }

    fn failing(&self) -> bool {
        self.broken || self.fault.is_some_and(|fault| fault.get())
    }
}

impl ErrorType for FakePin<'_> {
    type Error = FakePinError;
}

impl InputPin for FakePin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.failing() {
            return Err(FakePinError);
        }
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl OutputPin for FakePin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.failing() {
            return Err(FakePinError);
        }
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.failing() {
            return Err(FakePinError);
        }
        self.level.set(true);
        Ok(())
    }
}

// ============================================================================
// Fake Sensor
// ============================================================================

/// Sensor returning whatever the test puts in `reading`; `None` means the
/// read fails
pub struct FakeSensor<'a> {
    reading: &'a Cell<Option<ClimateReading>>,
    reads: &'a Cell<u32>,
}

impl<'a> FakeSensor<'a> {
    pub fn new(reading: &'a Cell<Option<ClimateReading>>, reads: &'a Cell<u32>) -> Self {
        Self { reading, reads }
    }
}

impl ClimateSensor for FakeSensor<'_> {
    type Error = ();

    fn read(&mut self) -> Result<ClimateReading, Self::Error> {
        self.reads.set(self.reads.get() + 1);
        self.reading.get().ok_or(())
    }
}

pub fn reading(temperature_c: f32, humidity_rel: f32) -> ClimateReading {
    ClimateReading {
        temperature_c,
        humidity_rel,
    }
}

// ============================================================================
// Recording Sink and Renderer
// ============================================================================

/// Status sink that keeps every line it receives
pub struct RecordingSink {
    lines: heapless::Vec<heapless::String<64>, 16>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            lines: heapless::Vec::new(),
        }
    }

    pub fn lines(&self) -> &[heapless::String<64>] {
        &self.lines
    }
}

impl StatusSink for RecordingSink {
    type Error = ();

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        let mut owned: heapless::String<64> = heapless::String::new();
        owned.push_str(line).map_err(|_| ())?;
        self.lines.push(owned).map_err(|_| ())
    }
}

/// Renderer that counts frames
pub struct CountingRenderer {
    pub frames: u32,
}

impl FrameRenderer for CountingRenderer {
    fn draw_frame(&mut self) {
        self.frames += 1;
    }
}
