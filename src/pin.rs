//! Active-level aware wrappers around `embedded-hal` digital pins.

use embedded_hal::digital::{InputPin, OutputPin};

/// Electrical level that means "on" for a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pin is on when high.
    #[default]
    High,
    /// Pin is on when low (inverted wiring, pull-up buttons).
    Low,
}

/// A push button on a digital input.
pub struct Button<P: InputPin> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> Button<P> {
    /// Creates an active-high button.
    pub fn new(pin: P) -> Self {
        Self::with_active_level(pin, ActiveLevel::High)
    }

    /// Creates a button with an explicit active level.
    pub fn with_active_level(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Returns true if the button currently reads as pressed.
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        match self.active {
            ActiveLevel::High => self.pin.is_high(),
            ActiveLevel::Low => self.pin.is_low(),
        }
    }

    /// Releases the underlying pin.
    pub fn release(self) -> P {
        self.pin
    }
}

/// A relay (or indicator LED) on a digital output.
pub struct Relay<P: OutputPin> {
    pin: P,
    active: ActiveLevel,
    is_on: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Creates an active-high relay. Call [`initialize`](Self::initialize)
    /// before use to put the output in a known state.
    pub fn new(pin: P) -> Self {
        Self::with_active_level(pin, ActiveLevel::High)
    }

    /// Creates a relay with an explicit active level.
    pub fn with_active_level(pin: P, active: ActiveLevel) -> Self {
        Self {
            pin,
            active,
            is_on: false,
        }
    }

    /// Drives the output to its off level.
    pub fn initialize(&mut self) -> Result<(), P::Error> {
        self.write(false)
    }

    /// Switches the relay. The pin is only written when the state changes.
    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        if on == self.is_on {
            return Ok(());
        }
        self.write(on)
    }

    /// Returns the last successfully written state.
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Releases the underlying pin.
    pub fn release(self) -> P {
        self.pin
    }

    fn write(&mut self, on: bool) -> Result<(), P::Error> {
        let high = match self.active {
            ActiveLevel::High => on,
            ActiveLevel::Low => !on,
        };

        if high {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }

        self.is_on = on;
        Ok(())
    }
}
