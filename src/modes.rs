//! Operating modes selectable from the front panel.

/// Which HVAC circuit the thermostat is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HvacMode {
    /// Heating circuit active.
    Heat,
    /// Cooling circuit active.
    Cool,
    /// Everything off.
    #[default]
    Off,
}

impl HvacMode {
    /// Returns the mode the mode button cycles to: Off → Heat → Cool → Off.
    pub fn next(self) -> Self {
        match self {
            HvacMode::Off => HvacMode::Heat,
            HvacMode::Heat => HvacMode::Cool,
            HvacMode::Cool => HvacMode::Off,
        }
    }

    /// Returns the label used in status reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            HvacMode::Off => "Off",
            HvacMode::Heat => "Heat",
            HvacMode::Cool => "Cool",
        }
    }
}

impl core::fmt::Display for HvacMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit used when presenting temperatures.
///
/// Control decisions are always made in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Returns the other unit.
    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    /// Converts a Celsius value into this unit.
    #[inline]
    pub fn convert_from_celsius(&self, celsius: f32) -> f32 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Returns the single-letter unit symbol.
    pub fn symbol(&self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
        }
    }
}
