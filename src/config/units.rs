//! Unit types for physical quantities.
//!
//! Steps are the canonical position unit. Degrees and radians only exist at
//! the API boundary and are converted with the motor's steps per revolution.

use core::f32::consts::TAU;

use serde::Deserialize;

use crate::error::ConfigError;

/// Angular position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Angular position in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Radians(pub f32);

impl Radians {
    /// Create a new Radians value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Motor position in steps (absolute from origin).
///
/// Stored as `i32` so it fits the native atomic word of 32-bit cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Steps(pub i32);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Convert to degrees for a motor with `steps_per_revolution` steps.
    #[inline]
    pub fn to_degrees(self, steps_per_revolution: u32) -> Degrees {
        Degrees(self.0 as f32 * 360.0 / steps_per_revolution as f32)
    }

    /// Convert to radians for a motor with `steps_per_revolution` steps.
    #[inline]
    pub fn to_radians(self, steps_per_revolution: u32) -> Radians {
        Radians(self.0 as f32 * TAU / steps_per_revolution as f32)
    }

    /// Nearest whole step to an angle in degrees.
    #[inline]
    pub fn from_degrees(degrees: Degrees, steps_per_revolution: u32) -> Self {
        Self(libm::roundf(degrees.0 * steps_per_revolution as f32 / 360.0) as i32)
    }

    /// Nearest whole step to an angle in radians.
    #[inline]
    pub fn from_radians(radians: Radians, steps_per_revolution: u32) -> Self {
        Self(libm::roundf(radians.0 * steps_per_revolution as f32 / TAU) as i32)
    }
}

/// Step rate in steps per second. Also the timer frequency in hertz.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Usable as a timer frequency: finite and strictly positive.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Check the rate and return it, or `ConfigError::InvalidSpeed`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ConfigError::InvalidSpeed(self.0))
        }
    }
}

/// Rotational speed in revolutions per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct RevolutionsPerSec(pub f32);

impl RevolutionsPerSec {
    /// Create a new RevolutionsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Convert to a step rate.
    #[inline]
    pub fn to_steps_per_sec(self, steps_per_revolution: u32) -> StepsPerSec {
        StepsPerSec(self.0 * steps_per_revolution as f32)
    }
}

/// Microstep divisor (1, 2, 4, 8, 16, 32, 64, 128, 256).
///
/// Validated at construction to be a power of 2 within the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Microsteps(u16);

impl Microsteps {
    /// Full step (no microstepping).
    pub const FULL: Self = Self(1);
    /// Half step.
    pub const HALF: Self = Self(2);
    /// Quarter step.
    pub const QUARTER: Self = Self(4);
    /// Eighth step.
    pub const EIGHTH: Self = Self(8);
    /// Sixteenth step.
    pub const SIXTEENTH: Self = Self(16);
    /// Thirty-second step.
    pub const THIRTY_SECOND: Self = Self(32);

    const VALID_VALUES: [u16; 9] = [1, 2, 4, 8, 16, 32, 64, 128, 256];

    /// Create a new Microsteps value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` if the value is not a valid power of 2.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if Self::VALID_VALUES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidMicrosteps(value))
        }
    }

    /// Get the raw divisor value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for Microsteps {
    fn default() -> Self {
        Self::FULL
    }
}

impl<'de> Deserialize<'de> for Microsteps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Microsteps::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microsteps_invalid_values() {
        assert!(Microsteps::new(0).is_err());
        assert!(Microsteps::new(3).is_err());
        assert!(Microsteps::new(512).is_err());
        assert_eq!(Microsteps::new(64).unwrap().value(), 64);
    }

    #[test]
    fn test_steps_to_degrees() {
        let degrees = Steps::new(50).to_degrees(200);
        assert!((degrees.value() - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_degrees_round_to_nearest_step() {
        // 200 steps/rev -> 1.8 deg per step; 2.6 deg is 1.44 steps
        assert_eq!(Steps::from_degrees(Degrees(2.6), 200), Steps(1));
        // 2.8 deg is 1.56 steps
        assert_eq!(Steps::from_degrees(Degrees(2.8), 200), Steps(2));
        assert_eq!(Steps::from_degrees(Degrees(-2.8), 200), Steps(-2));
    }

    #[test]
    fn test_radians_conversion() {
        let half_turn = Steps::from_radians(Radians(core::f32::consts::PI), 400);
        assert_eq!(half_turn, Steps(200));
        assert!((Steps(100).to_radians(400).value() - core::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_rps_to_rate() {
        assert_eq!(RevolutionsPerSec(0.5).to_steps_per_sec(200), StepsPerSec(100.0));
    }

    #[test]
    fn test_rate_validation() {
        assert!(StepsPerSec(1.0).validated().is_ok());
        assert!(StepsPerSec(0.0).validated().is_err());
        assert!(StepsPerSec(-5.0).validated().is_err());
        assert!(StepsPerSec(f32::NAN).validated().is_err());
        assert!(StepsPerSec(f32::INFINITY).validated().is_err());
    }
}
