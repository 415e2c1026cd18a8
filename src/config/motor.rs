//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Microsteps, StepsPerSec};
use crate::error::truncated;

/// What the sequencer does with the position counter while the driver is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum DisabledPolicy {
    /// Keep counting steps even though no pulse reaches the driver.
    ///
    /// The logical position drifts from the shaft while disabled.
    #[default]
    TrackPosition,
    /// Freeze the position counter (and skip feedback polls) while disabled.
    HoldPosition,
}

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 bytes; longer names are cut).
    pub name: String<32>,

    /// Base steps per revolution (typically 200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Microstep setting of the driver chip (1, 2, 4, 8, 16, 32, etc.).
    #[serde(default)]
    pub microsteps: Microsteps,

    /// Initial step rate, which is also the timer frequency.
    #[serde(default = "default_speed", rename = "speed_steps_per_sec")]
    pub speed: StepsPerSec,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Invert enable pin logic (most driver chips enable on low).
    #[serde(default)]
    pub invert_enable: bool,

    /// Hardware timer selector; -1 asks the platform for a virtual timer.
    ///
    /// The driver never reads this. Board code uses it to pick which
    /// [`StepTimer`](crate::StepTimer) to hand to the builder.
    #[serde(default = "default_timer_id")]
    pub timer_id: i32,

    /// Position bookkeeping while disabled.
    #[serde(default)]
    pub disabled_policy: DisabledPolicy,
}

fn default_speed() -> StepsPerSec {
    StepsPerSec(10.0)
}

fn default_timer_id() -> i32 {
    -1
}

impl MotorConfig {
    /// Create a configuration with the defaults used when a TOML key is absent.
    pub fn new(name: &str, steps_per_revolution: u16) -> Self {
        Self {
            name: truncated(name),
            steps_per_revolution,
            microsteps: Microsteps::default(),
            speed: default_speed(),
            invert_direction: false,
            invert_enable: false,
            timer_id: default_timer_id(),
            disabled_policy: DisabledPolicy::default(),
        }
    }

    /// Calculate total steps per output shaft revolution.
    pub fn total_steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution as u32 * self.microsteps.value() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_steps() {
        let mut config = MotorConfig::new("test", 200);
        config.microsteps = Microsteps::SIXTEENTH;

        // 200 * 16 = 3200
        assert_eq!(config.total_steps_per_revolution(), 3200);
    }

    #[test]
    fn test_long_name_is_cut_not_dropped() {
        let config = MotorConfig::new("a_very_long_motor_name_for_the_turntable_axis", 200);
        assert_eq!(config.name.as_str(), "a_very_long_motor_name_for_the_t");
    }

    #[test]
    fn test_defaults() {
        let config = MotorConfig::new("test", 200);
        assert_eq!(config.speed, StepsPerSec(10.0));
        assert_eq!(config.timer_id, -1);
        assert_eq!(config.disabled_policy, DisabledPolicy::TrackPosition);
        assert_eq!(config.total_steps_per_revolution(), 200);
    }
}
