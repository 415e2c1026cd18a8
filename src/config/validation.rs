//! Configuration validation.

use crate::error::{ConfigError, Result};

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every motor:
/// - Steps per revolution is non-zero
/// - Initial speed is finite and positive
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for motor in config.motors.values() {
        validate_motor(motor)?;
    }

    Ok(())
}

/// Validate a single motor configuration.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.steps_per_revolution == 0 {
        return Err(ConfigError::InvalidStepsPerRevolution(0).into());
    }

    config.speed.validated()?;

    Ok(())
}
