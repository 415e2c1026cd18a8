//! Builder pattern for Stepper.

use embedded_hal::digital::OutputPin;

use crate::config::units::{Microsteps, StepsPerSec};
use crate::config::{validate_motor, DisabledPolicy, MotorConfig, SystemConfig};
use crate::error::{truncated, ConfigError, Error, Result};

use super::driver::Stepper;
use super::feedback::{NoFeedback, PositionFeedback};
use super::pins::NoEnablePin;
use super::timer::StepTimer;

/// Builder for creating Stepper instances.
///
/// Step pin, direction pin and timer are required. Everything else has the
/// same default as an empty [`MotorConfig`]: 200 steps per revolution, full
/// stepping, 10 steps/s, no inversion, no enable pin, no feedback.
pub struct StepperBuilder<STEP, DIR, TIM, EN = NoEnablePin, FB = NoFeedback> {
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    timer: Option<TIM>,
    enable_pin: EN,
    feedback: FB,
    config: MotorConfig,
}

impl<STEP, DIR, TIM> Default for StepperBuilder<STEP, DIR, TIM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    TIM: StepTimer,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, TIM> StepperBuilder<STEP, DIR, TIM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    TIM: StepTimer,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            timer: None,
            enable_pin: NoEnablePin,
            feedback: NoFeedback,
            config: MotorConfig::new("motor", 200),
        }
    }
}

impl<STEP, DIR, TIM, EN, FB> StepperBuilder<STEP, DIR, TIM, EN, FB>
where
    STEP: OutputPin,
    DIR: OutputPin,
    TIM: StepTimer,
    EN: OutputPin,
    FB: PositionFeedback,
{
    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the step timer.
    pub fn timer(mut self, timer: TIM) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the ENABLE pin.
    pub fn enable_pin<E>(self, pin: E) -> StepperBuilder<STEP, DIR, TIM, E, FB>
    where
        E: OutputPin,
    {
        StepperBuilder {
            step_pin: self.step_pin,
            dir_pin: self.dir_pin,
            timer: self.timer,
            enable_pin: pin,
            feedback: self.feedback,
            config: self.config,
        }
    }

    /// Set an absolute position source polled on every step.
    pub fn feedback<F>(self, feedback: F) -> StepperBuilder<STEP, DIR, TIM, EN, F>
    where
        F: PositionFeedback,
    {
        StepperBuilder {
            step_pin: self.step_pin,
            dir_pin: self.dir_pin,
            timer: self.timer,
            enable_pin: self.enable_pin,
            feedback,
            config: self.config,
        }
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.config.name = truncated(name);
        self
    }

    /// Set steps per revolution (base motor steps before microstepping).
    pub fn steps_per_revolution(mut self, steps: u16) -> Self {
        self.config.steps_per_revolution = steps;
        self
    }

    /// Set microstep configuration of the driver chip.
    pub fn microsteps(mut self, microsteps: Microsteps) -> Self {
        self.config.microsteps = microsteps;
        self
    }

    /// Set the initial step rate.
    pub fn speed(mut self, speed: StepsPerSec) -> Self {
        self.config.speed = speed;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.config.invert_direction = invert;
        self
    }

    /// Set enable pin inversion (for active-low enable inputs).
    pub fn invert_enable(mut self, invert: bool) -> Self {
        self.config.invert_enable = invert;
        self
    }

    /// Set what happens to the position counter while disabled.
    pub fn disabled_policy(mut self, policy: DisabledPolicy) -> Self {
        self.config.disabled_policy = policy;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(truncated(motor_name)))
        })?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the Stepper, drive the enable line active and start tracking.
    ///
    /// The initial position is the first feedback reading, or zero. The
    /// target starts equal to it, so the motor does not move until a new
    /// target is set.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing, the configuration is
    /// invalid, or the enable pin or timer fail.
    pub fn build(self) -> Result<Stepper<STEP, DIR, TIM, EN, FB>> {
        let step_pin = self
            .step_pin
            .ok_or(ConfigError::MissingComponent("step_pin"))?;
        let dir_pin = self.dir_pin.ok_or(ConfigError::MissingComponent("dir_pin"))?;
        let timer = self.timer.ok_or(ConfigError::MissingComponent("timer"))?;

        validate_motor(&self.config)?;

        let stepper = Stepper::new(
            step_pin,
            dir_pin,
            timer,
            self.enable_pin,
            self.feedback,
            self.config.total_steps_per_revolution(),
            self.config.speed,
            self.config.invert_direction,
            self.config.invert_enable,
            self.config.disabled_policy,
            self.config.name,
        );

        stepper.enable(true)?;
        stepper.track_target()?;
        Ok(stepper)
    }
}
