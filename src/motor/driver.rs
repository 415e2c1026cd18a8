//! Timer-interrupt driven stepper motor.
//!
//! Generic over embedded-hal 1.0 pin types, a [`StepTimer`] and an optional
//! [`PositionFeedback`] source.

use core::cell::RefCell;

use critical_section::{CriticalSection, Mutex};
use embedded_hal::digital::{OutputPin, PinState};

use crate::config::units::{Degrees, Radians, RevolutionsPerSec, Steps, StepsPerSec};
use crate::config::DisabledPolicy;
use crate::error::{MotorError, Result};
use crate::fmt::{debug, trace, warning};
use crate::motion::{next_step, Direction, MotionMode};

use super::feedback::{NoFeedback, PositionFeedback};
use super::pins::NoEnablePin;
use super::state::MotionState;
use super::timer::StepTimer;

/// Everything the interrupt handler writes to or polls.
struct Hardware<STEP, DIR, TIM, EN, FB> {
    step_pin: STEP,
    dir_pin: DIR,
    enable_pin: EN,
    timer: TIM,
    feedback: FB,
}

impl<STEP, DIR, TIM, EN, FB> Hardware<STEP, DIR, TIM, EN, FB>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    fn release_direction(&mut self) -> core::result::Result<(), MotorError> {
        self.dir_pin.set_low().map_err(|_| MotorError::PinError)
    }

    fn pulse(&mut self, level: bool) -> core::result::Result<(), MotorError> {
        self.dir_pin
            .set_state(PinState::from(level))
            .map_err(|_| MotorError::PinError)?;
        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.step_pin.set_low().map_err(|_| MotorError::PinError)
    }
}

/// Stepper motor driven one step per timer tick.
///
/// All methods take `&self`: place the motor somewhere `'static` (for example
/// a `static_cell::StaticCell`) and call [`Stepper::on_tick`] from the timer
/// interrupt while the application calls the control methods.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `TIM`: Periodic timer (must implement [`StepTimer`])
/// - `EN`: Enable pin type (defaults to [`NoEnablePin`])
/// - `FB`: Absolute position source (defaults to [`NoFeedback`])
pub struct Stepper<STEP, DIR, TIM, EN = NoEnablePin, FB = NoFeedback>
where
    STEP: OutputPin,
    DIR: OutputPin,
    TIM: StepTimer,
    EN: OutputPin,
    FB: PositionFeedback,
{
    /// Shared motion state, readable without locking.
    state: MotionState,

    /// Pins, timer and feedback, only touched inside a critical section.
    hardware: Mutex<RefCell<Hardware<STEP, DIR, TIM, EN, FB>>>,

    /// Effective steps per output revolution.
    steps_per_revolution: u32,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Whether enable pin logic is inverted.
    invert_enable: bool,

    /// Position bookkeeping while disabled.
    disabled_policy: DisabledPolicy,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,
}

impl<STEP, DIR, TIM, EN, FB> Stepper<STEP, DIR, TIM, EN, FB>
where
    STEP: OutputPin,
    DIR: OutputPin,
    TIM: StepTimer,
    EN: OutputPin,
    FB: PositionFeedback,
{
    /// Create an idle motor. The builder arms the timer afterwards.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        step_pin: STEP,
        dir_pin: DIR,
        timer: TIM,
        enable_pin: EN,
        mut feedback: FB,
        steps_per_revolution: u32,
        speed: StepsPerSec,
        invert_direction: bool,
        invert_enable: bool,
        disabled_policy: DisabledPolicy,
        name: heapless::String<32>,
    ) -> Self {
        let position = feedback.poll().unwrap_or_default();

        Self {
            state: MotionState::new(position, speed),
            hardware: Mutex::new(RefCell::new(Hardware {
                step_pin,
                dir_pin,
                enable_pin,
                timer,
                feedback,
            })),
            steps_per_revolution,
            invert_direction,
            invert_enable,
            disabled_policy,
            name,
        }
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the effective steps per revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution
    }

    /// Get the position bookkeeping policy used while disabled.
    #[inline]
    pub fn disabled_policy(&self) -> DisabledPolicy {
        self.disabled_policy
    }

    // ---------------------------------------------------------------------
    // Rate
    // ---------------------------------------------------------------------

    /// Set the step rate. Re-arms the timer if it is running; the mode is kept.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidSpeed` for a non-positive or non-finite rate,
    /// `MotorError::TimerError` if re-arming fails. The previous rate is
    /// kept on either error.
    pub fn speed(&self, rate: StepsPerSec) -> Result<()> {
        let rate = rate.validated()?;

        critical_section::with(|cs| {
            if self.state.is_timer_active() {
                self.rearm(cs, rate)?;
            }
            self.state.set_rate(rate);
            Ok::<(), MotorError>(())
        })?;

        debug!("{=str}: speed {} steps/s", self.name.as_str(), rate.0);
        Ok(())
    }

    /// Set the step rate in revolutions per second.
    pub fn speed_rps(&self, rps: RevolutionsPerSec) -> Result<()> {
        self.speed(rps.to_steps_per_sec(self.steps_per_revolution))
    }

    /// Get the current step rate.
    #[inline]
    pub fn speed_steps_per_sec(&self) -> StepsPerSec {
        self.state.rate()
    }

    // ---------------------------------------------------------------------
    // Target and position
    // ---------------------------------------------------------------------

    /// Set the target position. The sequencer acts on it from the next tick.
    #[inline]
    pub fn target(&self, steps: Steps) {
        self.state.set_target(steps);
    }

    /// Set the target position in degrees, rounded to the nearest step.
    pub fn target_deg(&self, degrees: Degrees) {
        self.target(Steps::from_degrees(degrees, self.steps_per_revolution));
    }

    /// Set the target position in radians, rounded to the nearest step.
    pub fn target_rad(&self, radians: Radians) {
        self.target(Steps::from_radians(radians, self.steps_per_revolution));
    }

    /// Get the target position in steps.
    #[inline]
    pub fn target_position(&self) -> Steps {
        self.state.target()
    }

    /// Get current position in steps.
    ///
    /// Lock-free; under motion the value may change right after it is read.
    #[inline]
    pub fn position(&self) -> Steps {
        self.state.position()
    }

    /// Get current position in degrees.
    #[inline]
    pub fn position_deg(&self) -> Degrees {
        self.position().to_degrees(self.steps_per_revolution)
    }

    /// Get current position in radians.
    #[inline]
    pub fn position_rad(&self) -> Radians {
        self.position().to_radians(self.steps_per_revolution)
    }

    /// Overwrite the position counter without moving the shaft.
    ///
    /// The target is left alone, so in tracking mode the motor will move to
    /// close any gap this creates.
    pub fn overwrite_position(&self, steps: Steps) {
        critical_section::with(|_| self.state.set_position(steps));
        debug!("{=str}: position overwritten to {}", self.name.as_str(), steps.0);
    }

    /// Overwrite the position counter with an angle in degrees.
    pub fn overwrite_position_deg(&self, degrees: Degrees) {
        self.overwrite_position(Steps::from_degrees(degrees, self.steps_per_revolution));
    }

    /// Overwrite the position counter with an angle in radians.
    pub fn overwrite_position_rad(&self, radians: Radians) {
        self.overwrite_position(Steps::from_radians(radians, self.steps_per_revolution));
    }

    // ---------------------------------------------------------------------
    // Mode transitions
    // ---------------------------------------------------------------------

    /// Get the current motion mode.
    #[inline]
    pub fn mode(&self) -> MotionMode {
        self.state.mode()
    }

    /// Whether the step timer is armed.
    #[inline]
    pub fn is_timer_active(&self) -> bool {
        self.state.is_timer_active()
    }

    /// Step continuously in the direction given by the sign of `direction`.
    ///
    /// Zero stops free running: the timer is disarmed, the mode becomes
    /// [`MotionMode::Idle`] and the direction line is released.
    pub fn free_run(&self, direction: i32) -> Result<()> {
        match Direction::from_sign(direction) {
            Some(direction) => self.enter(MotionMode::FreeRunning(direction)),
            None => self.stop(),
        }
    }

    /// Step toward the target position, cancelling any free run.
    ///
    /// If the timer cannot be armed the mode is left as it was.
    pub fn track_target(&self) -> Result<()> {
        self.enter(MotionMode::Tracking)
    }

    /// Disarm the timer, go idle and release the direction line.
    ///
    /// Position and target are left unchanged.
    pub fn stop(&self) -> Result<()> {
        critical_section::with(|cs| {
            let mut hw = self.hardware.borrow_ref_mut(cs);
            if self.state.is_timer_active() {
                hw.timer.disarm().map_err(|_| MotorError::TimerError)?;
                self.state.set_timer_active(false);
            }
            self.state.set_mode(MotionMode::Idle);
            hw.release_direction()
        })?;

        debug!("{=str}: stopped at {}", self.name.as_str(), self.position().0);
        Ok(())
    }

    fn enter(&self, mode: MotionMode) -> Result<()> {
        critical_section::with(|cs| {
            self.rearm(cs, self.state.rate())?;
            self.state.set_mode(mode);
            Ok::<(), MotorError>(())
        })?;

        debug!("{=str}: mode {}", self.name.as_str(), mode);
        Ok(())
    }

    /// Replace any running schedule with one at `rate`.
    ///
    /// Callers commit rate and mode only after this succeeds. If the new
    /// schedule cannot be armed, the previous one is restored when possible
    /// and `timer_active` reports what the hardware is actually doing.
    fn rearm(
        &self,
        cs: CriticalSection<'_>,
        rate: StepsPerSec,
    ) -> core::result::Result<(), MotorError> {
        let mut hw = self.hardware.borrow_ref_mut(cs);
        let was_active = self.state.is_timer_active();
        if was_active {
            hw.timer.disarm().map_err(|_| MotorError::TimerError)?;
            self.state.set_timer_active(false);
        }

        if hw.timer.arm(rate.0).is_err() {
            if was_active && hw.timer.arm(self.state.rate().0).is_ok() {
                self.state.set_timer_active(true);
            }
            warning!("{=str}: timer rejected {} Hz", self.name.as_str(), rate.0);
            return Err(MotorError::TimerError);
        }
        self.state.set_timer_active(true);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Enable
    // ---------------------------------------------------------------------

    /// Enable or disable the driver.
    ///
    /// Disabling releases the direction line and suppresses pulses, but does
    /// not disarm the timer: the sequencer keeps running and, with
    /// [`DisabledPolicy::TrackPosition`], keeps counting.
    pub fn enable(&self, enabled: bool) -> Result<()> {
        critical_section::with(|cs| {
            self.state.set_enabled(enabled);
            let mut hw = self.hardware.borrow_ref_mut(cs);
            hw.enable_pin
                .set_state(PinState::from(enabled ^ self.invert_enable))
                .map_err(|_| MotorError::PinError)?;
            if !enabled {
                hw.release_direction()?;
            }
            Ok::<(), MotorError>(())
        })?;

        debug!("{=str}: enabled {}", self.name.as_str(), enabled);
        Ok(())
    }

    /// Whether step pulses reach the driver.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    // ---------------------------------------------------------------------
    // Interrupt context
    // ---------------------------------------------------------------------

    /// Run one sequencer tick. Call this from the step timer interrupt.
    ///
    /// Bounded time: at most three pin writes and one feedback poll. A pin
    /// failure skips the step and leaves the position unchanged.
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let position = self.state.position();
            let Some(direction) = next_step(self.state.mode(), position, self.state.target())
            else {
                return;
            };

            let mut hw = self.hardware.borrow_ref_mut(cs);
            if self.state.is_enabled() {
                if hw.pulse(direction.pin_level(self.invert_direction)).is_err() {
                    warning!("{=str}: step pulse failed, tick skipped", self.name.as_str());
                    return;
                }
            } else if self.disabled_policy == DisabledPolicy::HoldPosition {
                return;
            }

            let next = hw
                .feedback
                .poll()
                .unwrap_or(Steps(position.0.wrapping_add(direction.sign())));
            self.state.set_position(next);
            trace!("{=str}: step {} -> {}", self.name.as_str(), direction, next.0);
        });
    }
}
