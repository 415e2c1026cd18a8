//! Host stand-ins for the step timer and output pins.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use stepper_pulse::{PositionFeedback, StepTimer, Stepper};

// =============================================================================
// Timer
// =============================================================================

/// What the driver has done to the timer so far.
#[derive(Debug, Default, Clone)]
pub struct TimerLog {
    /// Frequency of the running schedule, if armed.
    pub armed: Option<f32>,
    /// Number of `arm` calls.
    pub arms: usize,
    /// Number of `disarm` calls.
    pub disarms: usize,
    /// Number of times `arm` was called on an already armed timer.
    pub stacked: usize,
}

/// Timer that records calls instead of firing interrupts.
#[derive(Debug, Default, Clone)]
pub struct RecordingTimer {
    log: Arc<Mutex<TimerLog>>,
}

impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> TimerLog {
        self.log.lock().unwrap().clone()
    }
}

impl StepTimer for RecordingTimer {
    type Error = Infallible;

    fn arm(&mut self, frequency_hz: f32) -> Result<(), Self::Error> {
        let mut log = self.log.lock().unwrap();
        if log.armed.is_some() {
            log.stacked += 1;
        }
        log.armed = Some(frequency_hz);
        log.arms += 1;
        Ok(())
    }

    fn disarm(&mut self) -> Result<(), Self::Error> {
        let mut log = self.log.lock().unwrap();
        log.armed = None;
        log.disarms += 1;
        Ok(())
    }
}

/// Timer whose hardware refuses to start.
#[derive(Debug, Default)]
pub struct BrokenTimer;

impl StepTimer for BrokenTimer {
    type Error = ();

    fn arm(&mut self, _frequency_hz: f32) -> Result<(), Self::Error> {
        Err(())
    }

    fn disarm(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Timer that refuses a range of `arm` calls, counted from 1.
#[derive(Debug, Clone)]
pub struct FlakyTimer {
    log: Arc<Mutex<TimerLog>>,
    attempts: usize,
    refuse_from: usize,
    refuse_until: usize,
}

impl FlakyTimer {
    /// Refuse only the `n`th arm.
    pub fn refusing_arm(n: usize) -> Self {
        Self {
            log: Arc::default(),
            attempts: 0,
            refuse_from: n,
            refuse_until: n,
        }
    }

    /// Refuse the `n`th arm and every one after it.
    pub fn refusing_from(n: usize) -> Self {
        Self {
            refuse_until: usize::MAX,
            ..Self::refusing_arm(n)
        }
    }

    pub fn log(&self) -> TimerLog {
        self.log.lock().unwrap().clone()
    }
}

impl StepTimer for FlakyTimer {
    type Error = ();

    fn arm(&mut self, frequency_hz: f32) -> Result<(), Self::Error> {
        self.attempts += 1;
        if (self.refuse_from..=self.refuse_until).contains(&self.attempts) {
            return Err(());
        }
        let mut log = self.log.lock().unwrap();
        if log.armed.is_some() {
            log.stacked += 1;
        }
        log.armed = Some(frequency_hz);
        log.arms += 1;
        Ok(())
    }

    fn disarm(&mut self) -> Result<(), Self::Error> {
        let mut log = self.log.lock().unwrap();
        log.armed = None;
        log.disarms += 1;
        Ok(())
    }
}

// =============================================================================
// Pins
// =============================================================================

/// Output pin that records every level written to it.
#[derive(Debug, Default, Clone)]
pub struct RecordingPin {
    writes: Arc<Mutex<Vec<bool>>>,
}

impl RecordingPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<bool> {
        self.writes.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes.lock().unwrap().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes.lock().unwrap().push(true);
        Ok(())
    }
}

/// Output pin that always fails.
#[derive(Debug, Default)]
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// Fire the timer interrupt for `seconds` of simulated time at the current rate.
///
/// A disarmed timer does not fire. Returns the number of ticks delivered.
pub fn simulate<STEP, DIR, TIM, EN, FB>(
    stepper: &Stepper<STEP, DIR, TIM, EN, FB>,
    seconds: f32,
) -> u32
where
    STEP: OutputPin,
    DIR: OutputPin,
    TIM: StepTimer,
    EN: OutputPin,
    FB: PositionFeedback,
{
    if !stepper.is_timer_active() {
        return 0;
    }
    let ticks = (stepper.speed_steps_per_sec().value() * seconds).round() as u32;
    for _ in 0..ticks {
        stepper.on_tick();
    }
    ticks
}
