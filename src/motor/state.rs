//! State shared between control calls and the timer interrupt.
//!
//! Every field is a word-sized atomic accessed with plain `load`/`store`, so
//! readers never need a lock and cores without atomic read-modify-write
//! (thumbv6m) are supported. Writers that touch more than one field, or that
//! race with a tick, hold a critical section; the atomics alone only
//! guarantee that no individual field is torn.

use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicU8, Ordering};

use crate::config::units::{Steps, StepsPerSec};
use crate::motion::MotionMode;

/// Position, target, rate and mode of one motor.
#[derive(Debug)]
pub(crate) struct MotionState {
    position: AtomicI32,
    target: AtomicI32,
    /// `f32` bit pattern of the step rate.
    rate: AtomicU32,
    mode: AtomicU8,
    enabled: AtomicBool,
    timer_active: AtomicBool,
}

impl MotionState {
    /// Create a state resting at `position` with the target on top of it.
    ///
    /// The motor starts enabled and idle, with no timer armed.
    pub(crate) fn new(position: Steps, rate: StepsPerSec) -> Self {
        Self {
            position: AtomicI32::new(position.0),
            target: AtomicI32::new(position.0),
            rate: AtomicU32::new(rate.0.to_bits()),
            mode: AtomicU8::new(MotionMode::Idle.to_bits()),
            enabled: AtomicBool::new(true),
            timer_active: AtomicBool::new(false),
        }
    }

    /// Current position in steps.
    #[inline]
    pub(crate) fn position(&self) -> Steps {
        Steps(self.position.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn set_position(&self, position: Steps) {
        self.position.store(position.0, Ordering::Release);
    }

    /// Position the sequencer tracks toward.
    #[inline]
    pub(crate) fn target(&self) -> Steps {
        Steps(self.target.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn set_target(&self, target: Steps) {
        self.target.store(target.0, Ordering::Release);
    }

    /// Step rate, also the timer frequency.
    #[inline]
    pub(crate) fn rate(&self) -> StepsPerSec {
        StepsPerSec(f32::from_bits(self.rate.load(Ordering::Acquire)))
    }

    #[inline]
    pub(crate) fn set_rate(&self, rate: StepsPerSec) {
        self.rate.store(rate.0.to_bits(), Ordering::Release);
    }

    /// Current motion mode.
    #[inline]
    pub(crate) fn mode(&self) -> MotionMode {
        MotionMode::from_bits(self.mode.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn set_mode(&self, mode: MotionMode) {
        self.mode.store(mode.to_bits(), Ordering::Release);
    }

    /// Whether step pulses reach the driver.
    #[inline]
    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Whether the periodic timer is armed.
    #[inline]
    pub(crate) fn is_timer_active(&self) -> bool {
        self.timer_active.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn set_timer_active(&self, active: bool) {
        self.timer_active.store(active, Ordering::Release);
    }
}
