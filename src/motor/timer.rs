//! Periodic step timer abstraction.

/// A hardware timer that fires the step interrupt periodically.
///
/// The platform's interrupt handler for this timer must call
/// [`Stepper::on_tick`](super::Stepper::on_tick) once per period. The driver
/// calls `arm`/`disarm` only from inside a critical section, so the handler
/// never runs concurrently with a reconfiguration.
pub trait StepTimer {
    /// Error type for timer operations.
    type Error: core::fmt::Debug;

    /// Start (or restart) periodic interrupts at `frequency_hz`.
    ///
    /// Arming an already armed timer must replace the previous schedule.
    fn arm(&mut self, frequency_hz: f32) -> Result<(), Self::Error>;

    /// Stop periodic interrupts.
    ///
    /// After this returns no further tick for the old schedule may fire.
    fn disarm(&mut self) -> Result<(), Self::Error>;
}
