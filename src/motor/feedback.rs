//! Absolute position feedback (encoders).

use crate::config::units::Steps;

/// A source of absolute shaft position, already scaled to motor steps.
///
/// Polled once per executed step from interrupt context, so implementations
/// must not block. `None` means no reading is available and the driver falls
/// back to dead reckoning for that step.
pub trait PositionFeedback {
    /// Read the absolute position, if available.
    fn poll(&mut self) -> Option<Steps>;
}

/// Feedback source that never has a reading. Pure dead reckoning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl PositionFeedback for NoFeedback {
    #[inline]
    fn poll(&mut self) -> Option<Steps> {
        None
    }
}

impl<F> PositionFeedback for F
where
    F: FnMut() -> Option<Steps>,
{
    #[inline]
    fn poll(&mut self) -> Option<Steps> {
        self()
    }
}
