//! Per-tick step decision.

use crate::config::units::Steps;

use super::mode::{Direction, MotionMode};

/// Decide which way, if at all, the next tick should step.
///
/// Free-running always wins over the target. In tracking mode an exact
/// position/target match never steps.
#[inline]
pub fn next_step(mode: MotionMode, position: Steps, target: Steps) -> Option<Direction> {
    match mode {
        MotionMode::FreeRunning(direction) => Some(direction),
        MotionMode::Tracking if target > position => Some(Direction::Forward),
        MotionMode::Tracking if target < position => Some(Direction::Backward),
        MotionMode::Tracking | MotionMode::Idle => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_moves_toward_target() {
        assert_eq!(
            next_step(MotionMode::Tracking, Steps(0), Steps(10)),
            Some(Direction::Forward)
        );
        assert_eq!(
            next_step(MotionMode::Tracking, Steps(0), Steps(-10)),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn test_tracking_at_target_is_noop() {
        assert_eq!(next_step(MotionMode::Tracking, Steps(7), Steps(7)), None);
    }

    #[test]
    fn test_free_run_ignores_target() {
        let forward = MotionMode::FreeRunning(Direction::Forward);
        assert_eq!(next_step(forward, Steps(100), Steps(0)), Some(Direction::Forward));
        assert_eq!(next_step(forward, Steps(0), Steps(0)), Some(Direction::Forward));

        let backward = MotionMode::FreeRunning(Direction::Backward);
        assert_eq!(next_step(backward, Steps(0), Steps(100)), Some(Direction::Backward));
    }

    #[test]
    fn test_idle_never_steps() {
        assert_eq!(next_step(MotionMode::Idle, Steps(0), Steps(100)), None);
    }
}
