//! Motion modes and step direction.

/// Direction of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive step count.
    Forward,
    /// Negative step count.
    Backward,
}

impl Direction {
    /// Get direction from a signed request, `None` for zero.
    #[inline]
    pub fn from_sign(value: i32) -> Option<Self> {
        match value {
            0 => None,
            v if v > 0 => Some(Direction::Forward),
            _ => Some(Direction::Backward),
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Level of the DIR line for this direction.
    #[inline]
    pub fn pin_level(self, invert: bool) -> bool {
        (self == Direction::Forward) ^ invert
    }
}

/// What the sequencer does on each timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionMode {
    /// Stepping stopped.
    #[default]
    Idle,
    /// One step per tick toward the target position.
    Tracking,
    /// One step per tick in a fixed direction, target ignored.
    FreeRunning(Direction),
}

impl MotionMode {
    /// Encode as a single byte for atomic storage.
    #[inline]
    pub(crate) const fn to_bits(self) -> u8 {
        match self {
            MotionMode::Idle => 0,
            MotionMode::Tracking => 1,
            MotionMode::FreeRunning(Direction::Forward) => 2,
            MotionMode::FreeRunning(Direction::Backward) => 3,
        }
    }

    /// Decode from [`MotionMode::to_bits`]. Unknown codes read as `Idle`.
    #[inline]
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => MotionMode::Tracking,
            2 => MotionMode::FreeRunning(Direction::Forward),
            3 => MotionMode::FreeRunning(Direction::Backward),
            _ => MotionMode::Idle,
        }
    }

    /// Name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            MotionMode::Idle => "Idle",
            MotionMode::Tracking => "Tracking",
            MotionMode::FreeRunning(Direction::Forward) => "FreeRunning(Forward)",
            MotionMode::FreeRunning(Direction::Backward) => "FreeRunning(Backward)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_bits() {
        for mode in [
            MotionMode::Idle,
            MotionMode::Tracking,
            MotionMode::FreeRunning(Direction::Forward),
            MotionMode::FreeRunning(Direction::Backward),
        ] {
            assert_eq!(MotionMode::from_bits(mode.to_bits()), mode);
        }
        assert_eq!(MotionMode::from_bits(0xFF), MotionMode::Idle);
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Direction::from_sign(5), Some(Direction::Forward));
        assert_eq!(Direction::from_sign(-1), Some(Direction::Backward));
        assert_eq!(Direction::from_sign(0), None);
    }

    #[test]
    fn test_pin_level_inverts() {
        assert!(Direction::Forward.pin_level(false));
        assert!(!Direction::Forward.pin_level(true));
        assert!(!Direction::Backward.pin_level(false));
        assert!(Direction::Backward.pin_level(true));
    }
}
