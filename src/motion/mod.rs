//! Motion module for stepper-pulse.
//!
//! Provides the motion mode state machine types and the per-tick step decision.

mod mode;
mod sequencer;

pub use mode::{Direction, MotionMode};
pub use sequencer::next_step;
