//! Motor module for stepper-pulse.
//!
//! Provides the interrupt-driven stepper, its builder and the timer and
//! feedback collaborator traits.

mod builder;
mod driver;
mod feedback;
mod pins;
mod state;
mod timer;

pub use builder::StepperBuilder;
pub use driver::Stepper;
pub use feedback::{NoFeedback, PositionFeedback};
pub use pins::NoEnablePin;
pub use timer::StepTimer;
