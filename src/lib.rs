//! # stepper-pulse
//!
//! Timer-interrupt driven step/direction stepper motor control with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Interrupt driven**: one step per timer tick, no busy waiting
//! - **embedded-hal 1.0**: Uses `OutputPin` for STEP/DIR/ENABLE
//! - **no_std compatible**: Core library works without standard library
//! - **Target tracking and free running**: explicit [`MotionMode`] state machine
//! - **Encoder feedback**: optional absolute position correction per step
//! - **Configuration-driven**: Define motors in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_pulse::{Stepper, StepperBuilder, Steps, StepsPerSec};
//!
//! let motor = StepperBuilder::new()
//!     .step_pin(step_pin)
//!     .dir_pin(dir_pin)
//!     .timer(step_timer)
//!     .steps_per_revolution(200)
//!     .speed(StepsPerSec(100.0))
//!     .build()?;
//!
//! // In the step timer interrupt handler:
//! motor.on_tick();
//!
//! // From application code:
//! motor.target(Steps(50));
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, DisabledPolicy, MotorConfig, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Direction, MotionMode};
pub use motor::{
    NoEnablePin, NoFeedback, PositionFeedback, StepTimer, Stepper, StepperBuilder,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, Microsteps, Radians, RevolutionsPerSec, Steps, StepsPerSec};
