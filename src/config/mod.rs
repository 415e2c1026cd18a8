//! Configuration module for stepper-pulse.
//!
//! Provides types for loading and validating motor configurations
//! from TOML files (with `std` feature) or pre-parsed data.

#[cfg(feature = "std")]
mod loader;
mod motor;
mod system;
pub mod units;
mod validation;

pub use motor::{DisabledPolicy, MotorConfig};
pub use system::SystemConfig;
pub use validation::{validate_config, validate_motor};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Microsteps, Radians, RevolutionsPerSec, Steps, StepsPerSec};
