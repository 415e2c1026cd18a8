//! Example: Configuration-driven motor construction.
//!
//! This example demonstrates how to:
//! - Load motor configuration from TOML
//! - Build a stepper by configuration name
//! - Drive an active-low enable pin
//!
//! Run with: `cargo run --example config_driven --features std`

use stepper_pulse::{
    config::parse_config,
    error::Result,
    Steps, StepTimer, StepperBuilder,
};

/// Mock pin that prints its writes.
struct PrintPin(&'static str);

impl embedded_hal::digital::ErrorType for PrintPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for PrintPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        println!("  [{}] low", self.0);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        println!("  [{}] high", self.0);
        Ok(())
    }
}

/// Mock timer for demonstration.
struct MockTimer {
    id: i32,
}

impl StepTimer for MockTimer {
    type Error = core::convert::Infallible;

    fn arm(&mut self, frequency_hz: f32) -> core::result::Result<(), Self::Error> {
        println!("  [timer {}] armed at {} Hz", self.id, frequency_hz);
        Ok(())
    }

    fn disarm(&mut self) -> core::result::Result<(), Self::Error> {
        println!("  [timer {}] disarmed", self.id);
        Ok(())
    }
}

const CONFIG: &str = r#"
[motors.turntable]
name = "Turntable"
steps_per_revolution = 200
microsteps = 8
speed_steps_per_sec = 400.0
invert_enable = true
timer_id = 2

[motors.feeder]
name = "Feeder"
steps_per_revolution = 48
disabled_policy = "hold_position"
"#;

fn main() -> Result<()> {
    println!("=== Configuration-Driven Example ===\n");

    let config = parse_config(CONFIG)?;
    println!("Loaded {} motor(s):", config.motors.len());
    for name in config.motor_names() {
        if let Some(motor) = config.motor(name) {
            println!(
                "  {}: {} steps/rev, {} steps/s, timer {}",
                name,
                motor.total_steps_per_revolution(),
                motor.speed.value(),
                motor.timer_id
            );
        }
    }

    println!("\nBuilding 'turntable':");
    let timer_id = config.motor("turntable").map(|m| m.timer_id).unwrap_or(-1);
    let motor = StepperBuilder::new()
        .from_config(&config, "turntable")?
        .step_pin(PrintPin("step"))
        .dir_pin(PrintPin("dir"))
        .enable_pin(PrintPin("enable"))
        .timer(MockTimer { id: timer_id })
        .build()?;

    println!("\nOne step forward:");
    motor.target(Steps(1));
    motor.on_tick();

    println!("\nDisable:");
    motor.enable(false)?;

    println!("\nPosition: {} steps", motor.position().value());
    Ok(())
}
