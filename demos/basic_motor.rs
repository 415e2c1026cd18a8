//! Basic motor control example.
//!
//! Demonstrates target tracking, free running and stopping. The hardware
//! timer is replaced by a loop that calls `on_tick()` the way an interrupt
//! handler would.
//!
//! Run with: `cargo run --example basic_motor`

use stepper_pulse::{Degrees, StepTimer, Stepper, StepperBuilder, Steps, StepsPerSec};

/// Mock output pin for demonstration.
struct MockPin {
    state: bool,
}

impl MockPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

/// Mock timer that only reports what it was asked to do.
struct MockTimer;

impl StepTimer for MockTimer {
    type Error = core::convert::Infallible;

    fn arm(&mut self, frequency_hz: f32) -> Result<(), Self::Error> {
        println!("  [timer] armed at {} Hz", frequency_hz);
        Ok(())
    }

    fn disarm(&mut self) -> Result<(), Self::Error> {
        println!("  [timer] disarmed");
        Ok(())
    }
}

/// Deliver the interrupts a running timer would fire in `seconds`.
fn run_for(motor: &Stepper<MockPin, MockPin, MockTimer>, seconds: f32) {
    if !motor.is_timer_active() {
        return;
    }
    let ticks = (motor.speed_steps_per_sec().value() * seconds) as u32;
    for _ in 0..ticks {
        motor.on_tick();
    }
}

fn main() {
    println!("=== Basic Motor Control Example ===\n");

    let motor = StepperBuilder::new()
        .name("demo_motor")
        .step_pin(MockPin::new())
        .dir_pin(MockPin::new())
        .timer(MockTimer)
        .steps_per_revolution(200)
        .speed(StepsPerSec(100.0))
        .build()
        .expect("Failed to build motor");

    println!("Motor created: {}", motor.name());
    println!("Mode: {}", motor.mode().name());

    println!("\n=== Target Tracking ===");
    motor.target(Steps(50));
    run_for(&motor, 0.5);
    println!(
        "After 0.5 s: {} steps ({} degrees)",
        motor.position().value(),
        motor.position_deg().value()
    );

    motor.target_deg(Degrees(-90.0));
    run_for(&motor, 1.0);
    println!("After target -90 deg: {} steps", motor.position().value());

    println!("\n=== Free Running ===");
    motor.speed(StepsPerSec(200.0)).expect("Failed to change speed");
    motor.free_run(1).expect("Failed to start free run");
    println!("Mode: {}", motor.mode().name());
    run_for(&motor, 1.0);
    println!("After 1 s forward: {} steps", motor.position().value());

    println!("\n=== Stop ===");
    motor.stop().expect("Failed to stop");
    run_for(&motor, 1.0);
    println!(
        "Mode: {}, position still {} steps",
        motor.mode().name(),
        motor.position().value()
    );

    println!("\n=== Example Complete ===");
    println!("On hardware, call motor.on_tick() from the step timer interrupt.");
}
