//! Example: Closed-loop position with an absolute encoder.
//!
//! The encoder is simulated by a shaft model that loses every tenth step.
//! With feedback the position counter follows the shaft; the dead-reckoned
//! count would drift.
//!
//! Run with: `cargo run --example encoder_feedback`

use std::cell::Cell;
use std::rc::Rc;

use stepper_pulse::{StepTimer, StepperBuilder, Steps, StepsPerSec};

struct NullPin;

impl embedded_hal::digital::ErrorType for NullPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for NullPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

struct NullTimer;

impl StepTimer for NullTimer {
    type Error = core::convert::Infallible;

    fn arm(&mut self, _frequency_hz: f32) -> Result<(), Self::Error> {
        Ok(())
    }

    fn disarm(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn main() {
    println!("=== Encoder Feedback Example ===\n");

    // Shaft position as an encoder would report it
    let shaft = Rc::new(Cell::new(0i32));
    let pulses = Rc::new(Cell::new(0u32));

    let encoder = {
        let shaft = Rc::clone(&shaft);
        let pulses = Rc::clone(&pulses);
        move || {
            let n = pulses.get();
            pulses.set(n + 1);
            // The first poll happens at construction, before any pulse
            if n > 0 && n % 10 != 0 {
                shaft.set(shaft.get() + 1);
            }
            Some(Steps(shaft.get()))
        }
    };

    let motor = StepperBuilder::new()
        .step_pin(NullPin)
        .dir_pin(NullPin)
        .timer(NullTimer)
        .speed(StepsPerSec(1000.0))
        .feedback(encoder)
        .build()
        .expect("Failed to build motor");

    motor.target(Steps(100));
    let mut ticks = 0;
    while motor.position() != motor.target_position() && ticks < 1000 {
        motor.on_tick();
        ticks += 1;
    }

    println!("Target reached after {} ticks", ticks);
    println!("Pulses sent: {}", pulses.get() - 1);
    println!("Position: {} steps", motor.position().value());
}
