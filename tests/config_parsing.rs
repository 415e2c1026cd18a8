//! Configuration parsing and config-driven construction.

mod common;

use stepper_pulse::config::{parse_config, validate_config, SystemConfig};
use stepper_pulse::error::ConfigError;
use stepper_pulse::{DisabledPolicy, Error, Microsteps, Steps, StepperBuilder, StepsPerSec};

use common::{RecordingPin, RecordingTimer};

const FULL_CONFIG: &str = r#"
[motors.turntable]
name = "Turntable"
steps_per_revolution = 200
microsteps = 16
speed_steps_per_sec = 800.0
invert_direction = true
invert_enable = true
timer_id = 1

[motors.feeder]
name = "Feeder"
steps_per_revolution = 48
disabled_policy = "hold_position"
"#;

#[test]
fn parse_full_system_config() {
    let config: SystemConfig = toml::from_str(FULL_CONFIG).expect("Should parse config");

    let turntable = config.motor("turntable").expect("Motor should exist");
    assert_eq!(turntable.name.as_str(), "Turntable");
    assert_eq!(turntable.microsteps, Microsteps::SIXTEENTH);
    assert_eq!(turntable.speed, StepsPerSec(800.0));
    assert!(turntable.invert_direction);
    assert!(turntable.invert_enable);
    assert_eq!(turntable.timer_id, 1);

    let feeder = config.motor("feeder").expect("Motor should exist");
    assert_eq!(feeder.disabled_policy, DisabledPolicy::HoldPosition);
    assert_eq!(feeder.timer_id, -1);

    let names: Vec<_> = config.motor_names().collect();
    assert_eq!(names, ["turntable", "feeder"]);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn invalid_microsteps_rejected() {
    let toml_str = r#"
[motors.m1]
name = "Motor"
steps_per_revolution = 200
microsteps = 3
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

#[test]
fn zero_steps_per_revolution_rejected() {
    let toml_str = r#"
[motors.m1]
name = "Motor"
steps_per_revolution = 0
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    ));
}

#[test]
fn unknown_motor_name() {
    let config = parse_config(FULL_CONFIG).unwrap();
    let result = StepperBuilder::<RecordingPin, RecordingPin, RecordingTimer>::new()
        .from_config(&config, "spindle");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MotorNotFound(_)))
    ));
}

#[test]
fn build_motor_from_config() {
    let config = parse_config(FULL_CONFIG).unwrap();
    let timer = RecordingTimer::new();
    let dir = RecordingPin::new();

    let motor = StepperBuilder::new()
        .from_config(&config, "turntable")
        .unwrap()
        .step_pin(RecordingPin::new())
        .dir_pin(dir.clone())
        .timer(timer.clone())
        .build()
        .unwrap();

    assert_eq!(motor.name(), "Turntable");
    assert_eq!(motor.steps_per_revolution(), 3200);
    assert_eq!(timer.log().armed, Some(800.0));

    // Inverted direction: forward drives the line low
    motor.target(Steps(1));
    motor.on_tick();
    assert_eq!(dir.writes(), vec![false]);
}
