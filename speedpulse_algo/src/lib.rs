// Closed-loop angular speed control for brushed DC motors with quadrature encoders.

// Key Features:
// - Quadrature decoding into an interrupt-safe tick counter
// - Fixed-cadence speed and travelled-distance estimation in degrees
// - Per-channel PID speed loop with derivative on measurement and PWM saturation
// - Narrow hardware traits so the whole core runs against test doubles on the host

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
mod log;

pub mod config;
pub mod encoder_position;
pub mod error;
pub mod hw;
pub mod math_float;
pub mod speed_control;

pub use config::{EncoderConfig, SpeedControlConfig};
pub use encoder_position::quadrature::QuadratureDecoder;
pub use encoder_position::speed_estimator::SpeedEstimator;
pub use encoder_position::tick_counter::TickCounter;
pub use error::{ConfigError, ControlError};
pub use hw::{DigitalInput, Direction, Level, MotorCommand, MotorDriver, Rotation};
pub use math_float::controllers::pid::{PidGains, PidLoop};
pub use speed_control::{DualSpeedControl, SingleSpeedControl, SpeedControl};

#[cfg(test)]
pub(crate) mod mock;
