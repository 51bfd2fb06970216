//! Board support for the speedpulse controller: pin map, quadrature encoder inputs,
//! dual H-bridge PWM driver and the control-cadence timer.
#![no_std]

pub mod control_timer;
pub mod encoder_input;
pub mod motor_pwm;
pub mod pinout;
