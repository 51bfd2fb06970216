//! This module defines the pin configurations for the dual H-bridge motor driver.
use super::PinDef;
use super::{PinMode, Port};

/// Standby/enable pin of the bridge, high to run
pub const ENABLE: PinDef = PinDef {
    port: Port::A,
    pin: 4,
    mode: PinMode::Output,
};

/// PWM pin for motor 1 (TIM2_CH1)
pub const PWM_M1: PinDef = PinDef {
    port: Port::A,
    pin: 0,
    mode: PinMode::Alt(1),
};

/// PWM pin for motor 2 (TIM2_CH2)
pub const PWM_M2: PinDef = PinDef {
    port: Port::A,
    pin: 1,
    mode: PinMode::Alt(1),
};

/// Direction input 1 of motor 1
pub const M1_IN1: PinDef = PinDef {
    port: Port::B,
    pin: 0,
    mode: PinMode::Output,
};

/// Direction input 2 of motor 1
pub const M1_IN2: PinDef = PinDef {
    port: Port::B,
    pin: 1,
    mode: PinMode::Output,
};

/// Direction input 1 of motor 2
pub const M2_IN1: PinDef = PinDef {
    port: Port::A,
    pin: 9,
    mode: PinMode::Output,
};

/// Direction input 2 of motor 2
pub const M2_IN2: PinDef = PinDef {
    port: Port::A,
    pin: 10,
    mode: PinMode::Output,
};
