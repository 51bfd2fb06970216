// Hardware capabilities consumed by the control core.

// Key Features:
// - DigitalInput: instantaneous logic level of one encoder pin
// - MotorDriver: PWM duty, rotation and stop per driver channel
// - Direction/MotorCommand: per-channel state reported back to the application

// Detailed Operation:
// The decoder and the speed loop never touch registers. Board crates implement these traits
// on top of their HAL pins and timers, and tests implement them with scripted levels and a
// recording driver. Both traits must be callable from interrupt context in bounded time.

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

/// Logic level reported by a digital input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    High,
    Low,
}

/// A single digital input pin (one quadrature channel).
pub trait DigitalInput {
    /// Reads the current logic level of the pin.
    fn read_level(&mut self) -> Level;
}

/// Rotation command accepted by the motor driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Forward,
    Backward,
}

/// PWM-capable motor driver addressing independent channels.
pub trait MotorDriver {
    /// Sets the PWM duty (0..=255) of a channel.
    fn set_pwm(&mut self, channel: usize, duty: u8);

    /// Sets the rotation of a channel.
    fn set_direction(&mut self, channel: usize, rotation: Rotation);

    /// Stops a channel.
    fn stop(&mut self, channel: usize);
}

/// Direction state of a controlled channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    Stopped,
}

/// The last command a channel has issued to the driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    pub direction: Direction,
    pub pwm_duty: u8,
}
