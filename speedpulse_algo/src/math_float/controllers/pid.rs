// Implements the per-channel PID speed loop that turns measured shaft speed into a PWM duty.

// Key Features:
// - Proportional, integral and derivative gains, replaceable at any time.
// - Derivative taken on the measured speed, so set-point steps cause no derivative kick.
// - Incremental output: each correction is added to the running PWM value.
// - PWM saturated to 0..=255; the integral term is left unbounded.

// Detailed Operation:
// The loop works on magnitudes only. Direction is handled by the owner when the set-point is
// written, so the measured speed enters as |speed| truncated to whole degrees/second. The
// correction p + i - d is truncated toward zero before it is accumulated into the PWM value,
// which means corrections smaller than one duty step have no effect until the integral term
// grows past it.

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

use crate::config::DEF_GAIN;

/// Maximum PWM duty accepted by the motor driver.
pub const PWM_MAX: i32 = 255;

/// Proportional, integral and derivative gains of one channel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidGains {
    pub p: f32, // Proportional gain.
    pub i: f32, // Integral gain.
    pub d: f32, // Derivative gain.
}

impl PidGains {
    pub const fn new(p: f32, i: f32, d: f32) -> Self {
        Self { p, i, d }
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::new(DEF_GAIN, DEF_GAIN, DEF_GAIN)
    }
}

/// PID speed loop of a single motor channel.
#[derive(Clone, Copy, Debug)]
pub struct PidLoop {
    gains: PidGains,
    setpoint: i32,       // Desired speed magnitude, degrees/second.
    integral: f32,       // Accumulated integral term.
    previous_speed: i32, // Measured speed of the previous call, for the derivative.
    pwm: i32,            // Current PWM duty, always within 0..=PWM_MAX.
}

impl PidLoop {
    pub const fn new(gains: PidGains) -> Self {
        Self {
            gains,
            setpoint: 0,
            integral: 0.0,
            previous_speed: 0,
            pwm: 0,
        }
    }

    /// Replaces the gains; used from the next `correct()` on.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    /// Stores the set-point magnitude, raising nonzero values below `min_speed` to it.
    /// Returns the stored value.
    pub fn set_target(&mut self, magnitude: i32, min_speed: i32) -> i32 {
        let mut magnitude = magnitude.saturating_abs();
        if magnitude > 0 && magnitude < min_speed {
            magnitude = min_speed;
        }
        self.setpoint = magnitude;
        magnitude
    }

    /// Runs one control step against the measured speed and returns the new duty.
    pub fn correct(&mut self, measured: f32) -> u8 {
        // Scalar speed, whatever the rotation
        let speed = (measured as i32).saturating_abs();

        let error = self.setpoint as f32 - speed as f32;

        let p = self.gains.p * error;
        self.integral += self.gains.i * error;
        let d = self.gains.d * (speed as f32 - self.previous_speed as f32);

        let correction = (p + self.integral - d) as i32;
        self.pwm = self.pwm.saturating_add(correction).clamp(0, PWM_MAX);

        self.previous_speed = speed;
        self.pwm as u8
    }

    /// Forces the PWM accumulator to zero.
    pub fn stop(&mut self) {
        self.pwm = 0;
    }

    /// Clears the integral term and the derivative history.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_speed = 0;
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    pub fn setpoint(&self) -> i32 {
        self.setpoint
    }

    pub fn integral(&self) -> f32 {
        self.integral
    }

    pub fn previous_speed(&self) -> i32 {
        self.previous_speed
    }

    pub fn pwm(&self) -> u8 {
        self.pwm as u8
    }
}

impl Default for PidLoop {
    fn default() -> Self {
        Self::new(PidGains::default())
    }
}
