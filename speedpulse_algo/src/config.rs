// Construction-time configuration of the encoder path and the speed loop.

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

use crate::error::ConfigError;
use crate::math_float::controllers::pid::PidGains;

/// Default floor applied to nonzero set-points, degrees/second.
pub const DEF_MIN_SPEED: i32 = 3000;

/// Default value of every PID gain.
pub const DEF_GAIN: f32 = 1.0;

const MICROS_PER_SEC: f32 = 1_000_000.0;

/// Encoder geometry and the sampling cadence shared by the estimator and the control timer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Ticks recognised during one revolution of the output shaft.
    pub ticks_per_revolution: u32,
    /// Interval between two `sample()` calls, microseconds.
    pub delta_time_us: u32,
}

impl EncoderConfig {
    pub const fn new(ticks_per_revolution: u32, delta_time_us: u32) -> Self {
        Self {
            ticks_per_revolution,
            delta_time_us,
        }
    }

    /// Rejects configurations the estimator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_revolution == 0 {
            return Err(ConfigError::ZeroTicksPerRevolution);
        }
        if self.delta_time_us == 0 {
            return Err(ConfigError::ZeroDeltaTime);
        }
        Ok(())
    }

    /// Angle covered by one tick, degrees.
    pub fn deg_per_tick(&self) -> f32 {
        360.0 / self.ticks_per_revolution as f32
    }

    /// Number of sampling intervals per second.
    pub fn intervals_per_sec(&self) -> f32 {
        MICROS_PER_SEC / self.delta_time_us as f32
    }

    /// Frequency the periodic control task has to run at, Hz.
    ///
    /// Program the control timer from this value so the cadence and the speed conversion
    /// can never disagree.
    pub fn sample_frequency_hz(&self) -> f32 {
        self.intervals_per_sec()
    }
}

/// Tuning shared by every channel of a `SpeedControl`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedControlConfig {
    /// Floor for nonzero set-points, degrees/second.
    pub min_speed: i32,
    /// Gains every channel starts with.
    pub gains: PidGains,
}

impl Default for SpeedControlConfig {
    fn default() -> Self {
        Self {
            min_speed: DEF_MIN_SPEED,
            gains: PidGains::default(),
        }
    }
}
