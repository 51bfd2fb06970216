// Implements closed-loop speed control of N motors sharing one motor driver.

// Key Features:
// - One PID loop and one speed estimator per channel, stored in fixed-size arrays.
// - Signed set-points: the sign selects the rotation, the magnitude feeds the PID loop.
// - Shared minimum-speed floor so nonzero set-points always overcome static friction.
// - Direct Forward <-> Backward reversal, no forced pass through Stopped.

// Detailed Operation:
// `set_speed()` splits a signed set-point into a rotation command, issued to the driver at
// once, and a magnitude stored in the channel's PID loop. A zero set-point stops the channel
// and forces its PWM to zero. `correct()` must run at the estimator's cadence: it samples the
// channel's speed, runs one PID step and writes the resulting duty to the driver.

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

use core::cmp::Ordering;

use crate::config::SpeedControlConfig;
use crate::encoder_position::speed_estimator::SpeedEstimator;
use crate::error::ControlError;
use crate::hw::{Direction, MotorCommand, MotorDriver, Rotation};
use crate::math_float::controllers::pid::{PidGains, PidLoop, PWM_MAX};

/// Speed control of a single motor.
pub type SingleSpeedControl<'a, M> = SpeedControl<'a, M, 1>;

/// Speed control of two motors on a dual-channel driver.
pub type DualSpeedControl<'a, M> = SpeedControl<'a, M, 2>;

pub struct SpeedControl<'a, M: MotorDriver, const N: usize> {
    driver: M,                               // Shared motor driver
    estimators: [SpeedEstimator<'a>; N],     // Speed feedback per channel
    loops: [PidLoop; N],                     // PID state per channel
    directions: [Direction; N],              // Last direction issued per channel
    min_speed: i32,                          // Floor for nonzero set-points, deg/s
}

impl<'a, M, const N: usize> SpeedControl<'a, M, N>
where
    M: MotorDriver,
{
    /// Creates the controller. Channel `n` is driven by `estimators[n]` and addresses
    /// channel `n` of the driver. All channels start stopped with the configured gains.
    pub fn new(driver: M, estimators: [SpeedEstimator<'a>; N], config: SpeedControlConfig) -> Self {
        Self {
            driver,
            estimators,
            loops: [PidLoop::new(config.gains); N],
            directions: [Direction::Stopped; N],
            min_speed: config.min_speed,
        }
    }

    #[inline(always)]
    fn channel(channel: usize) -> Result<usize, ControlError> {
        if channel < N {
            Ok(channel)
        } else {
            Err(ControlError::InvalidChannel(channel))
        }
    }

    /// Sets the target speed of a channel in degrees/second; the sign selects the rotation.
    pub fn set_speed(&mut self, channel: usize, target: i32) -> Result<(), ControlError> {
        let ch = Self::channel(channel)?;

        let direction = match target.cmp(&0) {
            Ordering::Less => Direction::Backward,
            Ordering::Greater => Direction::Forward,
            Ordering::Equal => Direction::Stopped,
        };

        match direction {
            Direction::Forward => self.driver.set_direction(ch, Rotation::Forward),
            Direction::Backward => self.driver.set_direction(ch, Rotation::Backward),
            Direction::Stopped => {
                self.driver.stop(ch);
                self.driver.set_pwm(ch, 0);
                self.loops[ch].stop();
            }
        }

        if direction != self.directions[ch] {
            log_debug!("motor {}: {} -> {}", ch, self.directions[ch], direction);
        }
        self.directions[ch] = direction;

        self.loops[ch].set_target(target, self.min_speed);
        Ok(())
    }

    /// Samples the channel's speed, runs one PID step and writes the duty to the driver.
    pub fn correct(&mut self, channel: usize) -> Result<u8, ControlError> {
        let ch = Self::channel(channel)?;
        Ok(self.correct_channel(ch))
    }

    /// One control period: `correct()` for every channel in index order.
    pub fn correct_all(&mut self) {
        for ch in 0..N {
            self.correct_channel(ch);
        }
    }

    #[inline(always)]
    fn correct_channel(&mut self, ch: usize) -> u8 {
        let speed = self.estimators[ch].sample();
        let duty = self.loops[ch].correct(speed);
        self.driver.set_pwm(ch, duty);
        duty
    }

    /// Replaces the gains of one channel.
    pub fn set_gains(&mut self, channel: usize, gains: PidGains) -> Result<(), ControlError> {
        let ch = Self::channel(channel)?;
        self.loops[ch].set_gains(gains);
        Ok(())
    }

    /// Replaces the gains of every channel at once.
    pub fn set_all_gains(&mut self, gains: [PidGains; N]) {
        for (pid, gains) in self.loops.iter_mut().zip(gains) {
            pid.set_gains(gains);
        }
    }

    /// Sets the floor shared by every channel, clamped to 0..=255.
    pub fn set_min_speed(&mut self, speed: i32) {
        let clamped = speed.clamp(0, PWM_MAX);
        if clamped != speed {
            log_debug!("min speed {} clamped to {}", speed, clamped);
        }
        self.min_speed = clamped;
    }

    pub fn min_speed(&self) -> i32 {
        self.min_speed
    }

    /// Degrees travelled by a channel since its previous distance query.
    pub fn distance(&mut self, channel: usize) -> Result<f32, ControlError> {
        let ch = Self::channel(channel)?;
        Ok(self.estimators[ch].get_distance())
    }

    /// Last sampled speed of a channel, degrees/second.
    pub fn speed(&self, channel: usize) -> Result<f32, ControlError> {
        let ch = Self::channel(channel)?;
        Ok(self.estimators[ch].speed())
    }

    /// Direction and duty last issued on a channel.
    pub fn command(&self, channel: usize) -> Result<MotorCommand, ControlError> {
        let ch = Self::channel(channel)?;
        Ok(MotorCommand {
            direction: self.directions[ch],
            pwm_duty: self.loops[ch].pwm(),
        })
    }

    pub fn pid(&self, channel: usize) -> Result<&PidLoop, ControlError> {
        let ch = Self::channel(channel)?;
        Ok(&self.loops[ch])
    }

    /// Clears integral and derivative history of a channel.
    pub fn reset(&mut self, channel: usize) -> Result<(), ControlError> {
        let ch = Self::channel(channel)?;
        self.loops[ch].reset();
        Ok(())
    }

    pub fn driver(&self) -> &M {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut M {
        &mut self.driver
    }

    /// Gives the driver and the estimators back.
    pub fn release(self) -> (M, [SpeedEstimator<'a>; N]) {
        (self.driver, self.estimators)
    }
}
