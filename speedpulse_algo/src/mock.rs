// Test doubles for the hardware traits.

use core::cell::Cell;

use crate::hw::{DigitalInput, Level, MotorDriver, Rotation};

/// Pin whose level is set by the test through a shared cell.
pub struct ScriptedPin<'a> {
    level: &'a Cell<Level>,
}

impl<'a> ScriptedPin<'a> {
    pub fn new(level: &'a Cell<Level>) -> Self {
        Self { level }
    }
}

impl DigitalInput for ScriptedPin<'_> {
    fn read_level(&mut self) -> Level {
        self.level.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverCall {
    Pwm(usize, u8),
    Direction(usize, Rotation),
    Stop(usize),
}

/// Motor driver that records every call it receives.
#[derive(Default)]
pub struct RecordingDriver {
    pub calls: Vec<DriverCall>,
}

impl RecordingDriver {
    /// Last duty written to a channel.
    pub fn last_pwm(&self, channel: usize) -> Option<u8> {
        self.calls.iter().rev().find_map(|call| match *call {
            DriverCall::Pwm(ch, duty) if ch == channel => Some(duty),
            _ => None,
        })
    }

    /// Last rotation written to a channel.
    pub fn last_direction(&self, channel: usize) -> Option<Rotation> {
        self.calls.iter().rev().find_map(|call| match *call {
            DriverCall::Direction(ch, rotation) if ch == channel => Some(rotation),
            _ => None,
        })
    }

    pub fn stops(&self, channel: usize) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == DriverCall::Stop(channel))
            .count()
    }
}

impl MotorDriver for RecordingDriver {
    fn set_pwm(&mut self, channel: usize, duty: u8) {
        self.calls.push(DriverCall::Pwm(channel, duty));
    }

    fn set_direction(&mut self, channel: usize, rotation: Rotation) {
        self.calls.push(DriverCall::Direction(channel, rotation));
    }

    fn stop(&mut self, channel: usize) {
        self.calls.push(DriverCall::Stop(channel));
    }
}
