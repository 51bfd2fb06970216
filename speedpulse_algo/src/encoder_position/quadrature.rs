// Implements the quadrature decoder: turns pin-change events on two phase-shifted channels
// into signed steps on the shared tick counter.

// Detailed Operation:
// Both channel interrupts are wired to the same handler, which calls `on_edge()`. The handler
// samples both levels and applies the 2-bit truth table below; equal levels count up, different
// levels count down. Two transitions between calls (a missed edge) are not detected and may
// momentarily misjudge the direction.
//
//   A    | B    | step
//   High | High |  +1
//   High | Low  |  -1
//   Low  | High |  -1
//   Low  | Low  |  +1

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

use super::tick_counter::TickCounter;
use crate::hw::{DigitalInput, Level};

/// Step applied to the counter for the sampled levels of channels A and B.
#[inline(always)]
pub fn quadrature_step(a: Level, b: Level) -> i32 {
    if a == b {
        1
    } else {
        -1
    }
}

/// Decodes quadrature edges of one encoder into its tick counter.
pub struct QuadratureDecoder<'a, A: DigitalInput, B: DigitalInput> {
    pin_a: A,                  // First encoder output
    pin_b: B,                  // Second encoder output
    counter: &'a TickCounter,  // Counter owned by this encoder
}

impl<'a, A, B> QuadratureDecoder<'a, A, B>
where
    A: DigitalInput,
    B: DigitalInput,
{
    pub fn new(pin_a: A, pin_b: B, counter: &'a TickCounter) -> Self {
        Self {
            pin_a,
            pin_b,
            counter,
        }
    }

    /// Edge handler. Call once for every level change on either channel.
    #[inline(always)]
    pub fn on_edge(&mut self) {
        let a = self.pin_a.read_level();
        let b = self.pin_b.read_level();
        self.counter.step(quadrature_step(a, b));
    }

    /// Current tick count.
    pub fn count(&self) -> i32 {
        self.counter.snapshot()
    }

    /// Hands the pins back.
    pub fn release(self) -> (A, B) {
        (self.pin_a, self.pin_b)
    }
}
