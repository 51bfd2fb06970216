use hal::gpio::{self, Edge, Pin, Pull};

use speedpulse_algo::{DigitalInput, Level};

use super::pinout::PinDef;

/// One quadrature channel: pulled-up GPIO input raising an interrupt on every edge.
pub struct EncoderPin {
    pin: Pin,
}

impl EncoderPin {
    pub fn new(def: &PinDef) -> Self {
        let mut pin = def.init();
        pin.pull(Pull::Up);
        pin.enable_interrupt(Edge::Either);

        EncoderPin { pin }
    }
}

/// Acknowledges pending edges on both channels of an encoder. Call before decoding so an edge
/// arriving during `on_edge()` raises the interrupt again.
#[inline(always)]
pub fn clear_edges(pin_a: &PinDef, pin_b: &PinDef) {
    gpio::clear_exti_interrupt(pin_a.line());
    gpio::clear_exti_interrupt(pin_b.line());
}

impl DigitalInput for EncoderPin {
    #[inline(always)]
    fn read_level(&mut self) -> Level {
        if self.pin.is_high() {
            Level::High
        } else {
            Level::Low
        }
    }
}
