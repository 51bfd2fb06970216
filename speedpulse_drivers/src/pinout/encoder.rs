//! Quadrature encoder inputs. Both channels of one motor share an EXTI handler:
//! motor 1 on lines 6/7 (EXTI9_5), motor 2 on lines 10/11 (EXTI15_10).
use super::PinDef;
use super::{PinMode, Port};

/// Motor 1 encoder, channel A
pub const M1_A: PinDef = PinDef {
    port: Port::B,
    pin: 6,
    mode: PinMode::Input,
};

/// Motor 1 encoder, channel B
pub const M1_B: PinDef = PinDef {
    port: Port::B,
    pin: 7,
    mode: PinMode::Input,
};

/// Motor 2 encoder, channel A
pub const M2_A: PinDef = PinDef {
    port: Port::C,
    pin: 10,
    mode: PinMode::Input,
};

/// Motor 2 encoder, channel B
pub const M2_B: PinDef = PinDef {
    port: Port::C,
    pin: 11,
    mode: PinMode::Input,
};
