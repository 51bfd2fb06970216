use hal::gpio::{Pin, PinMode, Port};

pub mod driver;
pub mod encoder;

/// Represents the definition of a GPIO pin.
pub struct PinDef {
    /// The port to which the pin belongs (e.g., Port::A, Port::B).
    port: Port,
    /// The pin number within the port, also the EXTI line it triggers.
    pin: u8,
    /// The mode of the pin (e.g., Output, Input, Alternate function).
    mode: PinMode,
}

impl PinDef {
    /// Converts the PinDef struct to a Pin struct. Useful for predefined pin configurations.
    /// # Example
    /// ```ignore
    /// let mut dr_enable = driver::ENABLE.init();
    /// dr_enable.set_high();
    /// ```
    pub fn init(&self) -> Pin {
        Pin::new(self.port, self.pin, self.mode)
    }

    /// EXTI line served by this pin.
    pub const fn line(&self) -> u8 {
        self.pin
    }
}
