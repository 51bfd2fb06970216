use thiserror::Error;

/// Rejected construction-time configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Degrees per tick would divide by zero.
    #[error("ticks per revolution must be greater than zero")]
    ZeroTicksPerRevolution,

    /// Sampling interval would divide by zero.
    #[error("sampling interval must be greater than zero microseconds")]
    ZeroDeltaTime,
}

/// Errors raised by channel-addressed control operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    #[error("motor channel {0} does not exist")]
    InvalidChannel(usize),
}
