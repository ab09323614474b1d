//! Pin capability trait consumed from the hardware layer.

/// Identifier of a physical pin, as listed in the caller's pin tables.
///
/// The core only needs "read the pin with this id"; where the table
/// physically resides (RAM, flash, program memory) is the platform
/// implementation's concern.
pub type PinId = u8;

/// Pull resistor direction for digital inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    Up,
    Down,
}

/// Synchronous pin access provided by the host platform.
///
/// All operations are infallible by contract: hardware-level read
/// failures are not modeled, matching the platform guarantee the
/// sampler is specified against.
pub trait PinInterface {
    /// Configure a pin as a digital input with the given pull direction.
    fn configure_digital(&mut self, pin: PinId, pull: Pull);

    /// Configure a pin as an analog input.
    fn configure_analog(&mut self, pin: PinId);

    /// Read a digital pin. `true` is the high level, before any
    /// polarity interpretation.
    fn read_digital(&mut self, pin: PinId) -> bool;

    /// Read a raw analog sample.
    fn read_analog(&mut self, pin: PinId) -> u16;
}
