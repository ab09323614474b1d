//! RP2040 pin access for the sampler.
//!
//! Implements [`PinInterface`] over `embassy-rp` flexible GPIOs and the
//! blocking ADC. Pins are registered up front with the [`PinId`] the
//! core's pin tables use; lookups resolve against those registrations.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::{Flex, Pull as RpPull};
use heapless::Vec;
use joystick_core::{PinId, PinInterface, Pull};

/// Registration capacity for digital pins.
pub const MAX_DIGITAL_PINS: usize = 16;

/// Registration capacity for analog channels (RP2040 has four ADC
/// inputs).
pub const MAX_ANALOG_PINS: usize = 4;

/// [`PinInterface`] over RP2040 GPIO and ADC.
pub struct RpPins<'d> {
    digital: Vec<(PinId, Flex<'d>), MAX_DIGITAL_PINS>,
    analog: Vec<(PinId, Channel<'d>), MAX_ANALOG_PINS>,
    adc: Adc<'d, Blocking>,
}

impl<'d> RpPins<'d> {
    /// Create an empty registration over the blocking ADC.
    #[must_use]
    pub fn new(adc: Adc<'d, Blocking>) -> Self {
        Self {
            digital: Vec::new(),
            analog: Vec::new(),
            adc,
        }
    }

    /// Register a digital pin under the given id. Returns `false` if
    /// the registration table is full.
    pub fn add_digital(&mut self, id: PinId, pin: Flex<'d>) -> bool {
        self.digital.push((id, pin)).is_ok()
    }

    /// Register an ADC channel under the given id. Returns `false` if
    /// the registration table is full.
    pub fn add_analog(&mut self, id: PinId, channel: Channel<'d>) -> bool {
        self.analog.push((id, channel)).is_ok()
    }

    fn digital_mut(&mut self, id: PinId) -> Option<&mut Flex<'d>> {
        self.digital
            .iter_mut()
            .find(|(pin_id, _)| *pin_id == id)
            .map(|(_, pin)| pin)
    }
}

impl PinInterface for RpPins<'_> {
    fn configure_digital(&mut self, pin: PinId, pull: Pull) {
        if let Some(gpio) = self.digital_mut(pin) {
            gpio.set_as_input();
            gpio.set_pull(match pull {
                Pull::Up => RpPull::Up,
                Pull::Down => RpPull::Down,
            });
        } else {
            defmt::warn!("configure_digital: pin {} not registered", pin);
        }
    }

    fn configure_analog(&mut self, pin: PinId) {
        // ADC channels are analog from construction; only validate the
        // registration.
        if !self.analog.iter().any(|(pin_id, _)| *pin_id == pin) {
            defmt::warn!("configure_analog: pin {} not registered", pin);
        }
    }

    fn read_digital(&mut self, pin: PinId) -> bool {
        match self.digital_mut(pin) {
            Some(gpio) => gpio.is_high(),
            None => false,
        }
    }

    fn read_analog(&mut self, pin: PinId) -> u16 {
        let adc = &mut self.adc;
        match self
            .analog
            .iter_mut()
            .find(|(pin_id, _)| *pin_id == pin)
        {
            Some((_, channel)) => adc.blocking_read(channel).unwrap_or(0),
            None => 0,
        }
    }
}
