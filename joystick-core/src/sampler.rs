//! Composition root: one button bank, one pot bank, one frame out.

use joystick_proto::{frame_len, FrameError};

use crate::buttons::{ButtonBank, Polarity};
use crate::console::Console;
use crate::pins::{PinId, PinInterface};
use crate::pots::{Calibration, PotBank};

/// Samples `B` buttons and `P` potentiometers and emits telemetry
/// frames.
///
/// The buttons-only, pots-only, and combined variants are all just
/// choices of `B` and `P`; the cardinalities are fixed for the
/// sampler's lifetime and `B == 0 && P == 0` is rejected at compile
/// time. The caller drives the cycle:
///
/// 1. [`configure`](Self::configure) once,
/// 2. [`sample`](Self::sample), then
/// 3. [`emit_frame`](Self::emit_frame) — which **drains** both banks,
///    so every emission must be preceded by a fresh sample.
///
/// # Example
///
/// ```
/// use joystick_core::{NullConsole, PinId, PinInterface, Polarity, Pull, Sampler};
///
/// struct FixedPins;
///
/// impl PinInterface for FixedPins {
///     fn configure_digital(&mut self, _pin: PinId, _pull: Pull) {}
///     fn configure_analog(&mut self, _pin: PinId) {}
///     fn read_digital(&mut self, _pin: PinId) -> bool {
///         false // pulled-up buttons read low when pressed
///     }
///     fn read_analog(&mut self, _pin: PinId) -> u16 {
///         0
///     }
/// }
///
/// let mut sampler: Sampler<3, 0> = Sampler::new([2, 3, 4], Polarity::PullUp, []);
/// let mut pins = FixedPins;
/// sampler.configure(&mut pins, &mut NullConsole);
/// sampler.sample(&mut pins);
///
/// let mut buf = [0u8; Sampler::<3, 0>::FRAME_LEN];
/// let len = sampler.emit_frame(&mut buf).unwrap();
/// assert_eq!(len, 6);
/// ```
pub struct Sampler<const B: usize, const P: usize> {
    buttons: ButtonBank<B>,
    pots: PotBank<P>,
}

impl<const B: usize, const P: usize> Sampler<B, P> {
    const NON_EMPTY: () = assert!(
        B + P > 0,
        "a sampler needs at least one button or potentiometer"
    );

    /// Length of every frame this sampler emits.
    pub const FRAME_LEN: usize = frame_len(ButtonBank::<B>::WORD_COUNT, P);

    /// Create a sampler whose pot ranges are discovered interactively
    /// at configure time.
    #[must_use]
    pub fn new(buttons: [PinId; B], polarity: Polarity, pots: [PinId; P]) -> Self {
        Self::with_calibration(buttons, polarity, pots, Calibration::unset())
    }

    /// Create a sampler with a caller-supplied calibration table.
    ///
    /// An all-zero table is the sentinel for "discover at configure
    /// time", so supplying [`Calibration::unset`] here is equivalent to
    /// [`Sampler::new`].
    #[must_use]
    pub fn with_calibration(
        buttons: [PinId; B],
        polarity: Polarity,
        pots: [PinId; P],
        calibration: Calibration<P>,
    ) -> Self {
        let () = Self::NON_EMPTY;
        Self {
            buttons: ButtonBank::new(buttons, polarity),
            pots: PotBank::with_calibration(pots, calibration),
        }
    }

    /// Configure every pin and establish the calibration table. The
    /// console is used only if interactive calibration runs or a
    /// degenerate pair needs reporting.
    pub fn configure<Pins: PinInterface, C: Console>(&mut self, pins: &mut Pins, console: &mut C) {
        self.buttons.configure(pins);
        self.pots.configure(pins, console);
    }

    /// Read every input into the banks, replacing the previous
    /// snapshot.
    pub fn sample<Pins: PinInterface>(&mut self, pins: &mut Pins) {
        self.buttons.sample(pins);
        self.pots.sample(pins);
    }

    /// Encode the current snapshot into `buf` and return the frame
    /// length.
    ///
    /// Draining: both banks read zero afterwards, so call
    /// [`sample`](Self::sample) before every emission. Emitting twice
    /// without an intervening sample produces a well-formed
    /// all-zero-payload frame.
    ///
    /// # Errors
    ///
    /// See [`joystick_proto::encode_frame`].
    pub fn emit_frame(&mut self, buf: &mut [u8]) -> Result<usize, FrameError> {
        joystick_proto::encode_frame(self.buttons.words_mut(), self.pots.values_mut(), buf)
    }

    /// Encode the current snapshot and write it to an
    /// `embedded_io::Write` sink. Drains the banks like
    /// [`emit_frame`](Self::emit_frame).
    ///
    /// # Errors
    ///
    /// See [`joystick_proto::encode_frame_io`].
    #[cfg(feature = "embedded-io")]
    pub fn emit_frame_io<W: embedded_io::Write>(&mut self, writer: &mut W) -> Result<usize, FrameError> {
        joystick_proto::encode_frame_io(self.buttons.words_mut(), self.pots.values_mut(), writer)
    }

    /// The button bank.
    #[inline]
    #[must_use]
    pub fn buttons(&self) -> &ButtonBank<B> {
        &self.buttons
    }

    /// The pot bank.
    #[inline]
    #[must_use]
    pub fn pots(&self) -> &PotBank<P> {
        &self.pots
    }

    /// The pot calibration table, for external persistence.
    #[inline]
    #[must_use]
    pub fn calibration(&self) -> &Calibration<P> {
        self.pots.calibration()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::console::NullConsole;
    use crate::pins::Pull;
    use joystick_proto::{FrameView, FRAME_TAG};
    use std::vec::Vec as StdVec;

    /// Pins with fixed digital levels and a fixed analog value.
    struct FixedPins {
        high: StdVec<PinId>,
        analog: u16,
    }

    impl PinInterface for FixedPins {
        fn configure_digital(&mut self, _pin: PinId, _pull: Pull) {}

        fn configure_analog(&mut self, _pin: PinId) {}

        fn read_digital(&mut self, pin: PinId) -> bool {
            self.high.contains(&pin)
        }

        fn read_analog(&mut self, _pin: PinId) -> u16 {
            self.analog
        }
    }

    #[test]
    fn test_full_cycle_buttons_and_pot() {
        // Pull-up buttons on pins 2,3,4 reading LOW,HIGH,LOW pack to
        // word 5; pot raw 600 over (100,1100) remaps to 2047.
        let mut pins = FixedPins {
            high: std::vec![3],
            analog: 600,
        };
        let mut sampler: Sampler<3, 1> = Sampler::with_calibration(
            [2, 3, 4],
            Polarity::PullUp,
            [26],
            Calibration::new([(100, 1100)]),
        );

        sampler.configure(&mut pins, &mut NullConsole);
        sampler.sample(&mut pins);

        assert_eq!(sampler.buttons().words(), &[5]);
        assert_eq!(sampler.pots().values(), &[2047]);

        let mut buf = [0u8; Sampler::<3, 1>::FRAME_LEN];
        let len = sampler.emit_frame(&mut buf).unwrap();

        assert_eq!(len, 8);
        assert_eq!(buf[0], 8);
        assert_eq!(buf[1], FRAME_TAG);

        let view = FrameView::parse(&buf[..len]).unwrap();
        let payload: StdVec<u16> = view.payload_words().collect();
        assert_eq!(payload, std::vec![5, 2047]);
    }

    #[test]
    fn test_emit_drains_banks() {
        let mut pins = FixedPins {
            high: std::vec![3],
            analog: 600,
        };
        let mut sampler: Sampler<3, 1> = Sampler::with_calibration(
            [2, 3, 4],
            Polarity::PullUp,
            [26],
            Calibration::new([(100, 1100)]),
        );
        sampler.configure(&mut pins, &mut NullConsole);
        sampler.sample(&mut pins);

        let mut buf = [0u8; Sampler::<3, 1>::FRAME_LEN];
        let first_len = sampler.emit_frame(&mut buf).unwrap();
        assert_eq!(sampler.buttons().words(), &[0]);
        assert_eq!(sampler.pots().values(), &[0]);

        // Emit again without sampling: all-zero payload, same length
        // byte, checksum recomputed and still valid.
        let second_len = sampler.emit_frame(&mut buf).unwrap();
        assert_eq!(second_len, first_len);
        let view = FrameView::parse(&buf[..second_len]).unwrap();
        assert!(view.payload().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pots_only_frame_vector() {
        // Known wire vector: B=0, P=1, value 2457 on the wire.
        let mut sampler: Sampler<0, 1> =
            Sampler::with_calibration([], Polarity::PullUp, [26], Calibration::new([(0, 1023)]));
        sampler.pots.values_mut()[0] = 2457;

        let mut buf = [0u8; Sampler::<0, 1>::FRAME_LEN];
        let len = sampler.emit_frame(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[0x06, 0x40, 0x99, 0x09, 0x17, 0xFF]);
    }

    #[test]
    fn test_buttons_only_contributes_no_pot_payload() {
        let mut pins = FixedPins {
            high: std::vec![],
            analog: 0,
        };
        let mut sampler: Sampler<2, 0> = Sampler::new([2, 3], Polarity::PullDown, []);
        sampler.configure(&mut pins, &mut NullConsole);
        sampler.sample(&mut pins);

        let mut buf = [0u8; Sampler::<2, 0>::FRAME_LEN];
        let len = sampler.emit_frame(&mut buf).unwrap();
        assert_eq!(len, 6);

        let view = FrameView::parse(&buf[..len]).unwrap();
        assert_eq!(view.payload().len(), 2);
    }

    #[test]
    fn test_frame_len_constant() {
        assert_eq!(Sampler::<3, 1>::FRAME_LEN, 8);
        assert_eq!(Sampler::<17, 0>::FRAME_LEN, 8);
        assert_eq!(Sampler::<0, 2>::FRAME_LEN, 8);
    }

    #[test]
    fn test_calibration_accessor_exposes_discovered_table() {
        let sampler: Sampler<0, 1> =
            Sampler::with_calibration([], Polarity::PullUp, [26], Calibration::new([(100, 900)]));
        assert_eq!(sampler.calibration().pair(0), (100, 900));
    }
}
