//! Potentiometer bank with per-channel calibration.
//!
//! Each channel carries a `(min, max)` pair discovered interactively or
//! supplied at construction. Raw samples are remapped from that range
//! onto the fixed `0..=OUTPUT_MAX` resolution.

use core::fmt::Write as _;

use heapless::String;

use crate::console::Console;
use crate::pins::{PinId, PinInterface};

/// Largest raw sample the native analog width can represent. Used as
/// the upper bound of the degenerate-pair fallback range.
pub const RAW_MAX: u16 = u16::MAX;

/// Target resolution `R` of remapped values (12-bit).
pub const OUTPUT_MAX: u16 = 4095;

/// Per-channel `(min, max)` calibration pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration<const P: usize> {
    pairs: [(u16, u16); P],
}

impl<const P: usize> Calibration<P> {
    /// Wrap caller-supplied pairs.
    #[must_use]
    pub const fn new(pairs: [(u16, u16); P]) -> Self {
        Self { pairs }
    }

    /// All-zero table, the sentinel for "discover at configure time".
    #[must_use]
    pub const fn unset() -> Self {
        Self {
            pairs: [(0, 0); P],
        }
    }

    /// Whether every pair is zero. An all-zero table triggers the
    /// interactive discovery procedure.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.pairs.iter().all(|&(min, max)| min == 0 && max == 0)
    }

    /// Prime every pair for discovery: `(RAW_MAX, 0)` is overwritten by
    /// the first observed sample on both sides.
    pub(crate) fn reset_for_discovery(&mut self) {
        self.pairs = [(RAW_MAX, 0); P];
    }

    /// Fold one raw sample into channel `k`'s range.
    pub(crate) fn observe(&mut self, k: usize, raw: u16) {
        let (min, max) = &mut self.pairs[k];
        if raw < *min {
            *min = raw;
        } else if raw > *max {
            *max = raw;
        }
    }

    /// Replace every degenerate `min == max` pair with the full-range
    /// fallback `(0, RAW_MAX)`. Returns which channels were corrected.
    pub(crate) fn normalize(&mut self) -> [bool; P] {
        let mut corrected = [false; P];
        for (k, (min, max)) in self.pairs.iter_mut().enumerate() {
            if min == max {
                *min = 0;
                *max = RAW_MAX;
                corrected[k] = true;
            }
        }
        corrected
    }

    /// Channel `k`'s `(min, max)` pair.
    #[inline]
    #[must_use]
    pub fn pair(&self, k: usize) -> (u16, u16) {
        self.pairs[k]
    }

    /// All pairs, in channel order.
    #[inline]
    #[must_use]
    pub fn pairs(&self) -> &[(u16, u16); P] {
        &self.pairs
    }

    /// Remap a raw sample of channel `k` onto `0..=OUTPUT_MAX`.
    ///
    /// Proportional interpolation with floor rounding:
    /// `(raw - min) * OUTPUT_MAX / (max - min)`. The result is
    /// truncated to the unsigned cell width and clamped to
    /// [`OUTPUT_MAX`], so raws outside the calibrated range (e.g. from
    /// calibration drift) clamp to the top of the output range.
    #[must_use]
    pub fn remap(&self, k: usize, raw: u16) -> u16 {
        let (min, max) = self.pairs[k];
        if min == max {
            // A degenerate pair behaves like the (0, RAW_MAX) fallback.
            return ((u32::from(raw) * u32::from(OUTPUT_MAX)) / u32::from(RAW_MAX)) as u16;
        }

        let span = i32::from(max) - i32::from(min);
        let mapped = (i32::from(raw) - i32::from(min)) * i32::from(OUTPUT_MAX) / span;
        // Negative results wrap to large values in the unsigned cell
        // and are caught by the clamp, like the original arithmetic.
        let out = mapped as u16;
        if out > OUTPUT_MAX {
            OUTPUT_MAX
        } else {
            out
        }
    }
}

impl<const P: usize> Default for Calibration<P> {
    fn default() -> Self {
        Self::unset()
    }
}

/// Remapped state of `P` analog channels.
///
/// The pin table is fixed for the bank's lifetime; the calibration
/// table is either supplied up front or discovered once during
/// [`PotBank::configure`]. `P == 0` yields an empty bank whose
/// operations are no-ops.
pub struct PotBank<const P: usize> {
    pins: [PinId; P],
    calibration: Calibration<P>,
    values: [u16; P],
}

impl<const P: usize> PotBank<P> {
    /// Create a bank that will auto-calibrate at configure time.
    #[must_use]
    pub fn new(pins: [PinId; P]) -> Self {
        Self::with_calibration(pins, Calibration::unset())
    }

    /// Create a bank with a caller-supplied calibration table.
    ///
    /// An all-zero table is the auto-calibration sentinel, matching
    /// [`Calibration::unset`].
    #[must_use]
    pub fn with_calibration(pins: [PinId; P], calibration: Calibration<P>) -> Self {
        Self {
            pins,
            calibration,
            values: [0; P],
        }
    }

    /// Configure every pin as an analog input, then establish the
    /// calibration table: run the interactive discovery procedure if
    /// none was supplied, otherwise correct and report any degenerate
    /// supplied pairs.
    pub fn configure<Pins: PinInterface, C: Console>(&mut self, pins: &mut Pins, console: &mut C) {
        for &pin in &self.pins {
            pins.configure_analog(pin);
        }
        if P == 0 {
            return;
        }
        if self.calibration.is_unset() {
            self.calibrate_with(pins, console);
        } else {
            let corrected = self.calibration.normalize();
            self.report_corrected(&corrected, console);
        }
    }

    /// Interactive range discovery.
    ///
    /// Prompts the operator to sweep every channel, then samples in a
    /// tight loop until a byte arrives on the console. Blocks until
    /// that byte; this is deliberate interactive-setup behavior with no
    /// timeout. Ends by correcting degenerate pairs and reporting the
    /// final table so the operator can persist it externally.
    pub fn calibrate_with<Pins: PinInterface, C: Console>(
        &mut self,
        pins: &mut Pins,
        console: &mut C,
    ) {
        self.calibration.reset_for_discovery();

        console.write_line("Adjust the potentiometers to reach their maximum and minimum values.");
        console.write_line("Once finished, send any character.");
        console.write_line("");
        console.drain_input();

        loop {
            for (k, &pin) in self.pins.iter().enumerate() {
                self.calibration.observe(k, pins.read_analog(pin));
            }
            if console.poll_byte().is_some() {
                break;
            }
        }

        let corrected = self.calibration.normalize();
        self.report_corrected(&corrected, console);
        self.report_table(console);
    }

    fn report_corrected<C: Console>(&self, corrected: &[bool; P], console: &mut C) {
        for (k, &flagged) in corrected.iter().enumerate() {
            if flagged {
                let mut line: String<80> = String::new();
                let _ = write!(
                    line,
                    "Potentiometer on pin {} has equal min and max, defaulting to 0..{}.",
                    self.pins[k], RAW_MAX
                );
                console.write_line(&line);
            }
        }
    }

    fn report_table<C: Console>(&self, console: &mut C) {
        let mut line: String<256> = String::new();
        let _ = write!(line, "Calibration complete, the values are:");
        for (k, (min, max)) in self.calibration.pairs().iter().enumerate() {
            let _ = write!(line, "{} {},{}", if k == 0 { "" } else { "," }, min, max);
        }
        console.write_line(&line);
        console.write_line("Supply these values at construction to skip this procedure.");
    }

    /// Read every channel and store its remapped value.
    pub fn sample<Pins: PinInterface>(&mut self, pins: &mut Pins) {
        for (k, &pin) in self.pins.iter().enumerate() {
            self.values[k] = self.calibration.remap(k, pins.read_analog(pin));
        }
    }

    /// The remapped values, length `P`.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    /// Mutable remapped values, for the frame encoder's drain.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [u16] {
        &mut self.values
    }

    /// The calibration table, for external persistence.
    #[inline]
    #[must_use]
    pub fn calibration(&self) -> &Calibration<P> {
        &self.calibration
    }

    /// The pin table this bank samples.
    #[inline]
    #[must_use]
    pub fn pins(&self) -> &[PinId; P] {
        &self.pins
    }

    /// Number of channels.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        P
    }

    /// Whether the bank holds no channels.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        P == 0
    }
}
