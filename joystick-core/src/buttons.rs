//! Bit-packed button bank.
//!
//! `B` independent digital inputs are packed into `ceil(B / WORD_BITS)`
//! words: button `i` lives at bit `i % WORD_BITS` of word
//! `i / WORD_BITS`. Unused high bits of the last word stay zero.

use heapless::Vec;

use crate::pins::{PinId, PinInterface, Pull};

/// Packing unit for button bits.
pub type Word = u16;

/// Width of [`Word`] in bits. Always use this constant, never a
/// literal; a platform may widen the word.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Wiring polarity of the button pins.
///
/// Pull-up wiring reads active-low (a pressed button pulls the pin to
/// ground); pull-down wiring reads active-high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    PullUp,
    PullDown,
}

impl Polarity {
    /// Pull resistor direction matching this wiring.
    #[inline]
    #[must_use]
    pub const fn pull(self) -> Pull {
        match self {
            Self::PullUp => Pull::Up,
            Self::PullDown => Pull::Down,
        }
    }

    /// Whether a raw digital level counts as pressed under this wiring.
    #[inline]
    #[must_use]
    pub const fn is_active(self, level: bool) -> bool {
        match self {
            Self::PullUp => !level,
            Self::PullDown => level,
        }
    }
}

/// Packed state of `B` buttons.
///
/// The polarity and pin table are fixed for the bank's lifetime.
/// `B == 0` yields an empty bank whose operations are no-ops.
pub struct ButtonBank<const B: usize> {
    pins: [PinId; B],
    polarity: Polarity,
    words: Vec<Word, B>,
}

impl<const B: usize> ButtonBank<B> {
    /// Number of packed words, `ceil(B / WORD_BITS)`.
    pub const WORD_COUNT: usize = B.div_ceil(WORD_BITS);

    /// Create a bank over the given pin table.
    #[must_use]
    pub fn new(pins: [PinId; B], polarity: Polarity) -> Self {
        let mut words = Vec::new();
        // A capacity of B always covers ceil(B / WORD_BITS) words.
        let _ = words.resize_default(Self::WORD_COUNT);
        Self {
            pins,
            polarity,
            words,
        }
    }

    /// Configure every pin as a digital input with the pull direction
    /// implied by the wiring polarity.
    pub fn configure<Pins: PinInterface>(&self, pins: &mut Pins) {
        for &pin in &self.pins {
            pins.configure_digital(pin, self.polarity.pull());
        }
    }

    /// Clear and repopulate the packed words from the current pin
    /// levels. `O(B)` pin reads, no allocation.
    pub fn sample<Pins: PinInterface>(&mut self, pins: &mut Pins) {
        for word in self.words.iter_mut() {
            *word = 0;
        }
        for (i, &pin) in self.pins.iter().enumerate() {
            if self.polarity.is_active(pins.read_digital(pin)) {
                self.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
            }
        }
    }

    /// The packed words, length [`Self::WORD_COUNT`].
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Mutable packed words, for the frame encoder's drain.
    #[inline]
    pub fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// The packed bit for button `i`.
    ///
    /// Reads after a frame emission see zero until the next sample;
    /// emission drains the words.
    #[inline]
    #[must_use]
    pub fn bit(&self, i: usize) -> bool {
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// The pin table this bank samples.
    #[inline]
    #[must_use]
    pub fn pins(&self) -> &[PinId; B] {
        &self.pins
    }

    /// Number of buttons.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        B
    }

    /// Whether the bank holds no buttons.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        B == 0
    }
}
