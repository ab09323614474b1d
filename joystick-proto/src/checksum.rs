//! Subtractive 16-bit checksum for telemetry frames.
//!
//! Every frame byte except the checksum itself is subtracted from a
//! 16-bit accumulator that starts at `0xFFFF`, with wraparound. This is
//! a checksum, not a CRC: it detects single-frame byte corruption
//! heuristically and has no error-correcting property. Peers decode
//! frames with this exact arithmetic, so it must not be replaced by a
//! polynomial algorithm.

/// Initial accumulator value.
pub const CHECKSUM_INIT: u16 = 0xFFFF;

/// Incremental checksum accumulator.
///
/// Use this when producing a frame byte-by-byte (e.g., during encoding).
pub struct Checksum16 {
    acc: u16,
}

impl Checksum16 {
    /// Create a new accumulator.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { acc: CHECKSUM_INIT }
    }

    /// Subtract a single byte from the accumulator.
    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.acc = self.acc.wrapping_sub(u16::from(byte));
    }

    /// Subtract every byte of a slice from the accumulator.
    #[inline]
    pub fn update_slice(&mut self, data: &[u8]) {
        for &b in data {
            self.update(b);
        }
    }

    /// Finalize and return the checksum value.
    #[inline]
    #[must_use]
    pub fn finalize(self) -> u16 {
        self.acc
    }
}

impl Default for Checksum16 {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate the checksum of a byte slice in one call.
#[inline]
#[must_use]
pub fn checksum(data: &[u8]) -> u16 {
    let mut ck = Checksum16::new();
    ck.update_slice(data);
    ck.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_empty() {
        assert_eq!(checksum(&[]), 0xFFFF);
    }

    #[test]
    fn test_checksum_known_vector() {
        // Header + payload of the single-pot frame carrying 2457.
        assert_eq!(checksum(&[0x06, 0x40, 0x99, 0x09]), 0xFF17);
    }

    #[test]
    fn test_checksum_wraparound() {
        // 16-bit wraparound must be preserved exactly.
        let data = [0xFF; 300];
        let mut expected = CHECKSUM_INIT;
        for _ in 0..300 {
            expected = expected.wrapping_sub(0xFF);
        }
        assert_eq!(checksum(&data), expected);
    }

    #[test]
    fn test_incremental_matches_batch() {
        let data = [0x06, 0x40, 0x99, 0x09, 0x12, 0x34];
        let batch = checksum(&data);

        let mut ck = Checksum16::new();
        for &b in &data {
            ck.update(b);
        }
        assert_eq!(ck.finalize(), batch);

        let mut ck = Checksum16::new();
        ck.update_slice(&data);
        assert_eq!(ck.finalize(), batch);
    }

    #[test]
    fn test_single_byte_flip_changes_checksum() {
        let data = [0x08, 0x40, 0x05, 0x00, 0x99, 0x09];
        let original = checksum(&data);
        for i in 0..data.len() {
            let mut corrupted = data;
            corrupted[i] ^= 0x10;
            assert_ne!(checksum(&corrupted), original, "flip at byte {i} undetected");
        }
    }
}
