//! Length-prefixed binary telemetry frames.
//!
//! A frame is one snapshot of the button words and remapped
//! potentiometer values:
//!
//! ```text
//! [len] [0x40] [button words, LSB first] [pot values, LSB first] [ck_lo] [ck_hi]
//! ```
//!
//! `len` counts every frame byte including itself and the checksum:
//! `len = 4 + 2 * word_count + 2 * pot_count`. The checksum is
//! `0xFFFF` minus every preceding byte, 16-bit wrapping (see
//! [`crate::checksum`]).
//!
//! # Destructive encoding
//!
//! [`encode_frame`] *drains* its sources: each word and pot value is
//! shifted right by 8 bits per emitted byte, so every source equals
//! zero after encoding. Callers must re-sample before every encode;
//! encoding twice in a row yields a well-formed all-zero-payload frame.
//! This is a documented contract, not an accidental mutation.

use crate::checksum::{checksum, Checksum16};

/// Command/type tag carried in every frame.
pub const FRAME_TAG: u8 = 0x40;

/// Bytes per packed word or pot value on the wire.
pub const WORD_BYTES: usize = 2;

/// Non-payload bytes: length prefix, tag, two checksum bytes.
pub const FRAME_OVERHEAD: usize = 4;

/// The length prefix is a single byte, so no frame can exceed this.
pub const MAX_FRAME_LEN: usize = 255;

/// Total frame length for the given bank sizes.
#[inline]
#[must_use]
pub const fn frame_len(word_count: usize, pot_count: usize) -> usize {
    FRAME_OVERHEAD + word_count * WORD_BYTES + pot_count * WORD_BYTES
}

/// Error type for frame encoding and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The output buffer is too small to hold the frame.
    BufferTooSmall,
    /// The banks are too large for a one-byte length prefix.
    Oversize,
    /// Fewer bytes available than the frame header promises.
    Truncated,
    /// The length prefix is below the fixed overhead.
    BadLength,
    /// The tag byte is not [`FRAME_TAG`].
    BadTag,
    /// The recomputed checksum does not match the transmitted one.
    BadChecksum,
    /// A write to the underlying sink failed.
    WriteError,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::Oversize => write!(f, "frame exceeds 255 bytes"),
            Self::Truncated => write!(f, "frame truncated"),
            Self::BadLength => write!(f, "invalid length prefix"),
            Self::BadTag => write!(f, "invalid tag byte"),
            Self::BadChecksum => write!(f, "checksum mismatch"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// Buffer cursor with incremental checksum accumulation.
///
/// Writes directly to the output buffer while the checksum runs over
/// every byte, so no second pass over the frame is needed.
struct FrameBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
    ck: Checksum16,
}

impl<'a> FrameBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            ck: Checksum16::new(),
        }
    }

    /// Write a byte and subtract it from the running checksum.
    #[inline]
    fn write(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.ck.update(byte);
        self.pos += 1;
    }

    /// Drain a bank: emit each value LSB first, shifting it out as we go.
    /// Every value is zero afterwards.
    fn drain(&mut self, bank: &mut [u16]) {
        for value in bank {
            for _ in 0..WORD_BYTES {
                self.write(*value as u8);
                *value >>= 8;
            }
        }
    }

    /// Append the checksum, low byte first, and return the frame length.
    #[inline]
    fn finalize(self) -> usize {
        let ck = self.ck.finalize().to_le_bytes();
        self.buf[self.pos] = ck[0];
        self.buf[self.pos + 1] = ck[1];
        self.pos + 2
    }
}

/// Encode one frame into `buf`, draining both banks.
///
/// `words` are the packed button words, `pots` the remapped
/// potentiometer values; either slice may be empty. Returns the number
/// of bytes written.
///
/// After this call every element of `words` and `pots` is zero — see
/// the module docs for the destructive-read contract.
///
/// # Errors
///
/// [`FrameError::Oversize`] if the banks cannot fit a one-byte length
/// prefix, [`FrameError::BufferTooSmall`] if `buf` cannot hold the
/// frame.
pub fn encode_frame(
    words: &mut [u16],
    pots: &mut [u16],
    buf: &mut [u8],
) -> Result<usize, FrameError> {
    let len = frame_len(words.len(), pots.len());
    if len > MAX_FRAME_LEN {
        return Err(FrameError::Oversize);
    }
    if buf.len() < len {
        return Err(FrameError::BufferTooSmall);
    }

    let mut fb = FrameBuf::new(buf);
    fb.write(len as u8);
    fb.write(FRAME_TAG);
    fb.drain(words);
    fb.drain(pots);
    Ok(fb.finalize())
}

/// Encode one frame into a `heapless::Vec`, draining both banks.
///
/// # Errors
///
/// As [`encode_frame`]; `N` must be at least [`frame_len`] for the
/// bank sizes.
#[cfg(feature = "heapless")]
pub fn encode_frame_to_vec<const N: usize>(
    words: &mut [u16],
    pots: &mut [u16],
) -> Result<heapless::Vec<u8, N>, FrameError> {
    let mut vec = heapless::Vec::new();
    vec.resize_default(N)
        .map_err(|_| FrameError::BufferTooSmall)?;
    let len = encode_frame(words, pots, &mut vec)?;
    vec.truncate(len);
    Ok(vec)
}

/// Encode one frame and write it to an `embedded_io::Write` sink.
///
/// The frame is staged in a stack buffer so the sink sees a single
/// contiguous write.
///
/// # Errors
///
/// As [`encode_frame`], plus [`FrameError::WriteError`] if the sink
/// rejects the bytes.
#[cfg(feature = "embedded-io")]
pub fn encode_frame_io<W: embedded_io::Write>(
    words: &mut [u16],
    pots: &mut [u16],
    writer: &mut W,
) -> Result<usize, FrameError> {
    let mut buf = [0u8; MAX_FRAME_LEN];
    let len = encode_frame(words, pots, &mut buf)?;
    writer
        .write_all(&buf[..len])
        .map_err(|_| FrameError::WriteError)?;
    Ok(len)
}

/// A validated view over one received frame.
///
/// [`FrameView::parse`] checks the length prefix, the tag, and the
/// checksum before handing out the payload. The view borrows exactly
/// the frame's bytes; trailing bytes of the next frame are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    bytes: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Validate the frame at the start of `bytes`.
    ///
    /// # Errors
    ///
    /// [`FrameError::Truncated`] if fewer bytes are available than the
    /// length prefix promises, [`FrameError::BadLength`],
    /// [`FrameError::BadTag`], or [`FrameError::BadChecksum`] per the
    /// failed check.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, FrameError> {
        if bytes.is_empty() {
            return Err(FrameError::Truncated);
        }
        let len = bytes[0] as usize;
        if len < FRAME_OVERHEAD {
            return Err(FrameError::BadLength);
        }
        if bytes.len() < len {
            return Err(FrameError::Truncated);
        }
        let bytes = &bytes[..len];
        if bytes[1] != FRAME_TAG {
            return Err(FrameError::BadTag);
        }
        let received = u16::from_le_bytes([bytes[len - 2], bytes[len - 1]]);
        if checksum(&bytes[..len - 2]) != received {
            return Err(FrameError::BadChecksum);
        }
        Ok(Self { bytes })
    }

    /// Total frame length in bytes, as carried by the length prefix.
    #[inline]
    #[must_use]
    pub fn frame_len(&self) -> usize {
        self.bytes.len()
    }

    /// Payload bytes: packed button words followed by pot values.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        &self.bytes[2..self.bytes.len() - 2]
    }

    /// Payload decoded as little-endian 16-bit values.
    pub fn payload_words(&self) -> impl Iterator<Item = u16> + 'a {
        self.payload()
            .chunks_exact(WORD_BYTES)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    }

    /// The transmitted checksum.
    #[inline]
    #[must_use]
    pub fn checksum(&self) -> u16 {
        let len = self.bytes.len();
        u16::from_le_bytes([self.bytes[len - 2], self.bytes[len - 1]])
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    #[test]
    fn test_encode_single_pot_vector() {
        // B = 0, P = 1, remapped value 2457.
        let mut pots = [2457u16];
        let mut buf = [0u8; 16];
        let len = encode_frame(&mut [], &mut pots, &mut buf).unwrap();

        assert_eq!(&buf[..len], &[0x06, 0x40, 0x99, 0x09, 0x17, 0xFF]);
        assert_eq!(pots, [0]);
    }

    #[test]
    fn test_encode_buttons_only() {
        // Three buttons packed into one word: bit0 and bit2 set.
        let mut words = [0b101u16];
        let mut buf = [0u8; 16];
        let len = encode_frame(&mut words, &mut [], &mut buf).unwrap();

        assert_eq!(len, frame_len(1, 0));
        assert_eq!(buf[0], 6);
        assert_eq!(buf[1], FRAME_TAG);
        assert_eq!(&buf[2..4], &[0x05, 0x00]);
        assert_eq!(words, [0]);

        let view = FrameView::parse(&buf[..len]).unwrap();
        assert_eq!(view.payload(), &[0x05, 0x00]);
    }

    #[test]
    fn test_encode_both_banks_payload_order() {
        // Button words precede pot values in the payload.
        let mut words = [0xBEEFu16, 0x0001];
        let mut pots = [4095u16];
        let mut buf = [0u8; 32];
        let len = encode_frame(&mut words, &mut pots, &mut buf).unwrap();

        assert_eq!(len, frame_len(2, 1));
        let view = FrameView::parse(&buf[..len]).unwrap();
        let decoded: Vec<u16> = view.payload_words().collect();
        assert_eq!(decoded, std::vec![0xBEEF, 0x0001, 4095]);

        assert_eq!(words, [0, 0]);
        assert_eq!(pots, [0]);
    }

    #[test]
    fn test_destructive_encode_second_frame_all_zero() {
        let mut words = [0x1234u16];
        let mut pots = [2047u16, 100];
        let mut buf = [0u8; 32];

        let len1 = encode_frame(&mut words, &mut pots, &mut buf).unwrap();
        let first_len_byte = buf[0];

        // No re-sample: the banks were drained to zero.
        let len2 = encode_frame(&mut words, &mut pots, &mut buf).unwrap();
        assert_eq!(len1, len2);
        assert_eq!(buf[0], first_len_byte);

        let view = FrameView::parse(&buf[..len2]).unwrap();
        assert!(view.payload().iter().all(|&b| b == 0));
        // Checksum is recomputed for the zero payload, still valid.
        assert_eq!(view.checksum(), checksum(&buf[..len2 - 2]));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut pots = [1u16, 2, 3];
        let mut buf = [0u8; 4];
        assert_eq!(
            encode_frame(&mut [], &mut pots, &mut buf),
            Err(FrameError::BufferTooSmall)
        );
    }

    #[test]
    fn test_encode_oversize() {
        // 126 words would need a 256-byte frame.
        let mut words = [0u16; 126];
        let mut buf = [0u8; 300];
        assert_eq!(
            encode_frame(&mut words, &mut [], &mut buf),
            Err(FrameError::Oversize)
        );
    }

    #[test]
    fn test_parse_rejects_corruption() {
        let mut pots = [2457u16];
        let mut buf = [0u8; 16];
        let len = encode_frame(&mut [], &mut pots, &mut buf).unwrap();

        for i in 2..len - 2 {
            let mut corrupted = buf;
            corrupted[i] ^= 0x01;
            assert_eq!(
                FrameView::parse(&corrupted[..len]),
                Err(FrameError::BadChecksum),
                "payload flip at byte {i} accepted"
            );
        }
    }

    #[test]
    fn test_parse_bad_tag() {
        let mut frame = [0x06, 0x41, 0x99, 0x09, 0x17, 0xFF];
        assert_eq!(FrameView::parse(&frame), Err(FrameError::BadTag));
        frame[1] = FRAME_TAG;
        // With the tag restored the stored checksum matches again.
        assert!(FrameView::parse(&frame).is_ok());
    }

    #[test]
    fn test_parse_truncated_and_bad_length() {
        assert_eq!(FrameView::parse(&[]), Err(FrameError::Truncated));
        assert_eq!(
            FrameView::parse(&[0x06, 0x40, 0x99]),
            Err(FrameError::Truncated)
        );
        assert_eq!(
            FrameView::parse(&[0x02, 0x40, 0x00, 0x00]),
            Err(FrameError::BadLength)
        );
    }

    #[test]
    fn test_parse_ignores_trailing_bytes() {
        let mut pots = [2457u16];
        let mut buf = [0u8; 16];
        let len = encode_frame(&mut [], &mut pots, &mut buf).unwrap();

        // A following frame's first bytes must not disturb this one.
        let view = FrameView::parse(&buf).unwrap();
        assert_eq!(view.frame_len(), len);
        assert_eq!(view.payload(), &[0x99, 0x09]);
    }

    #[test]
    fn test_frame_len() {
        assert_eq!(frame_len(0, 1), 6);
        assert_eq!(frame_len(1, 0), 6);
        assert_eq!(frame_len(2, 3), 14);
        assert_eq!(frame_len(0, 0), FRAME_OVERHEAD);
    }
}
