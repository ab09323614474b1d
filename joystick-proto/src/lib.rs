//! Binary telemetry frame format for the joystick sampler.
//!
//! This crate owns the one bit-exact external contract of the system:
//! the length-prefixed, checksummed frame that carries a snapshot of
//! packed button words and remapped potentiometer values to a peer.
//!
//! - **Checksum**: [`Checksum16`], [`checksum`] — the subtractive
//!   16-bit accumulator
//! - **Encoding**: [`encode_frame`] and friends — destructive-drain
//!   frame production
//! - **Parsing**: [`FrameView`] — verifier-side validation for peers
//!   and tests
//!
//! # Wire Format
//!
//! ```text
//! byte 0        : total length L = 4 + 2*word_count + 2*pot_count
//! byte 1        : tag, fixed 0x40
//! bytes 2..L-3  : button words then pot values, each LSB first
//! bytes L-2..L-1: checksum = 0xFFFF - (every preceding byte), LE
//! ```
//!
//! # Example
//!
//! ```
//! use joystick_proto::{encode_frame, FrameView};
//!
//! let mut words = [0b101u16]; // buttons 0 and 2 active
//! let mut pots = [2047u16];
//! let mut buf = [0u8; 16];
//!
//! let len = encode_frame(&mut words, &mut pots, &mut buf).unwrap();
//! // Encoding drains the banks: sample again before the next frame.
//! assert_eq!(words, [0]);
//! assert_eq!(pots, [0]);
//!
//! let view = FrameView::parse(&buf[..len]).unwrap();
//! assert_eq!(view.payload_words().collect::<Vec<_>>(), vec![0b101, 2047]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`heapless`**: Enable [`encode_frame_to_vec`]
//! - **`embedded-io`**: Enable [`encode_frame_io`] for I/O peripherals
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod checksum;
pub mod frame;

// Re-export at crate root for convenience
pub use checksum::{checksum, Checksum16, CHECKSUM_INIT};
pub use frame::{
    encode_frame, frame_len, FrameError, FrameView, FRAME_OVERHEAD, FRAME_TAG, MAX_FRAME_LEN,
    WORD_BYTES,
};

#[cfg(feature = "heapless")]
pub use frame::encode_frame_to_vec;

#[cfg(feature = "embedded-io")]
pub use frame::encode_frame_io;
