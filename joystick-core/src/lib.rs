//! Platform-agnostic joystick sampling: banks, calibration, and the
//! sampler composition root.
//!
//! This crate holds everything between the pins and the wire without
//! any platform-specific dependencies. It can be used both in embedded
//! `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`buttons`]: bit-packed button bank ([`ButtonBank`], [`Polarity`])
//! - [`pots`]: potentiometer bank and calibration ([`PotBank`],
//!   [`Calibration`])
//! - [`sampler`]: composition root ([`Sampler`])
//! - [`pins`]: pin capability trait ([`PinInterface`])
//! - [`console`]: diagnostic channel ([`Console`])
//! - [`plotter`]: serial-plotter text view ([`Plotter`])
//!
//! # Cycle
//!
//! The caller decides when things happen; there is no background task:
//!
//! ```text
//! configure()  — once: pin modes, calibration discovery if needed
//! sample()     — read every input into the banks
//! emit_frame() — drain the banks into one checksummed binary frame
//! ```
//!
//! Frame emission is destructive by contract (see
//! [`joystick_proto::frame`]): always sample before every emission.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`embedded-io`**: Enable frame emission to I/O peripherals and
//!   the [`SerialConsole`] adapter
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod buttons;
pub mod console;
pub mod pins;
pub mod plotter;
pub mod pots;
pub mod sampler;

// Re-export main types at crate root
pub use buttons::{ButtonBank, Polarity, Word, WORD_BITS};
pub use console::{Console, NullConsole};
pub use pins::{PinId, PinInterface, Pull};
pub use plotter::{Plotter, PlotterView};
pub use pots::{Calibration, PotBank, OUTPUT_MAX, RAW_MAX};
pub use sampler::Sampler;

#[cfg(feature = "embedded-io")]
pub use console::SerialConsole;

// Re-export the wire format so firmware only needs this crate.
pub use joystick_proto::{frame_len, FrameError, FrameView, FRAME_TAG, MAX_FRAME_LEN};
