//! Joystick telemetry sampler firmware for RP2040.
//!
//! Samples a fixed set of buttons and potentiometers and streams
//! checksummed binary telemetry frames over UART.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Configures button GPIOs (with pulls) and ADC channels
//! 2. Auto-calibrates potentiometer ranges on first boot (interactive,
//!    over the same UART)
//! 3. Samples every input on a fixed period and emits one frame per
//!    cycle (115200 baud, 8N1)
//!
//! # Hardware Configuration
//!
//! | Function  | GPIO      | Description                  |
//! |-----------|-----------|------------------------------|
//! | UART0 TX  | 0         | Telemetry frames + diagnostics |
//! | UART0 RX  | 1         | Calibration / plotter input  |
//! | Buttons   | 2, 3, 4   | Pull-up wiring (active low)  |
//! | Pots      | 26, 27    | ADC0 / ADC1                  |
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development
//!   (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent
//!   watchdog reset)
//! - **`serial-plotter`**: Emit human-readable `pin:value` lines for
//!   the serial plotter instead of binary frames; bytes `0`/`1` on the
//!   UART switch between the button and pot views
//!
//! # Re-exports
//!
//! This crate re-exports all public items from [`joystick_core`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

// Ensure mutually exclusive panic handler features
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - pick one panic handler");

// Re-export core types for convenience
pub use joystick_core::{
    ButtonBank, Calibration, Console, FrameError, NullConsole, PinId, PinInterface, Plotter,
    PlotterView, Polarity, PotBank, Pull, Sampler, SerialConsole, OUTPUT_MAX, RAW_MAX,
};

pub mod pins;

pub use pins::RpPins;
