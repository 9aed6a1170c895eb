//! diypad - USB HID keyboard firmware for a 5×7 key matrix.
//!
//! The pure logic (matrix decoding, HID encoding, the report handshake and
//! lock reflection) builds on the host and is unit-tested there:
//!
//! Usage: `cargo test`
//!
//! The board glue (`board`, `usb`) and the firmware entry point in
//! `main.rs` need the `embedded` feature and an nRF52840 target:
//!
//! `cargo run --release --features embedded --target thumbv7em-none-eabihf`

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// Core (host-testable)
// ═══════════════════════════════════════════════════════════════════════════

pub(crate) mod logging;

pub mod config;
pub mod error;
pub mod hid;
pub mod keymap;
pub mod keypad;
pub mod link;
pub mod lock;
pub mod matrix;

pub use error::Error;
pub use hid::{encode, Encoded, KeyboardReport};
pub use keymap::{Key, Position, LAYOUT};
pub use keypad::{Cycle, Keypad, Options};
pub use link::{Handshake, HostLink};
pub use lock::{Indicator, Indicators, LedBank, LockState};
pub use matrix::{KeyRead, Matrix, PinSwitch, Readers, Scan};

// ═══════════════════════════════════════════════════════════════════════════
// Board glue (nRF52840 only)
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "embedded")]
pub mod board;
#[cfg(feature = "embedded")]
pub mod usb;
