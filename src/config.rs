//! Application-wide constants and compile-time configuration.
//!
//! Matrix geometry, USB identity, and protocol knobs live here so they
//! can be tuned in one place.

// Matrix

/// Number of rows in the key matrix.
pub const MATRIX_ROWS: usize = 5;

/// Number of columns in the key matrix.
pub const MATRIX_COLS: usize = 7;

/// Total number of matrix positions (bound or not).
pub const MATRIX_POSITIONS: usize = MATRIX_ROWS * MATRIX_COLS;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "diypad";
pub const USB_PRODUCT: &str = "DIY Gaming Pad";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

// Protocol

/// How many times to poll for an IN acknowledgment before giving up.
///
/// `None` blocks forever: a host that never acknowledges stalls the
/// device. Setting a limit is an opt-in change of host-facing timing.
pub const ACK_SPIN_LIMIT: Option<u32> = None;

/// Reload the IN report once per active lock bit when an OUT report
/// is reflected onto the indicators.
pub const ECHO_ON_LOCK: bool = true;

/// Character injected by the diagnostic button.
pub const DIAGNOSTIC_CHAR: u8 = b'a';

// GPIO pin assignments (nRF52840-DK)
//
// See `board.rs` for the full key-to-pin table.
//
//   Diagnostic button → P0.11 (BUTTON1)
//   Debug LED         → P0.13 (LED1)
//   Num Lock LED      → P0.14 (LED2)
//   Caps Lock LED     → P0.15 (LED3)
//   Scroll Lock LED   → P0.16 (LED4)

/// The DK's LEDs are wired to VDD and lit by driving the pin low.
pub const LEDS_ACTIVE_LOW: bool = true;
