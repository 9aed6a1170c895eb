//! HID encoder - symbolic keys to boot keyboard reports.
//!
//! Translation rules:
//! - `Enter`, `Tab`, `Caps`: the key's own byte is the usage code.
//! - `Char(c)` in `0x20..=0x7F`: usage from [`ascii::SCAN_CODES`]; when
//!   [`ascii::needs_shift`] holds, the modifier byte is replaced by Left
//!   Shift whatever modifier was held.
//! - Everything else yields no usage code and leaves the modifier alone.

pub mod ascii;
pub mod keyboard;

#[cfg(test)]
mod tests;

pub use keyboard::{KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE};

use crate::keymap::{Key, MOD_LEFT_SHIFT};

/// Modifier and usage bytes for one key-down report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Encoded {
    /// Report byte 0.
    pub modifier: u8,
    /// Report byte 2. Zero when the key has no usage code.
    pub usage: u8,
}

impl Encoded {
    pub const fn report(self) -> KeyboardReport {
        KeyboardReport::key(self.modifier, self.usage)
    }
}

/// Usage code for `key`, and whether it forces Shift.
///
/// `None` for modifiers, `NoKey` and characters outside the table.
///
/// `Caps` is sent as Caps Lock (0x39), never looked up as the character
/// with the same byte value ('9').
pub const fn usage_of(key: Key) -> Option<(u8, bool)> {
    match key {
        Key::Char(c) => ascii::usage_for_ascii(c),
        _ if key.is_control() => Some((key.hid_byte(), false)),
        _ => None,
    }
}

/// Encode `key` given the modifier byte collected from the modifier sweep.
pub const fn encode(key: Key, held_modifier: u8) -> Encoded {
    match usage_of(key) {
        Some((usage, true)) => Encoded {
            modifier: MOD_LEFT_SHIFT,
            usage,
        },
        Some((usage, false)) => Encoded {
            modifier: held_modifier,
            usage,
        },
        None => Encoded {
            modifier: held_modifier,
            usage: 0,
        },
    }
}
