//! Symbolic keys and the physical layout of the pad.
//!
//! Every matrix position is bound to exactly one [`Key`]. Positions with no
//! switch are bound to [`Key::NoKey`] and carry no reader.
//!
//! ## HID byte table
//!
//! Each key converts to a single byte with [`Key::hid_byte`]. The meaning of
//! that byte depends on the key class:
//!
//! ```text
//! Key      Byte   Meaning
//! Ctrl     0x01   modifier bitmask bit (Left Ctrl)
//! Shift    0x02   modifier bitmask bit (Left Shift)
//! Alt      0x04   modifier bitmask bit (Left Alt)
//! Enter    0x28   usage code (Keyboard Return)
//! Tab      0x2B   usage code (Keyboard Tab)
//! Caps     0x39   usage code (Keyboard Caps Lock)
//! Char(c)  c      ASCII, translated through the scan code table
//! NoKey    0x00
//! ```
//!
//! Modifier bytes go to report byte 0, usage codes to report byte 2.

use crate::config::{MATRIX_COLS, MATRIX_ROWS};

/// Left Ctrl bit in the modifier byte.
pub const MOD_LEFT_CTRL: u8 = 0x01;
/// Left Shift bit in the modifier byte.
pub const MOD_LEFT_SHIFT: u8 = 0x02;
/// Left Alt bit in the modifier byte.
pub const MOD_LEFT_ALT: u8 = 0x04;

/// HID usage: Keyboard Return (ENTER).
pub const USAGE_ENTER: u8 = 0x28;
/// HID usage: Keyboard Tab.
pub const USAGE_TAB: u8 = 0x2B;
/// HID usage: Keyboard Caps Lock.
pub const USAGE_CAPS_LOCK: u8 = 0x39;

/// Symbolic identity of a matrix position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Unused position.
    NoKey,
    Shift,
    Ctrl,
    Alt,
    Enter,
    Tab,
    /// Defined for completeness; not wired in [`LAYOUT`].
    Caps,
    /// Printable ASCII character.
    Char(u8),
}

impl Key {
    /// The key's byte in the dual-purpose table above.
    pub const fn hid_byte(self) -> u8 {
        match self {
            Key::NoKey => 0x00,
            Key::Ctrl => MOD_LEFT_CTRL,
            Key::Shift => MOD_LEFT_SHIFT,
            Key::Alt => MOD_LEFT_ALT,
            Key::Enter => USAGE_ENTER,
            Key::Tab => USAGE_TAB,
            Key::Caps => USAGE_CAPS_LOCK,
            Key::Char(c) => c,
        }
    }

    /// Shift, Ctrl or Alt.
    pub const fn is_modifier(self) -> bool {
        matches!(self, Key::Shift | Key::Ctrl | Key::Alt)
    }

    /// Named control keys whose HID byte is already a usage code.
    pub const fn is_control(self) -> bool {
        matches!(self, Key::Enter | Key::Tab | Key::Caps)
    }

    pub const fn is_bound(self) -> bool {
        !matches!(self, Key::NoKey)
    }
}

/// A `(row, col)` coordinate in the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Returns `None` outside the 5×7 grid.
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < MATRIX_ROWS && col < MATRIX_COLS {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Iterate every position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..MATRIX_ROWS)
            .flat_map(|row| (0..MATRIX_COLS).filter_map(move |col| Self::new(row, col)))
    }

    pub(crate) const fn row(self) -> usize {
        self.row as usize
    }

    pub(crate) const fn col(self) -> usize {
        self.col as usize
    }
}

/// A full matrix binding.
pub type Layout = [[Key; MATRIX_COLS]; MATRIX_ROWS];

const __: Key = Key::NoKey;

const fn c(ch: u8) -> Key {
    Key::Char(ch)
}

/// The pad as wired.
pub const LAYOUT: Layout = [
    [c(b'0'), c(b'1'), c(b'2'), c(b'3'), c(b'4'), c(b'5'), __],
    [Key::Tab, c(b'q'), c(b'w'), c(b'e'), c(b'r'), c(b't'), __],
    [Key::Shift, c(b'a'), c(b's'), c(b'd'), c(b'f'), c(b'g'), __],
    [__, c(b'z'), c(b'x'), c(b'c'), c(b'v'), c(b'b'), __],
    [__, __, __, __, Key::Alt, Key::Enter, Key::Ctrl],
];

#[cfg(test)]
mod tests {
    use super::*;

    fn bound_keys(layout: &Layout) -> usize {
        layout
            .iter()
            .flat_map(|row| row.iter())
            .filter(|k| k.is_bound())
            .count()
    }

    #[test]
    fn layout_has_26_keys() {
        assert_eq!(bound_keys(&LAYOUT), 26);
    }

    #[test]
    fn modifier_bytes_are_left_hand_bits() {
        assert_eq!(Key::Ctrl.hid_byte(), 0x01);
        assert_eq!(Key::Shift.hid_byte(), 0x02);
        assert_eq!(Key::Alt.hid_byte(), 0x04);
    }

    #[test]
    fn control_bytes_are_usage_codes() {
        assert_eq!(Key::Enter.hid_byte(), 0x28);
        assert_eq!(Key::Tab.hid_byte(), 0x2B);
        assert_eq!(Key::Caps.hid_byte(), 0x39);
    }

    #[test]
    fn enter_is_not_mistaken_for_paren() {
        // 0x28 is also '(' in ASCII; the tagged key keeps them apart.
        assert_ne!(Key::Enter, Key::Char(b'('));
        assert!(Key::Enter.is_control());
        assert!(!Key::Char(b'(').is_control());
    }

    #[test]
    fn position_bounds() {
        assert!(Position::new(4, 6).is_some());
        assert!(Position::new(5, 0).is_none());
        assert!(Position::new(0, 7).is_none());
    }

    #[test]
    fn positions_are_row_major() {
        let mut it = Position::all();
        assert_eq!(it.next(), Position::new(0, 0));
        assert_eq!(it.next(), Position::new(0, 1));
        assert_eq!(Position::all().nth(7), Position::new(1, 0));
        assert_eq!(Position::all().count(), 35);
    }

    #[test]
    fn modifiers_sit_where_wired() {
        assert_eq!(LAYOUT[2][0], Key::Shift);
        assert_eq!(LAYOUT[4][4], Key::Alt);
        assert_eq!(LAYOUT[4][6], Key::Ctrl);
        assert_eq!(LAYOUT[4][5], Key::Enter);
        assert_eq!(LAYOUT[1][0], Key::Tab);
    }
}
