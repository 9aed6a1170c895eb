//! ASCII to USB HID usage translation (US layout).
//!
//! The table covers printable ASCII plus DEL (`0x20..=0x7F`) and is indexed
//! by `ascii - ASCII_BASE`. Entries follow the HID Usage Tables, Keyboard
//! page (0x07). Characters that need Shift on a US keyboard share the usage
//! of their unshifted key; [`needs_shift`] tells them apart.

/// First ASCII value covered by [`SCAN_CODES`].
pub const ASCII_BASE: u8 = 0x20;

/// Last ASCII value covered by [`SCAN_CODES`].
pub const ASCII_LAST: u8 = 0x7F;

/// ASCII (offset by [`ASCII_BASE`]) → HID usage code.
#[rustfmt::skip]
pub const SCAN_CODES: [u8; 96] = [
    0x2C, 0x1E, 0x34, 0x20, 0x21, 0x22, 0x24, 0x34, 0x26, 0x27, 0x25, 0x2E, 0x36,
    0x2D, 0x37, 0x38, 0x27, 0x1E, 0x1F, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26,
    0x33, 0x33, 0x36, 0x2E, 0x37, 0x38, 0x1F, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09,
    0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16,
    0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D, 0x2F, 0x31, 0x30, 0x23, 0x2D, 0x35,
    0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10,
    0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D,
    0x2F, 0x31, 0x30, 0x35, 0x4C,
];

/// Whether the character at table `index` needs Shift held.
///
/// Shifted: `!"#$%&`, `()*+`, `:`, `<`, `>?@A-Z`, `^_`, `{|}~`.
pub const fn needs_shift(index: u8) -> bool {
    matches!(index, 1..=6 | 8..=11 | 26 | 28 | 30..=58 | 62 | 63 | 91..=94)
}

/// Table index for `ascii`, or `None` outside `0x20..=0x7F`.
pub const fn table_index(ascii: u8) -> Option<u8> {
    if ascii >= ASCII_BASE && ascii <= ASCII_LAST {
        Some(ascii - ASCII_BASE)
    } else {
        None
    }
}

/// Usage code for `ascii` and whether Shift must accompany it.
pub const fn usage_for_ascii(ascii: u8) -> Option<(u8, bool)> {
    match table_index(ascii) {
        Some(index) => Some((SCAN_CODES[index as usize], needs_shift(index))),
        None => None,
    }
}
