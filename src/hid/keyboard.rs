//! Boot keyboard IN report and the pad's HID report descriptor.
//!
//! ```text
//! byte 0     modifier bits   (0x01 LCtrl, 0x02 LShift, 0x04 LAlt, ...)
//! byte 1     reserved, 0
//! byte 2     primary usage   (the only slot the pad fills)
//! byte 3..8  unused, 0
//! ```
//!
//! The OUT report is a single byte of lock bits: Num (bit 0), Caps (bit 1),
//! Scroll (bit 2).

pub const KEYBOARD_REPORT_SIZE: usize = 8;

pub const LED_REPORT_SIZE: usize = 1;

/// One IN report as it goes on the wire.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub reserved: u8,
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Nothing held: what the host sees between pulses.
    pub const fn empty() -> Self {
        Self::key(0, 0)
    }

    pub const fn key(modifier: u8, usage: u8) -> Self {
        Self {
            modifier,
            reserved: 0,
            keycodes: [usage, 0, 0, 0, 0, 0],
        }
    }

    /// Overwrite byte 2, keeping the modifier.
    pub fn set_primary(&mut self, usage: u8) {
        self.keycodes[0] = usage;
    }

    /// Drop modifier and usage.
    pub fn release(&mut self) {
        *self = Self::empty();
    }

    pub const fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let k = self.keycodes;
        [self.modifier, self.reserved, k[0], k[1], k[2], k[3], k[4], k[5]]
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes == [0; 6]
    }
}

/// Boot-compatible keyboard: 8 modifier bits, a pad byte, 6 usage slots in,
/// and Num/Caps/Scroll lock bits out.
#[rustfmt::skip]
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01,         // usage page: generic desktop
    0x09, 0x06,         // usage: keyboard
    0xA1, 0x01,         // collection: application

    // byte 0, one bit per modifier E0..E7
    0x05, 0x07,         //   usage page: key codes
    0x19, 0xE0,         //   usage min
    0x29, 0xE7,         //   usage max
    0x15, 0x00,         //   logical min 0
    0x25, 0x01,         //   logical max 1
    0x75, 0x01,         //   size 1
    0x95, 0x08,         //   count 8
    0x81, 0x02,         //   input: data, var, abs

    // byte 1
    0x75, 0x08,         //   size 8
    0x95, 0x01,         //   count 1
    0x81, 0x01,         //   input: const

    // OUT byte, lock bits then padding
    0x05, 0x08,         //   usage page: LEDs
    0x19, 0x01,         //   usage min: num lock
    0x29, 0x03,         //   usage max: scroll lock
    0x75, 0x01,         //   size 1
    0x95, 0x03,         //   count 3
    0x91, 0x02,         //   output: data, var, abs
    0x75, 0x05,         //   size 5
    0x95, 0x01,         //   count 1
    0x91, 0x01,         //   output: const

    // bytes 2..8, usage array
    0x05, 0x07,         //   usage page: key codes
    0x19, 0x00,         //   usage min
    0x2A, 0xFF, 0x00,   //   usage max 255
    0x15, 0x00,         //   logical min 0
    0x26, 0xFF, 0x00,   //   logical max 255
    0x75, 0x08,         //   size 8
    0x95, 0x06,         //   count 6
    0x81, 0x00,         //   input: data, array

    0xC0,               // end collection
];
