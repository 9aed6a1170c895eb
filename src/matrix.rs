//! Key matrix decoder.
//!
//! Each bound position owns one read-callable. Reads are active-low: a
//! switch that is closed reads `0`. There is no debouncing, so a single
//! contact bounce can show up as a press.
//!
//! A decode pass sweeps the matrix twice in row-major order:
//!
//! 1. Modifier sweep: only Shift/Ctrl/Alt positions are read. The last one
//!    found pressed becomes the held modifier byte.
//! 2. Key sweep: the other bound positions are read and the first pressed
//!    one is returned. Anything pressed later in scan order during the
//!    same pass is not reported.

use embedded_hal::digital::InputPin;
use heapless::Vec;

use crate::config::{MATRIX_COLS, MATRIX_POSITIONS, MATRIX_ROWS};
use crate::error::Error;
use crate::keymap::{Key, Layout, Position, LAYOUT};
use crate::logging::log_trace;

/// Read primitive for one physical switch.
pub trait KeyRead {
    /// Raw level: `0` when the switch is closed, nonzero otherwise.
    fn read(&mut self) -> u8;

    fn is_pressed(&mut self) -> bool {
        self.read() == 0
    }
}

/// Adapts an `embedded-hal` input pin (pulled up, switch to ground).
///
/// A pin error reads as released.
pub struct PinSwitch<P> {
    pin: P,
}

impl<P: InputPin> PinSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> KeyRead for PinSwitch<P> {
    fn read(&mut self) -> u8 {
        match self.pin.is_high() {
            Ok(false) => 0,
            Ok(true) | Err(_) => 1,
        }
    }
}

/// One reader slot per matrix position.
pub type Readers<R> = [[Option<R>; MATRIX_COLS]; MATRIX_ROWS];

/// Result of one two-sweep decode pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scan {
    /// Modifier byte from the modifier sweep (0 when none held).
    pub modifier: u8,
    /// First pressed non-modifier key in row-major order.
    pub key: Option<(Position, Key)>,
}

/// Layout plus readers.
pub struct Matrix<R> {
    layout: &'static Layout,
    readers: Readers<R>,
}

impl<R: KeyRead> Matrix<R> {
    /// Bind `readers` to the pad's [`LAYOUT`].
    pub fn new(readers: Readers<R>) -> Result<Self, Error> {
        Self::with_layout(&LAYOUT, readers)
    }

    /// Bind `readers` to a custom layout.
    ///
    /// Every bound key needs a reader, and `NoKey` positions must not have
    /// one.
    pub fn with_layout(layout: &'static Layout, readers: Readers<R>) -> Result<Self, Error> {
        for pos in Position::all() {
            let key = layout[pos.row()][pos.col()];
            let has_reader = readers[pos.row()][pos.col()].is_some();
            match (key.is_bound(), has_reader) {
                (true, false) => {
                    return Err(Error::MissingReader {
                        row: pos.row,
                        col: pos.col,
                    })
                }
                (false, true) => {
                    return Err(Error::StrayReader {
                        row: pos.row,
                        col: pos.col,
                    })
                }
                _ => {}
            }
        }
        Ok(Self { layout, readers })
    }

    /// Key bound at `pos`.
    pub fn key_at(&self, pos: Position) -> Key {
        self.layout[pos.row()][pos.col()]
    }

    /// Whether the switch at `pos` is closed. Unbound positions never are.
    pub fn is_pressed(&mut self, pos: Position) -> bool {
        match self.readers[pos.row()][pos.col()].as_mut() {
            Some(reader) => reader.is_pressed(),
            None => false,
        }
    }

    /// Modifier sweep. The last pressed modifier in scan order wins.
    pub fn held_modifier(&mut self) -> Option<Key> {
        let mut held = None;
        for pos in Position::all() {
            let key = self.key_at(pos);
            if key.is_modifier() && self.is_pressed(pos) {
                held = Some(key);
            }
        }
        held
    }

    /// Key sweep. Stops at the first pressed non-modifier key.
    pub fn first_pressed(&mut self) -> Option<(Position, Key)> {
        for pos in Position::all() {
            let key = self.key_at(pos);
            if !key.is_modifier() && self.is_pressed(pos) {
                return Some((pos, key));
            }
        }
        None
    }

    /// Both sweeps, in order.
    pub fn scan(&mut self) -> Scan {
        let modifier = self.held_modifier().map_or(0, Key::hid_byte);
        let key = self.first_pressed();
        log_trace!("matrix: modifier {=u8:#04x}, key {}", modifier, key);
        Scan { modifier, key }
    }

    /// Every currently pressed position, in row-major order.
    pub fn pressed(&mut self) -> Vec<(Position, Key), MATRIX_POSITIONS> {
        let mut out = Vec::new();
        for pos in Position::all() {
            if self.is_pressed(pos) {
                // Capacity equals the number of positions.
                let _ = out.push((pos, self.key_at(pos)));
            }
        }
        out
    }
}
