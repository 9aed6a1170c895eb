//! Lock-state reflector.
//!
//! The host sends a 1-byte OUT report whenever its lock state changes:
//!
//! ```text
//! bit 0 = Num Lock
//! bit 1 = Caps Lock
//! bit 2 = Scroll Lock
//! ```
//!
//! The pad mirrors those bits onto three indicator LEDs. Nothing is
//! persisted; every OUT report overwrites the previous state.

use embedded_hal::digital::OutputPin;

/// OUT report bit for Num Lock.
pub const LED_NUM_LOCK: u8 = 0x01;
/// OUT report bit for Caps Lock.
pub const LED_CAPS_LOCK: u8 = 0x02;
/// OUT report bit for Scroll Lock.
pub const LED_SCROLL_LOCK: u8 = 0x04;

/// Indicator outputs, numbered as the board wires them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Indicator {
    Caps = 0,
    Num = 1,
    Scroll = 2,
    /// Lit while waiting for enumeration.
    Debug = 3,
}

impl Indicator {
    pub const COUNT: usize = 4;

    pub const fn id(self) -> usize {
        self as usize
    }
}

/// Write primitive for the indicator outputs.
pub trait Indicators {
    fn write(&mut self, indicator: Indicator, on: bool);
}

/// Four `embedded-hal` output pins indexed by [`Indicator::id`].
pub struct LedBank<P> {
    pins: [P; Indicator::COUNT],
    active_low: bool,
}

impl<P: OutputPin> LedBank<P> {
    pub fn new(pins: [P; Indicator::COUNT], active_low: bool) -> Self {
        Self { pins, active_low }
    }
}

impl<P: OutputPin> Indicators for LedBank<P> {
    fn write(&mut self, indicator: Indicator, on: bool) {
        let pin = &mut self.pins[indicator.id()];
        let high = on != self.active_low;
        // GPIO writes on the supported boards are infallible.
        let _ = if high { pin.set_high() } else { pin.set_low() };
    }
}

/// Host lock state as last reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockState {
    pub num: bool,
    pub caps: bool,
    pub scroll: bool,
}

impl LockState {
    /// Decode an OUT report byte. Bits above 2 are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            num: bits & LED_NUM_LOCK != 0,
            caps: bits & LED_CAPS_LOCK != 0,
            scroll: bits & LED_SCROLL_LOCK != 0,
        }
    }

    pub const fn bits(self) -> u8 {
        (self.num as u8) | ((self.caps as u8) << 1) | ((self.scroll as u8) << 2)
    }

    /// `(indicator, state)` in the order the reflector applies them:
    /// Num, Caps, Scroll.
    pub const fn indicators(self) -> [(Indicator, bool); 3] {
        [
            (Indicator::Num, self.num),
            (Indicator::Caps, self.caps),
            (Indicator::Scroll, self.scroll),
        ]
    }

    /// Drive all three lock indicators.
    pub fn drive(self, out: &mut impl Indicators) {
        for (indicator, on) in self.indicators() {
            out.write(indicator, on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[test]
    fn decode_each_bit() {
        assert_eq!(
            LockState::from_bits(0x01),
            LockState {
                num: true,
                caps: false,
                scroll: false
            }
        );
        assert!(LockState::from_bits(0x02).caps);
        assert!(LockState::from_bits(0x04).scroll);
        assert_eq!(LockState::from_bits(0x00), LockState::default());
    }

    #[test]
    fn upper_bits_are_ignored() {
        // Compose and Kana are declared in the descriptor but not reflected.
        assert_eq!(LockState::from_bits(0x18), LockState::default());
        assert_eq!(LockState::from_bits(0xFF).bits(), 0x07);
    }

    #[test]
    fn bits_roundtrip() {
        for bits in 0..8u8 {
            assert_eq!(LockState::from_bits(bits).bits(), bits);
        }
    }

    #[test]
    fn indicator_numbering() {
        assert_eq!(Indicator::Caps.id(), 0);
        assert_eq!(Indicator::Num.id(), 1);
        assert_eq!(Indicator::Scroll.id(), 2);
        assert_eq!(Indicator::Debug.id(), 3);
    }

    #[derive(Default)]
    struct FakeLed {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for FakeLed {
        type Error = Infallible;
    }

    impl OutputPin for FakeLed {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn led_bank_active_low() {
        let mut bank: LedBank<FakeLed> = LedBank::new(Default::default(), true);
        LockState::from_bits(LED_CAPS_LOCK).drive(&mut bank);
        let levels: [bool; 4] = core::array::from_fn(|i| bank.pins[i].high);
        // Caps lit (low), Num and Scroll dark (high), Debug untouched.
        assert_eq!(levels, [false, true, true, false]);
    }

    #[test]
    fn led_bank_active_high() {
        let mut bank: LedBank<FakeLed> = LedBank::new(Default::default(), false);
        bank.write(Indicator::Debug, true);
        bank.write(Indicator::Num, true);
        assert!(bank.pins[Indicator::Debug.id()].high);
        assert!(bank.pins[Indicator::Num.id()].high);
        assert!(!bank.pins[Indicator::Scroll.id()].high);
    }
}
