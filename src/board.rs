//! nRF52840-DK pin map.
//!
//! Every switch is wired between its GPIO and ground with the internal
//! pull-up enabled, so a closed switch reads low.
//!
//! ```text
//!        col 0   col 1   col 2   col 3   col 4   col 5   col 6
//! row 0  P0.02   P0.03   P0.04   P0.05   P0.06   P0.07   -
//!        '0'     '1'     '2'     '3'     '4'     '5'
//! row 1  P0.08   P0.26   P0.27   P0.28   P0.29   P0.30   -
//!        Tab     'q'     'w'     'e'     'r'     't'
//! row 2  P0.31   P1.01   P1.02   P1.03   P1.04   P1.05   -
//!        Shift   'a'     's'     'd'     'f'     'g'
//! row 3  -       P1.06   P1.07   P1.08   P1.10   P1.11   -
//!                'z'     'x'     'c'     'v'     'b'
//! row 4  -       -       -       -       P1.12   P1.13   P1.14
//!                                        Alt     Enter   Ctrl
//! ```
//!
//! P0.06/P0.08 double as the DK's UART; leave the interface MCU's UART
//! bridge disabled when the pad is attached.

use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pin, Pull};
use embassy_nrf::{peripherals, Peripherals};

use crate::config::LEDS_ACTIVE_LOW;
use crate::lock::LedBank;
use crate::matrix::{PinSwitch, Readers};

pub type PadSwitch = PinSwitch<Input<'static>>;
pub type PadLeds = LedBank<Output<'static>>;

/// Everything the keypad loop and the USB task need from the chip.
pub struct Board {
    pub readers: Readers<PadSwitch>,
    /// BUTTON1 on the DK.
    pub diagnostic: PadSwitch,
    pub leds: PadLeds,
    pub usbd: peripherals::USBD,
}

fn switch(pin: AnyPin) -> PadSwitch {
    PinSwitch::new(Input::new(pin, Pull::Up))
}

fn key(pin: AnyPin) -> Option<PadSwitch> {
    Some(switch(pin))
}

fn led(pin: AnyPin) -> Output<'static> {
    let off = if LEDS_ACTIVE_LOW { Level::High } else { Level::Low };
    Output::new(pin, off, OutputDrive::Standard)
}

impl Board {
    pub fn new(p: Peripherals) -> Self {
        #[rustfmt::skip]
        let readers: Readers<PadSwitch> = [
            [
                key(p.P0_02.degrade()), key(p.P0_03.degrade()), key(p.P0_04.degrade()),
                key(p.P0_05.degrade()), key(p.P0_06.degrade()), key(p.P0_07.degrade()),
                None,
            ],
            [
                key(p.P0_08.degrade()), key(p.P0_26.degrade()), key(p.P0_27.degrade()),
                key(p.P0_28.degrade()), key(p.P0_29.degrade()), key(p.P0_30.degrade()),
                None,
            ],
            [
                key(p.P0_31.degrade()), key(p.P1_01.degrade()), key(p.P1_02.degrade()),
                key(p.P1_03.degrade()), key(p.P1_04.degrade()), key(p.P1_05.degrade()),
                None,
            ],
            [
                None, key(p.P1_06.degrade()), key(p.P1_07.degrade()),
                key(p.P1_08.degrade()), key(p.P1_10.degrade()), key(p.P1_11.degrade()),
                None,
            ],
            [
                None, None, None, None,
                key(p.P1_12.degrade()), key(p.P1_13.degrade()), key(p.P1_14.degrade()),
            ],
        ];

        // Indexed by `Indicator::id`: Caps, Num, Scroll, Debug.
        let leds = LedBank::new(
            [
                led(p.P0_15.degrade()), // LED3
                led(p.P0_14.degrade()), // LED2
                led(p.P0_16.degrade()), // LED4
                led(p.P0_13.degrade()), // LED1
            ],
            LEDS_ACTIVE_LOW,
        );

        Self {
            readers,
            diagnostic: switch(p.P0_11.degrade()),
            leds,
            usbd: p.USBD,
        }
    }
}
