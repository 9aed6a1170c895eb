//! Firmware entry point for the nRF52840.
//!
//! The USB stack runs on an interrupt executor so that the keypad loop
//! can own thread mode and busy-wait on host acknowledgments.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::{info, unwrap};
use embassy_executor::InterruptExecutor;
use embassy_futures::join::join3;
use embassy_nrf::config::{Config, HfclkSource};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::peripherals;
use {defmt_rtt as _, panic_probe as _};

use diypad::board::Board;
use diypad::usb::hid_device::{self, UsbHostLink};
use diypad::{Keypad, Matrix};

static EXECUTOR_USB: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    EXECUTOR_USB.on_interrupt()
}

#[embassy_executor::task]
async fn usb_task(usbd: peripherals::USBD) {
    let usb = hid_device::init(usbd);
    join3(
        hid_device::run_usb_device(usb.device),
        hid_device::hid_writer_task(usb.keyboard_writer),
        hid_device::hid_reader_task(usb.led_reader),
    )
    .await;
}

#[entry]
fn main() -> ! {
    info!("diypad starting");

    // USB needs the crystal oscillator.
    let mut config = Config::default();
    config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(config);

    let board = Board::new(p);

    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    let spawner = EXECUTOR_USB.start(interrupt::EGU1_SWI1);
    unwrap!(spawner.spawn(usb_task(board.usbd)));

    let matrix = unwrap!(Matrix::new(board.readers));
    let mut keypad = Keypad::new(matrix, board.diagnostic, UsbHostLink, board.leds);
    keypad.run()
}
