//! USB side of the host link.
//!
//! The USB tasks run on the interrupt executor; the keypad loop runs in
//! thread mode and never awaits. They meet through the statics below:
//! a loaded report goes into `IN_REPORT` with a sequence number, and the
//! writer task marks that number staged once the endpoint has taken the
//! report. The next write waits for the host's ACK of the previous one,
//! so acknowledgment runs at most one report ahead of the host.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{
    Config as HidConfig, HidReader, HidReaderWriter, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use static_cell::StaticCell;

use crate::config;
use crate::hid::keyboard::{KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE, LED_REPORT_SIZE};
use crate::link::{HostLink, Sequencer};

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;
pub type KeyboardWriter = HidWriter<'static, UsbDriver, KEYBOARD_REPORT_SIZE>;
pub type LedReader = HidReader<'static, UsbDriver, LED_REPORT_SIZE>;

static KB_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_DEVICE_HANDLER: StaticCell<PadDeviceHandler> = StaticCell::new();
static CONTROL_LED_HANDLER: StaticCell<LedRequestHandler> = StaticCell::new();

// Shared with the thread-mode keypad loop.
static CONFIGURED: AtomicBool = AtomicBool::new(false);
static LOCK_BITS: AtomicU8 = AtomicU8::new(0);
static SEQUENCE: Sequencer = Sequencer::new();
/// Pending IN report. A newer load replaces an unstaged one.
static IN_REPORT: Signal<CriticalSectionRawMutex, (u32, [u8; KEYBOARD_REPORT_SIZE])> =
    Signal::new();

struct PadDeviceHandler;

impl Handler for PadDeviceHandler {
    fn reset(&mut self) {
        info!("USB reset");
        CONFIGURED.store(false, Ordering::Release);
    }

    fn configured(&mut self, configured: bool) {
        info!("USB configured: {}", configured);
        CONFIGURED.store(configured, Ordering::Release);
    }

    fn suspended(&mut self, suspended: bool) {
        info!("USB suspended: {}", suspended);
    }
}

/// Stores LED OUT reports, whether they arrive on the interrupt OUT
/// endpoint or as a control SET_REPORT.
struct LedRequestHandler;

impl RequestHandler for LedRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, _id: ReportId, data: &[u8]) -> OutResponse {
        match data.first() {
            Some(&bits) => {
                LOCK_BITS.store(bits, Ordering::Relaxed);
                OutResponse::Accepted
            }
            None => {
                warn!("empty LED report");
                OutResponse::Rejected
            }
        }
    }
}

/// The keypad's view of the USB stack.
#[derive(Clone, Copy, Default)]
pub struct UsbHostLink;

impl HostLink for UsbHostLink {
    fn is_configured(&mut self) -> bool {
        CONFIGURED.load(Ordering::Acquire)
    }

    fn load(&mut self, report: &[u8; KEYBOARD_REPORT_SIZE]) {
        IN_REPORT.signal((SEQUENCE.next_load(), *report));
    }

    fn is_acknowledged(&mut self) -> bool {
        SEQUENCE.is_caught_up()
    }

    fn lock_bits(&mut self) -> u8 {
        LOCK_BITS.load(Ordering::Relaxed)
    }
}

/// The device runner and the two halves of the keyboard interface.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_writer: KeyboardWriter,
    pub led_reader: LedReader,
}

fn device_config() -> Config<'static> {
    let mut cfg = Config::new(config::USB_VID, config::USB_PID);
    cfg.manufacturer = Some(config::USB_MANUFACTURER);
    cfg.product = Some(config::USB_PRODUCT);
    cfg.serial_number = Some(config::USB_SERIAL_NUMBER);
    cfg.max_power = 100;
    cfg.max_packet_size_0 = 64;
    // Class is declared on the interface.
    cfg.device_class = 0x00;
    cfg.device_sub_class = 0x00;
    cfg.device_protocol = 0x00;
    cfg.composite_with_iads = false;
    cfg
}

/// Bring up the USB peripheral with one keyboard interface.
///
/// Panics if called twice; the descriptor buffers are static.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut builder = Builder::new(
        driver,
        device_config(),
        USB_CONFIG_DESC.init([0; 256]),
        USB_BOS_DESC.init([0; 256]),
        USB_MSOS_DESC.init([0; 256]),
        USB_CTRL_BUF.init([0; 128]),
    );
    builder.handler(USB_DEVICE_HANDLER.init(PadDeviceHandler));

    let (led_reader, keyboard_writer) =
        HidReaderWriter::<_, LED_REPORT_SIZE, KEYBOARD_REPORT_SIZE>::new(
            &mut builder,
            KB_STATE.init(State::new()),
            HidConfig {
                report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
                request_handler: Some(CONTROL_LED_HANDLER.init(LedRequestHandler)),
                poll_ms: config::USB_HID_POLL_MS,
                max_packet_size: KEYBOARD_REPORT_SIZE as u16,
            },
        )
        .split();

    info!(
        "USB keyboard {=u16:#06x}:{=u16:#06x} ready",
        config::USB_VID,
        config::USB_PID
    );

    UsbHidDevice {
        device: builder.build(),
        keyboard_writer,
        led_reader,
    }
}

/// Enumeration, suspend/resume and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

/// IN report task - writes whatever the keypad loop loaded and marks it
/// staged once the endpoint has taken it. `write` returns when the transfer
/// is armed; the following `write` waits for the host's ACK of this one.
///
/// A failed write (endpoint disabled by a bus reset) is retried once the
/// endpoint is ready again; the report is never dropped.
pub async fn hid_writer_task(mut keyboard: KeyboardWriter) -> ! {
    info!("HID writer task started");

    loop {
        let (seq, report) = IN_REPORT.wait().await;
        while let Err(e) = keyboard.write(&report).await {
            warn!("USB keyboard write failed: {}", e);
            keyboard.ready().await;
        }
        SEQUENCE.staged(seq);
    }
}

/// OUT report task - feeds LED reports from the interrupt OUT endpoint
/// into the same handler as control SET_REPORT requests.
pub async fn hid_reader_task(reader: LedReader) -> ! {
    info!("HID reader task started");
    let mut handler = LedRequestHandler;
    reader.run(false, &mut handler).await
}
