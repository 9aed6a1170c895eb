//! USB Device subsystem - presents a boot keyboard to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. A single HID interface carries the 8-byte keyboard IN
//! report and the 1-byte LED OUT report.
//!
//! The USB tasks run on an interrupt executor. The keypad loop runs in
//! thread mode and talks to them through [`hid_device::UsbHostLink`], which
//! only touches atomics and a signal, so the loop can busy-wait without
//! starving the stack.

pub mod hid_device;
