//! The keypad loop.
//!
//! Ties the matrix decoder, the HID encoder, the host link and the lock
//! indicators together. One loop iteration:
//!
//! ```text
//! acknowledged? ──no──> (poll again)
//!      │yes
//!      ▼
//! send_to_host:     diagnostic button → 'a' pulse
//!                   modifier sweep → key sweep → encode → pulse
//! receive_from_host: OUT byte → lock state → indicators
//! ```
//!
//! Every cycle in which a key is held produces one complete down/up pulse,
//! so a held key repeats at the loop rate instead of being reported as
//! held. Only the first pressed key in row-major order is sent per cycle.

use crate::config::{ACK_SPIN_LIMIT, DIAGNOSTIC_CHAR, ECHO_ON_LOCK};
use crate::error::Error;
use crate::hid::{self, ascii, KeyboardReport};
use crate::keymap::Key;
use crate::link::{Handshake, HostLink};
use crate::lock::{Indicator, Indicators, LockState};
use crate::logging::{log_debug, log_info, log_warn};
use crate::matrix::{KeyRead, Matrix};

/// Runtime knobs. Defaults come from `config.rs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Options {
    /// Acknowledgment wait policy.
    pub handshake: Handshake,
    /// Reload the IN report once per active lock bit while reflecting.
    pub echo_on_lock: bool,
    /// Character sent by the diagnostic button.
    pub diagnostic_char: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            handshake: Handshake {
                spin_limit: ACK_SPIN_LIMIT,
            },
            echo_on_lock: ECHO_ON_LOCK,
            diagnostic_char: DIAGNOSTIC_CHAR,
        }
    }
}

/// State scoped to one loop iteration.
///
/// The report starts idle, picks up the held modifier from the modifier
/// sweep, and is what the reflector reloads when lock bits are set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cycle {
    pub report: KeyboardReport,
    /// Key sent from the matrix this cycle.
    pub sent: Option<Key>,
    /// The diagnostic pulse was sent this cycle.
    pub injected: bool,
}

/// Matrix `R`, diagnostic input `D`, host link `L`, indicators `I`.
pub struct Keypad<R, D, L, I> {
    matrix: Matrix<R>,
    diagnostic: D,
    link: L,
    indicators: I,
    options: Options,
    locks: LockState,
}

impl<R, D, L, I> Keypad<R, D, L, I>
where
    R: KeyRead,
    D: KeyRead,
    L: HostLink,
    I: Indicators,
{
    pub fn new(matrix: Matrix<R>, diagnostic: D, link: L, indicators: I) -> Self {
        Self::with_options(matrix, diagnostic, link, indicators, Options::default())
    }

    pub fn with_options(
        matrix: Matrix<R>,
        diagnostic: D,
        link: L,
        indicators: I,
        options: Options,
    ) -> Self {
        Self {
            matrix,
            diagnostic,
            link,
            indicators,
            options,
            locks: LockState::default(),
        }
    }

    /// Lock state from the most recent reflection.
    pub fn locks(&self) -> LockState {
        self.locks
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    /// Wait for enumeration and prime the IN endpoint.
    ///
    /// The debug indicator is lit until the host configures the device.
    pub fn start(&mut self) {
        self.indicators.write(Indicator::Debug, true);
        log_info!("waiting for USB configuration");
        self.options.handshake.wait_configured(&mut self.link);
        self.link.load(&KeyboardReport::empty().to_bytes());
        self.indicators.write(Indicator::Debug, false);
        log_info!("configured, scanning");
    }

    /// One loop iteration. Returns `Ok(None)` when the previous report is
    /// still pending.
    pub fn poll(&mut self) -> Result<Option<Cycle>, Error> {
        if !self.link.is_acknowledged() {
            return Ok(None);
        }
        let mut cycle = Cycle::default();
        self.send_to_host(&mut cycle)?;
        self.receive_from_host(&mut cycle);
        Ok(Some(cycle))
    }

    /// Start, then poll forever.
    ///
    /// Errors only occur with a bounded handshake; they are logged and the
    /// loop carries on.
    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            if let Err(_e) = self.poll() {
                log_warn!("cycle aborted: {}", _e);
            }
        }
    }

    /// Diagnostic pulse, then the matrix scan.
    pub fn send_to_host(&mut self, cycle: &mut Cycle) -> Result<(), Error> {
        self.inject_diagnostic(cycle)?;

        let scan = self.matrix.scan();
        cycle.report.modifier = scan.modifier;

        if let Some((_pos, key)) = scan.key {
            let encoded = hid::encode(key, scan.modifier);
            log_debug!(
                "key {} at ({}, {}) -> {=u8:#04x} mod {=u8:#04x}",
                key, _pos.row, _pos.col, encoded.usage, encoded.modifier
            );
            cycle.report = encoded.report();
            cycle.sent = Some(key);
            self.options.handshake.pulse(&mut self.link, &mut cycle.report)?;
        }
        Ok(())
    }

    /// Blocks while the diagnostic button is held, then pulses the
    /// diagnostic character on release.
    pub fn inject_diagnostic(&mut self, cycle: &mut Cycle) -> Result<(), Error> {
        if !self.diagnostic.is_pressed() {
            return Ok(());
        }
        while self.diagnostic.is_pressed() {
            core::hint::spin_loop();
        }
        let usage = ascii::usage_for_ascii(self.options.diagnostic_char).map_or(0, |(u, _)| u);
        log_info!("diagnostic key, usage {=u8:#04x}", usage);
        cycle.report = KeyboardReport::key(0, usage);
        cycle.injected = true;
        self.options.handshake.pulse(&mut self.link, &mut cycle.report)
    }

    /// Mirror the OUT report onto the lock indicators.
    ///
    /// With lock echo on, each set bit first clears the key byte and loads
    /// the report once more without waiting for acknowledgment.
    pub fn receive_from_host(&mut self, cycle: &mut Cycle) {
        let locks = LockState::from_bits(self.link.lock_bits());
        if locks != self.locks {
            log_info!(
                "lock bits {=u8:#05b} -> {=u8:#05b}",
                self.locks.bits(),
                locks.bits()
            );
        }

        if self.options.echo_on_lock {
            for (indicator, on) in locks.indicators() {
                if on {
                    cycle.report.set_primary(0);
                    self.link.load(&cycle.report.to_bytes());
                }
                self.indicators.write(indicator, on);
            }
        } else {
            locks.drive(&mut self.indicators);
        }
        self.locks = locks;
    }
}
