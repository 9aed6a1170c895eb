//! Host exchange primitive and the blocking handshake built on it.
//!
//! A [`HostLink`] behaves like a single IN endpoint buffer: `load` hands
//! the next report to the transport and clears the acknowledged flag, which
//! comes back once the transport has taken the report. Loading again before
//! the acknowledgment replaces the pending report.
//!
//! All waits are busy-polls. With the default [`Handshake`] they never time
//! out: a host that stops acknowledging stalls the caller indefinitely.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::Error;
use crate::hid::{KeyboardReport, KEYBOARD_REPORT_SIZE};
use crate::logging::{log_trace, log_warn};

/// Transport seen from the keypad loop.
pub trait HostLink {
    /// Enumeration has completed and the configuration is set.
    fn is_configured(&mut self) -> bool;

    /// Hand one IN report to the transport.
    fn load(&mut self, report: &[u8; KEYBOARD_REPORT_SIZE]);

    /// The last loaded report has been taken by the transport.
    fn is_acknowledged(&mut self) -> bool;

    /// Latest OUT report byte (lock LED bitmask).
    fn lock_bits(&mut self) -> u8;
}

/// Load and staging sequence numbers shared between the keypad loop and
/// an async IN writer.
///
/// Each load takes a fresh number; the writer reports the number of every
/// report it stages into the endpoint. The link is caught up only when the
/// newest load has been staged, so staging a replaced report never
/// acknowledges the one that replaced it. Staging is one report ahead of
/// the host: the writer's next write waits for the host's ACK.
pub struct Sequencer {
    loaded: AtomicU32,
    staged: AtomicU32,
}

impl Sequencer {
    pub const fn new() -> Self {
        Self {
            loaded: AtomicU32::new(0),
            staged: AtomicU32::new(0),
        }
    }

    /// Number for the report about to be loaded.
    pub fn next_load(&self) -> u32 {
        self.loaded.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }

    /// The writer has handed report `seq` to the endpoint.
    pub fn staged(&self, seq: u32) {
        self.staged.store(seq, Ordering::Release);
    }

    pub fn is_caught_up(&self) -> bool {
        self.staged.load(Ordering::Acquire) == self.loaded.load(Ordering::Acquire)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait policy for acknowledgments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handshake {
    /// Polls before giving up. `None` waits forever.
    pub spin_limit: Option<u32>,
}

impl Handshake {
    /// Wait forever.
    pub const BLOCKING: Handshake = Handshake { spin_limit: None };

    /// Give up after `polls` unsuccessful polls.
    pub const fn bounded(polls: u32) -> Self {
        Self {
            spin_limit: Some(polls),
        }
    }

    /// Block until the host has configured the device. Never times out.
    pub fn wait_configured(&self, link: &mut impl HostLink) {
        while !link.is_configured() {
            core::hint::spin_loop();
        }
    }

    /// Block until the last loaded report is acknowledged.
    pub fn wait_ack(&self, link: &mut impl HostLink) -> Result<(), Error> {
        match self.spin_limit {
            None => {
                while !link.is_acknowledged() {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            Some(limit) => {
                let mut polls = 0u32;
                while !link.is_acknowledged() {
                    polls += 1;
                    if polls >= limit {
                        log_warn!("host did not acknowledge after {} polls", polls);
                        return Err(Error::AckTimeout);
                    }
                    core::hint::spin_loop();
                }
                Ok(())
            }
        }
    }

    /// Load `report` and wait for its acknowledgment.
    pub fn exchange(&self, link: &mut impl HostLink, report: &KeyboardReport) -> Result<(), Error> {
        log_trace!("IN report {}", report);
        link.load(&report.to_bytes());
        self.wait_ack(link)
    }

    /// Synthetic key-down then key-up.
    ///
    /// Sends `report`, waits, clears it to idle, sends it again, waits.
    /// The report is left idle even when a wait times out.
    pub fn pulse(&self, link: &mut impl HostLink, report: &mut KeyboardReport) -> Result<(), Error> {
        let down = self.exchange(link, report);
        report.release();
        down?;
        self.exchange(link, report)
    }
}
