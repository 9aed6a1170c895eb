//! Errors surfaced by matrix construction and the report handshake.
//!
//! USB transport faults never reach here: the writer task retries them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Matrix
    /// A position bound to a key has no read-callable.
    MissingReader { row: u8, col: u8 },

    /// A position bound to no key was given a read-callable.
    StrayReader { row: u8, col: u8 },

    // Host link
    /// The host did not acknowledge an IN report within the opt-in
    /// spin limit.
    AckTimeout,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::MissingReader { row, col } => {
                write!(f, "no reader bound for key at ({}, {})", row, col)
            }
            Error::StrayReader { row, col } => {
                write!(f, "reader bound to empty position ({}, {})", row, col)
            }
            Error::AckTimeout => f.write_str("host did not acknowledge IN report"),
        }
    }
}
