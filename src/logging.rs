//! Logging shims.
//!
//! The core logs through these macros so the same code builds on the host
//! (where no defmt global logger exists) and on target. With the `defmt`
//! feature they forward to `defmt`; without it they expand to nothing.
//!
//! Bare `warn` would be ambiguous with the built-in lint attribute, hence
//! the `log_` prefix.

macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    }};
}

#[allow(unused_imports)]
pub(crate) use {log_debug, log_info, log_trace, log_warn};
