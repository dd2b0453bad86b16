//! `trace!` and `debug!` for the copier.
//!
//! With the `tracing` feature (and in this crate's unit tests) these are
//! `tracing`'s own macros. Otherwise they expand to nothing, and their
//! arguments are never evaluated.

#[cfg(any(test, feature = "tracing"))]
pub(crate) use tracing::{debug, trace};

#[cfg(not(any(test, feature = "tracing")))]
mod disabled {
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {debug, trace};
}

#[cfg(not(any(test, feature = "tracing")))]
pub(crate) use disabled::{debug, trace};
