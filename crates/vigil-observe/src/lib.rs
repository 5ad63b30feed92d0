//! Logging set-up for vigil binaries.
//!
//! Libraries in this workspace only emit `tracing` events; installing a subscriber is left to the binary, via [`logger_init`].

mod logger;
pub use logger::*;
