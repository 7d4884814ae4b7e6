#![doc = include_str!("../README.md")]

/// Emits a `trace`-level event when the `tracing` feature is enabled, and nothing otherwise.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    };
}

pub mod equate;
pub use equate::EquatableError;

mod entry;
pub use entry::*;

mod list;
pub use list::*;

mod collector;
pub use collector::*;
