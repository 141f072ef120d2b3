use core::convert::Infallible;

use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// The clock logic itself cannot fail; only the GPIO seams and task spawning can.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "pico1")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("Error setting output state")]
    CannotSetOutputState,

    #[display("Error reading input state")]
    CannotReadInput,

    #[display("Index out of bounds")]
    IndexOutOfBounds,
}

// embassy-rp's GPIO reports `Infallible` through embedded-hal.
impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        Self::CannotSetOutputState
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}

/// Rust's `!` is unstable.  This empty enum is a locally-defined equivalent which is stable.
///
/// `Result<Never>` marks loops that only ever return on failure.
#[derive(Debug)]
pub enum Never {}
