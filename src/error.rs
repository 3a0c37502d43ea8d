use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that
    // `embassy_executor::SpawnError` does not implement Rust's
    // `core::error::Error` trait.
    #[cfg(any(feature = "pico1", feature = "pico2"))]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("No echo pulse within the ranging window")]
    EchoTimeout,

    #[cfg(any(feature = "pico1", feature = "pico2"))]
    #[display("UART read failed: {_0:?}")]
    Uart(#[error(not(source))] embassy_rp::uart::Error),

    #[cfg(any(feature = "pico1", feature = "pico2"))]
    #[display("ADC conversion failed: {_0:?}")]
    Adc(#[error(not(source))] embassy_rp::adc::Error),
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
impl From<embassy_rp::uart::Error> for Error {
    fn from(err: embassy_rp::uart::Error) -> Self {
        Self::Uart(err)
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
impl From<embassy_rp::adc::Error> for Error {
    fn from(err: embassy_rp::adc::Error) -> Self {
        Self::Adc(err)
    }
}
