//! Driver error type

use regiface::errors::Error as RegifaceError;

/// Errors returned by [`Radio`](crate::Radio) operations.
///
/// Lifecycle conditions (missing control lines, wrong firmware, not yet
/// initialized) are never reported here. They are exposed through
/// [`RadioState`](crate::RadioState) and cause operations to return a neutral
/// value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// SPI communication with the chip failed
    Bus,
    /// A register value could not be decoded
    Deserialization,
    /// Driving the boot or reset line failed
    Pin,
    /// The chip did not raise TX_DONE within the configured polling budget
    TxTimeout,
}

impl From<RegifaceError> for Error {
    fn from(err: RegifaceError) -> Self {
        match err {
            RegifaceError::DeserializationError => Error::Deserialization,
            _ => Error::Bus,
        }
    }
}
