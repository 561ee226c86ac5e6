//! Decode errors for malformed polyline input.

use thiserror::Error;

/// Failure while decoding an encoded polyline string.
///
/// The encoder never produces input that triggers these; they only arise
/// when decoding truncated or corrupted strings from external sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedPolylineError {
    /// Input ended inside a continuation chain, or between the latitude
    /// and longitude of a coordinate pair.
    #[error("polyline ends unexpectedly at byte {offset}")]
    UnexpectedEof { offset: usize },

    /// A byte outside the printable range 63..=126 the format emits.
    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    /// A continuation chain wider than any coordinate delta can produce.
    #[error("overlong continuation chain at byte {offset}")]
    OverlongChain { offset: usize },
}
