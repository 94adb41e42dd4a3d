//! Errors raised while crafting probes.
use thiserror::Error;

/// The IP header fields cannot be serialized as given.
///
/// Returned per probe; the caller decides whether to skip, retry or abort.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unsupported IP version: expected 4, got {0}")]
    InvalidVersion(u8),
    #[error("unsupported IP header length: expected 5 words, got {0}")]
    InvalidHeaderLength(u8),
    #[error("total length {total_length} is smaller than the {header_length} bytes header")]
    TotalLengthTooSmall {
        total_length: u16,
        header_length: u16,
    },
    #[error("IP flags {0:#05b} do not fit in 3 bits")]
    InvalidFlags(u8),
    #[error("fragment offset {0} does not fit in 13 bits")]
    InvalidFragmentOffset(u16),
    #[error("buffer of {actual} bytes is too small, {expected} bytes required")]
    BufferTooSmall { expected: usize, actual: usize },
}
