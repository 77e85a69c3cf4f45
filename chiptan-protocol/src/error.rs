//! Error types for payload encoding and verification

use core::fmt;

/// Broad error category
///
/// Both kinds are caller contract violations and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// An input field is empty or longer than its length prefix allows
    Validation,
    /// The encoded payload would not fit its 1-byte length prefix
    Capacity,
}

/// Errors raised while encoding HHDuc or BQR payloads
///
/// All of these are detected before any output byte is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The start code is mandatory
    EmptyStartcode,
    /// Start code longer than 63 bytes
    StartcodeTooLong { len: usize },
    /// Data element longer than 127 bytes (`index` is 1-based: DE1..DE3)
    DataElementTooLong { index: u8, len: usize },
    /// HHDuc would be larger than 256 bytes (LC cannot hold `size - 1`)
    PayloadTooLarge { size: usize },
    /// HHDuc handed to the BQR encoder is larger than 256 bytes
    HhducTooLarge { len: usize },
}

impl EncodeError {
    /// Map this error onto its category
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::EmptyStartcode
            | EncodeError::StartcodeTooLong { .. }
            | EncodeError::DataElementTooLong { .. } => ErrorKind::Validation,
            EncodeError::PayloadTooLarge { .. } | EncodeError::HhducTooLarge { .. } => {
                ErrorKind::Capacity
            }
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::EmptyStartcode => write!(f, "the start code must not be empty"),
            EncodeError::StartcodeTooLong { len } => {
                write!(f, "start code is {len} bytes, at most 63 are allowed")
            }
            EncodeError::DataElementTooLong { index, len } => {
                write!(f, "DE{index} is {len} bytes, at most 127 are allowed")
            }
            EncodeError::PayloadTooLarge { size } => {
                write!(f, "HHDuc would be {size} bytes, at most 256 are allowed")
            }
            EncodeError::HhducTooLarge { len } => {
                write!(f, "cannot wrap a {len} byte HHDuc, at most 256 are allowed")
            }
        }
    }
}

impl core::error::Error for EncodeError {}

/// Errors raised while verifying a received BQR payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BqrError {
    /// Shorter than header plus trailer, or longer than any valid BQR
    BadLength { len: usize },
    /// First two bytes are not "DK"
    BadMagic,
    /// Unmasked AMS flag is not 'N'
    BadAmsFlag,
    /// CRC-16 trailer does not match the unmasked content
    ChecksumMismatch { expected: u16, actual: u16 },
}

impl fmt::Display for BqrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BqrError::BadLength { len } => {
                write!(f, "BQR payload is {len} bytes, expected 5 to 261")
            }
            BqrError::BadMagic => write!(f, "BQR payload does not start with \"DK\""),
            BqrError::BadAmsFlag => write!(f, "BQR payload has an unsupported AMS flag"),
            BqrError::ChecksumMismatch { expected, actual } => write!(
                f,
                "BQR checksum mismatch: expected {expected:#06x}, found {actual:#06x}"
            ),
        }
    }
}

impl core::error::Error for BqrError {}
