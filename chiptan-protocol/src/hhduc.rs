//! HHDuc payload encoding
//!
//! Layout:
//! - LC (1 byte): total length minus one
//! - LS (1 byte): start code length | 0b1100_0000
//! - CONTROL (1 byte): always 0x01
//! - STARTCODE (1-63 bytes): raw ASCII as entered
//! - for each present data element: LDE (length | 0b0100_0000) then its bytes
//! - CHECKSUM (1 byte): Luhn digit in the high nibble, nibble XOR in the low

use core::ops::Deref;

use heapless::Vec;

use crate::checksum::{digit_sum, nibble_xor};
use crate::error::EncodeError;

/// Longest start code the LS prefix can describe
pub const MAX_STARTCODE_LEN: usize = 0b0011_1111;

/// Longest data element a single LDE byte describes
pub const MAX_DATA_ELEMENT_LEN: usize = 0b0111_1111;

/// Largest HHDuc whose `size - 1` still fits the LC byte
pub const MAX_HHDUC_SIZE: usize = u8::MAX as usize + 1;

/// Fixed control byte following LS
pub const CONTROL_BYTE: u8 = 0x01;

const LS_FLAGS: u8 = 0b1100_0000;
const LDE_FLAGS: u8 = 0b0100_0000;

/// LC + LS + CONTROL + CHECKSUM
const FIXED_OVERHEAD: usize = 4;

/// Transaction input for one HHDuc
///
/// An empty data element means "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransactionFields<'a> {
    pub startcode: &'a str,
    pub de1: &'a str,
    pub de2: &'a str,
    pub de3: &'a str,
}

impl<'a> TransactionFields<'a> {
    pub const fn new(startcode: &'a str, de1: &'a str, de2: &'a str, de3: &'a str) -> Self {
        Self {
            startcode,
            de1,
            de2,
            de3,
        }
    }

    /// Data elements in transmission order
    pub fn data_elements(&self) -> [&'a str; 3] {
        [self.de1, self.de2, self.de3]
    }

    fn validate(&self) -> Result<(), EncodeError> {
        if self.startcode.is_empty() {
            return Err(EncodeError::EmptyStartcode);
        }
        if self.startcode.len() > MAX_STARTCODE_LEN {
            return Err(EncodeError::StartcodeTooLong {
                len: self.startcode.len(),
            });
        }
        for (i, de) in self.data_elements().iter().enumerate() {
            if de.len() > MAX_DATA_ELEMENT_LEN {
                return Err(EncodeError::DataElementTooLong {
                    index: i as u8 + 1,
                    len: de.len(),
                });
            }
        }
        Ok(())
    }
}

/// Compute the encoded HHDuc size for `fields`
///
/// Validates every field, so a successful result guarantees that
/// [`encode_hhduc`] succeeds as well.
pub fn hhduc_size(fields: &TransactionFields<'_>) -> Result<usize, EncodeError> {
    fields.validate()?;

    let data_len: usize = fields
        .data_elements()
        .iter()
        .filter(|de| !de.is_empty())
        .map(|de| de.len() + 1)
        .sum();
    let size = FIXED_OVERHEAD + fields.startcode.len() + data_len;

    if size > MAX_HHDUC_SIZE {
        return Err(EncodeError::PayloadTooLarge { size });
    }
    Ok(size)
}

/// An encoded HHDuc payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HhducPayload {
    bytes: Vec<u8, MAX_HHDUC_SIZE>,
}

impl HhducPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The LC byte (`len - 1`)
    pub fn lc(&self) -> u8 {
        self.bytes[0]
    }

    /// The trailing Luhn/XOR checksum byte
    pub fn checksum(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }
}

impl Deref for HhducPayload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for HhducPayload {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HhducPayload {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "HHDuc({=[u8]:x})", self.as_bytes());
    }
}

/// Luhn contribution of one byte: high nibble plus digit sum of twice the low nibble
fn luhn_weight(byte: u8) -> u32 {
    u32::from(byte >> 4) + u32::from(digit_sum(2 * u32::from(byte & 0x0F)))
}

/// Append-only writer that folds the Luhn sum as bytes go in
///
/// Capacity is checked by [`hhduc_size`] before the writer is created.
struct HhducWriter {
    buf: Vec<u8, MAX_HHDUC_SIZE>,
    luhn_sum: u32,
}

impl HhducWriter {
    fn new() -> Self {
        Self {
            buf: Vec::new(),
            luhn_sum: 0,
        }
    }

    /// Length prefix bytes; excluded from the Luhn sum
    fn put_prefix(&mut self, byte: u8) {
        let _ = self.buf.push(byte);
    }

    /// Content bytes; included in the Luhn sum
    fn put_content(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.luhn_sum += luhn_weight(byte);
        }
        let _ = self.buf.extend_from_slice(bytes);
    }

    /// Append the checksum byte and hand out the payload
    fn finish(mut self) -> HhducPayload {
        let luhn_digit = ((10 - self.luhn_sum % 10) % 10) as u8;
        let checksum = (luhn_digit << 4) | nibble_xor(&self.buf);
        let _ = self.buf.push(checksum);
        HhducPayload { bytes: self.buf }
    }
}

/// Encode transaction fields into an HHDuc payload
pub fn encode_hhduc(fields: &TransactionFields<'_>) -> Result<HhducPayload, EncodeError> {
    let size = hhduc_size(fields)?;

    let mut writer = HhducWriter::new();
    writer.put_prefix((size - 1) as u8);
    writer.put_prefix(fields.startcode.len() as u8 | LS_FLAGS);
    writer.put_content(&[CONTROL_BYTE]);
    writer.put_content(fields.startcode.as_bytes());

    for de in fields.data_elements().iter().filter(|de| !de.is_empty()) {
        writer.put_prefix(de.len() as u8 | LDE_FLAGS);
        writer.put_content(de.as_bytes());
    }

    let payload = writer.finish();
    debug_assert_eq!(payload.len(), size);
    Ok(payload)
}
