//! BQR encoding: the QR transport wrapper around an HHDuc
//!
//! Frame format:
//! - MAGIC (2 bytes): "DK", never masked
//! - AMS (1 byte): 'N'
//! - HHDUC (up to 256 bytes)
//! - CRC (2 bytes): CRC-16/ARC over MAGIC, AMS and HHDUC, big-endian
//!
//! After the CRC is written, every byte from offset 2 on is XORed with the
//! repeating pattern "DK". The mask is its own inverse.

use core::ops::Deref;

use heapless::Vec;

use crate::checksum::crc16_arc;
use crate::error::{BqrError, EncodeError};
use crate::hhduc::MAX_HHDUC_SIZE;

/// Magic bytes at the start of every BQR payload
pub const BQR_MAGIC: [u8; 2] = *b"DK";

/// AMS flag (no AMS)
pub const AMS_FLAG: u8 = b'N';

/// MAGIC + AMS + CRC
pub const BQR_OVERHEAD: usize = 5;

/// Maximum complete BQR size
pub const MAX_BQR_SIZE: usize = MAX_HHDUC_SIZE + BQR_OVERHEAD;

/// Offset of the first masked byte
const MASK_START: usize = 2;

/// Offset of the embedded HHDuc
const HHDUC_OFFSET: usize = 3;

/// An encoded (masked) BQR payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BqrPayload {
    bytes: Vec<u8, MAX_BQR_SIZE>,
}

impl BqrPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Deref for BqrPayload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for BqrPayload {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BqrPayload {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BQR({=[u8]:x})", self.as_bytes());
    }
}

/// XOR every byte from offset 2 on with "DK"
///
/// Even distances from offset 2 take 'D', odd distances take 'K'.
/// Applying the mask twice restores the input.
pub fn apply_mask(buf: &mut [u8]) {
    if buf.len() <= MASK_START {
        return;
    }
    for (i, byte) in buf[MASK_START..].iter_mut().enumerate() {
        *byte ^= BQR_MAGIC[i % 2];
    }
}

/// Wrap an HHDuc payload into a masked BQR payload
pub fn encode_bqr(hhduc: &[u8]) -> Result<BqrPayload, EncodeError> {
    if hhduc.len() > MAX_HHDUC_SIZE {
        return Err(EncodeError::HhducTooLarge { len: hhduc.len() });
    }

    let mut bytes: Vec<u8, MAX_BQR_SIZE> = Vec::new();
    // Capacity is guaranteed by the length check above
    let _ = bytes.extend_from_slice(&BQR_MAGIC);
    let _ = bytes.push(AMS_FLAG);
    let _ = bytes.extend_from_slice(hhduc);

    let crc = crc16_arc(&bytes);
    let _ = bytes.extend_from_slice(&crc.to_be_bytes());

    apply_mask(&mut bytes);

    Ok(BqrPayload { bytes })
}

/// Verify a masked BQR payload and extract the embedded HHDuc
pub fn decode_bqr(bqr: &[u8]) -> Result<Vec<u8, MAX_HHDUC_SIZE>, BqrError> {
    if bqr.len() < BQR_OVERHEAD || bqr.len() > MAX_BQR_SIZE {
        return Err(BqrError::BadLength { len: bqr.len() });
    }
    if bqr[..2] != BQR_MAGIC {
        return Err(BqrError::BadMagic);
    }

    let mut plain: Vec<u8, MAX_BQR_SIZE> = Vec::new();
    let _ = plain.extend_from_slice(bqr);
    apply_mask(&mut plain);

    if plain[MASK_START] != AMS_FLAG {
        return Err(BqrError::BadAmsFlag);
    }

    let crc_offset = plain.len() - 2;
    let actual = u16::from_be_bytes([plain[crc_offset], plain[crc_offset + 1]]);
    let expected = crc16_arc(&plain[..crc_offset]);
    if actual != expected {
        return Err(BqrError::ChecksumMismatch { expected, actual });
    }

    let mut hhduc = Vec::new();
    let _ = hhduc.extend_from_slice(&plain[HHDUC_OFFSET..crc_offset]);
    Ok(hhduc)
}
