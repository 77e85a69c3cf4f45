//! Checksum primitives shared by the HHDuc and BQR encoders.
//!
//! None of these provide any security. They only let the optical decoder
//! detect transmission errors.

/// CRC-16/ARC polynomial (0x8005 reflected)
const CRC16_ARC_POLY: u16 = 0xA001;

/// Sum of the decimal digits of `n` ("Quersumme")
pub const fn digit_sum(mut n: u32) -> u8 {
    let mut sum = 0u8;
    while n != 0 {
        sum += (n % 10) as u8;
        n /= 10;
    }
    sum
}

/// XOR of every high and low nibble in `bytes`
///
/// The result always fits in 4 bits.
pub fn nibble_xor(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |acc, &byte| acc ^ (byte >> 4) ^ (byte & 0x0F))
}

/// CRC-16/ARC: reflected, init 0x0000, no final XOR
pub fn crc16_arc(bytes: &[u8]) -> u16 {
    let mut crc = 0u16;
    for &byte in bytes {
        crc ^= u16::from(byte);
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CRC16_ARC_POLY
            } else {
                crc >> 1
            };
        }
    }
    crc
}
