//! Frame checksum: CRC-8/SMBUS.
//!
//! Polynomial 0x07, MSB first, zero init, no final XOR. The `crc` crate
//! generates the 256-entry table at compile time from the polynomial (eight
//! shifts with a conditional XOR per leading byte), so nothing is built at
//! runtime.

use crc::{Crc, CRC_8_SMBUS};

const FRAME_CRC: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// Checksum over `data`.
#[inline]
#[must_use]
pub fn checksum(data: &[u8]) -> u8 {
    FRAME_CRC.checksum(data)
}

/// Whether the last byte of `bytes` is the checksum of everything before it.
///
/// An empty slice has no trailer and never verifies.
#[must_use]
pub fn verify_trailer(bytes: &[u8]) -> bool {
    match bytes.split_last() {
        Some((&trailer, body)) => checksum(body) == trailer,
        None => false,
    }
}
