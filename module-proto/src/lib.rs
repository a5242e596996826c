//! Wire format for SPI-attached display modules.
//!
//! This crate provides everything needed to talk the module frame protocol
//! without touching a bus:
//!
//! - **Frames**: fixed-length byte frames with a CRC-8 trailer
//!   - [`Frame`] - build, seal and inspect a frame
//!   - [`decode()`] - split received bytes into command byte and payload
//!   - [`checksum()`] - CRC-8/SMBUS over a byte slice
//!   - [`verify_trailer()`] - check a received frame's last byte
//!
//! - **Endpoints**: typed module properties and their payload shapes
//!   - [`Endpoint`] - code, optional selector, value encoding
//!   - [`character`] - character LCD endpoints
//!   - [`segment`] - seven-segment display endpoints
//!
//! - **Digits**: [`Digit`] segment bitmasks for the seven-segment display
//!
//! # Frame Format
//!
//! ```text
//! | 0x80 | dir|code | payload (LEN - 3 bytes, zero padded) | crc8 |
//! ```
//!
//! - `0x80` - Sync marker
//! - `dir|code` - bit 7 set for writes, endpoint code in bits 0-6
//! - `crc8` - CRC-8/SMBUS (poly 0x07) over every preceding byte
//!
//! # Example
//!
//! ```
//! use module_proto::segment::{DisplayValueEndpoint, FRAME_LEN};
//! use module_proto::{Digit, Direction, Endpoint, Frame};
//!
//! let value = [Digit::D1, Digit::D2, Digit::D3, Digit::D4];
//! let mut payload = [0u8; 4];
//! DisplayValueEndpoint.encode_value(&value, &mut payload).unwrap();
//!
//! let frame = Frame::<FRAME_LEN>::encode(Direction::Write, 0x01, &payload).unwrap();
//! assert_eq!(frame.as_bytes()[1], 0x81);
//! assert!(frame.is_valid());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod crc;
pub mod digit;
pub mod endpoint;
pub mod frame;

// Re-export types at crate root for convenience
pub use crate::crc::{checksum, verify_trailer};
pub use digit::Digit;
pub use endpoint::{character, segment, Endpoint};
pub use frame::{
    command_byte, decode, Direction, Frame, FrameError, CMD_READ, CMD_WRITE, CODE_MASK,
    FRAME_OVERHEAD, SYNC,
};
