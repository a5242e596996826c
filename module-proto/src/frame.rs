//! Fixed-length module frames.
//!
//! Every exchange with a module moves exactly one frame in each direction:
//!
//! ```text
//! | 0x80 | dir|code | payload ... (LEN - 3 bytes) | crc8 |
//! ```
//!
//! - byte 0: sync marker, always [`SYNC`]
//! - byte 1: command byte, bit 7 = direction (1 = write), bits 0-6 = endpoint code
//! - bytes 2..LEN-1: payload, zero padded
//! - byte LEN-1: CRC-8 over bytes 0..LEN-1
//!
//! Responses use the same layout, so the command byte of a reply is always at
//! offset 1 and its payload starts at offset 2.

use crate::crc::{checksum, verify_trailer};

/// Sync marker at offset 0 of every frame.
pub const SYNC: u8 = 0x80;

/// Direction bit for write commands.
pub const CMD_WRITE: u8 = 1 << 7;

/// Direction bit for read commands.
pub const CMD_READ: u8 = 0 << 7;

/// Mask of the endpoint code inside the command byte.
pub const CODE_MASK: u8 = 0x7F;

/// Bytes taken by the sync marker, command byte and checksum.
pub const FRAME_OVERHEAD: usize = 3;

const COMMAND_OFFSET: usize = 1;
const PAYLOAD_OFFSET: usize = 2;

/// Direction of a command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Ask the module to report an endpoint value.
    Read,
    /// Set an endpoint value on the module.
    Write,
}

impl Direction {
    /// The direction bit as it appears in the command byte.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Read => CMD_READ,
            Self::Write => CMD_WRITE,
        }
    }
}

/// Combine a direction and a 7-bit endpoint code into a command byte.
#[inline]
#[must_use]
pub const fn command_byte(direction: Direction, code: u8) -> u8 {
    direction.bit() | (code & CODE_MASK)
}

/// Error type for frame construction and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload does not fit the frame's payload capacity.
    PayloadTooLong,
    /// Endpoint code does not fit in 7 bits.
    InvalidCode,
    /// Byte sequence is shorter than the frame overhead.
    TooShort,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PayloadTooLong => write!(f, "payload too long"),
            Self::InvalidCode => write!(f, "invalid endpoint code"),
            Self::TooShort => write!(f, "frame too short"),
        }
    }
}

/// A fixed-length frame of `LEN` bytes.
///
/// # Example
///
/// ```
/// use module_proto::{decode, Direction, Frame};
///
/// let frame = Frame::<18>::encode(Direction::Write, 0x03, &[1]).unwrap();
/// let (command, payload) = decode(frame.as_bytes()).unwrap();
/// assert_eq!(command, 0x83);
/// assert_eq!(payload[0], 1);
/// assert!(frame.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<const LEN: usize> {
    bytes: [u8; LEN],
}

impl<const LEN: usize> Frame<LEN> {
    /// Number of payload bytes a frame of this length carries.
    pub const PAYLOAD_CAPACITY: usize = LEN - FRAME_OVERHEAD;

    /// An all-zero frame (not sealed, no sync marker).
    #[must_use]
    pub const fn zeroed() -> Self {
        Self { bytes: [0; LEN] }
    }

    /// Build a sealed frame for `code` carrying `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::PayloadTooLong`] if the payload exceeds
    /// [`Self::PAYLOAD_CAPACITY`] and [`FrameError::InvalidCode`] if the
    /// code has bit 7 set.
    pub fn encode(direction: Direction, code: u8, payload: &[u8]) -> Result<Self, FrameError> {
        if code & !CODE_MASK != 0 {
            return Err(FrameError::InvalidCode);
        }
        if payload.len() > Self::PAYLOAD_CAPACITY {
            return Err(FrameError::PayloadTooLong);
        }

        let mut frame = Self::zeroed();
        frame.start(direction, code);
        frame.payload_mut()[..payload.len()].copy_from_slice(payload);
        frame.seal();
        Ok(frame)
    }

    /// Bare poll frame: sync marker and checksum, no command.
    ///
    /// Clocking this out retrieves the response a module has queued.
    #[must_use]
    pub fn poll() -> Self {
        let mut frame = Self::zeroed();
        frame.bytes[0] = SYNC;
        frame.seal();
        frame
    }

    /// Wrap received bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; LEN]) -> Self {
        Self { bytes }
    }

    /// Clear the frame and write the sync marker and command byte.
    ///
    /// The payload is left zeroed; call [`Self::seal`] after filling it.
    pub fn start(&mut self, direction: Direction, code: u8) {
        self.bytes = [0; LEN];
        self.bytes[0] = SYNC;
        self.bytes[COMMAND_OFFSET] = command_byte(direction, code);
    }

    /// Recompute the trailing checksum.
    #[inline]
    pub fn seal(&mut self) {
        self.bytes[LEN - 1] = checksum(&self.bytes[..LEN - 1]);
    }

    /// The command byte.
    #[inline]
    #[must_use]
    pub fn command(&self) -> u8 {
        self.bytes[COMMAND_OFFSET]
    }

    /// Payload bytes.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[PAYLOAD_OFFSET..LEN - 1]
    }

    /// Mutable payload bytes. Invalidates the checksum until [`Self::seal`].
    #[inline]
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[PAYLOAD_OFFSET..LEN - 1]
    }

    /// The trailing checksum byte.
    #[inline]
    #[must_use]
    pub fn checksum(&self) -> u8 {
        self.bytes[LEN - 1]
    }

    /// Sync marker present and checksum matches the content.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.bytes[0] == SYNC && verify_trailer(&self.bytes)
    }

    /// Raw frame bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; LEN] {
        &self.bytes
    }
}

impl<const LEN: usize> Default for Frame<LEN> {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Split a received frame into its command byte and payload.
///
/// Only the length is checked. Judging whether the content makes sense is
/// left to the caller.
///
/// # Errors
///
/// Returns [`FrameError::TooShort`] for fewer than [`FRAME_OVERHEAD`] bytes.
pub fn decode(bytes: &[u8]) -> Result<(u8, &[u8]), FrameError> {
    if bytes.len() < FRAME_OVERHEAD {
        return Err(FrameError::TooShort);
    }
    Ok((bytes[COMMAND_OFFSET], &bytes[PAYLOAD_OFFSET..bytes.len() - 1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let frame = Frame::<20>::encode(Direction::Write, 0x01, &[10, 20, 30]).unwrap();
        let bytes = frame.as_bytes();

        assert_eq!(bytes[0], SYNC);
        assert_eq!(bytes[1], 0x81);
        assert_eq!(&bytes[2..5], &[10, 20, 30]);
        assert!(bytes[5..19].iter().all(|&b| b == 0));
        assert_eq!(bytes[19], checksum(&bytes[..19]));
    }

    #[test]
    fn test_read_command_byte() {
        let frame = Frame::<18>::encode(Direction::Read, 0x04, &[]).unwrap();
        assert_eq!(frame.command(), 0x04);
        assert_eq!(command_byte(Direction::Read, 0x04), 0x04);
        assert_eq!(command_byte(Direction::Write, 0x04), 0x84);
    }

    #[test]
    fn test_payload_capacity() {
        assert_eq!(Frame::<18>::PAYLOAD_CAPACITY, 15);
        assert_eq!(Frame::<20>::PAYLOAD_CAPACITY, 17);
        assert_eq!(Frame::<24>::PAYLOAD_CAPACITY, 21);
    }

    #[test]
    fn test_decode_returns_payload() {
        let full = [0xAA; 15];
        let frame = Frame::<18>::encode(Direction::Write, 0x02, &full).unwrap();
        let (command, payload) = decode(frame.as_bytes()).unwrap();
        assert_eq!(command, 0x82);
        assert_eq!(payload, &full);

        let frame = Frame::<18>::encode(Direction::Write, 0x02, &[7, 8]).unwrap();
        let (_, payload) = decode(frame.as_bytes()).unwrap();
        assert_eq!(&payload[..2], &[7, 8]);
    }

    #[test]
    fn test_encode_rejects_oversized_payload() {
        let too_long = [0u8; 16];
        assert_eq!(
            Frame::<18>::encode(Direction::Write, 0x01, &too_long),
            Err(FrameError::PayloadTooLong)
        );
    }

    #[test]
    fn test_encode_rejects_wide_code() {
        assert_eq!(
            Frame::<18>::encode(Direction::Write, 0x80, &[]),
            Err(FrameError::InvalidCode)
        );
    }

    #[test]
    fn test_decode_too_short() {
        assert_eq!(decode(&[0x80, 0x01]), Err(FrameError::TooShort));
    }

    #[test]
    fn test_poll_frame() {
        let frame = Frame::<18>::poll();
        assert_eq!(frame.as_bytes()[0], SYNC);
        assert_eq!(frame.command(), 0);
        assert!(frame.payload().iter().all(|&b| b == 0));
        assert!(frame.is_valid());
    }

    #[test]
    fn test_corruption_detected() {
        let frame = Frame::<18>::encode(Direction::Write, 0x01, &[0x3F]).unwrap();
        let mut bytes = *frame.as_bytes();
        bytes[2] ^= 0x01;
        assert!(!Frame::from_bytes(bytes).is_valid());

        let mut bytes = *frame.as_bytes();
        bytes[0] = 0x00;
        assert!(!Frame::from_bytes(bytes).is_valid());
    }

    #[test]
    fn test_reseal_after_payload_edit() {
        let mut frame = Frame::<18>::zeroed();
        frame.start(Direction::Write, 0x03);
        frame.payload_mut()[0] = 1;
        frame.seal();
        assert!(frame.is_valid());
    }
}
