//! Module endpoints and their payload shapes.
//!
//! An endpoint is one property of a module, addressed by a 7-bit code that
//! is only unique within a module type. Endpoints that exist more than once
//! on a module (display lines, custom character slots) also carry a selector
//! byte, sent as the first payload byte of every write, read and response.
//!
//! # Character module (frame length 20)
//!
//! | Endpoint | Code | Selector | Value payload |
//! |----------|------|----------|---------------|
//! | Color | 0x01 | - | `r g b` |
//! | Raw passthrough | 0x02 | - | `id len data[len]` |
//! | Line | 0x03 | line 0-1 | 16 character cells |
//! | Custom character | 0x04 | slot 0-7 | 8 row bitmaps |
//!
//! # Seven-segment module (frame length 18)
//!
//! | Endpoint | Code | Value payload |
//! |----------|------|---------------|
//! | Display value | 0x01 | 4 segment bitmasks |
//! | Brightness | 0x02 | u16 LE, 0-1023 |
//! | Colon | 0x03 | 0 / 1 |
//! | Apostrophe | 0x04 | 0 / 1 |

use crate::digit::Digit;
use crate::frame::FrameError;

/// A typed module property.
pub trait Endpoint {
    /// Typed value carried in the payload; compared after a write to verify it.
    type Value: PartialEq;

    /// 7-bit endpoint code.
    fn code(&self) -> u8;

    /// Sub-identifier for endpoints that exist more than once on a module.
    fn selector(&self) -> Option<u8> {
        None
    }

    /// Write `value` into `payload` (selector excluded), returning bytes used.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::PayloadTooLong`] if the value does not fit.
    fn encode_value(&self, value: &Self::Value, payload: &mut [u8]) -> Result<usize, FrameError>;

    /// Read a value from a response payload (selector excluded).
    ///
    /// Returns `None` if the payload does not hold a well-formed value.
    fn decode_value(&self, payload: &[u8]) -> Option<Self::Value>;
}

#[inline]
fn put(payload: &mut [u8], bytes: &[u8]) -> Result<usize, FrameError> {
    payload
        .get_mut(..bytes.len())
        .ok_or(FrameError::PayloadTooLong)?
        .copy_from_slice(bytes);
    Ok(bytes.len())
}

#[inline]
fn decode_flag(payload: &[u8]) -> Option<bool> {
    match payload.first()? {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

/// Endpoints of the character LCD module.
pub mod character {
    use super::{put, Endpoint, FrameError};

    /// Frame length used by the character module.
    pub const FRAME_LEN: usize = 20;

    pub const CODE_COLOR: u8 = 0x01;
    pub const CODE_RAW_PASSTHROUGH: u8 = 0x02;
    pub const CODE_LINE: u8 = 0x03;
    pub const CODE_CUSTOM_CHARACTER: u8 = 0x04;

    /// Character cells per line.
    pub const LINE_WIDTH: usize = 16;
    /// Number of display lines.
    pub const LINE_COUNT: u8 = 2;
    /// Custom character slots.
    pub const CUSTOM_CHARACTER_SLOTS: u8 = 8;
    /// Rows in a custom character bitmap.
    pub const CUSTOM_CHARACTER_ROWS: usize = 8;
    /// Largest raw passthrough body (payload minus id and length bytes).
    pub const RAW_DATA_CAPACITY: usize = FRAME_LEN - crate::frame::FRAME_OVERHEAD - 2;

    /// Backlight color.
    #[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Color {
        pub red: u8,
        pub green: u8,
        pub blue: u8,
    }

    impl Color {
        #[must_use]
        pub const fn new(red: u8, green: u8, blue: u8) -> Self {
            Self { red, green, blue }
        }
    }

    /// Contents of one display line, one byte per character cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct LineText {
        cells: [u8; LINE_WIDTH],
    }

    impl LineText {
        /// A line of spaces.
        pub const BLANK: Self = Self {
            cells: [b' '; LINE_WIDTH],
        };

        #[must_use]
        pub const fn from_cells(cells: [u8; LINE_WIDTH]) -> Self {
            Self { cells }
        }

        #[must_use]
        pub const fn cells(&self) -> &[u8; LINE_WIDTH] {
            &self.cells
        }

        /// The line as text, if every cell is valid UTF-8.
        #[must_use]
        pub fn as_str(&self) -> Option<&str> {
            core::str::from_utf8(&self.cells).ok()
        }
    }

    impl Default for LineText {
        fn default() -> Self {
            Self::BLANK
        }
    }

    /// 5x8 bitmap of a custom character, one byte per row (low 5 bits used).
    #[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct CharacterPattern(pub [u8; CUSTOM_CHARACTER_ROWS]);

    /// A raw command forwarded to the display controller.
    ///
    /// The module echoes the last command it applied, so a write is verified
    /// by reading back the same id and body.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct RawCommand {
        id: u8,
        len: u8,
        data: [u8; RAW_DATA_CAPACITY],
    }

    impl RawCommand {
        /// Build a command with message id `id`.
        ///
        /// # Errors
        ///
        /// Returns [`FrameError::PayloadTooLong`] if `data` exceeds
        /// [`RAW_DATA_CAPACITY`].
        pub fn new(id: u8, data: &[u8]) -> Result<Self, FrameError> {
            if data.len() > RAW_DATA_CAPACITY {
                return Err(FrameError::PayloadTooLong);
            }
            let mut body = [0; RAW_DATA_CAPACITY];
            body[..data.len()].copy_from_slice(data);
            Ok(Self {
                id,
                len: data.len() as u8,
                data: body,
            })
        }

        #[must_use]
        pub const fn id(&self) -> u8 {
            self.id
        }

        #[must_use]
        pub fn data(&self) -> &[u8] {
            &self.data[..self.len as usize]
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ColorEndpoint;

    impl Endpoint for ColorEndpoint {
        type Value = Color;

        fn code(&self) -> u8 {
            CODE_COLOR
        }

        fn encode_value(&self, value: &Color, payload: &mut [u8]) -> Result<usize, FrameError> {
            put(payload, &[value.red, value.green, value.blue])
        }

        fn decode_value(&self, payload: &[u8]) -> Option<Color> {
            match payload {
                [red, green, blue, ..] => Some(Color::new(*red, *green, *blue)),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct RawPassthroughEndpoint;

    impl Endpoint for RawPassthroughEndpoint {
        type Value = RawCommand;

        fn code(&self) -> u8 {
            CODE_RAW_PASSTHROUGH
        }

        fn encode_value(
            &self,
            value: &RawCommand,
            payload: &mut [u8],
        ) -> Result<usize, FrameError> {
            let header = put(payload, &[value.id, value.len])?;
            let body = put(&mut payload[header..], value.data())?;
            Ok(header + body)
        }

        fn decode_value(&self, payload: &[u8]) -> Option<RawCommand> {
            let (&id, rest) = payload.split_first()?;
            let (&len, rest) = rest.split_first()?;
            let data = rest.get(..len as usize)?;
            RawCommand::new(id, data).ok()
        }
    }

    /// One display line; `index` is zero based.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LineEndpoint {
        pub index: u8,
    }

    impl Endpoint for LineEndpoint {
        type Value = LineText;

        fn code(&self) -> u8 {
            CODE_LINE
        }

        fn selector(&self) -> Option<u8> {
            Some(self.index)
        }

        fn encode_value(&self, value: &LineText, payload: &mut [u8]) -> Result<usize, FrameError> {
            put(payload, value.cells())
        }

        fn decode_value(&self, payload: &[u8]) -> Option<LineText> {
            let cells = payload.get(..LINE_WIDTH)?.try_into().ok()?;
            Some(LineText::from_cells(cells))
        }
    }

    /// One custom character slot, 0-7.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CustomCharacterEndpoint {
        pub slot: u8,
    }

    impl Endpoint for CustomCharacterEndpoint {
        type Value = CharacterPattern;

        fn code(&self) -> u8 {
            CODE_CUSTOM_CHARACTER
        }

        fn selector(&self) -> Option<u8> {
            Some(self.slot)
        }

        fn encode_value(
            &self,
            value: &CharacterPattern,
            payload: &mut [u8],
        ) -> Result<usize, FrameError> {
            put(payload, &value.0)
        }

        fn decode_value(&self, payload: &[u8]) -> Option<CharacterPattern> {
            let rows = payload.get(..CUSTOM_CHARACTER_ROWS)?.try_into().ok()?;
            Some(CharacterPattern(rows))
        }
    }
}

/// Endpoints of the four-digit seven-segment module.
pub mod segment {
    use super::{decode_flag, put, Digit, Endpoint, FrameError};

    /// Frame length used by the seven-segment module.
    pub const FRAME_LEN: usize = 18;

    pub const CODE_DISPLAY_VALUE: u8 = 0x01;
    pub const CODE_BRIGHTNESS: u8 = 0x02;
    pub const CODE_COLON: u8 = 0x03;
    pub const CODE_APOSTROPHE: u8 = 0x04;

    /// Number of digits on the display.
    pub const DIGIT_COUNT: usize = 4;
    /// Full-scale brightness level.
    pub const BRIGHTNESS_MAX: u16 = 1023;

    /// The four digits, most significant first.
    pub type DisplayValue = [Digit; DIGIT_COUNT];

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DisplayValueEndpoint;

    impl Endpoint for DisplayValueEndpoint {
        type Value = DisplayValue;

        fn code(&self) -> u8 {
            CODE_DISPLAY_VALUE
        }

        fn encode_value(
            &self,
            value: &DisplayValue,
            payload: &mut [u8],
        ) -> Result<usize, FrameError> {
            put(payload, &value.map(Digit::raw))
        }

        fn decode_value(&self, payload: &[u8]) -> Option<DisplayValue> {
            match payload {
                [d1, d2, d3, d4, ..] => Some([Digit(*d1), Digit(*d2), Digit(*d3), Digit(*d4)]),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct BrightnessEndpoint;

    impl Endpoint for BrightnessEndpoint {
        type Value = u16;

        fn code(&self) -> u8 {
            CODE_BRIGHTNESS
        }

        fn encode_value(&self, value: &u16, payload: &mut [u8]) -> Result<usize, FrameError> {
            put(payload, &value.to_le_bytes())
        }

        fn decode_value(&self, payload: &[u8]) -> Option<u16> {
            let level = u16::from_le_bytes(payload.get(..2)?.try_into().ok()?);
            (level <= BRIGHTNESS_MAX).then_some(level)
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ColonEndpoint;

    impl Endpoint for ColonEndpoint {
        type Value = bool;

        fn code(&self) -> u8 {
            CODE_COLON
        }

        fn encode_value(&self, value: &bool, payload: &mut [u8]) -> Result<usize, FrameError> {
            put(payload, &[u8::from(*value)])
        }

        fn decode_value(&self, payload: &[u8]) -> Option<bool> {
            decode_flag(payload)
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ApostropheEndpoint;

    impl Endpoint for ApostropheEndpoint {
        type Value = bool;

        fn code(&self) -> u8 {
            CODE_APOSTROPHE
        }

        fn encode_value(&self, value: &bool, payload: &mut [u8]) -> Result<usize, FrameError> {
            put(payload, &[u8::from(*value)])
        }

        fn decode_value(&self, payload: &[u8]) -> Option<bool> {
            decode_flag(payload)
        }
    }
}
