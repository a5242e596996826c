//! 16x2 character LCD driver with RGB backlight.

use crate::channel::{CommandChannel, RetryPolicy};
use crate::error::ValueError;
use crate::module::{Module, ModuleId};
use crate::transport::Transport;
use module_proto::character::{
    CharacterPattern, Color, ColorEndpoint, CustomCharacterEndpoint, LineEndpoint, LineText,
    RawCommand, RawPassthroughEndpoint, FRAME_LEN, LINE_COUNT, LINE_WIDTH,
};

/// Highest pixel column mask in a custom character row.
const ROW_MASK: u8 = 0x1F;

/// Cell shown for characters the display cannot render.
const REPLACEMENT: u8 = b'?';

/// One of the eight user-definable characters.
///
/// Put [`CustomCharacter::as_char`] into a line to show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CustomCharacter {
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7,
    C8,
}

impl CustomCharacter {
    pub const ALL: [Self; 8] = [
        Self::C1,
        Self::C2,
        Self::C3,
        Self::C4,
        Self::C5,
        Self::C6,
        Self::C7,
        Self::C8,
    ];

    /// Pattern slot on the module, 0-7.
    #[must_use]
    pub const fn slot(self) -> u8 {
        self as u8
    }

    /// Character code that displays this slot, 8-15.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8 + 8
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.code() as char
    }
}

/// Pad or cut `text` to one line of cells.
///
/// ASCII passes through (custom character codes included); anything else
/// becomes `?`.
#[must_use]
pub fn line_cells(text: &str) -> LineText {
    let mut cells = [b' '; LINE_WIDTH];
    for (cell, c) in cells.iter_mut().zip(text.chars()) {
        *cell = if c.is_ascii() { c as u8 } else { REPLACEMENT };
    }
    LineText::from_cells(cells)
}

fn line_endpoint(line: u8) -> Result<LineEndpoint, ValueError> {
    if (1..=LINE_COUNT).contains(&line) {
        Ok(LineEndpoint { index: line - 1 })
    } else {
        Err(ValueError::LineOutOfRange)
    }
}

/// Character LCD module.
pub struct CharacterLcd<T> {
    channel: CommandChannel<T, FRAME_LEN>,
}

impl<T: Transport> CharacterLcd<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            channel: CommandChannel::new(transport),
        }
    }

    #[must_use]
    pub fn with_policy(transport: T, policy: RetryPolicy) -> Self {
        Self {
            channel: CommandChannel::with_policy(transport, policy),
        }
    }

    /// Set the backlight color.
    pub async fn set_color(&mut self, color: Color) -> Result<bool, ValueError> {
        Ok(self.channel.set(&ColorEndpoint, &color).await?)
    }

    pub async fn color(&mut self) -> Option<Color> {
        self.channel.get(&ColorEndpoint).await
    }

    /// Show `text` on `line` (1 or 2), padded with spaces or cut to 16 cells.
    ///
    /// # Errors
    ///
    /// [`ValueError::LineOutOfRange`] for any other line number.
    pub async fn set_line(&mut self, line: u8, text: &str) -> Result<bool, ValueError> {
        let endpoint = line_endpoint(line)?;
        Ok(self.channel.set(&endpoint, &line_cells(text)).await?)
    }

    /// What `line` (1 or 2) currently shows. `Ok(None)` if the module did not
    /// answer.
    ///
    /// # Errors
    ///
    /// [`ValueError::LineOutOfRange`] for any other line number.
    pub async fn line(&mut self, line: u8) -> Result<Option<LineText>, ValueError> {
        let endpoint = line_endpoint(line)?;
        Ok(self.channel.get(&endpoint).await)
    }

    /// Blank both lines. Reports success only if both were confirmed.
    pub async fn clear(&mut self) -> Result<bool, ValueError> {
        let first = self.set_line(1, "").await?;
        let second = self.set_line(2, "").await?;
        Ok(first && second)
    }

    /// Define the bitmap of a custom character, one row per byte.
    ///
    /// # Errors
    ///
    /// [`ValueError::PatternOutOfRange`] if a row uses bits above the five
    /// pixel columns.
    pub async fn set_custom_character(
        &mut self,
        character: CustomCharacter,
        pattern: CharacterPattern,
    ) -> Result<bool, ValueError> {
        if pattern.0.iter().any(|row| row & !ROW_MASK != 0) {
            return Err(ValueError::PatternOutOfRange);
        }
        let endpoint = CustomCharacterEndpoint {
            slot: character.slot(),
        };
        Ok(self.channel.set(&endpoint, &pattern).await?)
    }

    pub async fn custom_character(&mut self, character: CustomCharacter) -> Option<CharacterPattern> {
        let endpoint = CustomCharacterEndpoint {
            slot: character.slot(),
        };
        self.channel.get(&endpoint).await
    }

    /// Forward a raw controller command, up to 15 bytes.
    ///
    /// Each call takes a fresh message id, so a repeated command is still
    /// told apart from the previous one when the module echoes it back.
    ///
    /// # Errors
    ///
    /// [`ValueError::Frame`] if `data` is too long.
    pub async fn send_raw(&mut self, data: &[u8]) -> Result<bool, ValueError> {
        let command = RawCommand::new(self.channel.next_message_id(), data)?;
        trace!("raw command id {}", command.id());
        Ok(self.channel.set(&RawPassthroughEndpoint, &command).await?)
    }

    /// Get a reference to the command channel.
    pub fn channel(&self) -> &CommandChannel<T, FRAME_LEN> {
        &self.channel
    }
}

impl<T: Transport> Module<T> for CharacterLcd<T> {
    const ID: ModuleId = ModuleId::CHARACTER_LCD;

    fn bind(transport: T) -> Self {
        Self::new(transport)
    }

    fn release(self) -> T {
        self.channel.release()
    }
}
