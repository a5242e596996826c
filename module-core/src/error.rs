//! Argument validation errors.
//!
//! These are raised before any bus traffic and indicate a caller bug.
//! Transaction failures are never errors: they surface as `false` / `None`.

use module_proto::FrameError;

/// Error type for rejected arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueError {
    /// Number outside what four digits can show (-999..=9999 after scaling).
    ValueOutOfRange,
    /// Single digit outside 0-9.
    DigitOutOfRange,
    /// Decimal places outside 0-3.
    DecimalPlacesOutOfRange,
    /// Brightness outside 0.0-1.0.
    BrightnessOutOfRange,
    /// Hour, minute or second outside a clock's range.
    TimeOutOfRange,
    /// Display line that does not exist.
    LineOutOfRange,
    /// Custom character row with bits above the 5-pixel width.
    PatternOutOfRange,
    /// Value cannot be framed for its endpoint.
    Frame(FrameError),
}

impl core::fmt::Display for ValueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValueOutOfRange => write!(f, "value out of range"),
            Self::DigitOutOfRange => write!(f, "digit out of range"),
            Self::DecimalPlacesOutOfRange => write!(f, "decimal places out of range"),
            Self::BrightnessOutOfRange => write!(f, "brightness out of range"),
            Self::TimeOutOfRange => write!(f, "time out of range"),
            Self::LineOutOfRange => write!(f, "line out of range"),
            Self::PatternOutOfRange => write!(f, "pattern out of range"),
            Self::Frame(e) => write!(f, "{}", e),
        }
    }
}

impl From<FrameError> for ValueError {
    fn from(err: FrameError) -> Self {
        ValueError::Frame(err)
    }
}
