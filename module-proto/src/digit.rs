//! Seven-segment digit bitmasks.

use core::ops::{BitAnd, BitOr, BitOrAssign};

/// Segment bitmask for one seven-segment digit.
///
/// Bits 0-6 are segments a-g, bit 7 is the decimal point. Digits combine
/// with `|`, so a five with its decimal point lit is `Digit::D5 | Digit::DECIMAL`.
///
/// # Example
///
/// ```
/// use module_proto::Digit;
///
/// let d = Digit::D5 | Digit::DECIMAL;
/// assert!(d.has_decimal());
/// assert_eq!(d.without_decimal(), Digit::D5);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(pub u8);

impl Digit {
    /// All segments off.
    pub const BLANK: Self = Self(0x00);
    pub const D0: Self = Self(0x3F);
    pub const D1: Self = Self(0x06);
    pub const D2: Self = Self(0x5B);
    pub const D3: Self = Self(0x4F);
    pub const D4: Self = Self(0x66);
    pub const D5: Self = Self(0x6D);
    pub const D6: Self = Self(0x7D);
    pub const D7: Self = Self(0x07);
    pub const D8: Self = Self(0x7F);
    pub const D9: Self = Self(0x6F);
    pub const A: Self = Self(0x77);
    pub const B: Self = Self(0x7C);
    pub const C: Self = Self(0x39);
    pub const D: Self = Self(0x5E);
    pub const E: Self = Self(0x79);
    pub const F: Self = Self(0x71);
    /// Decimal point (`.`).
    pub const DECIMAL: Self = Self(0x80);
    /// Dash (`-`), segment g only.
    pub const DASH: Self = Self(0x40);
    /// Underscore (`_`), segment d only.
    pub const UNDERSCORE: Self = Self(0x08);

    const HEX: [Self; 16] = [
        Self::D0,
        Self::D1,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::D8,
        Self::D9,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
    ];

    /// Digit for a hex value 0-15.
    #[inline]
    #[must_use]
    pub const fn from_hex(value: u8) -> Option<Self> {
        if value < 16 {
            Some(Self::HEX[value as usize])
        } else {
            None
        }
    }

    /// Digit for a printable character.
    ///
    /// Maps `0-9`, `A-F` (either case), `-`, `_` and `.`; anything else is `None`.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Self::from_hex(c as u8 - b'0'),
            'A'..='F' => Self::from_hex(c as u8 - b'A' + 10),
            'a'..='f' => Self::from_hex(c as u8 - b'a' + 10),
            '-' => Some(Self::DASH),
            '_' => Some(Self::UNDERSCORE),
            '.' => Some(Self::DECIMAL),
            _ => None,
        }
    }

    /// Whether the decimal point bit is set.
    #[inline]
    #[must_use]
    pub const fn has_decimal(self) -> bool {
        self.0 & Self::DECIMAL.0 != 0
    }

    /// This digit with the decimal point lit.
    #[inline]
    #[must_use]
    pub const fn with_decimal(self) -> Self {
        Self(self.0 | Self::DECIMAL.0)
    }

    /// This digit with the decimal point cleared.
    #[inline]
    #[must_use]
    pub const fn without_decimal(self) -> Self {
        Self(self.0 & !Self::DECIMAL.0)
    }

    /// Get the raw segment byte.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl BitOr for Digit {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Digit {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Digit {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}
