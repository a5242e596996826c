//! Numbers, text, clock times and durations as four seven-segment digits.
//!
//! Everything here is pure: the drivers call these before touching the bus,
//! so a [`ValueError`] always means nothing was sent.
//!
//! Digits are ordered most significant first (`d1..d4`). Leading zeros are
//! blanked from the left, but never the last digit, so zero still shows as a
//! single `0`. Negative values put a dash in `d1`.

use crate::error::ValueError;
use module_proto::segment::{DisplayValue, DIGIT_COUNT};
use module_proto::Digit;

/// Smallest value four digits can show (`-999`).
pub const MIN_VALUE: i32 = -999;
/// Largest value four digits can show.
pub const MAX_VALUE: i32 = 9999;

/// Largest number of decimal places a fixed-point value can use.
pub const MAX_DECIMAL_PLACES: u8 = 3;

const MIN_TEMPERATURE: f32 = -99.0;
const MAX_TEMPERATURE: f32 = 999.0;

const DECIMAL_DIGITS: [Digit; 10] = [
    Digit::D0,
    Digit::D1,
    Digit::D2,
    Digit::D3,
    Digit::D4,
    Digit::D5,
    Digit::D6,
    Digit::D7,
    Digit::D8,
    Digit::D9,
];

/// Segment pattern for a decimal digit.
///
/// # Errors
///
/// Returns [`ValueError::DigitOutOfRange`] if `n` is not 0-9.
pub fn digit(n: u8) -> Result<Digit, ValueError> {
    DECIMAL_DIGITS
        .get(usize::from(n))
        .copied()
        .ok_or(ValueError::DigitOutOfRange)
}

/// The lowest four decimal digits of `n`, zero padded.
#[must_use]
pub fn int_to_digits(mut n: u32) -> DisplayValue {
    let mut digits = [Digit::D0; DIGIT_COUNT];
    for slot in digits.iter_mut().rev() {
        *slot = DECIMAL_DIGITS[(n % 10) as usize];
        n /= 10;
    }
    digits
}

/// Blank `d1`, then `d2`, then `d3` while they are plain zeros.
///
/// Stops at the first digit that is not a bare zero; a zero carrying a
/// decimal point is significant and stays.
pub fn clear_leading_zeros(digits: &mut DisplayValue) {
    for slot in digits.iter_mut().take(DIGIT_COUNT - 1) {
        if *slot != Digit::D0 {
            break;
        }
        *slot = Digit::BLANK;
    }
}

/// Put the minus sign in `d1`, keeping a decimal point already there.
fn apply_sign(digits: &mut DisplayValue) {
    digits[0] = if digits[0].has_decimal() {
        Digit::DASH.with_decimal()
    } else {
        Digit::DASH
    };
}

fn check_range(value: i32) -> Result<(), ValueError> {
    if (MIN_VALUE..=MAX_VALUE).contains(&value) {
        Ok(())
    } else {
        Err(ValueError::ValueOutOfRange)
    }
}

/// An integer in `-999..=9999`.
///
/// # Errors
///
/// Returns [`ValueError::ValueOutOfRange`] outside that range.
pub fn encode_int(value: i32, show_leading_zeros: bool) -> Result<DisplayValue, ValueError> {
    check_range(value)?;

    let mut digits = int_to_digits(value.unsigned_abs());
    if !show_leading_zeros {
        clear_leading_zeros(&mut digits);
    }
    if value < 0 {
        apply_sign(&mut digits);
    }
    Ok(digits)
}

/// A fixed-point value with `decimal_places` digits after the point.
///
/// The value is scaled by `10^decimal_places` and rounded to the nearest
/// integer, which must fit `-999..=9999`. The decimal point lands on digit
/// `4 - decimal_places` (so zero places marks `d4`).
///
/// # Errors
///
/// Returns [`ValueError::DecimalPlacesOutOfRange`] for more than three places
/// and [`ValueError::ValueOutOfRange`] if the scaled value does not fit.
pub fn encode_fixed(
    value: f64,
    decimal_places: u8,
    show_leading_zeros: bool,
) -> Result<DisplayValue, ValueError> {
    if decimal_places > MAX_DECIMAL_PLACES {
        return Err(ValueError::DecimalPlacesOutOfRange);
    }

    let scaled = value * f64::from(10u32.pow(u32::from(decimal_places)));
    if !(f64::from(MIN_VALUE) - 0.5..f64::from(MAX_VALUE) + 0.5).contains(&scaled) {
        return Err(ValueError::ValueOutOfRange);
    }
    let rounded = if scaled < 0.0 {
        (scaled - 0.5) as i32
    } else {
        (scaled + 0.5) as i32
    };
    check_range(rounded)?;

    let mut digits = int_to_digits(rounded.unsigned_abs());
    digits[DIGIT_COUNT - 1 - usize::from(decimal_places)] |= Digit::DECIMAL;
    if !show_leading_zeros {
        clear_leading_zeros(&mut digits);
    }
    if rounded < 0 {
        apply_sign(&mut digits);
    }
    Ok(digits)
}

/// Four single decimal digits, shown as given.
///
/// # Errors
///
/// Returns [`ValueError::DigitOutOfRange`] if any digit is not 0-9.
pub fn encode_digit_values(d1: u8, d2: u8, d3: u8, d4: u8) -> Result<DisplayValue, ValueError> {
    Ok([digit(d1)?, digit(d2)?, digit(d3)?, digit(d4)?])
}

/// Text, one character per digit.
///
/// Understands `0-9`, `A-F` in either case, `-`, `_` and `.`. A `.` lights the
/// decimal point of the previous digit unless that one already has it, in
/// which case it takes a digit of its own. Other characters show as blanks.
/// Input past the fourth digit is ignored, except for a `.` that still fits
/// onto it.
#[must_use]
pub fn encode_str(text: &str) -> DisplayValue {
    let mut digits = [Digit::BLANK; DIGIT_COUNT];
    let mut filled: usize = 0;

    for c in text.chars() {
        if c == '.' {
            match filled.checked_sub(1).map(|prev| &mut digits[prev]) {
                Some(prev) if !prev.has_decimal() => {
                    *prev |= Digit::DECIMAL;
                    continue;
                }
                _ => {}
            }
        }
        if filled == DIGIT_COUNT {
            break;
        }
        digits[filled] = Digit::from_char(c).unwrap_or(Digit::BLANK);
        filled += 1;
    }
    digits
}

/// How a time of day is laid out on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeDisplayMode {
    /// `HH:MM`, leading zero shown.
    HourMinute,
    /// `MM:SS`, leading zero shown.
    MinuteSecond,
    /// 12-hour clock, hour's leading zero blanked, no AM/PM marker.
    Clock12h,
    /// 24-hour clock, leading zero shown.
    Clock24h,
    /// 12-hour clock, apostrophe lit in the morning.
    Clock12hAmApostrophe,
    /// 12-hour clock, apostrophe lit in the afternoon.
    Clock12hPmApostrophe,
    /// 12-hour clock, last decimal point lit in the morning.
    Clock12hAmDecimalPoint,
    /// 12-hour clock, last decimal point lit in the afternoon.
    Clock12hPmDecimalPoint,
}

impl TimeDisplayMode {
    fn is_12h(self) -> bool {
        !matches!(self, Self::HourMinute | Self::MinuteSecond | Self::Clock24h)
    }
}

/// Digits plus the indicator state that goes with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeDisplay {
    pub digits: DisplayValue,
    pub colon: bool,
    pub apostrophe: bool,
}

/// Map a 24-hour `hour` onto a 12-hour dial. Returns `(hour, pm)`.
#[must_use]
pub fn to_12h(hour: u8) -> (u8, bool) {
    match hour {
        0 => (12, false),
        1..=11 => (hour, false),
        12 => (12, true),
        _ => (hour - 12, true),
    }
}

/// A time of day.
///
/// # Errors
///
/// Returns [`ValueError::TimeOutOfRange`] unless `hour < 24`, `minute < 60`
/// and `second < 60`.
pub fn encode_time(
    hour: u8,
    minute: u8,
    second: u8,
    mode: TimeDisplayMode,
) -> Result<TimeDisplay, ValueError> {
    if hour > 23 || minute > 59 || second > 59 {
        return Err(ValueError::TimeOutOfRange);
    }

    let (shown_hour, pm) = if mode.is_12h() { to_12h(hour) } else { (hour, false) };
    let value = match mode {
        TimeDisplayMode::MinuteSecond => u32::from(minute) * 100 + u32::from(second),
        _ => u32::from(shown_hour) * 100 + u32::from(minute),
    };

    let mut digits = int_to_digits(value);
    if mode.is_12h() && digits[0] == Digit::D0 {
        digits[0] = Digit::BLANK;
    }

    let mut apostrophe = false;
    match mode {
        TimeDisplayMode::Clock12hAmApostrophe => apostrophe = !pm,
        TimeDisplayMode::Clock12hPmApostrophe => apostrophe = pm,
        TimeDisplayMode::Clock12hAmDecimalPoint if !pm => digits[3] |= Digit::DECIMAL,
        TimeDisplayMode::Clock12hPmDecimalPoint if pm => digits[3] |= Digit::DECIMAL,
        _ => {}
    }

    Ok(TimeDisplay {
        digits,
        colon: true,
        apostrophe,
    })
}

/// How a duration is laid out on the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DurationMode {
    /// Hours and minutes from an hour up (or from ten minutes below zero),
    /// minutes and seconds otherwise.
    #[default]
    Automatic,
    /// Total hours, then the minute component.
    HourMinute,
    /// Total minutes, then the second component.
    MinuteSecond,
}

/// A signed duration of `total_seconds`, leading zeros shown, colon lit.
///
/// Components of a negative duration are all negative, so a single dash
/// covers the whole value: `-65` seconds shows as `-1:05`.
///
/// # Errors
///
/// Returns [`ValueError::ValueOutOfRange`] if the chosen layout does not fit
/// four digits.
pub fn encode_duration(total_seconds: i32, mode: DurationMode) -> Result<TimeDisplay, ValueError> {
    let hours = total_seconds / 3600;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let seconds = total_seconds % 60;

    let mode = match mode {
        DurationMode::Automatic if hours != 0 || minutes <= -10 => DurationMode::HourMinute,
        DurationMode::Automatic => DurationMode::MinuteSecond,
        explicit => explicit,
    };
    let value = match mode {
        DurationMode::HourMinute => hours.checked_mul(100).and_then(|h| h.checked_add(minutes)),
        _ => total_minutes
            .checked_mul(100)
            .and_then(|m| m.checked_add(seconds)),
    }
    .ok_or(ValueError::ValueOutOfRange)?;

    Ok(TimeDisplay {
        digits: encode_int(value, true)?,
        colon: true,
        apostrophe: false,
    })
}

/// A temperature in `d1..d3` with `unit` (usually [`Digit::C`] or
/// [`Digit::F`]) in `d4`.
///
/// Between -10 and 100 exclusive, `show_decimal` adds one decimal place,
/// unless rounding to tenths carries out of the three digits. The value is
/// rounded to the shown precision. The drivers light the
/// apostrophe as a degree mark.
///
/// # Errors
///
/// Returns [`ValueError::ValueOutOfRange`] outside `-99..=999`.
pub fn encode_temperature(
    temperature: f32,
    unit: Digit,
    show_decimal: bool,
) -> Result<DisplayValue, ValueError> {
    if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
        return Err(ValueError::ValueOutOfRange);
    }

    // Tenths that round up to a fourth digit (99.96, -9.96) no longer fit
    // beside the unit; those fall back to whole degrees.
    let tenths = (show_decimal && temperature > -10.0 && temperature < 100.0)
        .then(|| round_half_away(temperature * 10.0))
        .filter(|t| (-99..=999).contains(t));
    let (rounded, decimal) = match tenths {
        Some(t) => (t, true),
        None => (round_half_away(temperature), false),
    };
    let negative = rounded < 0;

    let [_, mut d1, mut d2, d3] = int_to_digits(rounded.unsigned_abs());
    if decimal {
        d2 |= Digit::DECIMAL;
    }

    if negative {
        d1 = Digit::DASH;
        if d2 == Digit::D0 {
            d2 = Digit::BLANK;
        }
    } else if d1 == Digit::D0 {
        d1 = Digit::BLANK;
        if d2 == Digit::D0 {
            d2 = Digit::BLANK;
        }
    }

    Ok([d1, d2, d3, unit])
}

fn round_half_away(value: f32) -> i32 {
    if value < 0.0 {
        (value - 0.5) as i32
    } else {
        (value + 0.5) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use module_proto::Digit as G;

    const B: Digit = G::BLANK;
    const DASH: Digit = G::DASH;

    fn dp(d: Digit) -> Digit {
        d | G::DECIMAL
    }

    #[test]
    fn test_digit_lookup() {
        assert_eq!(digit(0), Ok(G::D0));
        assert_eq!(digit(9), Ok(G::D9));
        assert_eq!(digit(10), Err(ValueError::DigitOutOfRange));
    }

    #[test]
    fn test_int_to_digits() {
        assert_eq!(int_to_digits(0), [G::D0, G::D0, G::D0, G::D0]);
        assert_eq!(int_to_digits(1234), [G::D1, G::D2, G::D3, G::D4]);
        assert_eq!(int_to_digits(907), [G::D0, G::D9, G::D0, G::D7]);
    }

    #[test]
    fn test_clear_leading_zeros_keeps_last_digit() {
        let mut digits = int_to_digits(0);
        clear_leading_zeros(&mut digits);
        assert_eq!(digits, [B, B, B, G::D0]);

        let mut digits = int_to_digits(1005);
        clear_leading_zeros(&mut digits);
        assert_eq!(digits, [G::D1, G::D0, G::D0, G::D5]);

        let mut digits = int_to_digits(50);
        clear_leading_zeros(&mut digits);
        assert_eq!(digits, [B, B, G::D5, G::D0]);
    }

    #[test]
    fn test_encode_int() {
        assert_eq!(encode_int(1234, false), Ok([G::D1, G::D2, G::D3, G::D4]));
        assert_eq!(encode_int(-5, false), Ok([DASH, B, B, G::D5]));
        assert_eq!(encode_int(-5, true), Ok([DASH, G::D0, G::D0, G::D5]));
        assert_eq!(encode_int(-999, false), Ok([DASH, G::D9, G::D9, G::D9]));
        assert_eq!(encode_int(42, true), Ok([G::D0, G::D0, G::D4, G::D2]));
        assert_eq!(encode_int(0, false), Ok([B, B, B, G::D0]));
    }

    #[test]
    fn test_encode_int_range() {
        assert!(encode_int(MAX_VALUE, false).is_ok());
        assert!(encode_int(MIN_VALUE, false).is_ok());
        assert_eq!(encode_int(10_000, false), Err(ValueError::ValueOutOfRange));
        assert_eq!(encode_int(-1000, false), Err(ValueError::ValueOutOfRange));
    }

    #[test]
    fn test_encode_fixed_places_decimal_point() {
        assert_eq!(encode_fixed(3.14, 2, false), Ok([B, dp(G::D3), G::D1, G::D4]));
        assert_eq!(encode_fixed(12.5, 1, false), Ok([B, G::D1, dp(G::D2), G::D5]));
        assert_eq!(encode_fixed(1.234, 3, false), Ok([dp(G::D1), G::D2, G::D3, G::D4]));
        assert_eq!(encode_fixed(42.0, 0, false), Ok([B, B, G::D4, dp(G::D2)]));
    }

    #[test]
    fn test_encode_fixed_rounds_to_nearest() {
        assert_eq!(encode_fixed(2.675, 1, false), Ok([B, B, dp(G::D2), G::D7]));
        assert_eq!(encode_fixed(-1.26, 1, false), Ok([DASH, B, dp(G::D1), G::D3]));
    }

    #[test]
    fn test_encode_fixed_zero_with_point_is_not_blanked() {
        assert_eq!(encode_fixed(0.5, 1, false), Ok([B, B, dp(G::D0), G::D5]));
        assert_eq!(encode_fixed(0.0, 2, false), Ok([B, dp(G::D0), G::D0, G::D0]));
    }

    #[test]
    fn test_encode_fixed_dash_keeps_decimal_point() {
        assert_eq!(encode_fixed(-0.25, 3, false), Ok([dp(DASH), G::D2, G::D5, G::D0]));
        assert_eq!(encode_fixed(-9.9, 2, false), Ok([DASH, dp(G::D9), G::D9, G::D0]));
    }

    #[test]
    fn test_encode_fixed_negative_rounding_to_zero_has_no_dash() {
        assert_eq!(encode_fixed(-0.04, 1, false), Ok([B, B, dp(G::D0), G::D0]));
    }

    #[test]
    fn test_encode_fixed_rejects() {
        assert_eq!(encode_fixed(1.0, 4, false), Err(ValueError::DecimalPlacesOutOfRange));
        assert_eq!(encode_fixed(100.0, 2, false), Err(ValueError::ValueOutOfRange));
        assert_eq!(encode_fixed(-10.0, 2, false), Err(ValueError::ValueOutOfRange));
        assert_eq!(encode_fixed(f64::NAN, 1, false), Err(ValueError::ValueOutOfRange));
        assert_eq!(encode_fixed(f64::INFINITY, 0, false), Err(ValueError::ValueOutOfRange));
    }

    #[test]
    fn test_encode_digit_values() {
        assert_eq!(encode_digit_values(0, 1, 2, 3), Ok([G::D0, G::D1, G::D2, G::D3]));
        assert_eq!(encode_digit_values(0, 1, 12, 3), Err(ValueError::DigitOutOfRange));
    }

    #[test]
    fn test_encode_str_merges_decimal_backward() {
        assert_eq!(encode_str("1.5"), [dp(G::D1), G::D5, B, B]);
        assert_eq!(encode_str("12.34"), [G::D1, dp(G::D2), G::D3, G::D4]);
        assert_eq!(encode_str("1234."), [G::D1, G::D2, G::D3, dp(G::D4)]);
    }

    #[test]
    fn test_encode_str_double_decimal_takes_a_slot() {
        assert_eq!(encode_str("1..2"), [dp(G::D1), G::DECIMAL, G::D2, B]);
        assert_eq!(encode_str(".5"), [G::DECIMAL, G::D5, B, B]);
    }

    #[test]
    fn test_encode_str_characters() {
        assert_eq!(encode_str("beEF"), [G::B, G::E, G::E, G::F]);
        assert_eq!(encode_str("-_x9"), [DASH, G::UNDERSCORE, B, G::D9]);
        assert_eq!(encode_str("123456"), [G::D1, G::D2, G::D3, G::D4]);
        assert_eq!(encode_str(""), [B; 4]);
    }

    #[test]
    fn test_to_12h() {
        assert_eq!(to_12h(0), (12, false));
        assert_eq!(to_12h(9), (9, false));
        assert_eq!(to_12h(12), (12, true));
        assert_eq!(to_12h(13), (1, true));
        assert_eq!(to_12h(23), (11, true));
    }

    #[test]
    fn test_encode_time_12h() {
        let time = encode_time(13, 5, 0, TimeDisplayMode::Clock12h).unwrap();
        assert_eq!(time.digits, [B, G::D1, G::D0, G::D5]);
        assert!(time.colon);
        assert!(!time.apostrophe);

        let time = encode_time(13, 5, 0, TimeDisplayMode::Clock12hPmDecimalPoint).unwrap();
        assert_eq!(time.digits, [B, G::D1, G::D0, dp(G::D5)]);

        let time = encode_time(13, 5, 0, TimeDisplayMode::Clock12hAmDecimalPoint).unwrap();
        assert_eq!(time.digits, [B, G::D1, G::D0, G::D5]);

        let time = encode_time(0, 30, 0, TimeDisplayMode::Clock12h).unwrap();
        assert_eq!(time.digits, [G::D1, G::D2, G::D3, G::D0]);
    }

    #[test]
    fn test_encode_time_apostrophe_markers() {
        let am = encode_time(9, 15, 0, TimeDisplayMode::Clock12hAmApostrophe).unwrap();
        assert!(am.apostrophe);
        let pm = encode_time(21, 15, 0, TimeDisplayMode::Clock12hAmApostrophe).unwrap();
        assert!(!pm.apostrophe);
        let noon = encode_time(12, 0, 0, TimeDisplayMode::Clock12hPmApostrophe).unwrap();
        assert!(noon.apostrophe);
        assert_eq!(noon.digits, [G::D1, G::D2, G::D0, G::D0]);
    }

    #[test]
    fn test_encode_time_24h_keeps_leading_zero() {
        let time = encode_time(7, 5, 0, TimeDisplayMode::Clock24h).unwrap();
        assert_eq!(time.digits, [G::D0, G::D7, G::D0, G::D5]);
        let time = encode_time(7, 5, 9, TimeDisplayMode::MinuteSecond).unwrap();
        assert_eq!(time.digits, [G::D0, G::D5, G::D0, G::D9]);
        let time = encode_time(17, 45, 0, TimeDisplayMode::HourMinute).unwrap();
        assert_eq!(time.digits, [G::D1, G::D7, G::D4, G::D5]);
    }

    #[test]
    fn test_encode_time_rejects() {
        assert_eq!(
            encode_time(24, 0, 0, TimeDisplayMode::Clock24h),
            Err(ValueError::TimeOutOfRange)
        );
        assert_eq!(
            encode_time(0, 60, 0, TimeDisplayMode::Clock24h),
            Err(ValueError::TimeOutOfRange)
        );
    }

    #[test]
    fn test_encode_duration_automatic() {
        // 0 h, -12 min resolves to hours:minutes.
        let d = encode_duration(-12 * 60, DurationMode::Automatic).unwrap();
        assert_eq!(d.digits, [DASH, G::D0, G::D1, G::D2]);
        assert!(d.colon);

        // -9 min 30 s stays minutes:seconds.
        let d = encode_duration(-(9 * 60 + 30), DurationMode::Automatic).unwrap();
        assert_eq!(d.digits, [DASH, G::D9, G::D3, G::D0]);

        let d = encode_duration(65, DurationMode::Automatic).unwrap();
        assert_eq!(d.digits, [G::D0, G::D1, G::D0, G::D5]);

        let d = encode_duration(3600 + 2 * 60 + 7, DurationMode::Automatic).unwrap();
        assert_eq!(d.digits, [G::D0, G::D1, G::D0, G::D2]);
    }

    #[test]
    fn test_encode_duration_explicit_modes() {
        // 90 minutes as total minutes.
        let d = encode_duration(90 * 60 + 15, DurationMode::MinuteSecond).unwrap();
        assert_eq!(d.digits, [G::D9, G::D0, G::D1, G::D5]);

        let d = encode_duration(90 * 60 + 15, DurationMode::HourMinute).unwrap();
        assert_eq!(d.digits, [G::D0, G::D1, G::D3, G::D0]);

        let d = encode_duration(-65, DurationMode::MinuteSecond).unwrap();
        assert_eq!(d.digits, [DASH, G::D1, G::D0, G::D5]);
    }

    #[test]
    fn test_encode_duration_range() {
        assert_eq!(
            encode_duration(100 * 3600, DurationMode::HourMinute),
            Err(ValueError::ValueOutOfRange)
        );
        assert_eq!(
            encode_duration(-10 * 60, DurationMode::MinuteSecond),
            Err(ValueError::ValueOutOfRange)
        );
        assert!(encode_duration(i32::MAX, DurationMode::Automatic).is_err());
    }

    #[test]
    fn test_encode_temperature() {
        assert_eq!(
            encode_temperature(98.6, G::F, true),
            Ok([G::D9, dp(G::D8), G::D6, G::F])
        );
        assert_eq!(encode_temperature(98.6, G::F, false), Ok([B, G::D9, G::D9, G::F]));
        assert_eq!(encode_temperature(9.96, G::C, true), Ok([G::D1, dp(G::D0), G::D0, G::C]));
        assert_eq!(encode_temperature(5.0, G::C, false), Ok([B, B, G::D5, G::C]));
        assert_eq!(encode_temperature(5.0, G::C, true), Ok([B, dp(G::D5), G::D0, G::C]));
        assert_eq!(encode_temperature(451.0, G::F, true), Ok([G::D4, G::D5, G::D1, G::F]));
    }

    #[test]
    fn test_encode_temperature_carry_drops_decimal() {
        assert_eq!(encode_temperature(99.96, G::F, true), Ok([G::D1, G::D0, G::D0, G::F]));
        assert_eq!(encode_temperature(-9.96, G::C, true), Ok([DASH, G::D1, G::D0, G::C]));
        // Just below the carry the decimal stays.
        assert_eq!(encode_temperature(99.94, G::F, true), Ok([G::D9, dp(G::D9), G::D9, G::F]));
        assert_eq!(encode_temperature(-9.94, G::C, true), Ok([DASH, dp(G::D9), G::D9, G::C]));
    }

    #[test]
    fn test_encode_temperature_negative() {
        assert_eq!(encode_temperature(-5.5, G::C, true), Ok([DASH, dp(G::D5), G::D5, G::C]));
        assert_eq!(encode_temperature(-40.0, G::C, true), Ok([DASH, G::D4, G::D0, G::C]));
        assert_eq!(encode_temperature(-7.0, G::C, false), Ok([DASH, B, G::D7, G::C]));
    }

    #[test]
    fn test_encode_temperature_range_is_inclusive() {
        assert!(encode_temperature(999.0, G::F, true).is_ok());
        assert!(encode_temperature(-99.0, G::C, true).is_ok());
        assert_eq!(
            encode_temperature(999.5, G::F, true),
            Err(ValueError::ValueOutOfRange)
        );
        assert_eq!(
            encode_temperature(f32::NAN, G::F, true),
            Err(ValueError::ValueOutOfRange)
        );
    }
}
