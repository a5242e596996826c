//! Four-digit seven-segment display driver.

use crate::channel::{CommandChannel, RetryPolicy};
use crate::encoder::{self, DurationMode, TimeDisplay, TimeDisplayMode};
use crate::error::ValueError;
use crate::module::{Module, ModuleId};
use crate::transport::Transport;
use module_proto::segment::{
    ApostropheEndpoint, BrightnessEndpoint, ColonEndpoint, DisplayValue, DisplayValueEndpoint,
    BRIGHTNESS_MAX, FRAME_LEN,
};
use module_proto::Digit;

/// Seven-segment display module.
///
/// Every setter validates its arguments first, then writes and verifies the
/// value. `Ok(false)` means the module never confirmed it; what it shows is
/// unknown in that case.
pub struct SevenSegmentDisplay<T> {
    channel: CommandChannel<T, FRAME_LEN>,
}

impl<T: Transport> SevenSegmentDisplay<T> {
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

    /// Show an integer, leading zeros blanked.
    ///
    /// # Errors
    ///
    /// [`ValueError::ValueOutOfRange`] outside `-999..=9999`.
    pub async fn set_value(&mut self, value: i32) -> Result<bool, ValueError> {
        self.set_value_with_leading_zeros(value, false).await
    }

    /// Show an integer, optionally keeping leading zeros.
    ///
    /// # Errors
    ///
    /// [`ValueError::ValueOutOfRange`] outside `-999..=9999`.
    pub async fn set_value_with_leading_zeros(
        &mut self,
        value: i32,
        show_leading_zeros: bool,
    ) -> Result<bool, ValueError> {
        let digits = encoder::encode_int(value, show_leading_zeros)?;
        self.set_digits(digits).await
    }

    /// Show a fixed-point value. See [`encoder::encode_fixed`].
    ///
    /// # Errors
    ///
    /// Rejects more than three decimal places and values that do not fit.
    pub async fn set_decimal(
        &mut self,
        value: f64,
        decimal_places: u8,
        show_leading_zeros: bool,
    ) -> Result<bool, ValueError> {
        let digits = encoder::encode_fixed(value, decimal_places, show_leading_zeros)?;
        self.set_digits(digits).await
    }

    /// Show four decimal digits as given.
    ///
    /// # Errors
    ///
    /// [`ValueError::DigitOutOfRange`] if any digit is not 0-9.
    pub async fn set_digit_values(
        &mut self,
        d1: u8,
        d2: u8,
        d3: u8,
        d4: u8,
    ) -> Result<bool, ValueError> {
        let digits = encoder::encode_digit_values(d1, d2, d3, d4)?;
        self.set_digits(digits).await
    }

    /// Show raw segment patterns.
    pub async fn set_digits(&mut self, digits: DisplayValue) -> Result<bool, ValueError> {
        Ok(self.channel.set(&DisplayValueEndpoint, &digits).await?)
    }

    /// Show text. See [`encoder::encode_str`].
    pub async fn set_text(&mut self, text: &str) -> Result<bool, ValueError> {
        self.set_digits(encoder::encode_str(text)).await
    }

    /// Show a time of day and set the colon and apostrophe to match.
    ///
    /// Only the digits decide the result; the indicators are best effort.
    ///
    /// # Errors
    ///
    /// [`ValueError::TimeOutOfRange`] for an impossible time.
    pub async fn set_time(
        &mut self,
        hour: u8,
        minute: u8,
        second: u8,
        mode: TimeDisplayMode,
    ) -> Result<bool, ValueError> {
        let display = encoder::encode_time(hour, minute, second, mode)?;
        self.show(display).await
    }

    /// Show a signed duration with the colon lit and the apostrophe off.
    ///
    /// # Errors
    ///
    /// [`ValueError::ValueOutOfRange`] if the duration does not fit.
    pub async fn set_duration(
        &mut self,
        total_seconds: i32,
        mode: DurationMode,
    ) -> Result<bool, ValueError> {
        let display = encoder::encode_duration(total_seconds, mode)?;
        self.show(display).await
    }

    /// Show a temperature with `unit` in the last digit and the apostrophe lit
    /// as a degree mark. The colon is turned off.
    ///
    /// # Errors
    ///
    /// [`ValueError::ValueOutOfRange`] outside `-99..=999`.
    pub async fn set_temperature(
        &mut self,
        temperature: f32,
        unit: Digit,
        show_decimal: bool,
    ) -> Result<bool, ValueError> {
        let digits = encoder::encode_temperature(temperature, unit, show_decimal)?;
        self.show(TimeDisplay {
            digits,
            colon: false,
            apostrophe: true,
        })
        .await
    }

    async fn show(&mut self, display: TimeDisplay) -> Result<bool, ValueError> {
        let shown = self.set_digits(display.digits).await?;
        if !self.set_colon(display.colon).await? {
            debug!("colon indicator not confirmed");
        }
        if !self.set_apostrophe(display.apostrophe).await? {
            debug!("apostrophe indicator not confirmed");
        }
        Ok(shown)
    }

    /// The four segment patterns the module currently shows.
    pub async fn value(&mut self) -> Option<DisplayValue> {
        self.channel.get(&DisplayValueEndpoint).await
    }

    /// Set brightness, `0.0` (off) to `1.0` (full).
    ///
    /// # Errors
    ///
    /// [`ValueError::BrightnessOutOfRange`] outside `0.0..=1.0`.
    pub async fn set_brightness(&mut self, brightness: f32) -> Result<bool, ValueError> {
        if !(0.0..=1.0).contains(&brightness) {
            return Err(ValueError::BrightnessOutOfRange);
        }
        let level = (brightness * f32::from(BRIGHTNESS_MAX)) as u16;
        Ok(self.channel.set(&BrightnessEndpoint, &level).await?)
    }

    /// Current brightness, `0.0` to `1.0`.
    pub async fn brightness(&mut self) -> Option<f32> {
        let level = self.channel.get(&BrightnessEndpoint).await?;
        Some(f32::from(level) / f32::from(BRIGHTNESS_MAX))
    }

    /// Light or clear the colon.
    pub async fn set_colon(&mut self, on: bool) -> Result<bool, ValueError> {
        Ok(self.channel.set(&ColonEndpoint, &on).await?)
    }

    /// Whether the colon is lit.
    pub async fn colon(&mut self) -> Option<bool> {
        self.channel.get(&ColonEndpoint).await
    }

    /// Light or clear the apostrophe.
    pub async fn set_apostrophe(&mut self, on: bool) -> Result<bool, ValueError> {
        Ok(self.channel.set(&ApostropheEndpoint, &on).await?)
    }

    /// Whether the apostrophe is lit.
    pub async fn apostrophe(&mut self) -> Option<bool> {
        self.channel.get(&ApostropheEndpoint).await
    }

    /// Get a reference to the command channel.
    pub fn channel(&self) -> &CommandChannel<T, FRAME_LEN> {
        &self.channel
    }
}

impl<T: Transport> Module<T> for SevenSegmentDisplay<T> {
    const ID: ModuleId = ModuleId::SEVEN_SEGMENT;

    fn bind(transport: T) -> Self {
        Self::new(transport)
    }

    fn release(self) -> T {
        self.channel.release()
    }
}
