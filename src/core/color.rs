use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Opaque 24-bit color as resolved by the host's color axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl HexColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Six lowercase hex digits without the leading `#`.
    #[must_use]
    pub fn digits(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    #[must_use]
    pub fn to_color(self, alpha: f64) -> Color {
        Color::rgba(
            f64::from(self.red) / 255.0,
            f64::from(self.green) / 255.0,
            f64::from(self.blue) / 255.0,
            alpha,
        )
    }
}

impl FromStr for HexColor {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::InvalidData(format!(
                "color `{input}` must be a 6-digit hex code"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| ChartError::InvalidData(format!("color `{input}`: {e}")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.digits())
    }
}

/// Identifier of a two-stop gradient: both colors' digits in row order.
///
/// The same ordered pair always yields the same key, so one gradient
/// definition is shared by every segment with that pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GradientKey(String);

impl GradientKey {
    #[must_use]
    pub fn from_pair(from: HexColor, to: HexColor) -> Self {
        Self(format!("{}{}", from.digits(), to.digits()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Start and end colors encoded in the key.
    pub fn stops(&self) -> ChartResult<(HexColor, HexColor)> {
        if self.0.len() != 12 {
            return Err(ChartError::InvalidData(format!(
                "gradient key `{}` must hold two colors",
                self.0
            )));
        }
        Ok((self.0[..6].parse()?, self.0[6..].parse()?))
    }
}

impl fmt::Display for GradientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WCAG relative luminance in `[0, 1]`.
#[must_use]
pub fn relative_luminance(color: HexColor) -> f64 {
    let linear = |channel: u8| {
        let v = f64::from(channel) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color.red) + 0.7152 * linear(color.green) + 0.0722 * linear(color.blue)
}

#[must_use]
pub fn contrast_ratio(a: HexColor, b: HexColor) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Text color for labels drawn on top of `background`.
///
/// Black unless white gives a strictly better contrast ratio.
#[must_use]
pub fn contrast_color(background: HexColor) -> HexColor {
    let on_black = contrast_ratio(background, HexColor::BLACK);
    let on_white = contrast_ratio(background, HexColor::WHITE);
    if on_black < on_white {
        HexColor::WHITE
    } else {
        HexColor::BLACK
    }
}
