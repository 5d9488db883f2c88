//! Colors, the swatch palette and quick style presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not `#rgb` or `#rrggbb`.
    #[error("Invalid color '{0}': expected #rgb or #rrggbb")]
    InvalidFormat(String),

    /// The style preset name is not recognized.
    #[error("Unknown style preset: {0}")]
    UnknownPreset(String),
}

/// An opaque sRGB color.
///
/// Parsed from and serialized as a lowercase `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive, leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidFormat(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Swatches offered by the background and border color pickers.
pub const PRESET_COLORS: [Color; 13] = [
    Color::rgb(0xff, 0xff, 0xff), // white
    Color::rgb(0xf8, 0xf9, 0xfa), // light gray
    Color::rgb(0xe9, 0xec, 0xef), // gray
    Color::rgb(0x00, 0x00, 0x00), // black
    Color::rgb(0x21, 0x25, 0x29), // dark gray
    Color::rgb(0xff, 0xea, 0xa7), // light yellow
    Color::rgb(0xfa, 0xb1, 0xa0), // light orange
    Color::rgb(0xfd, 0x79, 0xa8), // light pink
    Color::rgb(0xfd, 0xcb, 0x6e), // light peach
    Color::rgb(0x6c, 0x5c, 0xe7), // purple
    Color::rgb(0x74, 0xb9, 0xff), // light blue
    Color::rgb(0x00, 0xb8, 0x94), // green
    Color::rgb(0xe1, 0x70, 0x55), // light red
];

/// One-click combinations of background and border settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreset {
    CleanWhite,
    DarkMode,
    Seamless,
    Gallery,
}

/// The values a [`StylePreset`] applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleValues {
    pub background: Color,
    pub border_thickness: f64,
    pub border_color: Color,
}

impl StylePreset {
    pub const ALL: [StylePreset; 4] = [
        StylePreset::CleanWhite,
        StylePreset::DarkMode,
        StylePreset::Seamless,
        StylePreset::Gallery,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StylePreset::CleanWhite => "Clean White",
            StylePreset::DarkMode => "Dark Mode",
            StylePreset::Seamless => "Seamless",
            StylePreset::Gallery => "Gallery",
        }
    }

    pub fn values(self) -> StyleValues {
        let (background, border_thickness, border_color) = match self {
            StylePreset::CleanWhite => (Color::WHITE, 10.0, Color::WHITE),
            StylePreset::DarkMode => (Color::BLACK, 5.0, Color::rgb(0x33, 0x33, 0x33)),
            StylePreset::Seamless => (Color::rgb(0xf8, 0xf9, 0xfa), 0.0, Color::WHITE),
            StylePreset::Gallery => (Color::WHITE, 20.0, Color::rgb(0xe9, 0xec, 0xef)),
        };
        StyleValues {
            background,
            border_thickness,
            border_color,
        }
    }
}

impl FromStr for StylePreset {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "clean-white" => Ok(StylePreset::CleanWhite),
            "dark-mode" => Ok(StylePreset::DarkMode),
            "seamless" => Ok(StylePreset::Seamless),
            "gallery" => Ok(StylePreset::Gallery),
            other => Err(ColorError::UnknownPreset(other.to_string())),
        }
    }
}
