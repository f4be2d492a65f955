use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Opaque RGB colour, stored as 6 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// ARGB form for xlsx style records.
    ///
    /// Kept lowercase: umya-spreadsheet rewrites uppercase ARGB values that hit
    /// its built-in palette into `indexed="n"`, which viewers may render with a
    /// different colour.
    pub fn argb(&self) -> String {
        format!("ff{}", self.0)
    }

    pub fn hex(&self) -> String {
        format!("#{}", self.0)
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let hex = match s.as_str() {
            "white" => "ffffff",
            "black" => "000000",
            other => other.strip_prefix('#').unwrap_or(other),
        };
        let hex = match hex.len() {
            6 => hex.to_string(),
            // #abc -> aabbcc
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ConfigError::InvalidColor(s)),
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s));
        }
        Ok(Color(hex))
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parses a colour literal from the built-in tables.
pub(crate) fn color(literal: &str) -> Color {
    literal.parse().expect("valid colour literal")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// Text style written by the classifiers. `None` fields leave the cell's
/// existing attribute alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    #[serde(default)]
    pub background: Option<Color>,
    #[serde(default, rename = "fontColor")]
    pub font_color: Option<Color>,
    #[serde(default)]
    pub bold: bool,
}

impl CellStyle {
    pub fn fill(background: Color) -> Self {
        Self {
            background: Some(background),
            ..Self::default()
        }
    }

    pub fn with_font(mut self, font_color: Color) -> Self {
        self.font_color = Some(font_color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// The three shared highlight colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub buy: Color,
    pub sell: Color,
    pub highlight: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            buy: color("#b7e1cd"),
            sell: color("#f4c7c3"),
            highlight: color("#fce8b2"),
        }
    }
}
