use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An opaque 8-bit-per-channel color. Serialized as `#RRGGBB`; also
/// deserializes from the named colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Errors from parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected a color name or #RRGGBB, got {0:?}")]
    Malformed(String),
}

/// Named colors accepted by [`Rgb::from_str`], matched case-insensitively.
const NAMED: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("white", Rgb::new(0xff, 0xff, 0xff)),
    ("red", Rgb::new(0xff, 0x00, 0x00)),
    ("yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("green", Rgb::new(0x00, 0xff, 0x00)),
    ("cyan", Rgb::new(0x00, 0xff, 0xff)),
    ("blue", Rgb::new(0x00, 0x00, 0xff)),
    ("purple", Rgb::new(0xff, 0x00, 0xff)),
    ("gray", Rgb::new(0x80, 0x80, 0x80)),
];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `0.0..=1.0`, the form vector backends take.
    pub fn to_unit(self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some((_, rgb)) = NAMED.iter().find(|(name, _)| *name == lower) {
            return Ok(*rgb);
        }

        let malformed = || ColorParseError::Malformed(s.to_string());
        let hex = lower.strip_prefix('#').ok_or_else(malformed)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(malformed());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
