//! Player colors, display color scheme, and new-player color suggestions.
//!
//! Colors are stored as RGB triples and serialized as lowercase `#rrggbb`
//! strings. `ColorPicker` suggests a color for the next new player from a
//! fixed palette, preferring colors not already in use.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid color {input:?}: expected #rgb or #rrggbb")]
pub struct ColorError {
    /// The rejected input.
    pub input: String,
}

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// The color offered for the first player.
    pub const DEFAULT: Color = Color::rgb(0xff, 0x6b, 0x6b);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive, surrounding whitespace ignored).
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let err = || ColorError {
            input: input.to_string(),
        };

        let hex = input.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match hex.len() {
            3 => {
                // #abc expands to #aabbcc
                let expand = |i: usize| channel(hex[i..=i].repeat(2).as_str());
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(err()),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Light or dark display mode. Persisted alongside the ledger snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// The other scheme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorScheme::Light => f.write_str("light"),
            ColorScheme::Dark => f.write_str("dark"),
        }
    }
}

/// Palette the picker draws from before falling back to arbitrary colors.
pub const PALETTE: [Color; 12] = [
    Color::rgb(0xff, 0x6b, 0x6b),
    Color::rgb(0x4e, 0xcd, 0xc4),
    Color::rgb(0x45, 0xb7, 0xd1),
    Color::rgb(0xf9, 0xca, 0x24),
    Color::rgb(0x6c, 0x5c, 0xe7),
    Color::rgb(0xa2, 0x9b, 0xfe),
    Color::rgb(0xfd, 0x79, 0xa8),
    Color::rgb(0x00, 0xb8, 0x94),
    Color::rgb(0xe1, 0x70, 0x55),
    Color::rgb(0x74, 0xb9, 0xff),
    Color::rgb(0xfd, 0xcb, 0x6e),
    Color::rgb(0x2d, 0x34, 0x36),
];

/// Randomized new-player color suggestions.
///
/// Seeded pickers are deterministic: the same seed and the same sequence of
/// `used` sets produce the same suggestions.
#[derive(Clone, Debug)]
pub struct ColorPicker {
    rng: ChaCha8Rng,
}

impl ColorPicker {
    /// Create a deterministic picker.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a picker seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Suggest a color, preferring palette entries not present in `used`.
    ///
    /// Once the palette is exhausted any RGB color may be returned.
    pub fn pick(&mut self, used: &[Color]) -> Color {
        let free: Vec<Color> = PALETTE
            .iter()
            .copied()
            .filter(|c| !used.contains(c))
            .collect();

        if free.is_empty() {
            Color::rgb(self.rng.gen(), self.rng.gen(), self.rng.gen())
        } else {
            free[self.rng.gen_range(0..free.len())]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short() {
        assert_eq!(Color::parse("#ff6b6b").unwrap(), Color::DEFAULT);
        assert_eq!(Color::parse("#FF6B6B").unwrap(), Color::DEFAULT);
        assert_eq!(Color::parse(" #abc ").unwrap(), Color::rgb(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "ff6b6b", "#ff6b6", "#gggggg", "#ff6b6b00", "#"] {
            assert!(Color::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Color::rgb(0xAB, 0x01, 0xFF).to_string(), "#ab01ff");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn test_scheme_toggle() {
        assert_eq!(ColorScheme::Light.toggled(), ColorScheme::Dark);
        assert_eq!(ColorScheme::Dark.toggled(), ColorScheme::Light);
        assert_eq!(ColorScheme::default(), ColorScheme::Light);
    }

    #[test]
    fn test_picker_is_deterministic() {
        let mut a = ColorPicker::new(42);
        let mut b = ColorPicker::new(42);

        for _ in 0..10 {
            assert_eq!(a.pick(&[]), b.pick(&[]));
        }
    }

    #[test]
    fn test_picker_avoids_used_colors() {
        let mut picker = ColorPicker::new(7);
        let used: Vec<Color> = PALETTE[..11].to_vec();

        for _ in 0..10 {
            assert_eq!(picker.pick(&used), PALETTE[11]);
        }
    }

    #[test]
    fn test_picker_exhausted_palette() {
        let mut picker = ColorPicker::new(7);
        // Any color is acceptable; just make sure it does not panic.
        let _ = picker.pick(&PALETTE);
    }
}
