//! Highlight colors
//!
//! Colors are stored in the settings file as kebab-case names
//! (`yellow`, `bright-cyan`) or `#rrggbb` hex triples.

use std::fmt;
use std::str::FromStr;

use crate::error::FenceError;

/// Terminal colors (ANSI 16-color palette plus true color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

/// Named colors and their config spelling
const NAMES: [(Color, &str); 17] = [
    (Color::Default, "default"),
    (Color::Black, "black"),
    (Color::Red, "red"),
    (Color::Green, "green"),
    (Color::Yellow, "yellow"),
    (Color::Blue, "blue"),
    (Color::Magenta, "magenta"),
    (Color::Cyan, "cyan"),
    (Color::White, "white"),
    (Color::BrightBlack, "bright-black"),
    (Color::BrightRed, "bright-red"),
    (Color::BrightGreen, "bright-green"),
    (Color::BrightYellow, "bright-yellow"),
    (Color::BrightBlue, "bright-blue"),
    (Color::BrightMagenta, "bright-magenta"),
    (Color::BrightCyan, "bright-cyan"),
    (Color::BrightWhite, "bright-white"),
];

/// Colors offered when cycling the highlight color interactively
pub const HIGHLIGHT_PALETTE: [Color; 6] = [
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
    Color::Green,
    Color::Blue,
    Color::Red,
];

impl Color {
    /// Next color in [`HIGHLIGHT_PALETTE`], wrapping around.
    /// Colors outside the palette start over at its first entry.
    pub fn next_highlight(self) -> Self {
        match HIGHLIGHT_PALETTE.iter().position(|&c| c == self) {
            Some(i) => HIGHLIGHT_PALETTE[(i + 1) % HIGHLIGHT_PALETTE.len()],
            None => HIGHLIGHT_PALETTE[0],
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Color::Rgb(r, g, b) = *self {
            return write!(f, "#{:02x}{:02x}{:02x}", r, g, b);
        }
        let name = NAMES
            .iter()
            .find(|(c, _)| c == self)
            .map(|(_, name)| *name)
            .unwrap_or("default");
        f.write_str(name)
    }
}

impl FromStr for Color {
    type Err = FenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase().replace('_', "-");

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| FenceError::InvalidColor(s.clone()));
        }

        NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(c, _)| *c)
            .ok_or(FenceError::InvalidColor(s))
    }
}

/// Parse `rrggbb` into an RGB color
fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
