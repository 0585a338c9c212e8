// color.rs - RGBA colors and the named palette handed to renderers

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub channels: [u8; 4], // r, g, b, a
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);
    pub const GREEN: Color = Color::rgb(0, 250, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CRIMSON: Color = Color::rgb(220, 20, 60);
    pub const LIGHT_BLUE: Color = Color::rgb(135, 206, 250);
    pub const LIGHT_GREY: Color = Color::rgb(210, 210, 210);
    pub const DEEP_SKY_BLUE: Color = Color::rgb(0, 191, 255);
    pub const DODGER_BLUE: Color = Color::rgb(30, 144, 255);
    pub const STEEL_BLUE: Color = Color::rgb(70, 130, 180);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const LIGHT_YELLOW: Color = Color::rgb(255, 255, 153);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { channels: [r, g, b, a] }
    }

    /// Fully opaque.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn r(&self) -> u8 {
        self.channels[0]
    }

    pub const fn g(&self) -> u8 {
        self.channels[1]
    }

    pub const fn b(&self) -> u8 {
        self.channels[2]
    }

    pub const fn a(&self) -> u8 {
        self.channels[3]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.channels;
        write!(f, "({r},{g},{b},{a})")
    }
}

const STANDARD: [(&str, Color); 14] = [
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("dark green", Color::DARK_GREEN),
    ("red", Color::RED),
    ("green", Color::GREEN),
    ("blue", Color::BLUE),
    ("crimson", Color::CRIMSON),
    ("light blue", Color::LIGHT_BLUE),
    ("light grey", Color::LIGHT_GREY),
    ("deep sky blue", Color::DEEP_SKY_BLUE),
    ("dodger blue", Color::DODGER_BLUE),
    ("steel blue", Color::STEEL_BLUE),
    ("yellow", Color::YELLOW),
    ("light yellow", Color::LIGHT_YELLOW),
];

/// Immutable name -> color table. Build one and pass it to whoever draws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<String, Color>,
}

impl Palette {
    /// The fourteen named colors every renderer can rely on.
    pub fn standard() -> Self {
        Self {
            colors: STANDARD.iter().map(|&(name, color)| (name.to_string(), color)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// A copy of this palette with `name` added or replaced.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, color: Color) -> Self {
        let mut colors = self.colors.clone();
        colors.insert(name.into(), color);
        Self { colors }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
