//! Colors used by the figure.
use std::fmt;

/// Opaque 24-bit RGB color.
///
/// Transparency is carried separately by the elements that use the color,
/// since the same named color is drawn at different opacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
    pub const LIGHT_BLUE: Color = Color::rgb(0xAD, 0xD8, 0xE6);
    pub const LIGHT_GREEN: Color = Color::rgb(0x90, 0xEE, 0x90);
    pub const LIGHT_YELLOW: Color = Color::rgb(0xFF, 0xFF, 0xE0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Formats as a CSS hex color, `#RRGGBB`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_u32() {
        assert_eq!(Color::from_u32(0xFF6B6B), Color::rgb(0xFF, 0x6B, 0x6B));
        assert_eq!(Color::from_u32(0x000000), Color::BLACK);
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Color::LIGHT_BLUE.to_string(), "#ADD8E6");
        assert_eq!(Color::from_u32(0x45B7D1).to_string(), "#45B7D1");
    }
}
