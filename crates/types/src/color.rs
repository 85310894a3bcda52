/// An opaque RGB colour used for cell shading and border strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `RRGGBB` without a leading `#`, as word-processor markup expects.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_output_has_no_prefix() {
        assert_eq!(Color::rgb(0x1F, 0x4E, 0x79).to_hex(), "1F4E79");
        assert_eq!(Color::rgb(0xD9, 0xD9, 0xD9).to_hex(), "D9D9D9");
        assert_eq!(Color::BLACK.to_hex(), "000000");
    }
}
