#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);
    pub const RED: Color = Color(255, 0, 0, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }

    /// Lenient hex parse: malformed channels fall back to 0, unknown
    /// lengths to opaque black. Use [`Color::parse_hex`] for wire input.
    pub fn from_hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or(Color::BLACK)
    }

    /// Strict parse of `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let s = hex.trim().strip_prefix('#')?;
        if !s.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&s[range], 16).ok();
        match s.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(&s[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Color(nib(0)?, nib(1)?, nib(2)?, 255))
            }
            6 => Some(Color(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Some(Color(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// Scale the alpha channel by `a` in `0.0..=1.0`.
    pub fn mul_alpha(self, a: f32) -> Self {
        let na = ((self.3 as f32) * a).clamp(0.0, 255.0) as u8;
        self.with_alpha(na)
    }

    pub fn to_hex(self) -> String {
        if self.3 == 255 {
            format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.0, self.1, self.2, self.3)
        }
    }
}
