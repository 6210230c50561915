//! Gradient colors

use serde::{Deserialize, Serialize};

/// Named base colors used by the presentations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hue {
    Gray,
    Yellow,
    Orange,
    Blue,
    Purple,
    Black,
}

impl Hue {
    /// sRGB components
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Hue::Gray => (142, 142, 147),
            Hue::Yellow => (255, 204, 0),
            Hue::Orange => (255, 149, 0),
            Hue::Blue => (0, 122, 255),
            Hue::Purple => (175, 82, 222),
            Hue::Black => (0, 0, 0),
        }
    }
}

/// A base color with opacity (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub hue: Hue,
    pub opacity: f64,
}

impl Color {
    /// Fully opaque color
    pub const fn solid(hue: Hue) -> Self {
        Self { hue, opacity: 1.0 }
    }

    /// Same hue, different opacity
    pub const fn with_opacity(self, opacity: f64) -> Self {
        Self { hue: self.hue, opacity }
    }

    /// `#rrggbbaa`
    pub fn hex(&self) -> String {
        let (r, g, b) = self.hue.rgb();
        let a = (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }

    /// Color composited over a black terminal background
    pub fn over_black(&self) -> (u8, u8, u8) {
        let (r, g, b) = self.hue.rgb();
        let a = self.opacity.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f64 * a).round() as u8;
        (mix(r), mix(g), mix(b))
    }
}

/// Gradient endpoints (start, end)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    pub start: Color,
    pub end: Color,
}

impl ColorPair {
    pub const fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_includes_alpha() {
        assert_eq!(Color::solid(Hue::Orange).hex(), "#ff9500ff");
        assert_eq!(Color::solid(Hue::Gray).with_opacity(0.4).hex(), "#8e8e9366");
    }

    #[test]
    fn test_over_black_scales_by_opacity() {
        let c = Color::solid(Hue::Gray).with_opacity(0.5);
        assert_eq!(c.over_black(), (71, 71, 74));
        assert_eq!(Color::solid(Hue::Black).over_black(), (0, 0, 0));
    }

    #[test]
    fn test_serializes_lowercase_hue() {
        let json = serde_json::to_string(&Color::solid(Hue::Purple)).unwrap();
        assert_eq!(json, r#"{"hue":"purple","opacity":1.0}"#);
    }
}
