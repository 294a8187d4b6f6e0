//! Hex color arithmetic for the primary theme color.

use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})$").expect("valid hex color regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance in `0.0..=1.0`.
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }
}

/// Parses `#rrggbb` (the `#` is optional, case-insensitive).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let caps = HEX_COLOR.captures(hex)?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
    Some(Rgb {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
    })
}

/// Darkens by `percent` (0-100). Unparseable input is returned unchanged.
pub fn darken(hex: &str, percent: f64) -> String {
    let Some(rgb) = hex_to_rgb(hex) else {
        return hex.to_string();
    };
    let factor = 1.0 - percent / 100.0;
    let scale = |c: u8| (f64::from(c) * factor).round().clamp(0.0, 255.0) as u8;
    Rgb {
        r: scale(rgb.r),
        g: scale(rgb.g),
        b: scale(rgb.b),
    }
    .to_hex()
}

/// Lightens toward white by `percent` (0-100). Unparseable input is returned
/// unchanged.
pub fn lighten(hex: &str, percent: f64) -> String {
    let Some(rgb) = hex_to_rgb(hex) else {
        return hex.to_string();
    };
    let factor = percent / 100.0;
    let scale =
        |c: u8| (f64::from(c) + (255.0 - f64::from(c)) * factor).round().clamp(0.0, 255.0) as u8;
    Rgb {
        r: scale(rgb.r),
        g: scale(rgb.g),
        b: scale(rgb.b),
    }
    .to_hex()
}

/// Black on light backgrounds, white on dark ones (and on invalid input).
pub fn contrast_color(hex: &str) -> &'static str {
    match hex_to_rgb(hex) {
        Some(rgb) if rgb.luminance() > 0.5 => "#000000",
        _ => "#ffffff",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#6366f1"), Some(Rgb { r: 0x63, g: 0x66, b: 0xf1 }));
        assert_eq!(hex_to_rgb("FFFFFF"), Some(Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("indigo"), None);
    }

    #[test]
    fn test_darken() {
        assert_eq!(darken("#ffffff", 10.0), "#e6e6e6");
        assert_eq!(darken("#6366f1", 0.0), "#6366f1");
        assert_eq!(darken("not-a-color", 10.0), "not-a-color");
    }

    #[test]
    fn test_lighten() {
        assert_eq!(lighten("#000000", 20.0), "#333333");
        assert_eq!(lighten("#ffffff", 50.0), "#ffffff");
        assert_eq!(lighten("bad", 20.0), "bad");
    }

    #[test]
    fn test_contrast_color() {
        assert_eq!(contrast_color("#ffffff"), "#000000");
        assert_eq!(contrast_color("#6366f1"), "#ffffff");
        assert_eq!(contrast_color("#000000"), "#ffffff");
        assert_eq!(contrast_color("bad"), "#ffffff");
    }
}
