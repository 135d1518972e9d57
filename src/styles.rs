//! Colors and per-renderer styling

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use plotters::style::{RGBAColor, RGBColor};
use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

/// Opaque RGB color, written as `#rrggbb` (or `#rgb`) in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse a CSS hex color
    pub fn hex(value: &str) -> Result<Self, ChartError> {
        value.parse()
    }

    /// Linear interpolation toward `other`; `t` is clamped to `[0, 1]`
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }

    pub fn with_alpha(self, alpha: f64) -> RGBAColor {
        RGBAColor(self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
    }
}

impl FromStr for Rgb {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| ChartError::InvalidColor {
            value: s.to_string(),
            message: message.to_string(),
        };

        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| invalid("expected a leading '#'"))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("expected hexadecimal digits"));
        }

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|e| invalid(&e.to_string()));
        match digits.len() {
            6 => Ok(Rgb(channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?)),
            3 => {
                let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid("expected 3 or 6 hex digits")),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Palette shared by the default styles
pub mod palette {
    use super::Rgb;

    pub const VIOLET: Rgb = Rgb(0x7b, 0x5c, 0xff);
    pub const SKY: Rgb = Rgb(0x4a, 0xa3, 0xff);
    pub const ORANGE: Rgb = Rgb(0xff, 0x9d, 0x4d);
    pub const LAVENDER: Rgb = Rgb(0xb7, 0xa6, 0xff);
    pub const INDIGO: Rgb = Rgb(0x38, 0x44, 0xff);
    pub const SLATE: Rgb = Rgb(0x58, 0x60, 0x99);
    pub const TRACK: Rgb = Rgb(0x23, 0x2a, 0x44);
    pub const GRID: Rgb = Rgb(0x1e, 0x24, 0x38);
    pub const NIGHT: Rgb = Rgb(0x12, 0x16, 0x29);
}

/// Sparkline / line chart styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    /// Gradient color at the left edge of the surface
    pub gradient_left: Rgb,
    /// Gradient color at the right edge of the surface
    pub gradient_right: Rgb,
    pub line_width: f64,
    /// Inset on every side, in logical pixels
    pub padding: f64,
    pub glow_color: Rgb,
    pub glow_alpha: f64,
    pub glow_radius: f64,
    /// Added to the value range so flat series do not divide by zero
    pub epsilon: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            gradient_left: palette::SKY,
            gradient_right: palette::VIOLET,
            line_width: 2.0,
            padding: 8.0,
            glow_color: palette::LAVENDER,
            glow_alpha: 0.15,
            glow_radius: 6.0,
            epsilon: 1e-6,
        }
    }
}

impl LineStyle {
    /// Same style with the gradient running the other way
    pub fn reversed(&self) -> Self {
        Self {
            gradient_left: self.gradient_right,
            gradient_right: self.gradient_left,
            ..self.clone()
        }
    }
}

/// Bar group container styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarGroupStyle {
    pub bar_count: usize,
    /// Smallest fill height, in percent
    pub min_height_pct: u32,
    /// Random span added on top of the minimum, in percent
    pub height_span_pct: u32,
    pub bar_class: String,
    pub fill_class: String,
}

impl Default for BarGroupStyle {
    fn default() -> Self {
        Self {
            bar_count: 6,
            min_height_pct: 20,
            height_span_pct: 70,
            bar_class: "bar".to_string(),
            fill_class: "fill".to_string(),
        }
    }
}

/// Donut chart styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonutStyle {
    /// Base proportion of each arc before jitter
    pub weights: [f64; 3],
    pub colors: [Rgb; 3],
    /// Lowest jitter factor applied to a weight
    pub jitter_min: f64,
    /// Jitter factors fall in `[jitter_min, jitter_min + jitter_span)`
    pub jitter_span: f64,
    /// Angle left empty after each arc, in radians
    pub gap: f64,
    pub arc_width: f64,
    /// Distance from the surface edge to the arc radius
    pub inset: f64,
    /// How far inside the arcs the inner ring sits
    pub inner_ring_offset: f64,
    pub inner_ring_width: f64,
    pub inner_ring_color: Rgb,
}

impl Default for DonutStyle {
    fn default() -> Self {
        Self {
            weights: [0.42, 0.36, 0.22],
            colors: [palette::VIOLET, palette::SKY, palette::ORANGE],
            jitter_min: 0.8,
            jitter_span: 0.4,
            gap: 0.08,
            arc_width: 14.0,
            inset: 8.0,
            inner_ring_offset: 20.0,
            inner_ring_width: 6.0,
            inner_ring_color: palette::TRACK,
        }
    }
}

/// Radial bar chart styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialStyle {
    /// Horizontal center, measured from the left edge
    pub center_x: f64,
    /// Vertical center offset below the middle of the surface
    pub center_y_offset: f64,
    pub ring_count: usize,
    pub ring_base_radius: f64,
    pub ring_spacing: f64,
    pub ring_width: f64,
    pub ring_color: Rgb,
    pub bar_count: usize,
    /// Angle of the first bar, in radians
    pub start_angle: f64,
    /// Angle between the first and last bar, in radians
    pub sweep: f64,
    pub bar_inner_radius: f64,
    pub bar_min_length: f64,
    pub bar_length_span: f64,
    pub bar_width: f64,
    pub gradient_inner: Rgb,
    pub gradient_outer: Rgb,
}

impl Default for RadialStyle {
    fn default() -> Self {
        Self {
            center_x: 90.0,
            center_y_offset: 20.0,
            ring_count: 6,
            ring_base_radius: 30.0,
            ring_spacing: 16.0,
            ring_width: 1.0,
            ring_color: palette::GRID,
            bar_count: 24,
            start_angle: -PI / 2.0,
            sweep: PI * 1.6,
            bar_inner_radius: 30.0,
            bar_min_length: 20.0,
            bar_length_span: 70.0,
            bar_width: 6.0,
            gradient_inner: palette::INDIGO,
            gradient_outer: palette::VIOLET,
        }
    }
}

/// Wave line styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveStyle {
    pub color: Rgb,
    pub line_width: f64,
    /// Columns per radian of the primary wave
    pub primary_period: f64,
    pub primary_amplitude: f64,
    /// Columns per radian of the secondary ripple
    pub secondary_period: f64,
    pub secondary_amplitude: f64,
}

impl Default for WaveStyle {
    fn default() -> Self {
        Self {
            color: palette::SLATE,
            line_width: 2.0,
            primary_period: 28.0,
            primary_amplitude: 10.0,
            secondary_period: 7.0,
            secondary_amplitude: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::hex("#7b5cff").unwrap(), palette::VIOLET);
        assert_eq!(Rgb::hex("#7B5CFF").unwrap(), palette::VIOLET);
        assert_eq!(Rgb::hex("#fff").unwrap(), Rgb(255, 255, 255));
        assert_eq!(Rgb::hex(" #000000 ").unwrap(), Rgb(0, 0, 0));
    }

    #[test]
    fn test_hex_rejects_garbage() {
        for bad in ["7b5cff", "#7b5cf", "#zzzzzz", "#", "", "#ééé"] {
            assert!(
                matches!(Rgb::hex(bad), Err(ChartError::InvalidColor { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        let json = serde_json::to_string(&palette::ORANGE).unwrap();
        assert_eq!(json, "\"#ff9d4d\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette::ORANGE);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb(0, 100, 200);
        let b = Rgb(200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb(100, 100, 100));
        assert_eq!(a.lerp(b, 7.0), b);
        assert_eq!(a.lerp(b, f64::NAN), a);
    }

    #[test]
    fn test_line_style_reversed() {
        let style = LineStyle::default();
        let reversed = style.reversed();
        assert_eq!(reversed.gradient_left, palette::VIOLET);
        assert_eq!(reversed.gradient_right, palette::SKY);
        assert_eq!(reversed.line_width, style.line_width);
    }

    #[test]
    fn test_partial_style_deserialization_keeps_defaults() {
        let style: WaveStyle = serde_json::from_str(r##"{"color": "#ffffff"}"##).unwrap();
        assert_eq!(style.color, Rgb(255, 255, 255));
        assert_eq!(style.primary_period, 28.0);
    }
}
