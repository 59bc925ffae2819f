//! Color scales and the two lookup algorithms.
//!
//! A scale is an ordered breakpoint table. Absolute values use
//! [`ColorScale::step_lookup`] (highest threshold not above the value wins);
//! differences use [`ColorScale::bracket_lookup`] (bracketing pair, picked by
//! sign, clamped at both ends).

use std::fmt;

use image::Rgba;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Fill of cells without a value. No built-in scale uses it.
pub const NO_DATA: Color = Color::rgb(0, 0, 0);
/// Differential fill of an exact zero.
pub const NEUTRAL: Color = Color::rgb(255, 255, 255);
pub const DARK_TEXT: Color = Color::rgb(0, 0, 0);
pub const LIGHT_TEXT: Color = Color::rgb(255, 255, 255);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#RRGGBB` literal at compile time.
    ///
    /// Panics on malformed input, which turns a typo in a built-in table into
    /// a compile error. Use [`Color::from_hex`] for runtime input.
    pub const fn hex(code: &str) -> Self {
        let bytes = code.as_bytes();
        assert!(bytes.len() == 7 && bytes[0] == b'#', "color must be #RRGGBB");
        Self::rgb(
            hex_byte(bytes[1], bytes[2]),
            hex_byte(bytes[3], bytes[4]),
            hex_byte(bytes[5], bytes[6]),
        )
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::rgb(r, g, b))
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

const fn hex_byte(hi: u8, lo: u8) -> u8 {
    hex_digit(hi) * 16 + hex_digit(lo)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{}'", s)))
    }
}

/// One `(threshold, color)` pair of a scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    #[serde(rename = "value")]
    pub threshold: f64,
    pub color: Color,
}

impl Breakpoint {
    pub const fn new(threshold: f64, color: Color) -> Self {
        Self { threshold, color }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("Scale '{0}' has no breakpoints")]
    Empty(String),

    #[error("Scale '{name}' has a non-finite threshold at position {index}")]
    NonFinite { name: String, index: usize },

    #[error("Scale '{name}' thresholds are not strictly increasing at position {index}")]
    NotIncreasing { name: String, index: usize },
}

/// An ordered breakpoint table for one metric family and mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    name: String,
    breakpoints: Vec<Breakpoint>,
    floor: Color,
}

impl ColorScale {
    /// Build a scale; thresholds must be finite and strictly increasing.
    ///
    /// The floor color (returned by [`ColorScale::step_lookup`] below the
    /// lowest threshold) defaults to white.
    pub fn new(name: impl Into<String>, breakpoints: Vec<Breakpoint>) -> Result<Self, ScaleError> {
        let scale = Self {
            name: name.into(),
            breakpoints,
            floor: NEUTRAL,
        };
        scale.validate()?;
        Ok(scale)
    }

    /// Build a scale from a table known to be valid.
    pub(crate) fn from_table(name: &str, table: &[(f64, Color)]) -> Self {
        let scale = Self {
            name: name.to_string(),
            breakpoints: table.iter().map(|(t, c)| Breakpoint::new(*t, *c)).collect(),
            floor: NEUTRAL,
        };
        debug_assert!(scale.validate().is_ok(), "built-in scale {} is invalid", name);
        scale
    }

    pub fn with_floor(mut self, floor: Color) -> Self {
        self.floor = floor;
        self
    }

    pub fn validate(&self) -> Result<(), ScaleError> {
        if self.breakpoints.is_empty() {
            return Err(ScaleError::Empty(self.name.clone()));
        }
        for (index, bp) in self.breakpoints.iter().enumerate() {
            if !bp.threshold.is_finite() {
                return Err(ScaleError::NonFinite {
                    name: self.name.clone(),
                    index,
                });
            }
            if index > 0 && self.breakpoints[index - 1].threshold >= bp.threshold {
                return Err(ScaleError::NotIncreasing {
                    name: self.name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn floor(&self) -> Color {
        self.floor
    }

    pub fn lowest(&self) -> Breakpoint {
        self.breakpoints[0]
    }

    pub fn highest(&self) -> Breakpoint {
        self.breakpoints[self.breakpoints.len() - 1]
    }

    /// Absolute lookup: the color of the highest threshold `<= value`.
    ///
    /// Inclusive at each threshold, open to the right. Values below every
    /// threshold get the floor color.
    pub fn step_lookup(&self, value: f64) -> Color {
        self.breakpoints
            .iter()
            .rev()
            .find(|bp| value >= bp.threshold)
            .map(|bp| bp.color)
            .unwrap_or(self.floor)
    }

    /// Differential lookup over the bracketing pair `low <= value < high`.
    ///
    /// Negative values take the lower breakpoint's color, others the upper
    /// one's. Values at or beyond either end clamp to the end color. Zero is
    /// looked up like any other value; [`crate::policy::fill_color`] replaces
    /// its color afterwards.
    pub fn bracket_lookup(&self, value: f64) -> Color {
        let lowest = self.lowest();
        let highest = self.highest();
        if value <= lowest.threshold {
            return lowest.color;
        }
        if value >= highest.threshold {
            return highest.color;
        }

        self.breakpoints
            .windows(2)
            .find(|pair| pair[0].threshold <= value && value < pair[1].threshold)
            .map(|pair| if value < 0.0 { pair[0].color } else { pair[1].color })
            .unwrap_or(highest.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(points: &[(f64, &str)]) -> ColorScale {
        ColorScale::new(
            "test",
            points
                .iter()
                .map(|(t, c)| Breakpoint::new(*t, Color::from_hex(c).unwrap()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::from_hex("#FFF"), None);
        assert_eq!(Color::hex("#0f51d4"), Color::rgb(0x0f, 0x51, 0xd4));
    }

    #[test]
    fn test_color_display_round_trips() {
        let c = Color::hex("#E4E1FD");
        assert_eq!(c.to_string(), "#e4e1fd");
        assert_eq!(Color::from_hex(&c.to_string()), Some(c));
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let err = ColorScale::new(
            "bad",
            vec![
                Breakpoint::new(0.0, NEUTRAL),
                Breakpoint::new(0.0, NO_DATA),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ScaleError::NotIncreasing {
                name: "bad".to_string(),
                index: 1
            }
        );
        assert!(matches!(ColorScale::new("empty", vec![]), Err(ScaleError::Empty(_))));
    }

    #[test]
    fn test_step_lookup_floor() {
        let s = scale(&[(0.0, "#111111"), (10.0, "#222222")]).with_floor(Color::rgb(1, 2, 3));
        assert_eq!(s.step_lookup(-0.1), Color::rgb(1, 2, 3));
        assert_eq!(s.step_lookup(0.0), Color::hex("#111111"));
        assert_eq!(s.step_lookup(9.99), Color::hex("#111111"));
        assert_eq!(s.step_lookup(10.0), Color::hex("#222222"));
        assert_eq!(s.step_lookup(1e9), Color::hex("#222222"));
    }

    #[test]
    fn test_bracket_lookup_sign_selects_side() {
        let s = scale(&[
            (-10.0, "#000010"),
            (-5.0, "#000005"),
            (0.0, "#ffffff"),
            (5.0, "#050000"),
            (10.0, "#100000"),
        ]);
        assert_eq!(s.bracket_lookup(-7.0), Color::hex("#000010"));
        assert_eq!(s.bracket_lookup(-5.0), Color::hex("#000005"));
        assert_eq!(s.bracket_lookup(-0.5), Color::hex("#000005"));
        assert_eq!(s.bracket_lookup(0.5), Color::hex("#050000"));
        assert_eq!(s.bracket_lookup(5.0), Color::hex("#100000"));
        assert_eq!(s.bracket_lookup(-99.0), Color::hex("#000010"));
        assert_eq!(s.bracket_lookup(10.0), Color::hex("#100000"));
    }
}
