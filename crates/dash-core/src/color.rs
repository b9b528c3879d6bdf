// File: crates/dash-core/src/color.rs
// Summary: RGB colors and the per-process color registry for metric traces.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use crate::catalog::KnownMetric;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const RED: Color = Color::rgb(0xff, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` / `rrggbb` or one of the few named colors used by
    /// the dashboard (`black`, `gray`/`grey`, `red`, `white`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" => return Some(Self::BLACK),
            "gray" | "grey" => return Some(Self::GRAY),
            "red" => return Some(Self::RED),
            "white" => return Some(Self::rgb(0xff, 0xff, 0xff)),
            _ => {}
        }
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Plotly's default qualitative colorway.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::rgb(0x63, 0x6e, 0xfa),
    Color::rgb(0xef, 0x55, 0x3b),
    Color::rgb(0x00, 0xcc, 0x96),
    Color::rgb(0xab, 0x63, 0xfa),
    Color::rgb(0xff, 0xa1, 0x5a),
    Color::rgb(0x19, 0xd3, 0xf3),
    Color::rgb(0xff, 0x66, 0x92),
    Color::rgb(0xb6, 0xe8, 0x80),
    Color::rgb(0xff, 0x97, 0xff),
    Color::rgb(0xfe, 0xcb, 0x52),
];

/// Hands out trace colors. Known metrics always get their fixed color;
/// any other metric gets the next palette entry on first sight and keeps it
/// for the lifetime of the registry.
///
/// The registry is owned by the host and passed to the renderer by
/// reference. The check-then-insert step runs under a mutex, so a shared
/// registry never assigns two colors to the same new metric.
pub struct ColorRegistry {
    palette: Vec<Color>,
    assigned: Mutex<Assignments>,
}

#[derive(Default)]
struct Assignments {
    by_metric: HashMap<String, Color>,
    next: usize,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::with_palette(DEFAULT_PALETTE.to_vec())
    }

    /// An empty palette falls back to gray for every dynamic metric.
    pub fn with_palette(palette: Vec<Color>) -> Self {
        Self { palette, assigned: Mutex::new(Assignments::default()) }
    }

    /// Pin a color for a dynamic metric ahead of time (tests, config).
    pub fn seed(&self, metric: impl Into<String>, color: Color) {
        let mut guard = self.assigned.lock().unwrap_or_else(|e| e.into_inner());
        guard.by_metric.insert(metric.into(), color);
    }

    pub fn color_for(&self, metric: &str) -> Color {
        if let Some(known) = KnownMetric::from_column(metric) {
            return known.color();
        }
        let mut guard = self.assigned.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(c) = guard.by_metric.get(metric) {
            return *c;
        }
        let color = if self.palette.is_empty() {
            Color::GRAY
        } else {
            self.palette[guard.next % self.palette.len()]
        };
        guard.next += 1;
        guard.by_metric.insert(metric.to_string(), color);
        tracing::debug!(metric, color = %color, "assigned palette color");
        color
    }

    /// Number of dynamic metrics that currently hold a color.
    pub fn assigned_len(&self) -> usize {
        self.assigned.lock().unwrap_or_else(|e| e.into_inner()).by_metric.len()
    }
}

impl Default for ColorRegistry {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_and_names() {
        assert_eq!(Color::parse("#e3120b"), Some(Color::rgb(0xe3, 0x12, 0x0b)));
        assert_eq!(Color::parse("1F77B4"), Some(Color::rgb(0x1f, 0x77, 0xb4)));
        assert_eq!(Color::parse("gray"), Some(Color::GRAY));
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#zzzzzz"), None);
    }

    #[test]
    fn signed_channels_are_rejected() {
        assert_eq!(Color::parse("#+1+1+1"), None);
        assert_eq!(Color::parse("-10000"), None);
    }

    #[test]
    fn hex_display() {
        assert_eq!(Color::rgb(0x2c, 0xa0, 0x2c).to_string(), "#2ca02c");
    }
}
