//! Ball colour themes
//!
//! A theme only affects how the ball is drawn (radial gradient from primary
//! to secondary). Physics never looks at it.

use serde::Serialize;

/// A selectable ball skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BallTheme {
    pub name: &'static str,
    /// Highlight colour (`#rrggbb`)
    pub primary: &'static str,
    /// Shadow colour (`#rrggbb`)
    pub secondary: &'static str,
}

pub const BALL_THEMES: [BallTheme; 12] = [
    BallTheme {
        name: "Classic",
        primary: "#fb923c",
        secondary: "#c2410c",
    },
    BallTheme {
        name: "Deep Sea",
        primary: "#38bdf8",
        secondary: "#1e40af",
    },
    BallTheme {
        name: "Toxic",
        primary: "#bef264",
        secondary: "#3f6212",
    },
    BallTheme {
        name: "Golden",
        primary: "#fde047",
        secondary: "#a16207",
    },
    BallTheme {
        name: "Void",
        primary: "#94a3b8",
        secondary: "#0f172a",
    },
    BallTheme {
        name: "Gemini",
        primary: "#8ab4f8",
        secondary: "#4285f4",
    },
    BallTheme {
        name: "Neon City",
        primary: "#ff00ff",
        secondary: "#7000ff",
    },
    BallTheme {
        name: "Mars",
        primary: "#ef4444",
        secondary: "#7f1d1d",
    },
    BallTheme {
        name: "Ice",
        primary: "#e0f2fe",
        secondary: "#3b82f6",
    },
    BallTheme {
        name: "Magma",
        primary: "#f87171",
        secondary: "#450a0a",
    },
    BallTheme {
        name: "Forest",
        primary: "#4ade80",
        secondary: "#064e3b",
    },
    BallTheme {
        name: "Candy",
        primary: "#f472b6",
        secondary: "#9d174d",
    },
];

/// Theme by index; out-of-range indices get the first theme
pub fn theme(index: usize) -> &'static BallTheme {
    BALL_THEMES.get(index).unwrap_or(&BALL_THEMES[0])
}

impl BallTheme {
    /// Primary colour as linear RGBA
    pub fn primary_rgba(&self) -> [f32; 4] {
        hex_to_rgba(self.primary).unwrap_or([1.0; 4])
    }

    /// Secondary colour as linear RGBA
    pub fn secondary_rgba(&self) -> [f32; 4] {
        hex_to_rgba(self.secondary).unwrap_or([1.0; 4])
    }

    /// Seam line colour; dark themes get light seams
    pub fn seam_rgba(&self) -> [f32; 4] {
        if self.name == "Void" {
            [1.0, 1.0, 1.0, 0.1]
        } else {
            [0.0, 0.0, 0.0, 0.3]
        }
    }
}

/// Parse `#rrggbb` into RGBA (alpha 1). The surface is sRGB, so components
/// are converted to linear space.
pub fn hex_to_rgba(hex: &str) -> Option<[f32; 4]> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| -> Option<f32> {
        let v = u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?;
        Some(srgb_to_linear(v as f32 / 255.0))
    };
    Some([channel(0)?, channel(2)?, channel(4)?, 1.0])
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
