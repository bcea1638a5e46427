//! Color types for the polymer sketch.
//!
//! [`Srgb`] holds gamma-encoded components in [0, 1] and parses from a
//! `"#rrggbb"` hex string. [`Rgba`] pairs an `Srgb` with an opacity and is
//! what painters consume. Compositing happens directly in sRGB space, the
//! same way an immediate-mode 2D canvas blends.

use crate::error::EngineError;

/// sRGB color with components in [0, 1].
///
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// An sRGB color with an opacity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: Srgb,
    pub alpha: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Builds a color from 8-bit channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Srgb {
        Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `EngineError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb::from_rgb8(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Quantizes the color to 8-bit channels with rounding.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Attaches an opacity, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            color: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Source-over compositing of `src` at opacity `alpha` onto `self`.
    pub fn blend(self, src: Srgb, alpha: f64) -> Srgb {
        let a = alpha.clamp(0.0, 1.0);
        Srgb {
            r: self.r + (src.r - self.r) * a,
            g: self.g + (src.g - self.g) * a,
            b: self.b + (src.b - self.b) * a,
        }
    }
}

impl Rgba {
    /// Builds a color from 8-bit channels, alpha included (p5-style `0..=255`).
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Srgb::from_rgb8(r, g, b).with_alpha(a as f64 / 255.0)
    }

    /// CSS `rgba(r, g, b, a)` notation for web canvas fill styles.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.color.to_rgb8();
        format!("rgba({r}, {g}, {b}, {:.3})", self.alpha.clamp(0.0, 1.0))
    }
}
