//! Discrete color palettes.
//!
//! Particles take one color from their palette at creation, chosen
//! uniformly at random. Built-in palettes are addressable by name so the
//! CLI and the params JSON can select them.

use crate::color::Srgb;
use crate::error::EngineError;
use crate::prng::Xorshift64;

/// Names accepted by [`Palette::from_name`].
const PALETTE_NAMES: &[&str] = &["polymer", "ocean", "ember", "moss", "monochrome"];

/// An ordered, non-empty set of color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette from a vector of colors. Requires at least one color.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, EngineError> {
        if colors.is_empty() {
            return Err(EngineError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, EngineError> {
        let colors: Result<Vec<Srgb>, EngineError> =
            hexes.iter().map(|h| Srgb::from_hex(h)).collect();
        Self::new(colors?)
    }

    /// Looks up a built-in palette by name.
    ///
    /// Returns `EngineError::InvalidPalette` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "polymer" => Ok(Self::polymer()),
            "ocean" => Ok(Self::ocean()),
            "ember" => Ok(Self::ember()),
            "moss" => Ok(Self::moss()),
            "monochrome" => Ok(Self::monochrome()),
            other => Err(EngineError::InvalidPalette(format!(
                "unknown palette '{other}' (expected one of {})",
                PALETTE_NAMES.join(", ")
            ))),
        }
    }

    /// All built-in palette names.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Number of color stops.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color stops in order.
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Picks one stop uniformly at random.
    pub fn pick(&self, rng: &mut Xorshift64) -> Srgb {
        self.colors[rng.next_usize(self.colors.len())]
    }

    // -- Built-in palettes --

    /// Muted blues and slate grays; the sketch's default.
    pub fn polymer() -> Self {
        Self::from_hex(&["#4a69bd", "#5e8ac6", "#2c3e50", "#7f8c8d"])
            .expect("polymer palette hex values are valid")
    }

    /// Deep blues to cyan.
    pub fn ocean() -> Self {
        Self::from_hex(&["#001f3f", "#003366", "#005f73", "#0a9396", "#94d2bd"])
            .expect("ocean palette hex values are valid")
    }

    /// Reds, oranges, yellows.
    pub fn ember() -> Self {
        Self::from_hex(&["#800000", "#cc0000", "#ff4500", "#ff8c00", "#ffd700"])
            .expect("ember palette hex values are valid")
    }

    /// Greens and olive browns.
    pub fn moss() -> Self {
        Self::from_hex(&["#344e41", "#3a5a40", "#588157", "#a3b18a", "#6b705c"])
            .expect("moss palette hex values are valid")
    }

    /// Grays between charcoal and silver.
    pub fn monochrome() -> Self {
        Self::from_hex(&["#202020", "#404040", "#808080", "#c0c0c0"])
            .expect("monochrome palette hex values are valid")
    }
}
