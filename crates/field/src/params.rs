//! Configuration for the particle field.
//!
//! Three slider-driven numbers (`polymer`, `concentration`, `energy`) plus
//! the behavioral [`Mode`] and the palette name. Each mode fixes the ranges
//! the sliders are rescaled into and the constants particles are born with.

use polymer_sketch_core::color::Rgba;
use polymer_sketch_core::error::EngineError;
use polymer_sketch_core::params::{map_range, param_f64, param_string};
use polymer_sketch_core::Palette;
use serde_json::{json, Value};

pub const DEFAULT_POLYMER: f64 = 70.0;
pub const DEFAULT_CONCENTRATION: usize = 150;
pub const DEFAULT_ENERGY: f64 = 30.0;
pub const DEFAULT_PALETTE: &str = "polymer";

/// Slider range shared by `polymer` and `energy`.
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 100.0;
pub const CONCENTRATION_MIN: usize = 10;
pub const CONCENTRATION_MAX: usize = 300;

/// Outer edge of the cohesion band in wrap mode.
pub const ATTRACTION_RADIUS: f64 = 100.0;
/// Constant pull applied inside the cohesion band.
pub const ATTRACTION_STRENGTH: f64 = 0.05;
/// Repulsion magnitude is `1 / (REPULSION_FALLOFF * d)`.
pub const REPULSION_FALLOFF: f64 = 0.2;
/// Lifespan lost per frame in fade mode.
pub const LIFESPAN_DECAY: f64 = 1.5;

/// Which of the two particle behaviors the field runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Continuous bursts from the canvas center; particles fade with age and
    /// die when they leave the canvas.
    #[default]
    Fade,
    /// A fixed population scattered over the canvas, wrapping at the edges,
    /// with a cohesion band outside the repulsion radius.
    Wrap,
}

impl Mode {
    pub const NAMES: &'static [&'static str] = &["fade", "wrap"];

    /// Parses a mode name.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "fade" => Ok(Mode::Fade),
            "wrap" => Ok(Mode::Wrap),
            other => Err(EngineError::InvalidParam {
                name: "mode".into(),
                reason: format!("'{other}' is not one of {}", Mode::NAMES.join(", ")),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Fade => "fade",
            Mode::Wrap => "wrap",
        }
    }

    /// Range the jitter magnitude is rescaled into from `energy`.
    pub fn jitter_range(self) -> (f64, f64) {
        match self {
            Mode::Fade => (0.0, 0.5),
            Mode::Wrap => (0.0, 1.0),
        }
    }

    /// Range the repulsion radius is rescaled into from `polymer`.
    pub fn repulsion_range(self) -> (f64, f64) {
        match self {
            Mode::Fade => (10.0, 100.0),
            Mode::Wrap => (5.0, 80.0),
        }
    }

    /// Speed cap given to every particle at creation.
    pub fn max_speed(self) -> f64 {
        match self {
            Mode::Fade => 5.0,
            Mode::Wrap => 3.0,
        }
    }

    /// Initial speed range; heading is uniformly random.
    pub fn launch_speed(self) -> (f64, f64) {
        match self {
            Mode::Fade => (1.0, 4.0),
            Mode::Wrap => (0.5, 1.5),
        }
    }

    /// Translucent wash painted every frame.
    pub fn background(self) -> Rgba {
        match self {
            Mode::Fade => Rgba::from_rgba8(253, 251, 247, 80),
            Mode::Wrap => Rgba::from_rgba8(20, 24, 36, 40),
        }
    }

    /// Cohesion band `(outer radius, strength)`, if the mode has one.
    pub fn attraction(self) -> Option<(f64, f64)> {
        match self {
            Mode::Fade => None,
            Mode::Wrap => Some((ATTRACTION_RADIUS, ATTRACTION_STRENGTH)),
        }
    }
}

/// Live configuration of a [`ParticleField`](crate::ParticleField).
#[derive(Debug, Clone, PartialEq)]
pub struct PolymerParams {
    /// Repulsion strength slider, 0–100.
    pub polymer: f64,
    /// Target (fade) or fixed (wrap) particle count.
    pub concentration: usize,
    /// Jitter slider, 0–100.
    pub energy: f64,
    pub mode: Mode,
    /// Name of a built-in palette.
    pub palette: String,
}

impl Default for PolymerParams {
    fn default() -> Self {
        Self {
            polymer: DEFAULT_POLYMER,
            concentration: DEFAULT_CONCENTRATION,
            energy: DEFAULT_ENERGY,
            mode: Mode::Fade,
            palette: DEFAULT_PALETTE.to_string(),
        }
    }
}

impl PolymerParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Unknown `mode` or `palette` names are rejected.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Self::default().merged(params)
    }

    /// Returns a copy with every key present in `params` applied.
    ///
    /// Numbers are clamped to their slider ranges, the same way the range
    /// controls clamp them, so JSON input can never ask for more particles
    /// than a slider could.
    pub fn merged(&self, params: &Value) -> Result<Self, EngineError> {
        let mode = Mode::from_name(&param_string(params, "mode", self.mode.name()))?;
        let palette = param_string(params, "palette", &self.palette);
        Palette::from_name(&palette)?;
        let concentration = param_f64(params, "concentration", self.concentration as f64)
            .round()
            .clamp(CONCENTRATION_MIN as f64, CONCENTRATION_MAX as f64);
        Ok(Self {
            polymer: param_f64(params, "polymer", self.polymer).clamp(SLIDER_MIN, SLIDER_MAX),
            concentration: concentration as usize,
            energy: param_f64(params, "energy", self.energy).clamp(SLIDER_MIN, SLIDER_MAX),
            mode,
            palette,
        })
    }

    /// Distance inside which particles push each other apart.
    pub fn repulsion_radius(&self) -> f64 {
        let (lo, hi) = self.mode.repulsion_range();
        map_range(self.polymer, SLIDER_MIN, SLIDER_MAX, lo, hi)
    }

    /// Magnitude of the per-frame random force.
    pub fn jitter(&self) -> f64 {
        let (lo, hi) = self.mode.jitter_range();
        map_range(self.energy, SLIDER_MIN, SLIDER_MAX, lo, hi)
    }

    /// The resolved palette.
    pub fn palette(&self) -> Result<Palette, EngineError> {
        Palette::from_name(&self.palette)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "polymer": self.polymer,
            "concentration": self.concentration,
            "energy": self.energy,
            "mode": self.mode.name(),
            "palette": self.palette,
        })
    }

    pub fn schema() -> Value {
        json!({
            "polymer": {
                "type": "number",
                "default": DEFAULT_POLYMER,
                "min": SLIDER_MIN,
                "max": SLIDER_MAX,
                "step": 1,
                "description": "Polymer strength: widens the repulsion radius"
            },
            "concentration": {
                "type": "integer",
                "default": DEFAULT_CONCENTRATION,
                "min": CONCENTRATION_MIN,
                "max": CONCENTRATION_MAX,
                "step": 1,
                "description": "Particle count the field maintains"
            },
            "energy": {
                "type": "number",
                "default": DEFAULT_ENERGY,
                "min": SLIDER_MIN,
                "max": SLIDER_MAX,
                "step": 1,
                "description": "Energy: magnitude of the random jitter force"
            },
            "mode": {
                "type": "string",
                "default": Mode::Fade.name(),
                "options": Mode::NAMES,
                "description": "fade: center bursts that fade and die at the edges; wrap: fixed population on a torus"
            },
            "palette": {
                "type": "string",
                "default": DEFAULT_PALETTE,
                "options": Palette::list_names(),
                "description": "Built-in palette particle colors are drawn from"
            }
        })
    }
}
