#![deny(unsafe_code)]
//! Engine registry, frame loop and CPU-side snapshot rendering.
//!
//! This crate sits between `polymer-sketch-core` (which defines the `Engine`
//! trait) and the engine crates (`polymer-sketch-field`). Both the CLI and
//! WASM bindings depend on it to avoid duplicating dispatch logic.

pub mod pixel;
pub mod sketch;

#[cfg(feature = "png")]
pub mod snapshot;

use polymer_sketch_core::canvas::Painter;
use polymer_sketch_core::color::Rgba;
use polymer_sketch_core::error::EngineError;
use polymer_sketch_core::{Engine, Seed};
use serde_json::Value;

pub use sketch::{render, Sketch};

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["polymer"];

/// Enumeration of all available sketch engines.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction (CLI, WASM).
pub enum EngineKind {
    /// Repelling, jittering particle field.
    Polymer(polymer_sketch_field::ParticleField),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// Returns `EngineError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        match name {
            "polymer" => Ok(EngineKind::Polymer(
                polymer_sketch_field::ParticleField::from_json(width, height, seed, params)?,
            )),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Constructs the engine a [`Seed`] describes.
    pub fn from_seed(seed: &Seed) -> Result<Self, EngineError> {
        seed.validate()?;
        Self::from_name(&seed.engine, seed.width, seed.height, seed.seed, &seed.params)
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }

    /// Number of live particles, for run summaries.
    pub fn population(&self) -> usize {
        match self {
            EngineKind::Polymer(e) => e.particles().len(),
        }
    }
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<(), EngineError> {
        match self {
            EngineKind::Polymer(e) => e.step(),
        }
    }

    fn draw(&self, painter: &mut dyn Painter) {
        match self {
            EngineKind::Polymer(e) => e.draw(painter),
        }
    }

    fn background(&self) -> Rgba {
        match self {
            EngineKind::Polymer(e) => e.background(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Polymer(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Polymer(e) => e.param_schema(),
        }
    }

    fn set_params(&mut self, params: &Value) -> Result<(), EngineError> {
        match self {
            EngineKind::Polymer(e) => e.set_params(params),
        }
    }

    fn reset(&mut self) {
        match self {
            EngineKind::Polymer(e) => e.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polymer_sketch_core::Canvas;
    use serde_json::json;

    #[test]
    fn from_name_polymer_succeeds() {
        let engine = EngineKind::from_name("polymer", 32, 32, 42, &json!({}));
        assert!(engine.is_ok());
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = EngineKind::from_name("nonexistent", 32, 32, 42, &json!({}));
        assert!(matches!(result, Err(EngineError::UnknownEngine(_))));
    }

    #[test]
    fn from_name_propagates_param_errors() {
        let result = EngineKind::from_name("polymer", 32, 32, 42, &json!({"mode": "spin"}));
        assert!(matches!(result, Err(EngineError::InvalidParam { .. })));
    }

    #[test]
    fn from_seed_validates_dimensions() {
        let seed = Seed::new("polymer", 0, 32, 1);
        assert!(matches!(
            EngineKind::from_seed(&seed),
            Err(EngineError::InvalidDimensions)
        ));
    }

    #[test]
    fn list_engines_includes_polymer() {
        assert!(EngineKind::list_engines().contains(&"polymer"));
    }

    #[test]
    fn trait_delegation_step_and_draw() {
        let mut engine = EngineKind::from_name("polymer", 64, 64, 42, &json!({})).unwrap();
        engine.step().unwrap();
        assert!(engine.population() > 0);
        let mut canvas = Canvas::new(64, 64, engine.background().color).unwrap();
        engine.draw(&mut canvas);
        let bg = engine.background().color;
        assert!(canvas.pixels().iter().any(|&p| p != bg));
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let engine = EngineKind::from_name("polymer", 16, 16, 42, &json!({})).unwrap();
        assert!(engine.params().get("polymer").is_some());
        assert!(engine.param_schema().get("concentration").is_some());
    }

    #[test]
    fn trait_delegation_set_params_and_reset() {
        let mut engine =
            EngineKind::from_name("polymer", 64, 64, 42, &json!({"mode": "wrap"})).unwrap();
        assert_eq!(engine.population(), 150);
        engine.set_params(&json!({"concentration": 20})).unwrap();
        assert_eq!(engine.population(), 20);
        engine.reset();
        assert_eq!(engine.population(), 20);
    }

    #[test]
    fn determinism_same_seed() {
        let mut a = EngineKind::from_name("polymer", 64, 64, 99, &json!({})).unwrap();
        let mut b = EngineKind::from_name("polymer", 64, 64, 99, &json!({})).unwrap();
        let mut ca = Canvas::new(64, 64, a.background().color).unwrap();
        let mut cb = Canvas::new(64, 64, b.background().color).unwrap();
        for _ in 0..10 {
            a.step().unwrap();
            b.step().unwrap();
        }
        a.draw(&mut ca);
        b.draw(&mut cb);
        assert_eq!(ca.pixels(), cb.pixels());
    }

    #[test]
    fn object_safety() {
        let engine = EngineKind::from_name("polymer", 16, 16, 42, &json!({})).unwrap();
        let boxed: Box<dyn Engine> = Box::new(engine);
        assert_eq!(boxed.params()["mode"], "fade");
    }
}
