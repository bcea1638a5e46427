//! Reproducible description of a sketch run.
//!
//! A [`Seed`] captures everything needed to recreate a rendered frame:
//! engine name, canvas dimensions, parameters, PRNG seed, and frame count.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Engine name, canvas size, parameter overrides, PRNG seed and frame count.
///
/// Two identical `Seed` values fed to the same binary produce bit-identical
/// output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub engine: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub frames: usize,
}

impl Seed {
    /// Creates a new Seed with empty params (`{}`) and zero frames.
    pub fn new(engine: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            engine: engine.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            frames: 0,
        }
    }

    /// Validates that the dimensions are non-zero and `width * height` fits in `usize`.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_seed_with_empty_params_and_no_frames() {
        let s = Seed::new("polymer", 800, 400, 42);
        assert_eq!(s.engine, "polymer");
        assert_eq!((s.width, s.height), (800, 400));
        assert_eq!(s.seed, 42);
        assert_eq!(s.frames, 0);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut s = Seed::new("polymer", 640, 360, 99);
        s.params = serde_json::json!({"polymer": 40, "mode": "wrap"});
        s.frames = 500;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn validate_rejects_zero_and_overflowing_dimensions() {
        assert!(Seed::new("polymer", 800, 400, 1).validate().is_ok());
        assert!(Seed::new("polymer", 0, 400, 1).validate().is_err());
        assert!(Seed::new("polymer", 800, 0, 1).validate().is_err());
        assert!(Seed::new("polymer", usize::MAX, 2, 1).validate().is_err());
    }
}
