//! The core `Engine` trait every sketch simulation implements.
//!
//! The trait is object-safe so engines can be used as `dyn Engine` for runtime
//! switching between simulations.

use crate::canvas::Painter;
use crate::color::Rgba;
use crate::error::EngineError;
use serde_json::Value;

/// Core trait for frame-driven sketch engines.
///
/// A host calls [`step`](Engine::step) once per animation frame, then
/// [`draw`](Engine::draw) onto a painter that already received the
/// engine's translucent [`background`](Engine::background).
pub trait Engine {
    /// Advance the simulation by one frame.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Draw the current state.
    fn draw(&self, painter: &mut dyn Painter);

    /// Per-frame background wash. Alpha below 1 leaves trails.
    fn background(&self) -> Rgba;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Applies a new configuration. Keys that are absent keep their current value.
    fn set_params(&mut self, params: &Value) -> Result<(), EngineError>;

    /// Discards the simulation state and rebuilds it from the current configuration.
    fn reset(&mut self);
}
