#![deny(unsafe_code)]
//! Polymer particle field engine.
//!
//! A flat population of particles that repel each other inside a radius
//! set by the `polymer` slider, jitter with a magnitude set by `energy`,
//! and (in wrap mode) drift together in a cohesion band just outside the
//! repulsion radius. `concentration` is the population the field keeps.
//!
//! Each frame:
//! 1. fade mode tops the population up with bursts from the canvas center;
//! 2. forces are computed for every particle against the frame-start state
//!    (O(n²) pairwise);
//! 3. velocity and position are integrated with a speed cap;
//! 4. the mode's boundary policy runs (kill on exit, or toroidal wrap);
//! 5. dead particles are swept out of the collection.

pub mod params;
pub mod particle;

use glam::DVec2;
use polymer_sketch_core::canvas::Painter;
use polymer_sketch_core::color::Rgba;
use polymer_sketch_core::error::EngineError;
use polymer_sketch_core::{Engine, Palette, Xorshift64};
use serde_json::Value;
use tracing::{debug, trace};

pub use params::{Mode, PolymerParams};
pub use particle::{ForceModel, Particle};

/// The particle field engine.
pub struct ParticleField {
    bounds: DVec2,
    params: PolymerParams,
    palette: Palette,
    rng: Xorshift64,
    particles: Vec<Particle>,
    frame: u64,
}

impl ParticleField {
    /// Creates a field on a `width x height` canvas.
    ///
    /// Wrap mode scatters its full population immediately; fade mode starts
    /// empty and fills from the center on the first step.
    ///
    /// Returns `EngineError::InvalidDimensions` if width or height is zero.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: PolymerParams,
    ) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let palette = params.palette()?;
        let mut field = Self {
            bounds: DVec2::new(width as f64, height as f64),
            params,
            palette,
            rng: Xorshift64::new(seed),
            particles: Vec::new(),
            frame: 0,
        };
        field.rebuild();
        Ok(field)
    }

    /// Creates a field from a JSON params object, falling back to defaults
    /// for missing keys.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        Self::new(width, height, seed, PolymerParams::from_json(json_params)?)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn polymer_params(&self) -> &PolymerParams {
        &self.params
    }

    /// Canvas size as a vector `(width, height)`.
    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }

    fn rebuild(&mut self) {
        self.particles.clear();
        if self.params.mode == Mode::Wrap {
            let n = self.params.concentration;
            self.particles.reserve(n);
            for _ in 0..n {
                let p = particle::spawn_scattered(self.bounds, &self.palette, &mut self.rng);
                self.particles.push(p);
            }
        }
        debug!(
            mode = self.params.mode.name(),
            particles = self.particles.len(),
            "particle field rebuilt"
        );
    }

    fn replenish(&mut self) {
        let origin = self.bounds * 0.5;
        let missing = self.params.concentration.saturating_sub(self.particles.len());
        for _ in 0..missing {
            let p = particle::spawn_burst(origin, &self.palette, &mut self.rng);
            self.particles.push(p);
        }
        if missing > 0 {
            trace!(spawned = missing, "replenished from center");
        }
    }
}

impl Engine for ParticleField {
    fn step(&mut self) -> Result<(), EngineError> {
        let mode = self.params.mode;
        if mode == Mode::Fade {
            self.replenish();
        }

        let model = ForceModel::from_params(&self.params);
        let forces: Vec<DVec2> = (0..self.particles.len())
            .map(|i| particle::calculate_forces(&self.particles, i, &model, &mut self.rng))
            .collect();

        for (p, force) in self.particles.iter_mut().zip(forces) {
            p.acceleration = force;
            particle::integrate(p);
            particle::check_edges(p, self.bounds, mode);
        }

        let before = self.particles.len();
        self.particles.retain(|p| !particle::is_dead(p));
        self.frame += 1;
        trace!(
            frame = self.frame,
            alive = self.particles.len(),
            removed = before - self.particles.len(),
            "step"
        );
        Ok(())
    }

    fn draw(&self, painter: &mut dyn Painter) {
        for p in &self.particles {
            painter.fill_circle(p.position, p.size, particle::display_color(p));
        }
    }

    fn background(&self) -> Rgba {
        self.params.mode.background()
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn param_schema(&self) -> Value {
        PolymerParams::schema()
    }

    fn set_params(&mut self, params: &Value) -> Result<(), EngineError> {
        let next = self.params.merged(params)?;
        let rebuild = next.mode != self.params.mode
            || (next.mode == Mode::Wrap && next.concentration != self.params.concentration);
        if next.palette != self.params.palette {
            self.palette = next.palette()?;
        }
        self.params = next;
        if rebuild {
            self.rebuild();
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.rebuild();
    }
}
