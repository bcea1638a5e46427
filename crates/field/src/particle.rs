//! The particle record and the per-frame operations on it.
//!
//! Particles are plain data. Each frame the field calls
//! [`calculate_forces`] for every particle against a snapshot of the whole
//! population, then [`integrate`] and [`check_edges`], and finally sweeps
//! out whatever [`is_dead`] reports.

use glam::DVec2;
use polymer_sketch_core::color::{Rgba, Srgb};
use polymer_sketch_core::{Palette, Xorshift64};

use crate::params::{Mode, PolymerParams, LIFESPAN_DECAY, REPULSION_FALLOFF};

/// Particle diameter range, shared by both modes.
const SIZE_RANGE: (f64, f64) = (3.0, 7.0);
/// Initial lifespan range in fade mode. Alpha tracks lifespan on a 0–255 scale.
const LIFESPAN_RANGE: (f64, f64) = (150.0, 300.0);
/// Fixed opacity of wrap-mode particles.
const WRAP_ALPHA: f64 = 200.0 / 255.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Per-frame force accumulator; zeroed by every force pass.
    pub acceleration: DVec2,
    pub color: Rgba,
    /// Drawn diameter.
    pub size: f64,
    pub max_speed: f64,
    /// Remaining life in fade mode; `None` for particles that never die.
    pub lifespan: Option<f64>,
}

impl Particle {
    /// A particle at rest with the given position and mode constants.
    pub fn at_rest(position: DVec2, size: f64, mode: Mode) -> Self {
        let (color, lifespan) = match mode {
            Mode::Fade => (Srgb::BLACK.with_alpha(1.0), Some(LIFESPAN_RANGE.1)),
            Mode::Wrap => (Srgb::BLACK.with_alpha(WRAP_ALPHA), None),
        };
        Self {
            position,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            color,
            size,
            max_speed: mode.max_speed(),
            lifespan,
        }
    }

    pub fn radius(&self) -> f64 {
        self.size * 0.5
    }
}

/// Inputs to the force pass that stay constant for a whole frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    /// Magnitude of the isotropic random force.
    pub jitter: f64,
    pub repulsion_radius: f64,
    /// Cohesion band `(outer radius, strength)`.
    pub attraction: Option<(f64, f64)>,
}

impl ForceModel {
    pub fn from_params(params: &PolymerParams) -> Self {
        Self {
            jitter: params.jitter(),
            repulsion_radius: params.repulsion_radius(),
            attraction: params.mode.attraction(),
        }
    }
}

/// Spawns a fade-mode particle at `origin`, launched in a random direction.
pub fn spawn_burst(origin: DVec2, palette: &Palette, rng: &mut Xorshift64) -> Particle {
    let mode = Mode::Fade;
    let (lo, hi) = mode.launch_speed();
    let velocity = rng.next_unit_vec2() * rng.next_range(lo, hi);
    let color = palette.pick(rng).with_alpha(1.0);
    let size = rng.next_range(SIZE_RANGE.0, SIZE_RANGE.1);
    let lifespan = rng.next_range(LIFESPAN_RANGE.0, LIFESPAN_RANGE.1);
    Particle {
        position: origin,
        velocity,
        acceleration: DVec2::ZERO,
        color,
        size,
        max_speed: mode.max_speed(),
        lifespan: Some(lifespan),
    }
}

/// Spawns a wrap-mode particle uniformly within `bounds`.
pub fn spawn_scattered(bounds: DVec2, palette: &Palette, rng: &mut Xorshift64) -> Particle {
    let mode = Mode::Wrap;
    let position = DVec2::new(rng.next_range(0.0, bounds.x), rng.next_range(0.0, bounds.y));
    let (lo, hi) = mode.launch_speed();
    let velocity = rng.next_unit_vec2() * rng.next_range(lo, hi);
    let color = palette.pick(rng).with_alpha(WRAP_ALPHA);
    let size = rng.next_range(SIZE_RANGE.0, SIZE_RANGE.1);
    Particle {
        position,
        velocity,
        acceleration: DVec2::ZERO,
        color,
        size,
        max_speed: mode.max_speed(),
        lifespan: None,
    }
}

/// Push on `this` away from `other`, or `None` outside `(0, radius)`.
///
/// Magnitude is `1 / (0.2 d)`: unbounded as the pair closes, so coincident
/// particles (`d == 0`) are skipped rather than normalized.
pub fn repulsion(this: DVec2, other: DVec2, radius: f64) -> Option<DVec2> {
    let offset = this - other;
    let d = offset.length();
    if d > 0.0 && d < radius {
        Some(offset / d / (d * REPULSION_FALLOFF))
    } else {
        None
    }
}

/// Constant pull on `this` toward `other` inside the band `(inner, outer)`.
pub fn attraction(this: DVec2, other: DVec2, inner: f64, outer: f64, strength: f64) -> Option<DVec2> {
    let offset = other - this;
    let d = offset.length();
    if d > inner && d < outer {
        Some(offset / d * strength)
    } else {
        None
    }
}

/// Net force on `particles[index]` for this frame.
///
/// Jitter is drawn from `rng` even when its magnitude is zero, so the
/// random sequence does not depend on the energy setting.
pub fn calculate_forces(
    particles: &[Particle],
    index: usize,
    model: &ForceModel,
    rng: &mut Xorshift64,
) -> DVec2 {
    let this = particles[index].position;
    let mut force = rng.next_unit_vec2() * model.jitter;

    for (j, other) in particles.iter().enumerate() {
        if j == index {
            continue;
        }
        if let Some(push) = repulsion(this, other.position, model.repulsion_radius) {
            force += push;
        }
        if let Some((outer, strength)) = model.attraction {
            if let Some(pull) =
                attraction(this, other.position, model.repulsion_radius, outer, strength)
            {
                force += pull;
            }
        }
    }
    force
}

/// Applies the accumulated force: velocity, speed cap, position, aging.
pub fn integrate(p: &mut Particle) {
    p.velocity += p.acceleration;
    p.velocity = p.velocity.clamp_length_max(p.max_speed);
    p.position += p.velocity;
    if let Some(life) = p.lifespan.as_mut() {
        *life -= LIFESPAN_DECAY;
    }
}

/// Applies the mode's boundary policy to a freshly integrated particle.
///
/// Fade: leaving `[-r, w + r] x [-r, h + r]` zeroes the lifespan.
/// Wrap: a coordinate past an edge jumps to the opposite edge.
pub fn check_edges(p: &mut Particle, bounds: DVec2, mode: Mode) {
    match mode {
        Mode::Fade => {
            let r = p.radius();
            let pos = p.position;
            let outside = pos.x > bounds.x + r || pos.x < -r || pos.y > bounds.y + r || pos.y < -r;
            if outside {
                p.lifespan = Some(0.0);
            }
        }
        Mode::Wrap => {
            p.position.x = wrap_coord(p.position.x, bounds.x);
            p.position.y = wrap_coord(p.position.y, bounds.y);
        }
    }
}

fn wrap_coord(v: f64, max: f64) -> f64 {
    if v > max {
        0.0
    } else if v < 0.0 {
        max
    } else {
        v
    }
}

/// True once a mortal particle's lifespan has run out.
pub fn is_dead(p: &Particle) -> bool {
    p.lifespan.is_some_and(|life| life <= 0.0)
}

/// Color to draw with; fade-mode alpha follows remaining lifespan.
pub fn display_color(p: &Particle) -> Rgba {
    match p.lifespan {
        Some(life) => p.color.color.with_alpha(life.clamp(0.0, 255.0) / 255.0),
        None => p.color,
    }
}
