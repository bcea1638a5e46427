#![deny(unsafe_code)]
//! Core types and traits for the polymer sketch.
//!
//! Provides the `Engine` trait, the `Painter` drawing seam with its CPU
//! `Canvas` raster, `Srgb`/`Rgba` colors, discrete `Palette`s, the
//! `Xorshift64` PRNG, `Seed`, range `ControlPanel`s, and parameter helpers.

pub mod canvas;
pub mod color;
pub mod controls;
pub mod engine;
pub mod error;
pub mod palette;
pub mod params;
pub mod prng;
pub mod seed;

pub use canvas::{Canvas, Painter};
pub use color::{Rgba, Srgb};
pub use controls::{Control, ControlPanel};
pub use engine::Engine;
pub use error::EngineError;
pub use palette::Palette;
pub use prng::Xorshift64;
pub use seed::Seed;
