#![deny(unsafe_code)]
//! Core types for the flowfield particle simulation.
//!
//! A [`VectorField`] holds a grid of direction vectors over a world-space
//! rectangle, seeded by a [`FieldSource`] and edited by [`Brush`]
//! applications. A [`StrokeSystem`] spawns short-lived [`Stroke`] particles,
//! samples the field at each one's position every tick, and advances them
//! with explicit Euler steps until they expire. A [`Scenario`] captures a
//! full reproducible run for a host loop.

pub mod brush;
pub mod error;
pub mod field;
pub mod params;
pub mod prng;
pub mod scenario;
pub mod source;
pub mod stroke;
pub mod system;

pub use brush::{Brush, CircleBrush, RadialBrush};
pub use error::SimError;
pub use field::{Footprint, VectorField};
pub use prng::Xorshift64;
pub use scenario::Scenario;
pub use source::{CurlSource, FieldSource, SimplexSource, SwirlSource, UniformSource};
pub use stroke::{Stroke, StrokeParams};
pub use system::{SpawnArea, StrokeSystem};
