//! Field sources: deterministic seeding strategies for a [`VectorField`].
//!
//! A [`FieldSource`] produces one direction vector for any world position;
//! [`VectorField::initialize`](crate::field::VectorField::initialize) samples
//! it once per cell center. All sources are deterministic and always return
//! finite vectors.
//!
//! [`VectorField`]: crate::field::VectorField

use crate::error::SimError;
use crate::params::{param_f64, param_string, param_u64};
use glam::DVec2;
use noise::{NoiseFn, OpenSimplex, Perlin};
use serde_json::Value;

/// Magnitude of the reference swirl field.
pub const DEFAULT_SWIRL_MAGNITUDE: f64 = 0.01;

/// Distances below this are treated as a singularity and yield zero.
const SINGULARITY_EPS: f64 = 1e-10;

/// Offset applied to the second noise sample so the x and y components are
/// decorrelated.
const NOISE_CHANNEL_OFFSET: f64 = 100.0;

/// A deterministic source of direction vectors for field seeding.
pub trait FieldSource: Send + Sync + std::fmt::Debug {
    /// Samples the source at world position `(x, y)`. Always finite.
    fn sample(&self, x: f64, y: f64) -> DVec2;
}

/// Rotational field about a center point: each sample is the unit vector
/// perpendicular to the radius from `center`, scaled by `magnitude`.
///
/// This is the reference seeding pattern; it is also what [`CircleBrush`]
/// re-applies inside its footprint.
///
/// [`CircleBrush`]: crate::brush::CircleBrush
#[derive(Debug, Clone, Copy)]
pub struct SwirlSource {
    pub center: DVec2,
    pub magnitude: f64,
}

/// OpenSimplex noise field: two offset noise samples form the x and y
/// components.
#[derive(Debug)]
pub struct SimplexSource {
    noise: OpenSimplex,
    scale: f64,
    strength: f64,
}

/// Curl of scalar Perlin noise, approximately divergence-free.
#[derive(Debug)]
pub struct CurlSource {
    noise: Perlin,
    scale: f64,
    strength: f64,
    eps: f64,
}

/// Constant vector everywhere.
#[derive(Debug, Clone, Copy)]
pub struct UniformSource {
    pub force: DVec2,
}

impl SwirlSource {
    /// Creates a swirl about `center` with the reference magnitude.
    pub fn new(center: DVec2) -> Self {
        Self {
            center,
            magnitude: DEFAULT_SWIRL_MAGNITUDE,
        }
    }
}

impl SimplexSource {
    /// Creates an OpenSimplex noise source.
    pub fn new(scale: f64, strength: f64, seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            scale,
            strength,
        }
    }
}

impl CurlSource {
    /// Creates a curl-noise source with the default finite-difference
    /// epsilon of 0.001.
    pub fn new(scale: f64, strength: f64, seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
            scale,
            strength,
            eps: 0.001,
        }
    }
}

impl FieldSource for SwirlSource {
    fn sample(&self, x: f64, y: f64) -> DVec2 {
        let delta = DVec2::new(x, y) - self.center;
        let dist = delta.length();
        if dist < SINGULARITY_EPS {
            return DVec2::ZERO;
        }
        DVec2::new(-delta.y, delta.x) / dist * self.magnitude
    }
}

impl FieldSource for SimplexSource {
    fn sample(&self, x: f64, y: f64) -> DVec2 {
        let sx = x * self.scale;
        let sy = y * self.scale;
        let fx = self.noise.get([sx, sy]);
        let fy = self.noise.get([
            sx + NOISE_CHANNEL_OFFSET,
            sy + NOISE_CHANNEL_OFFSET,
        ]);
        DVec2::new(fx, fy) * self.strength
    }
}

impl FieldSource for CurlSource {
    fn sample(&self, x: f64, y: f64) -> DVec2 {
        let sx = x * self.scale;
        let sy = y * self.scale;
        let eps = self.eps * self.scale;
        if eps.abs() < SINGULARITY_EPS {
            return DVec2::ZERO;
        }
        // Curl of a scalar field F: (dF/dy, -dF/dx).
        let df_dy =
            (self.noise.get([sx, sy + eps]) - self.noise.get([sx, sy - eps])) / (2.0 * eps);
        let df_dx =
            (self.noise.get([sx + eps, sy]) - self.noise.get([sx - eps, sy])) / (2.0 * eps);
        DVec2::new(df_dy, -df_dx) * self.strength
    }
}

impl FieldSource for UniformSource {
    fn sample(&self, _x: f64, _y: f64) -> DVec2 {
        self.force
    }
}

/// Builds a field source from a JSON spec.
///
/// The `kind` key selects the source (`swirl`, `simplex`, `curl`,
/// `uniform`, defaulting to `swirl`); remaining keys are per-kind parameters
/// with defaults. Returns `SimError::UnknownSource` for an unrecognized
/// kind.
pub fn source_from_json(spec: &Value) -> Result<Box<dyn FieldSource>, SimError> {
    let kind = param_string(spec, "kind", "swirl");
    match kind.as_str() {
        "swirl" => Ok(Box::new(SwirlSource {
            center: DVec2::new(
                param_f64(spec, "center_x", 0.0),
                param_f64(spec, "center_y", 0.0),
            ),
            magnitude: param_f64(spec, "magnitude", DEFAULT_SWIRL_MAGNITUDE),
        })),
        "simplex" => Ok(Box::new(SimplexSource::new(
            param_f64(spec, "scale", 0.01),
            param_f64(spec, "strength", 1.0),
            param_u64(spec, "seed", 0) as u32,
        ))),
        "curl" => Ok(Box::new(CurlSource::new(
            param_f64(spec, "scale", 0.01),
            param_f64(spec, "strength", 1.0),
            param_u64(spec, "seed", 0) as u32,
        ))),
        "uniform" => Ok(Box::new(UniformSource {
            force: DVec2::new(param_f64(spec, "fx", 1.0), param_f64(spec, "fy", 0.0)),
        })),
        _ => Err(SimError::UnknownSource(kind)),
    }
}
