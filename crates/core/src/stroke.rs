//! A stroke: a ballistic point mass advected by the field and retired after
//! a fixed lifespan.
//!
//! Strokes integrate with one explicit Euler step per update. There is no
//! delta-time normalization: simulation speed is proportional to how often
//! the caller ticks, and `now` timestamps are in milliseconds.

use crate::error::SimError;
use glam::DVec2;

/// Mass of the reference stroke.
pub const DEFAULT_MASS: f64 = 0.1;

/// Lifespan of the reference stroke, in milliseconds.
pub const DEFAULT_LIFESPAN_MS: f64 = 5000.0;

/// Validated stroke parameters shared by every stroke a system spawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeParams {
    mass: f64,
    lifespan: f64,
}

impl StrokeParams {
    /// Creates validated parameters.
    ///
    /// Returns `SimError::InvalidMass` unless `mass` is positive and finite
    /// (`force / mass` would be undefined), and `SimError::InvalidLifespan`
    /// unless `lifespan` is non-negative and finite.
    pub fn new(mass: f64, lifespan: f64) -> Result<Self, SimError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass(mass));
        }
        if !(lifespan.is_finite() && lifespan >= 0.0) {
            return Err(SimError::InvalidLifespan(lifespan));
        }
        Ok(Self { mass, lifespan })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn lifespan(&self) -> f64 {
        self.lifespan
    }
}

impl Default for StrokeParams {
    fn default() -> Self {
        // The reference constants satisfy validation by construction.
        Self {
            mass: DEFAULT_MASS,
            lifespan: DEFAULT_LIFESPAN_MS,
        }
    }
}

/// A point mass with position, velocity, and a per-tick acceleration
/// accumulator.
///
/// Lifecycle: spawned, then updated once per tick until the first update
/// whose timestamp exceeds `born + lifespan`, at which point the stroke is
/// expired for good and its state freezes.
#[derive(Debug, Clone)]
pub struct Stroke {
    position: DVec2,
    velocity: DVec2,
    acceleration: DVec2,
    mass: f64,
    lifespan: f64,
    born: Option<f64>,
    expired: bool,
}

impl Stroke {
    /// Creates a stroke at `position` with zero velocity and acceleration.
    pub fn new(position: DVec2, params: StrokeParams) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            mass: params.mass(),
            lifespan: params.lifespan(),
            born: None,
            expired: false,
        }
    }

    /// Accumulates `force / mass` into the acceleration. Additive across
    /// multiple calls before the next [`Stroke::update`].
    pub fn apply_force(&mut self, force: DVec2) {
        self.acceleration += force / self.mass;
    }

    /// Advances the stroke by one tick, returning `true` once expired.
    ///
    /// The first call latches the birth time. A stroke expires on the first
    /// call where `now - born` exceeds the lifespan; from then on `update`
    /// keeps returning `true` without touching position or velocity. While
    /// alive: `velocity += acceleration; position += velocity`, then the
    /// acceleration accumulator resets to zero.
    pub fn update(&mut self, now: f64) -> bool {
        if self.expired {
            return true;
        }
        let born = *self.born.get_or_insert(now);
        if now - born > self.lifespan {
            self.expired = true;
            return true;
        }
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = DVec2::ZERO;
        false
    }

    /// Current world position.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Current velocity, in world units per tick.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Whether the stroke has passed its lifespan.
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Elapsed time since the first update, or zero before it.
    pub fn age(&self, now: f64) -> f64 {
        self.born.map_or(0.0, |born| now - born)
    }
}
