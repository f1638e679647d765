//! The stroke system: owns the live stroke population and runs the
//! spawn / sample / integrate / reap cycle once per tick.
//!
//! The system does not own the field it samples; the host owns both and
//! passes the field in by reference each tick, so brush edits naturally
//! happen between ticks (the `&mut VectorField` borrow cannot overlap an
//! `update` call).

use crate::error::SimError;
use crate::field::VectorField;
use crate::prng::Xorshift64;
use crate::stroke::{Stroke, StrokeParams};
use glam::DVec2;

/// Half-extent of the reference spawn square, in world units.
pub const DEFAULT_SPAWN_HALF_EXTENT: f64 = 50.0;

/// Axis-aligned rectangle that new strokes spawn inside, sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    min: DVec2,
    max: DVec2,
}

impl SpawnArea {
    /// Creates a validated spawn rectangle.
    ///
    /// Returns `SimError::InvalidSpawnArea` if any bound is non-finite or
    /// `min` exceeds `max` on either axis. A zero-size rectangle is allowed
    /// (every stroke spawns at the same point).
    pub fn new(min: DVec2, max: DVec2) -> Result<Self, SimError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SimError::InvalidSpawnArea(format!(
                "bounds must be finite, got {min:?}..{max:?}"
            )));
        }
        if min.x > max.x || min.y > max.y {
            return Err(SimError::InvalidSpawnArea(format!(
                "min {min:?} exceeds max {max:?}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower-left corner.
    pub fn min(&self) -> DVec2 {
        self.min
    }

    /// Upper-right corner.
    pub fn max(&self) -> DVec2 {
        self.max
    }

    /// Draws a uniform position inside the rectangle.
    pub fn sample(&self, rng: &mut Xorshift64) -> DVec2 {
        DVec2::new(
            rng.next_range(self.min.x, self.max.x),
            rng.next_range(self.min.y, self.max.y),
        )
    }

    /// Whether `position` lies inside the rectangle (max edges inclusive).
    pub fn contains(&self, position: DVec2) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            min: DVec2::splat(-DEFAULT_SPAWN_HALF_EXTENT),
            max: DVec2::splat(DEFAULT_SPAWN_HALF_EXTENT),
        }
    }
}

/// Owns the live strokes and advances them against a vector field.
///
/// No other component mutates the stroke collection; the presentation layer
/// reads it through [`StrokeSystem::strokes`] between ticks.
#[derive(Debug)]
pub struct StrokeSystem {
    strokes: Vec<Stroke>,
    spawn_area: SpawnArea,
    stroke_params: StrokeParams,
    rng: Xorshift64,
}

impl StrokeSystem {
    /// Creates an empty system. `seed` drives spawn placement: two systems
    /// with the same seed, params, and field produce bit-identical runs.
    pub fn new(spawn_area: SpawnArea, stroke_params: StrokeParams, seed: u64) -> Self {
        Self {
            strokes: Vec::new(),
            spawn_area,
            stroke_params,
            rng: Xorshift64::new(seed),
        }
    }

    /// Spawns a stroke at `position` with zero velocity and acceleration and
    /// inserts it into the live set.
    pub fn spawn(&mut self, position: DVec2) -> &Stroke {
        let index = self.strokes.len();
        self.strokes.push(Stroke::new(position, self.stroke_params));
        &self.strokes[index]
    }

    /// Runs one simulation tick at timestamp `now` (milliseconds):
    /// spawns one stroke at a sampled spawn position, then for every live
    /// stroke samples the field at its position, applies the force,
    /// advances it, and removes it if expired.
    pub fn update(&mut self, field: &VectorField, now: f64) {
        let position = self.spawn_area.sample(&mut self.rng);
        self.spawn(position);

        // Traverse last to first so swap_remove is safe mid-iteration: the
        // element swapped into slot i comes from an index above i, which
        // this tick already visited.
        let mut i = self.strokes.len();
        while i > 0 {
            i -= 1;
            let stroke = &mut self.strokes[i];
            stroke.apply_force(field.get_force(stroke.position()));
            if stroke.update(now) {
                self.strokes.swap_remove(i);
            }
        }
    }

    /// Read-only view of the live strokes for the presentation layer.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Number of live strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Whether no strokes are live.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
