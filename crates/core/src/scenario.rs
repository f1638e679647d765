//! Reproducible specification for a simulation run.
//!
//! A [`Scenario`] captures everything a host loop needs to replay a run
//! bit-for-bit: field geometry, the seeding source, brush applications, the
//! spawn rectangle, stroke parameters, the PRNG seed, and the tick schedule.
//! Two identical scenarios fed to the same binary produce identical stroke
//! trajectories.

use crate::brush::brush_from_json;
use crate::error::SimError;
use crate::field::VectorField;
use crate::source::source_from_json;
use crate::stroke::{StrokeParams, DEFAULT_LIFESPAN_MS, DEFAULT_MASS};
use crate::system::{SpawnArea, StrokeSystem, DEFAULT_SPAWN_HALF_EXTENT};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Reproducible specification for a simulation run.
///
/// Missing fields deserialize to the defaults below, which reproduce the
/// reference setup: a 2000-unit square world on a 50x50 grid centered on
/// the origin, the swirl seeding pass, and two circle-brush applications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scenario {
    /// World-space field width.
    pub width: f64,
    /// World-space field height.
    pub height: f64,
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub columns: usize,
    /// World position of the grid's lower-left corner.
    pub origin: [f64; 2],
    /// PRNG seed for spawn placement.
    pub seed: u64,
    /// Number of ticks the host loop runs.
    pub ticks: usize,
    /// Milliseconds between tick timestamps.
    pub tick_ms: f64,
    /// Stroke mass.
    pub mass: f64,
    /// Stroke lifespan in milliseconds.
    pub lifespan: f64,
    /// Lower-left corner of the spawn rectangle.
    pub spawn_min: [f64; 2],
    /// Upper-right corner of the spawn rectangle.
    pub spawn_max: [f64; 2],
    /// Field source spec (see `source_from_json`).
    pub source: Value,
    /// Brush specs applied in order after seeding (see `brush_from_json`).
    pub brushes: Vec<Value>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 2000.0,
            rows: 50,
            columns: 50,
            origin: [-1000.0, -1000.0],
            seed: 42,
            ticks: 600,
            tick_ms: 16.0,
            mass: DEFAULT_MASS,
            lifespan: DEFAULT_LIFESPAN_MS,
            spawn_min: [-DEFAULT_SPAWN_HALF_EXTENT, -DEFAULT_SPAWN_HALF_EXTENT],
            spawn_max: [DEFAULT_SPAWN_HALF_EXTENT, DEFAULT_SPAWN_HALF_EXTENT],
            source: json!({}),
            brushes: vec![
                json!({"kind": "circle", "x": 0.0, "y": 0.0, "radius": 250.0, "strength": 0.01}),
                json!({"kind": "circle", "x": 300.0, "y": -300.0, "radius": 250.0, "strength": 1.0}),
            ],
        }
    }
}

impl Scenario {
    /// World position of the grid origin.
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.origin[0], self.origin[1])
    }

    /// Checks every field of the scenario without building anything.
    ///
    /// Mirrors the constructor checks of the components it describes, plus
    /// parses the source and brush specs.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.tick_ms.is_finite() && self.tick_ms > 0.0) {
            return Err(SimError::InvalidTickPeriod(self.tick_ms));
        }
        StrokeParams::new(self.mass, self.lifespan)?;
        SpawnArea::new(self.spawn_min_vec(), self.spawn_max_vec())?;
        source_from_json(&self.source)?;
        for spec in &self.brushes {
            brush_from_json(spec)?;
        }
        // Geometry checks reuse the field constructor.
        VectorField::new(
            self.width,
            self.height,
            self.rows,
            self.columns,
            self.origin(),
        )?;
        Ok(())
    }

    /// Builds the field: constructs, seeds from the source spec, then
    /// applies every brush spec in order.
    pub fn build_field(&self) -> Result<VectorField, SimError> {
        let mut field = VectorField::new(
            self.width,
            self.height,
            self.rows,
            self.columns,
            self.origin(),
        )?;
        let source = source_from_json(&self.source)?;
        field.initialize(source.as_ref());
        for spec in &self.brushes {
            let (position, brush) = brush_from_json(spec)?;
            field.apply_brush(position, brush.as_ref());
        }
        Ok(field)
    }

    /// Builds the stroke system with the scenario's spawn area, stroke
    /// parameters, and seed.
    pub fn build_system(&self) -> Result<StrokeSystem, SimError> {
        let area = SpawnArea::new(self.spawn_min_vec(), self.spawn_max_vec())?;
        let params = StrokeParams::new(self.mass, self.lifespan)?;
        Ok(StrokeSystem::new(area, params, self.seed))
    }

    /// Timestamp of tick `index` in milliseconds.
    pub fn tick_time(&self, index: usize) -> f64 {
        index as f64 * self.tick_ms
    }

    fn spawn_min_vec(&self) -> DVec2 {
        DVec2::new(self.spawn_min[0], self.spawn_min[1])
    }

    fn spawn_max_vec(&self) -> DVec2 {
        DVec2::new(self.spawn_max[0], self.spawn_max[1])
    }
}
