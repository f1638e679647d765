//! Brushes: localized edit operators for a [`VectorField`].
//!
//! A brush overwrites every cell inside its footprint — the full square of
//! side `2 * radius` around the application point, never circularly masked
//! — with a freshly computed direction scaled by `strength`. Footprints are
//! clamped to the grid before writing, so applying a brush near or beyond
//! an edge touches only the in-range cells.
//!
//! [`VectorField`]: crate::field::VectorField

use crate::error::SimError;
use crate::field::VectorField;
use crate::params::{param_f64, param_string};
use crate::source::{FieldSource, SwirlSource};
use glam::DVec2;
use serde_json::Value;

/// Radius of the reference brush, in world units.
pub const DEFAULT_BRUSH_RADIUS: f64 = 250.0;

/// Strength of the reference brush.
pub const DEFAULT_BRUSH_STRENGTH: f64 = 0.01;

/// Distances below this are treated as a singularity and yield zero.
const SINGULARITY_EPS: f64 = 1e-10;

/// An editable-field operator: computes and writes a new vector into every
/// cell of its footprint around `position`.
pub trait Brush: std::fmt::Debug {
    /// Mutates `field` in place around `position`.
    fn apply(&self, field: &mut VectorField, position: DVec2);
}

/// The reference brush: overwrites its footprint with the rotational swirl
/// pattern about the *field center*, scaled by `strength`.
///
/// The written direction does not depend on the brush position — only the
/// footprint placement does. A localized push is [`RadialBrush`].
#[derive(Debug, Clone, Copy)]
pub struct CircleBrush {
    pub radius: f64,
    pub strength: f64,
}

/// A localized brush: overwrites its footprint with unit vectors pointing
/// away from the application point, scaled by `strength`.
#[derive(Debug, Clone, Copy)]
pub struct RadialBrush {
    pub radius: f64,
    pub strength: f64,
}

impl CircleBrush {
    pub fn new(radius: f64, strength: f64) -> Self {
        Self { radius, strength }
    }
}

impl RadialBrush {
    pub fn new(radius: f64, strength: f64) -> Self {
        Self { radius, strength }
    }
}

/// Computes the clamped cell ranges of a square footprint of side
/// `2 * radius` centered on `position`.
fn square_footprint(
    field: &VectorField,
    position: DVec2,
    radius: f64,
) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
    let left = position.x - radius;
    let top = position.y + radius;
    let footprint = field.bounds(left, top, radius * 2.0, radius * 2.0);
    footprint.intersect(field.rows(), field.columns())
}

impl Brush for CircleBrush {
    fn apply(&self, field: &mut VectorField, position: DVec2) {
        let (rows, columns) = square_footprint(field, position, self.radius);
        let swirl = SwirlSource {
            center: field.center(),
            magnitude: self.strength,
        };
        for row in rows {
            for column in columns.clone() {
                let center = field.cell_center(row, column);
                field.write_cell(row, column, swirl.sample(center.x, center.y));
            }
        }
    }
}

impl Brush for RadialBrush {
    fn apply(&self, field: &mut VectorField, position: DVec2) {
        let (rows, columns) = square_footprint(field, position, self.radius);
        for row in rows {
            for column in columns.clone() {
                let delta = field.cell_center(row, column) - position;
                let dist = delta.length();
                let force = if dist < SINGULARITY_EPS {
                    DVec2::ZERO
                } else {
                    delta / dist * self.strength
                };
                field.write_cell(row, column, force);
            }
        }
    }
}

/// Builds a brush and its application position from a JSON spec.
///
/// The `kind` key selects the brush (`circle` or `radial`, defaulting to
/// `circle`); `x`/`y` give the application position and `radius`/`strength`
/// the parameters. Returns `SimError::UnknownBrush` for an unrecognized
/// kind.
pub fn brush_from_json(spec: &Value) -> Result<(DVec2, Box<dyn Brush>), SimError> {
    let kind = param_string(spec, "kind", "circle");
    let position = DVec2::new(param_f64(spec, "x", 0.0), param_f64(spec, "y", 0.0));
    let radius = param_f64(spec, "radius", DEFAULT_BRUSH_RADIUS);
    let strength = param_f64(spec, "strength", DEFAULT_BRUSH_STRENGTH);
    match kind.as_str() {
        "circle" => Ok((position, Box::new(CircleBrush::new(radius, strength)))),
        "radial" => Ok((position, Box::new(RadialBrush::new(radius, strength)))),
        _ => Err(SimError::UnknownBrush(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// 100x100 world, 10x10 grid (10-unit cells), centered origin.
    fn centered_field() -> VectorField {
        VectorField::new(100.0, 100.0, 10, 10, DVec2::new(-50.0, -50.0)).unwrap()
    }

    /// Collects the whole grid for before/after comparison.
    fn grid_snapshot(field: &VectorField) -> Vec<DVec2> {
        field.iter().map(|(_, _, _, force)| force).collect()
    }

    // ---- CircleBrush footprint ----

    #[test]
    fn circle_brush_writes_every_footprint_cell() {
        let mut field = centered_field();
        // Radius 15 around the origin: the 30-unit square anchors at column
        // 3 and top row 6 and spans 3 cells, so rows and columns 3..6 are
        // overwritten.
        field.apply_brush(DVec2::ZERO, &CircleBrush::new(15.0, 0.5));
        for (row, column, _, force) in field.iter() {
            let touched = (3..6).contains(&row) && (3..6).contains(&column);
            if touched {
                assert!(
                    force.is_finite() && force.length() > 0.0,
                    "footprint cell ({row}, {column}) not written: {force:?}"
                );
            } else {
                assert_eq!(
                    force,
                    DVec2::ZERO,
                    "cell ({row}, {column}) outside the footprint was modified"
                );
            }
        }
    }

    #[test]
    fn circle_brush_zero_strength_zeroes_touched_cells() {
        let mut field = centered_field();
        field.initialize(&crate::source::UniformSource {
            force: DVec2::new(1.0, 0.0),
        });
        field.apply_brush(DVec2::ZERO, &CircleBrush::new(10.0, 0.0));
        // Touched cells are overwritten with zero-magnitude vectors.
        let touched = field.get_force(DVec2::new(-5.0, -5.0));
        assert_eq!(touched, DVec2::ZERO);
        // Untouched cells keep the initialized value.
        let untouched = field.get_force(DVec2::new(45.0, 45.0));
        assert_eq!(untouched, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn circle_brush_writes_swirl_about_field_center() {
        let mut field = centered_field();
        field.apply_brush(DVec2::ZERO, &CircleBrush::new(50.0, 1.0));
        // At a cell right of the field center the swirl tangent points +y.
        let right = field.get_force(DVec2::new(35.0, 5.0));
        assert!(right.y > 0.0, "expected +y tangent right of center: {right:?}");
        // Above the center it points -x.
        let above = field.get_force(DVec2::new(5.0, 35.0));
        assert!(above.x < 0.0, "expected -x tangent above center: {above:?}");
        // Magnitude equals the brush strength.
        assert!((right.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn circle_brush_direction_ignores_brush_position() {
        // The reference brush re-applies the field-center swirl; two
        // applications whose footprints overlap write identical vectors in
        // the overlap.
        let mut a = centered_field();
        let mut b = centered_field();
        a.apply_brush(DVec2::new(-10.0, 0.0), &CircleBrush::new(20.0, 0.3));
        b.apply_brush(DVec2::new(10.0, 0.0), &CircleBrush::new(20.0, 0.3));
        let probe = DVec2::new(5.0, 5.0);
        assert_eq!(a.get_force(probe), b.get_force(probe));
    }

    // ---- Clamping ----

    #[test]
    fn brush_at_corner_clamps_to_grid() {
        let mut field = centered_field();
        field.apply_brush(DVec2::new(-50.0, -50.0), &CircleBrush::new(25.0, 0.5));
        let touched = field
            .iter()
            .filter(|(_, _, _, force)| *force != DVec2::ZERO)
            .count();
        // The 50-unit footprint anchors at column -3 and top row 2 with a
        // span of 5; clamping leaves rows 0..2 and columns 0..2.
        assert_eq!(touched, 4);
    }

    #[test]
    fn brush_fully_outside_grid_is_a_no_op() {
        let mut field = centered_field();
        let before = grid_snapshot(&field);
        field.apply_brush(DVec2::new(500.0, 500.0), &CircleBrush::new(25.0, 0.5));
        assert_eq!(grid_snapshot(&field), before);
    }

    #[test]
    fn brush_with_negative_radius_is_a_no_op() {
        let mut field = centered_field();
        let before = grid_snapshot(&field);
        field.apply_brush(DVec2::ZERO, &CircleBrush::new(-10.0, 0.5));
        assert_eq!(grid_snapshot(&field), before);
    }

    // ---- RadialBrush ----

    #[test]
    fn radial_brush_points_away_from_the_application_point() {
        let mut field = centered_field();
        let position = DVec2::new(5.0, 5.0);
        field.apply_brush(position, &RadialBrush::new(20.0, 2.0));
        for (_, _, center, force) in field.iter() {
            if force == DVec2::ZERO {
                continue;
            }
            let outward = center - position;
            assert!(
                force.dot(outward) > 0.0,
                "force {force:?} at {center:?} does not point away from {position:?}"
            );
            assert!((force.length() - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn radial_brush_differs_from_circle_brush() {
        let mut swirl = centered_field();
        let mut radial = centered_field();
        swirl.apply_brush(DVec2::ZERO, &CircleBrush::new(20.0, 1.0));
        radial.apply_brush(DVec2::ZERO, &RadialBrush::new(20.0, 1.0));
        let probe = DVec2::new(15.0, 5.0);
        assert_ne!(swirl.get_force(probe), radial.get_force(probe));
    }

    // ---- JSON factory ----

    #[test]
    fn factory_defaults_to_the_reference_circle_brush() {
        let (position, brush) = brush_from_json(&json!({})).unwrap();
        assert_eq!(position, DVec2::ZERO);
        let mut field = VectorField::new(2000.0, 2000.0, 50, 50, DVec2::new(-1000.0, -1000.0))
            .unwrap();
        field.apply_brush(position, brush.as_ref());
        let sampled = field.get_force(DVec2::new(100.0, 100.0));
        assert!(
            (sampled.length() - DEFAULT_BRUSH_STRENGTH).abs() < 1e-12,
            "default brush should write reference-strength vectors, got {sampled:?}"
        );
    }

    #[test]
    fn factory_reads_position_and_parameters() {
        let spec = json!({"kind": "radial", "x": 3.0, "y": -4.0, "radius": 9.0, "strength": 2.5});
        let (position, brush) = brush_from_json(&spec).unwrap();
        assert_eq!(position, DVec2::new(3.0, -4.0));
        let mut field = centered_field();
        field.apply_brush(position, brush.as_ref());
        let near = field.get_force(DVec2::new(8.0, -4.0));
        assert!((near.length() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn factory_rejects_unknown_kind() {
        let err = brush_from_json(&json!({"kind": "spray"})).unwrap_err();
        assert!(matches!(err, SimError::UnknownBrush(name) if name == "spray"));
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cells_outside_the_footprint_are_never_modified(
                x in -100.0_f64..100.0,
                y in -100.0_f64..100.0,
                radius in 0.0_f64..60.0,
                strength in -2.0_f64..2.0,
            ) {
                let mut field = centered_field();
                let before = grid_snapshot(&field);
                field.apply_brush(DVec2::new(x, y), &CircleBrush::new(radius, strength));
                let left = x - radius;
                let top = y + radius;
                let footprint = field.bounds(left, top, radius * 2.0, radius * 2.0);
                let (rows, columns) = footprint.intersect(field.rows(), field.columns());
                for (row, column, _, force) in field.iter() {
                    let inside = rows.contains(&row) && columns.contains(&column);
                    if !inside {
                        prop_assert_eq!(
                            force,
                            before[row * field.columns() + column],
                            "cell ({}, {}) outside the footprint changed",
                            row,
                            column
                        );
                    }
                }
            }

            #[test]
            fn all_written_cells_are_finite(
                x in -100.0_f64..100.0,
                y in -100.0_f64..100.0,
                radius in 0.0_f64..60.0,
                strength in -2.0_f64..2.0,
            ) {
                let mut field = centered_field();
                field.apply_brush(DVec2::new(x, y), &CircleBrush::new(radius, strength));
                field.apply_brush(DVec2::new(y, x), &RadialBrush::new(radius, strength));
                for (row, column, _, force) in field.iter() {
                    prop_assert!(
                        force.is_finite(),
                        "non-finite force at ({}, {}): {:?}",
                        row,
                        column,
                        force
                    );
                }
            }
        }
    }
}
