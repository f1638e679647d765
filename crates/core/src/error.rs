//! Error types for the flowfield core.

use thiserror::Error;

/// Errors produced by simulation construction and field writes.
#[derive(Debug, Error)]
pub enum SimError {
    /// Field extent was zero, negative, or non-finite; or rows/columns were
    /// zero; or the cell count overflowed `usize`.
    #[error("invalid dimensions: extent must be positive and finite, rows and columns non-zero")]
    InvalidDimensions,

    /// A cell write targeted an index outside the grid.
    #[error("cell ({row}, {column}) out of bounds for a {rows} x {columns} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// Stroke mass must be positive and finite (`force / mass` is undefined
    /// otherwise).
    #[error("invalid mass: {0} (must be positive and finite)")]
    InvalidMass(f64),

    /// Stroke lifespan must be non-negative and finite.
    #[error("invalid lifespan: {0} (must be non-negative and finite)")]
    InvalidLifespan(f64),

    /// Spawn rectangle was degenerate (non-finite bounds or min above max).
    #[error("invalid spawn area: {0}")]
    InvalidSpawnArea(String),

    /// Scenario tick period must be positive and finite so timestamps
    /// increase monotonically.
    #[error("invalid tick period: {0} (must be positive and finite)")]
    InvalidTickPeriod(f64),

    /// A field source spec named an unrecognized source kind.
    #[error("unknown field source: {0}")]
    UnknownSource(String),

    /// A brush spec named an unrecognized brush kind.
    #[error("unknown brush: {0}")]
    UnknownBrush(String),
}
