//! Two-dimensional vector field: a fixed-resolution grid of direction
//! vectors covering a world-space rectangle.
//!
//! Cells are stored row-major. Cell `(r, c)` covers the half-open world
//! rectangle `[origin.x + c*dc, origin.x + (c+1)*dc) x [origin.y + r*dr,
//! origin.y + (r+1)*dr)` where `dc = width / columns` and
//! `dr = height / rows`, with `origin` at the grid's lower-left corner.
//!
//! Sampling outside the grid yields the zero vector; writing outside the
//! grid is an error. Brushes avoid the error path by clamping their
//! footprint with [`Footprint::intersect`] before writing.

use crate::brush::Brush;
use crate::error::SimError;
use crate::source::FieldSource;
use glam::DVec2;
use std::ops::Range;

/// A grid of 2D direction vectors over a world-space rectangle.
///
/// Dimensions are fixed at construction; cells are mutated only through
/// [`VectorField::set_force`] and brush applications.
#[derive(Debug, Clone)]
pub struct VectorField {
    width: f64,
    height: f64,
    rows: usize,
    columns: usize,
    origin: DVec2,
    cells: Vec<DVec2>,
}

/// Grid-index rectangle produced by [`VectorField::bounds`].
///
/// `row` and `column` locate the lowest-indexed (bottom-left) corner and may
/// lie outside the grid; the spans count cells upward and rightward. Clamp
/// with [`Footprint::intersect`] before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub row: isize,
    pub column: isize,
    pub row_span: usize,
    pub column_span: usize,
}

impl Footprint {
    /// A footprint covering no cells.
    pub const EMPTY: Footprint = Footprint {
        row: 0,
        column: 0,
        row_span: 0,
        column_span: 0,
    };

    /// Clamps the footprint to a `rows x columns` grid, returning the
    /// in-range index ranges `(row_range, column_range)`. Either range may
    /// be empty.
    pub fn intersect(&self, rows: usize, columns: usize) -> (Range<usize>, Range<usize>) {
        let r0 = self.row.clamp(0, rows as isize) as usize;
        let r1 = self
            .row
            .saturating_add_unsigned(self.row_span)
            .clamp(0, rows as isize) as usize;
        let c0 = self.column.clamp(0, columns as isize) as usize;
        let c1 = self
            .column
            .saturating_add_unsigned(self.column_span)
            .clamp(0, columns as isize) as usize;
        (r0..r1, c0..c1)
    }
}

impl VectorField {
    /// Creates a zero-filled field of the given world extent and resolution,
    /// with `origin` at the lower-left corner.
    ///
    /// Returns `SimError::InvalidDimensions` if the extent is not positive
    /// and finite, if `rows` or `columns` is zero, or if the cell count
    /// overflows `usize`.
    pub fn new(
        width: f64,
        height: f64,
        rows: usize,
        columns: usize,
        origin: DVec2,
    ) -> Result<Self, SimError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimError::InvalidDimensions);
        }
        if !origin.is_finite() || rows == 0 || columns == 0 {
            return Err(SimError::InvalidDimensions);
        }
        let len = rows
            .checked_mul(columns)
            .ok_or(SimError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            rows,
            columns,
            origin,
            cells: vec![DVec2::ZERO; len],
        })
    }

    /// World-space width of the field.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// World-space height of the field.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of grid rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// World position of the grid's lower-left corner.
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// World-space size of one cell: `(width / columns, height / rows)`.
    pub fn cell_size(&self) -> DVec2 {
        DVec2::new(
            self.width / self.columns as f64,
            self.height / self.rows as f64,
        )
    }

    /// World position of the field's center.
    pub fn center(&self) -> DVec2 {
        self.origin + DVec2::new(self.width, self.height) * 0.5
    }

    /// World position of the center of cell `(row, column)`.
    ///
    /// Indices are not range-checked; out-of-range indices yield the center
    /// the cell would have if the grid extended that far.
    pub fn cell_center(&self, row: usize, column: usize) -> DVec2 {
        let cell = self.cell_size();
        self.origin
            + DVec2::new(
                (column as f64 + 0.5) * cell.x,
                (row as f64 + 0.5) * cell.y,
            )
    }

    /// Fills every cell by sampling `source` at the cell's world center.
    pub fn initialize(&mut self, source: &dyn FieldSource) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let center = self.cell_center(row, column);
                self.cells[row * self.columns + column] = source.sample(center.x, center.y);
            }
        }
    }

    /// Returns the stored vector for the cell containing `position`, by
    /// value.
    ///
    /// Positions outside the field's world rectangle (and non-finite
    /// positions) return `DVec2::ZERO`; out-of-bounds sampling is a normal,
    /// silent case rather than an error.
    pub fn get_force(&self, position: DVec2) -> DVec2 {
        if !position.is_finite() {
            return DVec2::ZERO;
        }
        let cell = self.cell_size();
        let local = position - self.origin;
        let column = (local.x / cell.x).floor();
        let row = (local.y / cell.y).floor();
        if row < 0.0 || column < 0.0 || row >= self.rows as f64 || column >= self.columns as f64 {
            return DVec2::ZERO;
        }
        self.cells[row as usize * self.columns + column as usize]
    }

    /// Converts a world-space rectangle, anchored at its top-left corner
    /// `(left, top)`, into a grid-index rectangle.
    ///
    /// The returned footprint may extend outside the grid; spans are ceiling
    /// divisions of the rectangle extent by the cell size. Non-finite or
    /// non-positive extents produce an empty footprint.
    pub fn bounds(&self, left: f64, top: f64, width: f64, height: f64) -> Footprint {
        if !(left.is_finite() && top.is_finite() && width.is_finite() && height.is_finite()) {
            return Footprint::EMPTY;
        }
        let cell = self.cell_size();
        let column = ((left - self.origin.x) / cell.x).floor() as isize;
        let top_row = ((top - self.origin.y) / cell.y).floor() as isize;
        let column_span = (width.max(0.0) / cell.x).ceil() as usize;
        let row_span = (height.max(0.0) / cell.y).ceil() as usize;
        Footprint {
            // The anchor row holds the rectangle's top edge; the covered
            // rows extend downward from it.
            row: top_row.saturating_sub_unsigned(row_span),
            column,
            row_span,
            column_span,
        }
    }

    /// Writes `force` into cell `(row, column)`.
    ///
    /// Returns `SimError::OutOfBounds` if the index is outside the grid.
    pub fn set_force(&mut self, row: usize, column: usize, force: DVec2) -> Result<(), SimError> {
        if row >= self.rows || column >= self.columns {
            return Err(SimError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        self.cells[row * self.columns + column] = force;
        Ok(())
    }

    /// Unchecked-by-construction cell write for brushes that have already
    /// clamped their footprint to the grid.
    pub(crate) fn write_cell(&mut self, row: usize, column: usize, force: DVec2) {
        debug_assert!(row < self.rows && column < self.columns);
        self.cells[row * self.columns + column] = force;
    }

    /// Hands the field to `brush` for editing at `position`. The field has
    /// no brush-specific logic of its own.
    pub fn apply_brush(&mut self, position: DVec2, brush: &dyn Brush) {
        brush.apply(self, position);
    }

    /// Iterates over all cells yielding `(row, column, center, force)` in
    /// row-major order. This is the surface an overlay renderer consumes.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, DVec2, DVec2)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &force)| {
            let row = i / self.columns;
            let column = i % self.columns;
            (row, column, self.cell_center(row, column), force)
        })
    }
}
