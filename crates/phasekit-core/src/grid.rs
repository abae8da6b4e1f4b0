//! Dense row-major 2D grids.

use crate::direction::{Direction, DIRECTIONS};
use crate::error::PhaseError;
use crate::mask::BoundingBox;
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// A pixel coordinate on a [`Grid`].
///
/// Ordering is row-major: `(0,0) < (0,1) < ... < (1,0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index2 {
    /// Row index, growing downwards.
    pub row: usize,
    /// Column index, growing rightwards.
    pub col: usize,
}

impl Index2 {
    /// Create a coordinate from `row` and `col`.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// `true` if `other` differs by at most one step on each axis and is not
    /// `self` (8-connectivity).
    pub fn touches(self, other: Index2) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl From<(usize, usize)> for Index2 {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A rectangular 2D array, stored row-major.
///
/// Dimensions are fixed at construction. Every constructor rejects zero rows
/// or columns, so a `Grid` always holds at least one element.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// A grid of real phase or height values.
pub type Field = Grid<f64>;

impl<T: Clone> Grid<T> {
    /// Create a `rows x cols` grid with every element set to `fill`.
    ///
    /// # Examples
    ///
    /// ```
    /// use phasekit_core::Grid;
    ///
    /// let g = Grid::new(2, 3, 0.0f64).unwrap();
    /// assert_eq!(g.shape(), (2, 3));
    /// assert!(Grid::new(0, 3, 0.0f64).is_err());
    /// ```
    pub fn new(rows: usize, cols: usize, fill: T) -> Result<Self, PhaseError> {
        if rows == 0 || cols == 0 {
            return Err(PhaseError::EmptyGrid);
        }
        Ok(Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        })
    }

    /// Copy out the sub-grid covered by `bbox`.
    pub fn view_box(&self, bbox: &BoundingBox) -> Result<Self, PhaseError> {
        if bbox.row_end > self.rows || bbox.col_end > self.cols || bbox.is_empty() {
            return Err(PhaseError::InvalidConfiguration {
                reason: format!(
                    "box rows {}..{} cols {}..{} does not fit a {}x{} grid",
                    bbox.row_start, bbox.row_end, bbox.col_start, bbox.col_end, self.rows, self.cols
                ),
            });
        }
        Self::from_fn(bbox.rows(), bbox.cols(), |idx| {
            self[(idx.row + bbox.row_start, idx.col + bbox.col_start)].clone()
        })
    }

    /// Crop a `size = (rows, cols)` window centred on `center`.
    ///
    /// With `center = None` the central element `(rows / 2, cols / 2)` is
    /// used. For even window sizes the extra row/column lies before the
    /// centre, so `crop((2, 2), Some((1, 1).into()))` keeps rows `0..2` and
    /// cols `0..2`. A window reaching past the frame is clipped to the grid;
    /// only a window that misses the grid entirely is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use phasekit_core::{Grid, Index2};
    ///
    /// let g = Grid::from_fn(3, 5, |i| 1 + i.row + 3 * i.col).unwrap();
    /// let c = g.crop((1, 1), Some(Index2::new(0, 2))).unwrap();
    /// assert_eq!(c.as_slice(), &[7]);
    /// let c = g.crop((2, 2), Some(Index2::new(0, 2))).unwrap();
    /// assert_eq!(c.shape(), (1, 2));
    /// assert_eq!(c.as_slice(), &[4, 7]);
    /// ```
    pub fn crop(&self, size: (usize, usize), center: Option<Index2>) -> Result<Self, PhaseError> {
        let center = center.unwrap_or(Index2::new(self.rows / 2, self.cols / 2));
        let (h, w) = size;
        if h == 0 || w == 0 {
            return Err(PhaseError::EmptyGrid);
        }
        let bbox = BoundingBox {
            row_start: center.row.saturating_sub(h / 2),
            row_end: center.row.saturating_add(h - h / 2).min(self.rows),
            col_start: center.col.saturating_sub(w / 2),
            col_end: center.col.saturating_add(w - w / 2).min(self.cols),
        };
        if bbox.is_empty() {
            return Err(PhaseError::InvalidConfiguration {
                reason: format!(
                    "crop {h}x{w} around ({}, {}) misses the {}x{} grid",
                    center.row, center.col, self.rows, self.cols
                ),
            });
        }
        self.view_box(&bbox)
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c].clone());
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}

impl<T> Grid<T> {
    /// Wrap an existing row-major buffer.
    ///
    /// Returns `Err(PhaseError::DimensionMismatch)` if `data.len()` is not
    /// `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, PhaseError> {
        if rows == 0 || cols == 0 {
            return Err(PhaseError::EmptyGrid);
        }
        if data.len() != rows * cols {
            return Err(PhaseError::DimensionMismatch {
                what: "flat buffer length",
                expected: (1, rows * cols),
                found: (1, data.len()),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a grid by evaluating `f` at every index in row-major order.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(Index2) -> T,
    ) -> Result<Self, PhaseError> {
        if rows == 0 || cols == 0 {
            return Err(PhaseError::EmptyGrid);
        }
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(Index2 { row, col }));
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always returns `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Row-major backing slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major backing slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Flat offset of `idx` in the backing buffer.
    #[inline]
    pub fn offset(&self, idx: Index2) -> usize {
        idx.row * self.cols + idx.col
    }

    /// `true` if `idx` lies on the grid.
    #[inline]
    pub fn contains(&self, idx: Index2) -> bool {
        idx.row < self.rows && idx.col < self.cols
    }

    /// Bounds-checked element access.
    pub fn get(&self, idx: Index2) -> Option<&T> {
        if self.contains(idx) {
            Some(&self.data[self.offset(idx)])
        } else {
            None
        }
    }

    /// Bounds-checked mutable element access.
    pub fn get_mut(&mut self, idx: Index2) -> Option<&mut T> {
        if self.contains(idx) {
            let off = self.offset(idx);
            Some(&mut self.data[off])
        } else {
            None
        }
    }

    /// The pixel one step from `idx` in direction `dir`, or `None` when the
    /// step leaves the grid.
    #[inline]
    pub fn neighbour(&self, idx: Index2, dir: Direction) -> Option<Index2> {
        let (dr, dc) = dir.offset();
        let row = idx.row.checked_add_signed(dr)?;
        let col = idx.col.checked_add_signed(dc)?;
        if row < self.rows && col < self.cols {
            Some(Index2 { row, col })
        } else {
            None
        }
    }

    /// In-bounds 4-connected neighbours of `idx`, in [`DIRECTIONS`] order.
    pub fn neighbours4(&self, idx: Index2) -> SmallVec<[Index2; 4]> {
        DIRECTIONS
            .iter()
            .filter_map(|&d| self.neighbour(idx, d))
            .collect()
    }

    /// Iterate over `(index, &value)` pairs in row-major order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (Index2, &T)> + '_ {
        let cols = self.cols;
        self.data.iter().enumerate().map(move |(i, v)| {
            (
                Index2 {
                    row: i / cols,
                    col: i % cols,
                },
                v,
            )
        })
    }

    /// Apply `f` to every element, producing a grid of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Combine two grids of equal shape element by element.
    pub fn zip_map<U, V>(
        &self,
        other: &Grid<U>,
        what: &'static str,
        mut f: impl FnMut(&T, &U) -> V,
    ) -> Result<Grid<V>, PhaseError> {
        self.ensure_same_shape(other, what)?;
        Ok(Grid {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        })
    }

    /// Check that `other` has the same shape as `self`.
    ///
    /// `what` names the argument pair in the resulting
    /// [`PhaseError::DimensionMismatch`].
    pub fn ensure_same_shape<U>(
        &self,
        other: &Grid<U>,
        what: &'static str,
    ) -> Result<(), PhaseError> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(PhaseError::DimensionMismatch {
                what,
                expected: self.shape(),
                found: other.shape(),
            })
        }
    }
}

impl<T> Index<Index2> for Grid<T> {
    type Output = T;

    fn index(&self, idx: Index2) -> &T {
        assert!(
            self.contains(idx),
            "index ({}, {}) out of bounds for {}x{} grid",
            idx.row,
            idx.col,
            self.rows,
            self.cols
        );
        &self.data[idx.row * self.cols + idx.col]
    }
}

impl<T> IndexMut<Index2> for Grid<T> {
    fn index_mut(&mut self, idx: Index2) -> &mut T {
        assert!(
            self.contains(idx),
            "index ({}, {}) out of bounds for {}x{} grid",
            idx.row,
            idx.col,
            self.rows,
            self.cols
        );
        &mut self.data[idx.row * self.cols + idx.col]
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self[Index2 { row, col }]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self[Index2 { row, col }]
    }
}

impl Grid<f64> {
    /// A zero-filled field with the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, PhaseError> {
        Self::new(rows, cols, 0.0)
    }

    /// A zero-filled field with the same shape as `other`.
    pub fn zeros_like<U>(other: &Grid<U>) -> Self {
        Self {
            rows: other.rows,
            cols: other.cols,
            data: vec![0.0; other.data.len()],
        }
    }

    /// Maximum absolute element value.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |m, v| m.max(v.abs()))
    }
}
