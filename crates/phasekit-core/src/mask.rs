//! Boolean domain masks.
//!
//! A [`Mask`] marks the valid domain Ω of a field: `true` pixels are inside.
//! Masks replace the "zero / NaN outside the aperture" convention with an
//! explicit boolean grid, so every call site decides how out-of-domain pixels
//! enter its arithmetic. [`Mask::from_aperture`], [`Mask::to_aperture`] and
//! [`Mask::to_nan_mask`] convert to and from the numeric conventions.

use crate::direction::{Direction, DIRECTIONS};
use crate::error::PhaseError;
use crate::grid::{Field, Grid, Index2};
use smallvec::SmallVec;

/// A grid of booleans; `true` marks pixels inside the domain Ω.
pub type Mask = Grid<bool>;

/// Half-open rectangular window `rows row_start..row_end`, `cols col_start..col_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    /// First row (inclusive).
    pub row_start: usize,
    /// Last row (exclusive).
    pub row_end: usize,
    /// First column (inclusive).
    pub col_start: usize,
    /// Last column (exclusive).
    pub col_end: usize,
}

impl BoundingBox {
    /// Number of rows covered.
    pub fn rows(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }

    /// Number of columns covered.
    pub fn cols(&self) -> usize {
        self.col_end.saturating_sub(self.col_start)
    }

    /// `true` if the box covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// `true` if `idx` lies inside the box.
    pub fn contains(&self, idx: Index2) -> bool {
        (self.row_start..self.row_end).contains(&idx.row)
            && (self.col_start..self.col_end).contains(&idx.col)
    }
}

impl Grid<bool> {
    /// Treat every finite non-zero element of `aperture` as inside.
    pub fn from_aperture(aperture: &Field) -> Mask {
        aperture.map(|&v| v.is_finite() && v != 0.0)
    }

    /// `1.0` inside, `0.0` outside.
    pub fn to_aperture(&self) -> Field {
        self.map(|&b| if b { 1.0 } else { 0.0 })
    }

    /// `1.0` inside, `NaN` outside, for multiplying a field so that
    /// out-of-domain pixels drop out of plots and reductions.
    pub fn to_nan_mask(&self) -> Field {
        self.map(|&b| if b { 1.0 } else { f64::NAN })
    }

    /// Number of pixels inside Ω.
    pub fn count(&self) -> usize {
        self.as_slice().iter().filter(|&&b| b).count()
    }

    /// `true` if no pixel is inside Ω.
    pub fn is_empty_region(&self) -> bool {
        !self.as_slice().iter().any(|&b| b)
    }

    /// `true` if `idx` is on the grid and inside Ω.
    #[inline]
    pub fn is_inside(&self, idx: Index2) -> bool {
        self.get(idx).copied().unwrap_or(false)
    }

    /// Complement of Ω within the grid.
    pub fn not(&self) -> Mask {
        self.map(|&b| !b)
    }

    /// Pixel-wise intersection.
    pub fn and(&self, other: &Mask) -> Result<Mask, PhaseError> {
        self.zip_map(other, "mask vs mask", |&a, &b| a && b)
    }

    /// Pixel-wise union.
    pub fn or(&self, other: &Mask) -> Result<Mask, PhaseError> {
        self.zip_map(other, "mask vs mask", |&a, &b| a || b)
    }

    /// Directions in which the inside pixel `idx` borders a pixel outside Ω
    /// or the grid frame. Empty for outside pixels.
    pub fn open_sides(&self, idx: Index2) -> SmallVec<[Direction; 4]> {
        if !self.is_inside(idx) {
            return SmallVec::new();
        }
        DIRECTIONS
            .iter()
            .copied()
            .filter(|&d| self.neighbour(idx, d).map(|n| !self[n]).unwrap_or(true))
            .collect()
    }

    /// Tight bounding box of Ω grown by `pad` pixels on every side and
    /// clamped to the grid. `None` when Ω is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use phasekit_core::{Grid, Index2};
    ///
    /// let mut mask = Grid::new(6, 6, false).unwrap();
    /// mask[(2, 3)] = true;
    /// let bbox = mask.bounding_box(1).unwrap();
    /// assert_eq!((bbox.row_start, bbox.row_end), (1, 4));
    /// assert_eq!((bbox.col_start, bbox.col_end), (2, 5));
    /// ```
    pub fn bounding_box(&self, pad: usize) -> Option<BoundingBox> {
        let mut rows = (usize::MAX, 0usize);
        let mut cols = (usize::MAX, 0usize);
        for (idx, &inside) in self.iter_indexed() {
            if inside {
                rows = (rows.0.min(idx.row), rows.1.max(idx.row));
                cols = (cols.0.min(idx.col), cols.1.max(idx.col));
            }
        }
        if rows.0 == usize::MAX {
            return None;
        }
        Some(BoundingBox {
            row_start: rows.0.saturating_sub(pad),
            row_end: (rows.1 + 1 + pad).min(self.rows()),
            col_start: cols.0.saturating_sub(pad),
            col_end: (cols.1 + 1 + pad).min(self.cols()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mask(n: usize, lo: usize, hi: usize) -> Mask {
        Grid::from_fn(n, n, |i| {
            (lo..hi).contains(&i.row) && (lo..hi).contains(&i.col)
        })
        .unwrap()
    }

    #[test]
    fn aperture_round_trip() {
        let ap = Grid::from_vec(1, 4, vec![0.0, 2.5, f64::NAN, -1.0]).unwrap();
        let mask = Mask::from_aperture(&ap);
        assert_eq!(mask.as_slice(), &[false, true, false, true]);
        assert_eq!(mask.to_aperture().as_slice(), &[0.0, 1.0, 0.0, 1.0]);
        let nan = mask.to_nan_mask();
        assert!(nan.as_slice()[0].is_nan());
        assert_eq!(nan.as_slice()[1], 1.0);
    }

    #[test]
    fn count_and_complement() {
        let m = square_mask(5, 1, 4);
        assert_eq!(m.count(), 9);
        assert_eq!(m.not().count(), 16);
        assert!(!m.is_empty_region());
        assert!(Grid::new(3, 3, false).unwrap().is_empty_region());
    }

    #[test]
    fn set_operations_check_shapes() {
        let a = square_mask(5, 0, 3);
        let b = square_mask(5, 2, 5);
        assert_eq!(a.and(&b).unwrap().count(), 1);
        assert_eq!(a.or(&b).unwrap().count(), 17);
        let c = square_mask(4, 0, 2);
        assert!(matches!(
            a.and(&c),
            Err(PhaseError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn open_sides_counts_frame_as_outside() {
        let full = Grid::new(3, 3, true).unwrap();
        assert_eq!(full.open_sides(Index2::new(0, 0)).len(), 2);
        assert!(full.open_sides(Index2::new(1, 1)).is_empty());

        let m = square_mask(5, 1, 4);
        let sides = m.open_sides(Index2::new(1, 2));
        assert_eq!(sides.as_slice(), &[Direction::Up]);
        assert!(m.open_sides(Index2::new(0, 0)).is_empty());
    }

    #[test]
    fn bounding_box_clamps_padding() {
        let m = square_mask(6, 1, 3);
        let tight = m.bounding_box(0).unwrap();
        assert_eq!(
            tight,
            BoundingBox {
                row_start: 1,
                row_end: 3,
                col_start: 1,
                col_end: 3,
            }
        );
        for (idx, &inside) in m.iter_indexed() {
            assert_eq!(tight.contains(idx), inside, "{idx:?}");
        }
        let padded = m.bounding_box(4).unwrap();
        assert_eq!(
            padded,
            BoundingBox {
                row_start: 0,
                row_end: 6,
                col_start: 0,
                col_end: 6,
            }
        );
        assert!(padded.contains(Index2::new(5, 5)));
        assert!(Grid::new(2, 2, false).unwrap().bounding_box(1).is_none());

        let field = Grid::from_fn(6, 6, |i| (i.row * 6 + i.col) as f64).unwrap();
        let sub = field.view_box(&tight).unwrap();
        assert_eq!(sub.as_slice(), &[7.0, 8.0, 13.0, 14.0]);
    }
}
