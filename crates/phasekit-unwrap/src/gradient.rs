//! Masked forward differences and their divergence.
//!
//! A difference is only defined between two adjacent pixels that are both
//! inside Ω; every other entry of a [`Gradient`] is zero. With that
//! convention the backward-difference [`divergence`] of a masked gradient
//! is exactly the right-hand side of the Neumann least-squares problem on
//! Ω, and on pixels whose four neighbours lie in Ω it equals the 5-point
//! Laplacian of the integrated field.

use crate::wrap::phwrap;
use phasekit_core::{Field, Index2, Mask, PhaseError};

/// Forward differences of a field along both grid axes.
///
/// `dx[r, c]` approximates `φ[r, c+1] − φ[r, c]` (x runs along columns) and
/// `dy[r, c]` approximates `φ[r+1, c] − φ[r, c]` (y runs along rows).
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    /// Column-direction differences.
    pub dx: Field,
    /// Row-direction differences.
    pub dy: Field,
}

impl Gradient {
    /// Pair two difference fields of equal shape.
    ///
    /// # Errors
    ///
    /// [`PhaseError::DimensionMismatch`] if the shapes differ.
    pub fn new(dx: Field, dy: Field) -> Result<Self, PhaseError> {
        dx.ensure_same_shape(&dy, "dx vs dy")?;
        Ok(Self { dx, dy })
    }

    /// `(rows, cols)` of both components.
    pub fn shape(&self) -> (usize, usize) {
        self.dx.shape()
    }

    /// Difference accumulated stepping from `from` to the 4-neighbour `to`.
    ///
    /// Returns `None` when the pixels are not 4-neighbours.
    pub fn step(&self, from: Index2, to: Index2) -> Option<f64> {
        if from.row == to.row {
            if to.col == from.col + 1 {
                return Some(self.dx[from]);
            }
            if from.col == to.col + 1 {
                return Some(-self.dx[to]);
            }
        } else if from.col == to.col {
            if to.row == from.row + 1 {
                return Some(self.dy[from]);
            }
            if from.row == to.row + 1 {
                return Some(-self.dy[to]);
            }
        }
        None
    }
}

fn masked_forward(
    field: &Field,
    mask: &Mask,
    diff: impl Fn(f64) -> f64,
) -> Result<Gradient, PhaseError> {
    field.ensure_same_shape(mask, "field vs mask")?;
    let (rows, cols) = field.shape();
    let mut dx = Field::zeros_like(field);
    let mut dy = Field::zeros_like(field);
    for row in 0..rows {
        for col in 0..cols {
            let p = Index2::new(row, col);
            if !mask[p] {
                continue;
            }
            if col + 1 < cols && mask[(row, col + 1)] {
                dx[p] = diff(field[(row, col + 1)] - field[p]);
            }
            if row + 1 < rows && mask[(row + 1, col)] {
                dy[p] = diff(field[(row + 1, col)] - field[p]);
            }
        }
    }
    Ok(Gradient { dx, dy })
}

/// Forward differences of `field` between pixel pairs inside `mask`.
///
/// # Errors
///
/// [`PhaseError::DimensionMismatch`] if the shapes differ.
pub fn forward_gradient(field: &Field, mask: &Mask) -> Result<Gradient, PhaseError> {
    masked_forward(field, mask, |d| d)
}

/// Wrapped forward differences `phwrap(ψ[n] − ψ[p])` between pixel pairs
/// inside `mask`.
///
/// For a phase whose true steps are all smaller than π this is the exact
/// gradient of the unwrapped phase.
///
/// # Errors
///
/// [`PhaseError::DimensionMismatch`] if the shapes differ.
pub fn wrapped_gradient(wrapped: &Field, mask: &Mask) -> Result<Gradient, PhaseError> {
    masked_forward(wrapped, mask, phwrap)
}

/// Backward-difference divergence `dx[r,c] − dx[r,c−1] + dy[r,c] − dy[r−1,c]`,
/// with off-grid terms taken as zero.
pub fn divergence(gradient: &Gradient) -> Field {
    let (rows, cols) = gradient.shape();
    let mut div = Field::zeros_like(&gradient.dx);
    for row in 0..rows {
        for col in 0..cols {
            let p = Index2::new(row, col);
            let mut v = gradient.dx[p] + gradient.dy[p];
            if col > 0 {
                v -= gradient.dx[(row, col - 1)];
            }
            if row > 0 {
                v -= gradient.dy[(row - 1, col)];
            }
            div[p] = v;
        }
    }
    div
}

/// Sum of the curl of `gradient` around the 2x2 block with top-left corner
/// `(row, col)`, in units of 2π.
///
/// Non-zero (±1) values mark residues: points around which the wrapped
/// gradient does not integrate to zero.
pub fn residue(gradient: &Gradient, row: usize, col: usize) -> Option<i32> {
    let (rows, cols) = gradient.shape();
    if row + 1 >= rows || col + 1 >= cols {
        return None;
    }
    let circulation = gradient.dx[(row, col)] + gradient.dy[(row, col + 1)]
        - gradient.dx[(row + 1, col)]
        - gradient.dy[(row, col)];
    Some((circulation / std::f64::consts::TAU).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasekit_core::Grid;
    use std::f64::consts::PI;

    fn full(rows: usize, cols: usize) -> Mask {
        Grid::new(rows, cols, true).unwrap()
    }

    #[test]
    fn forward_differences_of_plane() {
        let f = Grid::from_fn(4, 5, |i| 2.0 * i.row as f64 + 0.5 * i.col as f64).unwrap();
        let g = forward_gradient(&f, &full(4, 5)).unwrap();
        assert_eq!(g.dx[(1, 1)], 0.5);
        assert_eq!(g.dy[(1, 1)], 2.0);
        // Last column / row have no forward neighbour.
        assert_eq!(g.dx[(1, 4)], 0.0);
        assert_eq!(g.dy[(3, 1)], 0.0);
    }

    #[test]
    fn pairs_leaving_mask_are_zero() {
        let f = Grid::from_fn(4, 4, |i| (i.row * 4 + i.col) as f64).unwrap();
        let mut m = full(4, 4);
        m[(1, 2)] = false;
        let g = forward_gradient(&f, &m).unwrap();
        assert_eq!(g.dx[(1, 1)], 0.0);
        assert_eq!(g.dx[(1, 2)], 0.0);
        assert_eq!(g.dy[(0, 2)], 0.0);
        assert_eq!(g.dy[(1, 2)], 0.0);
        assert_eq!(g.dx[(1, 0)], 1.0);
    }

    #[test]
    fn wrapped_gradient_recovers_slow_phase() {
        let phase = Grid::from_fn(6, 6, |i| 1.1 * i.row as f64 - 0.7 * i.col as f64).unwrap();
        let wrapped = phase.map(|&v| phwrap(v));
        let g = wrapped_gradient(&wrapped, &full(6, 6)).unwrap();
        assert!((g.dy[(2, 3)] - 1.1).abs() < 1e-12);
        assert!((g.dx[(2, 3)] + 0.7).abs() < 1e-12);
    }

    #[test]
    fn divergence_is_laplacian_inside() {
        let f = Grid::from_fn(5, 5, |i| (i.row * i.row + 2 * i.col * i.col) as f64).unwrap();
        let g = forward_gradient(&f, &full(5, 5)).unwrap();
        let div = divergence(&g);
        // Δ(r² + 2c²) = 2 + 4
        assert_eq!(div[(2, 2)], 6.0);
    }

    #[test]
    fn divergence_sums_to_zero_over_domain() {
        // Each masked difference enters once with + and once with −.
        let f = Grid::from_fn(6, 7, |i| ((i.row * 7 + i.col) as f64).sin()).unwrap();
        let m = Grid::from_fn(6, 7, |i| (i.row + i.col) % 5 != 0).unwrap();
        let div = divergence(&forward_gradient(&f, &m).unwrap());
        let total: f64 = div.as_slice().iter().sum();
        assert!(total.abs() < 1e-12);
    }

    #[test]
    fn step_follows_sign_convention() {
        let f = Grid::from_fn(3, 3, |i| (10 * i.row + i.col) as f64).unwrap();
        let g = forward_gradient(&f, &full(3, 3)).unwrap();
        let a = Index2::new(1, 1);
        assert_eq!(g.step(a, Index2::new(1, 2)), Some(1.0));
        assert_eq!(g.step(a, Index2::new(1, 0)), Some(-1.0));
        assert_eq!(g.step(a, Index2::new(2, 1)), Some(10.0));
        assert_eq!(g.step(a, Index2::new(0, 1)), Some(-10.0));
        assert_eq!(g.step(a, Index2::new(2, 2)), None);
        assert_eq!(g.step(a, a), None);
    }

    #[test]
    fn residue_block_is_detected() {
        let mut w = Field::zeros(4, 4).unwrap();
        w[(1, 1)] = 0.0;
        w[(1, 2)] = PI / 2.0;
        w[(2, 1)] = -PI / 2.0;
        w[(2, 2)] = PI;
        let g = wrapped_gradient(&w, &full(4, 4)).unwrap();
        assert_eq!(residue(&g, 1, 1).map(i32::abs), Some(1));
        assert_eq!(residue(&g, 3, 3), None);
        let smooth = wrapped_gradient(&Field::zeros(4, 4).unwrap(), &full(4, 4)).unwrap();
        assert_eq!(residue(&smooth, 1, 1), Some(0));
    }

    #[test]
    fn shape_mismatch() {
        let f = Field::zeros(3, 3).unwrap();
        assert!(matches!(
            wrapped_gradient(&f, &full(3, 4)),
            Err(PhaseError::DimensionMismatch { .. })
        ));
        assert!(Gradient::new(Field::zeros(2, 2).unwrap(), Field::zeros(2, 3).unwrap()).is_err());
    }
}
