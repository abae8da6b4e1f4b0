//! Discrete differential operators.

use phasekit_core::{Field, Grid, Index2};

/// 5-point discrete Laplacian.
///
/// Evaluated at every pixel whose four neighbours lie on the grid; frame
/// pixels are set to 0. Applied to a solution of
/// [`membrane_sor`](crate::membrane_sor) it recovers the source on the free
/// pixels away from the frame.
///
/// ```
/// use phasekit_core::Grid;
/// use phasekit_solver::laplacian;
///
/// // u = r² + c² has Δu = 4 everywhere.
/// let u = Grid::from_fn(5, 5, |i| (i.row * i.row + i.col * i.col) as f64).unwrap();
/// let lap = laplacian(&u);
/// assert_eq!(lap[(2, 2)], 4.0);
/// assert_eq!(lap[(0, 2)], 0.0);
/// ```
pub fn laplacian(u: &Field) -> Field {
    let (rows, cols) = u.shape();
    let mut out = Grid::zeros_like(u);
    if rows < 3 || cols < 3 {
        return out;
    }
    for row in 1..rows - 1 {
        for col in 1..cols - 1 {
            out[Index2::new(row, col)] = u[(row - 1, col)] + u[(row + 1, col)]
                + u[(row, col - 1)]
                + u[(row, col + 1)]
                - 4.0 * u[(row, col)];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_field_is_harmonic() {
        let u = Grid::from_fn(6, 7, |i| 3.0 * i.row as f64 - 2.0 * i.col as f64 + 1.0).unwrap();
        assert!(laplacian(&u).max_abs() < 1e-12);
    }

    #[test]
    fn point_source_stencil() {
        let mut u = Field::zeros(5, 5).unwrap();
        u[(2, 2)] = 1.0;
        let lap = laplacian(&u);
        assert_eq!(lap[(2, 2)], -4.0);
        assert_eq!(lap[(1, 2)], 1.0);
        assert_eq!(lap[(2, 3)], 1.0);
        assert_eq!(lap[(1, 1)], 0.0);
    }

    #[test]
    fn thin_grids_are_all_frame() {
        let u = Grid::new(2, 9, 5.0).unwrap();
        assert_eq!(laplacian(&u).max_abs(), 0.0);
    }
}
