//! Reductions restricted to a mask.

use crate::error::PhaseError;
use crate::grid::Field;
use crate::mask::Mask;

fn require_pixels(mask: &Mask) -> Result<usize, PhaseError> {
    match mask.count() {
        0 => Err(PhaseError::InsufficientDomain {
            pixels: 0,
            required: 1,
        }),
        n => Ok(n),
    }
}

/// Mean of `field` over Ω.
pub fn masked_mean(field: &Field, mask: &Mask) -> Result<f64, PhaseError> {
    field.ensure_same_shape(mask, "field vs mask")?;
    let n = require_pixels(mask)?;
    let sum: f64 = field
        .as_slice()
        .iter()
        .zip(mask.as_slice())
        .filter(|(_, &m)| m)
        .map(|(v, _)| v)
        .sum();
    Ok(sum / n as f64)
}

/// Root-mean-square of `a - b` over Ω.
///
/// # Examples
///
/// ```
/// use phasekit_core::{masked_rmse, Grid};
///
/// let a = Grid::from_vec(1, 3, vec![1.0, 2.0, 100.0]).unwrap();
/// let b = Grid::from_vec(1, 3, vec![0.0, 0.0, 0.0]).unwrap();
/// let mask = Grid::from_vec(1, 3, vec![true, true, false]).unwrap();
/// let rms = masked_rmse(&a, &b, &mask).unwrap();
/// assert!((rms - 2.5f64.sqrt()).abs() < 1e-12);
/// ```
pub fn masked_rmse(a: &Field, b: &Field, mask: &Mask) -> Result<f64, PhaseError> {
    a.ensure_same_shape(b, "field vs field")?;
    a.ensure_same_shape(mask, "field vs mask")?;
    let n = require_pixels(mask)?;
    let sum_sq: f64 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .zip(mask.as_slice())
        .filter(|(_, &m)| m)
        .map(|((x, y), _)| (x - y) * (x - y))
        .sum();
    Ok((sum_sq / n as f64).sqrt())
}

/// Root-mean-square of `a - b` over Ω after removing the mean difference.
///
/// Insensitive to a constant offset (piston) between the two fields, which
/// is the natural error measure for phase reconstructions.
pub fn masked_piston_free_rmse(a: &Field, b: &Field, mask: &Mask) -> Result<f64, PhaseError> {
    let diff = a.zip_map(b, "field vs field", |x, y| x - y)?;
    let mean = masked_mean(&diff, mask)?;
    let n = mask.count();
    let sum_sq: f64 = diff
        .as_slice()
        .iter()
        .zip(mask.as_slice())
        .filter(|(_, &m)| m)
        .map(|(d, _)| (d - mean) * (d - mean))
        .sum();
    Ok((sum_sq / n as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn mean_ignores_outside_pixels() {
        let f = Grid::from_vec(2, 2, vec![1.0, 3.0, f64::NAN, 1e9]).unwrap();
        let m = Grid::from_vec(2, 2, vec![true, true, false, false]).unwrap();
        assert_eq!(masked_mean(&f, &m).unwrap(), 2.0);
    }

    #[test]
    fn empty_mask_is_rejected() {
        let f = Grid::zeros(2, 2).unwrap();
        let m = Grid::new(2, 2, false).unwrap();
        assert_eq!(
            masked_rmse(&f, &f, &m),
            Err(PhaseError::InsufficientDomain {
                pixels: 0,
                required: 1
            })
        );
    }

    #[test]
    fn piston_free_rmse_drops_constant_offset() {
        let a = Grid::from_fn(4, 4, |i| (i.row + i.col) as f64).unwrap();
        let b = a.map(|v| v + 7.5);
        let m = Grid::new(4, 4, true).unwrap();
        assert!((masked_rmse(&a, &b, &m).unwrap() - 7.5).abs() < 1e-12);
        assert!(masked_piston_free_rmse(&a, &b, &m).unwrap() < 1e-12);
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let a = Grid::zeros(2, 2).unwrap();
        let b = Grid::zeros(2, 3).unwrap();
        let m = Grid::new(2, 2, true).unwrap();
        assert!(matches!(
            masked_rmse(&a, &b, &m),
            Err(PhaseError::DimensionMismatch { .. })
        ));
    }
}
