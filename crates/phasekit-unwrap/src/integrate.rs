//! Least-squares integration of gradient fields.

use crate::gradient::{divergence, Gradient};
use phasekit_contour::{find_cw_border, Contour};
use phasekit_core::{Field, Grid, Index2, Mask, PhaseError};
use phasekit_solver::{interior, membrane_sor_in_place, SolveReport, SorConfig};

/// Integrate differences sampled around a closed loop.
///
/// `grad[k]` is the step from sample `k` to sample `k + 1`, the last entry
/// closing the loop back to sample 0. The closure error (the sum of all
/// steps) is spread evenly over the steps, which is the least-squares
/// solution; the result has zero mean.
///
/// ```
/// use phasekit_unwrap::integrate_periodic_grad;
///
/// let values = [1.0, 3.0, 2.0, 6.0];
/// let steps = [2.0, -1.0, 4.0, -5.0];
/// let restored = integrate_periodic_grad(&steps);
/// let mean = 3.0;
/// for (r, v) in restored.iter().zip(values) {
///     assert!((r - (v - mean)).abs() < 1e-12);
/// }
/// ```
pub fn integrate_periodic_grad(grad: &[f64]) -> Vec<f64> {
    let n = grad.len();
    if n == 0 {
        return Vec::new();
    }
    let closure = grad.iter().sum::<f64>() / n as f64;
    let mut out = Vec::with_capacity(n);
    let mut acc = 0.0;
    for &g in grad {
        out.push(acc);
        acc += g - closure;
    }
    let mean = out.iter().sum::<f64>() / n as f64;
    for v in &mut out {
        *v -= mean;
    }
    out
}

/// Least-squares integration of a 2D gradient over a simply-connected Ω.
///
/// The field on the edge pixels of Ω comes from [`integrate_periodic_grad`]
/// along the clockwise border; a pixel the border visits more than once gets
/// the mean of its visits. The interior is then the solution of
/// `Δu = divergence(gradient)` with those edge values as Dirichlet data.
/// Pixels outside Ω are 0.
///
/// `gradient` entries between pixel pairs that leave Ω must be zero, as
/// produced by [`forward_gradient`](crate::forward_gradient) and
/// [`wrapped_gradient`](crate::wrapped_gradient).
///
/// # Errors
///
/// - [`PhaseError::DimensionMismatch`] if the gradient and mask shapes differ.
/// - [`PhaseError::InvalidConfiguration`] if `solver` fails validation.
/// - [`PhaseError::InsufficientDomain`] if Ω is empty.
/// - [`PhaseError::StructuralBoundary`] if Ω is not a single 4-connected
///   region without holes.
pub fn integrate_gradient(
    gradient: &Gradient,
    mask: &Mask,
    solver: &SorConfig,
) -> Result<(Field, SolveReport), PhaseError> {
    gradient.dx.ensure_same_shape(mask, "gradient vs mask")?;
    gradient.dy.ensure_same_shape(mask, "gradient vs mask")?;
    solver.validate()?;
    let pixels = mask.count();
    if pixels == 0 {
        return Err(PhaseError::InsufficientDomain {
            pixels,
            required: 1,
        });
    }

    let contour = find_cw_border(mask, false)?;
    let mut u = contour_values(gradient, mask, &contour)?;
    let free = interior(mask);
    let source = divergence(gradient);

    log::debug!(
        "integrating gradient over {pixels} pixels: {} on the border, {} free",
        contour.len(),
        free.count()
    );
    let report = membrane_sor_in_place(&mut u, &source, &free, solver)?;
    Ok((u, report))
}

/// Border values of the integrated field, zero elsewhere.
fn contour_values(
    gradient: &Gradient,
    mask: &Mask,
    contour: &Contour,
) -> Result<Field, PhaseError> {
    let steps = contour
        .steps()
        .map(|(a, b)| path_increment(gradient, mask, a, b))
        .collect::<Result<Vec<f64>, PhaseError>>()?;
    let values = integrate_periodic_grad(&steps);

    let mut sum = Field::zeros_like(mask);
    let mut visits: Grid<u32> = mask.map(|_| 0);
    for (p, v) in contour.iter().zip(values) {
        sum[p] += v;
        visits[p] += 1;
    }
    sum.zip_map(&visits, "sum vs visits", |&s, &n| {
        if n > 0 {
            s / n as f64
        } else {
            0.0
        }
    })
}

/// Increment between consecutive border pixels. A diagonal step goes
/// through whichever shared neighbour lies in Ω.
fn path_increment(
    gradient: &Gradient,
    mask: &Mask,
    from: Index2,
    to: Index2,
) -> Result<f64, PhaseError> {
    if from == to {
        return Ok(0.0);
    }
    if let Some(d) = gradient.step(from, to) {
        return Ok(d);
    }
    if from.touches(to) {
        for via in [Index2::new(from.row, to.col), Index2::new(to.row, from.col)] {
            if mask.is_inside(via) {
                if let (Some(a), Some(b)) = (gradient.step(from, via), gradient.step(via, to)) {
                    return Ok(a + b);
                }
            }
        }
    }
    Err(PhaseError::StructuralBoundary {
        reason: format!(
            "no in-domain path between border pixels ({}, {}) and ({}, {})",
            from.row, from.col, to.row, to.col
        ),
    })
}
