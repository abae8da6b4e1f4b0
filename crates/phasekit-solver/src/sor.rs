//! Successive over-relaxation for the masked Poisson equation.
//!
//! Solves `Δu = f` on the free pixels of a mask, with the 5-point stencil
//!
//! ```text
//! Δu(i,j) = u(i-1,j) + u(i+1,j) + u(i,j-1) + u(i,j+1) - 4 u(i,j)
//! ```
//!
//! Pixels outside the free mask keep the value the caller put in `u` and act
//! as Dirichlet data. Neighbours beyond the grid frame read as zero.
//!
//! Each sweep updates free pixels in place (Gauss-Seidel), so a pixel sees
//! neighbours already updated earlier in the same sweep:
//!
//! ```text
//! u_gs = (sum of 4 neighbours - f) / 4
//! u   <- u + ω (u_gs - u)
//! ```

use crate::config::{SorConfig, SweepOrder};
use phasekit_core::{Field, Mask, PhaseError};

/// Number of sweeps between trace-level progress messages.
const TRACE_EVERY: usize = 100;

/// How a solve ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// The per-sweep maximum change fell below the tolerance.
    Converged,
    /// The sweep budget ran out first. The field holds the last iterate.
    MaxIterationsReached,
    /// A non-finite value appeared; the field is not meaningful.
    Diverged,
}

/// Diagnostics of one solve, returned alongside the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveReport {
    /// How the solve ended.
    pub status: SolveStatus,
    /// Sweeps performed.
    pub iterations: usize,
    /// Largest absolute change of a free pixel during the last sweep.
    pub max_change: f64,
    /// Relaxation factor used.
    pub omega: f64,
    /// Number of free pixels.
    pub free_pixels: usize,
}

impl SolveReport {
    /// `true` if the tolerance was met.
    pub fn is_converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }
}

/// Solve `Δu = source` on the free pixels of `free` with `u = 0` everywhere
/// else.
///
/// Returns the solution and the solve diagnostics. Running out of sweeps is
/// not an error: the last iterate is returned with
/// [`SolveStatus::MaxIterationsReached`].
///
/// # Errors
///
/// - [`PhaseError::DimensionMismatch`] if `source` and `free` differ in shape.
/// - [`PhaseError::InvalidConfiguration`] if `config` fails validation.
///
/// # Examples
///
/// ```
/// use phasekit_core::Grid;
/// use phasekit_solver::{membrane_sor, SorConfig};
///
/// // One free pixel with zero neighbours: u = -f / 4.
/// let source = Grid::from_fn(3, 3, |i| if (i.row, i.col) == (1, 1) { 4.0 } else { 0.0 }).unwrap();
/// let free = source.map(|&v| v != 0.0);
/// let cfg = SorConfig::builder().omega(1.0).build().unwrap();
/// let (u, report) = membrane_sor(&source, &free, &cfg).unwrap();
/// assert!(report.is_converged());
/// assert!((u[(1, 1)] + 1.0).abs() < 1e-12);
/// ```
pub fn membrane_sor(
    source: &Field,
    free: &Mask,
    config: &SorConfig,
) -> Result<(Field, SolveReport), PhaseError> {
    let mut u = Field::zeros_like(source);
    let report = membrane_sor_in_place(&mut u, source, free, config)?;
    Ok((u, report))
}

/// Solve `Δu = source` on the free pixels of `free`, in place.
///
/// Values of `u` outside `free` are Dirichlet data and are never written;
/// values inside `free` are the initial guess and are overwritten.
///
/// # Errors
///
/// - [`PhaseError::DimensionMismatch`] if `u`, `source` and `free` differ in
///   shape.
/// - [`PhaseError::InvalidConfiguration`] if `config` fails validation.
pub fn membrane_sor_in_place(
    u: &mut Field,
    source: &Field,
    free: &Mask,
    config: &SorConfig,
) -> Result<SolveReport, PhaseError> {
    config.validate()?;
    u.ensure_same_shape(source, "field vs source")?;
    u.ensure_same_shape(free, "field vs free mask")?;

    let (rows, cols) = u.shape();
    let omega = config.relaxation.omega(rows, cols);
    let order = sweep_order(free, config.order);

    if order.is_empty() {
        log::debug!("SOR on {rows}x{cols}: no free pixels, nothing to solve");
        return Ok(SolveReport {
            status: SolveStatus::Converged,
            iterations: 0,
            max_change: 0.0,
            omega,
            free_pixels: 0,
        });
    }

    let f = source.as_slice();
    let data = u.as_mut_slice();
    let mut max_change = f64::INFINITY;
    let mut status = SolveStatus::MaxIterationsReached;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        max_change = sweep(data, f, rows, cols, &order, omega);

        if !max_change.is_finite() {
            status = SolveStatus::Diverged;
            break;
        }
        if max_change < config.tolerance {
            status = SolveStatus::Converged;
            break;
        }
        if iterations % TRACE_EVERY == 0 {
            log::trace!("SOR sweep {iterations}: max change {max_change:.3e}");
        }
    }

    match status {
        SolveStatus::Converged => log::debug!(
            "SOR converged on {rows}x{cols} ({} free) after {iterations} sweeps, \
             max change {max_change:.3e}, omega {omega:.4}",
            order.len()
        ),
        SolveStatus::MaxIterationsReached => log::warn!(
            "SOR stopped after {iterations} sweeps without meeting tolerance {:.1e} \
             (max change {max_change:.3e})",
            config.tolerance
        ),
        SolveStatus::Diverged => log::warn!(
            "SOR produced a non-finite value after {iterations} sweeps; check source and boundary data"
        ),
    }

    Ok(SolveReport {
        status,
        iterations,
        max_change,
        omega,
        free_pixels: order.len(),
    })
}

/// Flat offsets of the free pixels in visiting order.
fn sweep_order(free: &Mask, order: SweepOrder) -> Vec<usize> {
    let cols = free.cols();
    let free_offsets = free
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, &m)| m)
        .map(|(i, _)| i);
    match order {
        SweepOrder::Lexicographic => free_offsets.collect(),
        SweepOrder::RedBlack => {
            let (mut red, black): (Vec<usize>, Vec<usize>) =
                free_offsets.partition(|&i| (i / cols + i % cols) % 2 == 0);
            red.extend(black);
            red
        }
    }
}

/// One Gauss-Seidel SOR sweep; returns the largest absolute change.
fn sweep(u: &mut [f64], f: &[f64], rows: usize, cols: usize, order: &[usize], omega: f64) -> f64 {
    let mut max_change = 0.0f64;
    for &i in order {
        let gs = (neighbour_sum(u, rows, cols, i) - f[i]) / 4.0;
        let delta = omega * (gs - u[i]);
        u[i] += delta;
        let change = delta.abs();
        // NaN never compares greater, so carry it explicitly.
        if change > max_change || change.is_nan() {
            max_change = change;
        }
    }
    max_change
}

/// Sum of the four neighbours of flat offset `i`; off-grid neighbours are 0.
#[inline]
pub(crate) fn neighbour_sum(u: &[f64], rows: usize, cols: usize, i: usize) -> f64 {
    let r = i / cols;
    let c = i % cols;
    let mut sum = 0.0;
    if r > 0 {
        sum += u[i - cols];
    }
    if r + 1 < rows {
        sum += u[i + cols];
    }
    if c > 0 {
        sum += u[i - 1];
    }
    if c + 1 < cols {
        sum += u[i + 1];
    }
    sum
}

/// Largest `|Δu − source|` over the free pixels, with the same boundary
/// treatment as the solver.
///
/// # Errors
///
/// [`PhaseError::DimensionMismatch`] if the shapes differ.
pub fn poisson_residual(u: &Field, source: &Field, free: &Mask) -> Result<f64, PhaseError> {
    u.ensure_same_shape(source, "field vs source")?;
    u.ensure_same_shape(free, "field vs free mask")?;
    let (rows, cols) = u.shape();
    let data = u.as_slice();
    Ok(free
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, &m)| m)
        .map(|(i, _)| {
            (neighbour_sum(data, rows, cols, i) - 4.0 * data[i] - source.as_slice()[i]).abs()
        })
        .fold(0.0, f64::max))
}

/// Mark the pixels of `mask` whose four neighbours are all inside `mask`.
///
/// This is the usual free set when `u` carries Dirichlet values on the edge
/// pixels of a domain.
pub fn interior(mask: &Mask) -> Mask {
    let mut inner = mask.clone();
    for (idx, &inside) in mask.iter_indexed() {
        if inside && !mask.open_sides(idx).is_empty() {
            inner[idx] = false;
        }
    }
    inner
}
