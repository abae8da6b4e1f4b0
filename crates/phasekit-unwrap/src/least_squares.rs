//! Least-squares 2D phase unwrapping on a masked domain.
//!
//! The wrapped forward differences of ψ estimate the true phase gradient.
//! Residues make that estimate non-conservative; integrating it in the
//! least-squares sense keeps only its curl-free part. The integration is
//! [`integrate_gradient`]: periodic 1D integration along the border of Ω
//! followed by a Poisson solve whose source is the divergence of the
//! wrapped gradient.

use crate::gradient::wrapped_gradient;
use crate::integrate::integrate_gradient;
use phasekit_core::{Field, Mask, PhaseError};
use phasekit_solver::{SolveReport, SorConfig};

/// Smallest domain [`unwrap_ls`] accepts.
pub const MIN_DOMAIN_PIXELS: usize = 4;

/// Options for [`unwrap_ls`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LsConfig {
    /// Shift the result by the circular mean of `ψ − φ` over Ω so that
    /// re-wrapping it reproduces the input. When `false` the result keeps the
    /// integration's own constant (zero mean along the border).
    pub restore_piston: bool,
    /// Poisson solver settings for the interior.
    pub solver: SorConfig,
}

impl Default for LsConfig {
    fn default() -> Self {
        Self {
            restore_piston: true,
            solver: SorConfig::default(),
        }
    }
}

impl LsConfig {
    /// Set `restore_piston`.
    pub fn with_restore_piston(mut self, restore: bool) -> Self {
        self.restore_piston = restore;
        self
    }

    /// Replace the solver settings.
    pub fn with_solver(mut self, solver: SorConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// Result of [`unwrap_ls`].
#[derive(Clone, Debug)]
pub struct Unwrapped {
    /// Unwrapped phase; 0 outside Ω.
    pub phase: Field,
    /// Diagnostics of the interior Poisson solve.
    pub report: SolveReport,
    /// Constant added by piston restoration (0 when disabled).
    pub piston: f64,
}

/// Unwrap `wrapped` over the domain `mask` by least-squares integration of
/// its wrapped gradient.
///
/// A solver that runs out of sweeps is not an error; inspect
/// [`Unwrapped::report`].
///
/// # Errors
///
/// - [`PhaseError::DimensionMismatch`] if `wrapped` and `mask` differ in shape.
/// - [`PhaseError::InsufficientDomain`] if Ω has fewer than
///   [`MIN_DOMAIN_PIXELS`] pixels.
/// - [`PhaseError::InvalidConfiguration`] if the solver settings are invalid.
/// - [`PhaseError::StructuralBoundary`] if Ω is not a single 4-connected
///   region without holes.
///
/// # Examples
///
/// ```
/// use phasekit_core::Grid;
/// use phasekit_unwrap::{phwrap, unwrap_ls, LsConfig};
///
/// let mask = Grid::from_fn(12, 12, |i| (1..11).contains(&i.row) && (1..11).contains(&i.col)).unwrap();
/// let phase = Grid::from_fn(12, 12, |i| 0.8 * i.row as f64 + 0.5 * i.col as f64).unwrap();
/// let wrapped = phase.map(|&v| phwrap(v));
///
/// let out = unwrap_ls(&wrapped, &mask, &LsConfig::default()).unwrap();
/// let step = out.phase[(5, 6)] - out.phase[(5, 5)];
/// assert!((step - 0.5).abs() < 1e-6);
/// ```
pub fn unwrap_ls(wrapped: &Field, mask: &Mask, config: &LsConfig) -> Result<Unwrapped, PhaseError> {
    wrapped.ensure_same_shape(mask, "wrapped phase vs mask")?;
    config.solver.validate()?;
    let pixels = mask.count();
    if pixels < MIN_DOMAIN_PIXELS {
        return Err(PhaseError::InsufficientDomain {
            pixels,
            required: MIN_DOMAIN_PIXELS,
        });
    }

    let gradient = wrapped_gradient(wrapped, mask)?;
    let (mut phase, report) = integrate_gradient(&gradient, mask, &config.solver)?;

    let piston = if config.restore_piston {
        let piston = circular_mean_offset(wrapped, &phase, mask);
        for (v, &inside) in phase.as_mut_slice().iter_mut().zip(mask.as_slice()) {
            if inside {
                *v += piston;
            }
        }
        piston
    } else {
        0.0
    };

    log::debug!(
        "least-squares unwrap over {pixels} pixels: {} sweeps ({:?}), piston {piston:.4}",
        report.iterations,
        report.status
    );
    Ok(Unwrapped {
        phase,
        report,
        piston,
    })
}

/// `atan2(Σ sin(ψ − φ), Σ cos(ψ − φ))` over Ω.
fn circular_mean_offset(wrapped: &Field, phase: &Field, mask: &Mask) -> f64 {
    let (s, c) = wrapped
        .as_slice()
        .iter()
        .zip(phase.as_slice())
        .zip(mask.as_slice())
        .filter(|(_, &m)| m)
        .fold((0.0, 0.0), |(s, c), ((&w, &p), _)| {
            let d = w - p;
            (s + d.sin(), c + d.cos())
        });
    s.atan2(c)
}
