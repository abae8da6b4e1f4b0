//! Benchmark profiles for the phasekit workspace.
//!
//! Provides pre-built wrapped-phase problems for benchmarking and examples:
//!
//! - [`reference_profile`]: 100x100 grid with a disc aperture of radius 45
//! - [`stress_profile`]: 300x300 grid with a disc aperture of radius 145
//! - [`synthetic_response`]: membrane response plus tilt on an aperture

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use phasekit_core::{Field, Mask, PhaseError};
use phasekit_solver::{interior, membrane_sor, SorConfig};
use phasekit_test_utils::{apply_mask, circle_mask, disc_source, linear_phase};
use phasekit_unwrap::wrap_field;

/// A wrapped-phase problem with its ground truth.
#[derive(Clone, Debug)]
pub struct Profile {
    /// Domain Ω.
    pub mask: Mask,
    /// Unwrapped phase, 0 outside Ω.
    pub phase: Field,
    /// `phase` wrapped into (−π, π], 0 outside Ω.
    pub wrapped: Field,
}

/// Response of a membrane clamped on the edge of `mask` to a disc-shaped
/// load, scaled by `scale` and tilted by `tilt` radians per pixel along the
/// columns. Zero outside Ω.
pub fn synthetic_response(mask: &Mask, scale: f64, tilt: f64) -> Result<Field, PhaseError> {
    let shape = mask.shape();
    let (cr, cc) = ((shape.0 as f64 - 1.0) / 2.0, (shape.1 as f64 - 1.0) / 2.0);
    let radius = shape.0.min(shape.1) as f64 / 6.0;
    let source = disc_source(shape, cr + radius / 2.0, cc - radius / 3.0, radius);
    let (u, report) = membrane_sor(&source, &interior(mask), &SorConfig::default())?;
    if !report.is_converged() {
        log::warn!("synthetic response did not converge: {report:?}");
    }
    let ramp = linear_phase(shape, cr, cc, 0.0, tilt);
    let phase = u.zip_map(&ramp, "response vs tilt", |a, b| scale * a + b)?;
    Ok(apply_mask(&phase, mask))
}

fn profile(n: usize, radius: f64, scale: f64) -> Result<Profile, PhaseError> {
    let c = (n as f64 - 1.0) / 2.0;
    let mask = circle_mask((n, n), c, c, radius);
    let phase = synthetic_response(&mask, scale, 1.0)?;
    let wrapped = apply_mask(&wrap_field(&phase), &mask);
    Ok(Profile {
        mask,
        phase,
        wrapped,
    })
}

/// 100x100 grid, disc aperture of radius 45.
pub fn reference_profile() -> Result<Profile, PhaseError> {
    profile(100, 45.0, 0.05)
}

/// 300x300 grid, disc aperture of radius 145.
pub fn stress_profile() -> Result<Profile, PhaseError> {
    profile(300, 145.0, 0.005)
}
