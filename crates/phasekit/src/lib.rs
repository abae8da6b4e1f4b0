//! Phasekit: numerical primitives for 2D phase retrieval.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! phasekit sub-crates. For most users, adding `phasekit` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use phasekit::prelude::*;
//!
//! // A tilted phase on a disc of radius 12, far steeper than one wrap.
//! let mask = Grid::from_fn(32, 32, |i| {
//!     let (r, c) = (i.row as f64 - 15.5, i.col as f64 - 15.5);
//!     r * r + c * c <= 144.0
//! })
//! .unwrap();
//! let phase = Grid::from_fn(32, 32, |i| 1.3 * i.col as f64 - 0.4 * i.row as f64).unwrap();
//! let phase = phase.zip_map(&mask, "phase vs mask", |&v, &m| if m { v } else { 0.0 }).unwrap();
//! let wrapped = wrap_field(&phase);
//!
//! let out = unwrap_ls(&wrapped, &mask, &LsConfig::default()).unwrap();
//! assert!(out.report.is_converged());
//! let rms = masked_piston_free_rmse(&out.phase, &phase, &mask).unwrap();
//! assert!(rms < 1e-6);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `phasekit-core` | `Grid`, masks, directions, masked statistics, errors |
//! | [`contour`] | `phasekit-contour` | Edge detection and clockwise border tracing |
//! | [`solver`] | `phasekit-solver` | SOR Poisson solver and its configuration |
//! | [`unwrap`] | `phasekit-unwrap` | Wrapping, Itoh and least-squares unwrapping |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grids, masks and shared error types (`phasekit-core`).
///
/// [`types::Field`] and [`types::Mask`] are the data every other module
/// consumes; [`types::PhaseError`] is the single error type.
pub use phasekit_core as types;

/// Boundary extraction (`phasekit-contour`).
///
/// [`contour::find_cw_border`] orders the edge pixels of a simply-connected
/// region into a clockwise [`contour::Contour`].
pub use phasekit_contour as contour;

/// Masked Poisson solver (`phasekit-solver`).
///
/// [`solver::membrane_sor`] solves `Δu = f` with zero Dirichlet data;
/// [`solver::membrane_sor_in_place`] takes the Dirichlet data from `u`.
pub use phasekit_solver as solver;

/// Phase wrapping and unwrapping (`phasekit-unwrap`).
///
/// [`unwrap::unwrap_ls`] for irregular or noisy data, [`unwrap::itoh`] as
/// the line-integration baseline.
pub use phasekit_unwrap as unwrap;

/// Common imports for typical phasekit usage.
///
/// ```rust
/// use phasekit::prelude::*;
/// ```
pub mod prelude {
    // Data
    pub use phasekit_core::{Field, Grid, Index2, Mask};

    // Errors
    pub use phasekit_core::PhaseError;

    // Statistics
    pub use phasekit_core::{masked_mean, masked_piston_free_rmse, masked_rmse};

    // Contours
    pub use phasekit_contour::{find_cw_border, Contour};

    // Solver
    pub use phasekit_solver::{
        interior, membrane_sor, membrane_sor_in_place, Relaxation, SolveReport, SolveStatus,
        SorConfig,
    };

    // Unwrapping
    pub use phasekit_unwrap::{
        itoh, itoh_cols, itoh_rows, phwrap, unwrap_ls, wrap_field, LsConfig, Unwrapped,
    };
}
