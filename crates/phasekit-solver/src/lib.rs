//! Iterative Poisson solver for masked grids.
//!
//! [`membrane_sor`] and [`membrane_sor_in_place`] solve `Δu = f` over the
//! free pixels of a mask by successive over-relaxation, holding every other
//! pixel at its Dirichlet value. Running out of sweeps is a soft outcome
//! reported through [`SolveReport`], never an error.
//!
//! Configuration goes through [`SorConfig`] and its validating builder.
//! With the `serde` feature the configuration types implement
//! `Serialize`/`Deserialize`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod sor;
pub mod stencil;

pub use config::{Relaxation, SorConfig, SorConfigBuilder, SweepOrder, MAX_OPTIMAL_OMEGA};
pub use sor::{
    interior, membrane_sor, membrane_sor_in_place, poisson_residual, SolveReport, SolveStatus,
};
pub use stencil::laplacian;
