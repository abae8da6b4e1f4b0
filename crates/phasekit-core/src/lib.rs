//! Core types for the phasekit workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! dense [`Grid`] container used for phase fields and masks, the
//! [`Direction`] set used for 4-connected neighbour tests, masked statistics,
//! and the [`PhaseError`] taxonomy shared by every other crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod grid;
pub mod mask;
pub mod stats;

pub use direction::{Direction, DIRECTIONS};
pub use error::PhaseError;
pub use grid::{Field, Grid, Index2};
pub use mask::{BoundingBox, Mask};
pub use stats::{masked_mean, masked_piston_free_rmse, masked_rmse};
