//! Boundary extraction for masked grids.
//!
//! Finds the pixels of a domain Ω (or of its complement) that border the
//! other side, and orders them into a single clockwise closed [`Contour`].
//!
//! # Pipeline
//!
//! 1. [`find_edges`] scans the grid once and builds an [`EdgeMap`]: for each
//!    of the four [`Direction`](phasekit_core::Direction)s, the pixels whose
//!    neighbour across that direction lies on the other side.
//! 2. [`find_cw_border`] walks those edge segments with the finite-state
//!    machine in [`walker`], keeping the traced region on the right-hand side.
//!
//! Only single, simply-connected 4-connected regions have a traceable
//! border; anything else is a
//! [`PhaseError::StructuralBoundary`](phasekit_core::PhaseError::StructuralBoundary).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod border;
pub mod edges;
pub mod walker;

pub use border::{find_cw_border, Contour};
pub use edges::{find_edges, find_set_edges, EdgeMap, Region};
pub use walker::{Turn, WalkState};
