//! Phase wrapping and unwrapping.
//!
//! - [`phwrap`] / [`wrap_field`] map phase into the principal interval
//!   (−π, π].
//! - [`itoh`], [`itoh_rows`] and [`itoh_cols`] are the line-integration
//!   baseline: exact for slow, residue-free phase and silently wrong
//!   otherwise.
//! - [`unwrap_ls`] is least-squares unwrapping over an arbitrary
//!   simply-connected domain, tolerant of isolated residues. It is built
//!   from [`wrapped_gradient`] and [`integrate_gradient`], which are public
//!   for integrating other gradient data.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod gradient;
pub mod integrate;
pub mod itoh;
pub mod least_squares;
pub mod wrap;

pub use gradient::{divergence, forward_gradient, residue, wrapped_gradient, Gradient};
pub use integrate::{integrate_gradient, integrate_periodic_grad};
pub use itoh::{itoh, itoh_cols, itoh_rows};
pub use least_squares::{unwrap_ls, LsConfig, Unwrapped, MIN_DOMAIN_PIXELS};
pub use wrap::{phwrap, wrap_field};
