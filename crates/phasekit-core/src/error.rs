//! Error types for the phasekit workspace.
//!
//! One enum covers every failure class: shape contract violations, invalid
//! solver configuration, untraceable domain boundaries and domains too small
//! to carry a gradient. Solver non-convergence is not an error here: it is
//! reported through `SolveReport` alongside a best-effort result.

use std::error::Error;
use std::fmt;

/// Errors arising from grid construction, solver configuration, contour
/// tracing and phase unwrapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhaseError {
    /// Two arguments of one operation have different shapes.
    DimensionMismatch {
        /// Which argument pair disagreed (e.g. `"mask vs phase"`).
        what: &'static str,
        /// Shape of the reference argument as `(rows, cols)`.
        expected: (usize, usize),
        /// Shape of the offending argument as `(rows, cols)`.
        found: (usize, usize),
    },
    /// A configuration value is outside its admissible range.
    InvalidConfiguration {
        /// What went wrong.
        reason: String,
    },
    /// A domain boundary cannot be closed into a single clockwise loop.
    StructuralBoundary {
        /// Why the walk failed.
        reason: String,
    },
    /// The domain holds too few pixels for the requested operation.
    InsufficientDomain {
        /// Number of pixels in the domain.
        pixels: usize,
        /// Minimum number of pixels required.
        required: usize,
    },
    /// Attempted to construct a grid with zero rows or columns.
    EmptyGrid,
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "dimension mismatch ({what}): expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            Self::StructuralBoundary { reason } => {
                write!(f, "boundary cannot be traced: {reason}")
            }
            Self::InsufficientDomain { pixels, required } => write!(
                f,
                "domain has {pixels} pixel(s), at least {required} required"
            ),
            Self::EmptyGrid => write!(f, "grid must have at least one row and one column"),
        }
    }
}

impl Error for PhaseError {}
