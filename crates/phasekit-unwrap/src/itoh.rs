//! Itoh's 1D unwrapping by integration of wrapped differences.
//!
//! Exact when every true step between consecutive samples is smaller than
//! π in magnitude. A single larger step, or a residue upstream, offsets
//! everything after it by a multiple of 2π; that failure is silent.

use crate::wrap::phwrap;
use phasekit_core::Field;

/// Unwrap a sequence: the first sample is kept, every later sample is the
/// previous output plus the wrapped difference of the inputs.
///
/// ```
/// use phasekit_unwrap::{itoh, phwrap};
///
/// let ramp: Vec<f64> = (1..=10).map(f64::from).collect();
/// let wrapped: Vec<f64> = ramp.iter().map(|&v| phwrap(v)).collect();
/// let restored = itoh(&wrapped);
/// for (a, b) in restored.iter().zip(&ramp) {
///     assert!((a - b).abs() < 1e-12);
/// }
/// ```
pub fn itoh(sequence: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(sequence.len());
    let mut acc = match sequence.first() {
        Some(&first) => first,
        None => return out,
    };
    out.push(acc);
    for pair in sequence.windows(2) {
        acc += phwrap(pair[1] - pair[0]);
        out.push(acc);
    }
    out
}

/// Run [`itoh`] independently along every row (left to right).
pub fn itoh_rows(field: &Field) -> Field {
    let mut out = field.clone();
    let cols = field.cols();
    for row in out.as_mut_slice().chunks_mut(cols) {
        let unwrapped = itoh(row);
        row.copy_from_slice(&unwrapped);
    }
    out
}

/// Run [`itoh`] independently along every column (top to bottom).
pub fn itoh_cols(field: &Field) -> Field {
    itoh_rows(&field.transpose()).transpose()
}
