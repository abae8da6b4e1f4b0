//! Synthetic masks and phase fields for phasekit development.
//!
//! Simple array constructors used by tests, benches and demos: disc and
//! rectangle masks, linear phase ramps, disc-shaped Poisson sources,
//! residue injection and seeded Gaussian noise.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::f64::consts::PI;
use std::ops::Range;

use phasekit_core::{Field, Grid, Mask};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// `true` where `(row - cx)² + (col - cy)² <= r²`.
///
/// Centres are 0-based and may be fractional, so `cx = 49.5` centres a disc
/// between rows 49 and 50.
pub fn circle_mask(shape: (usize, usize), cx: f64, cy: f64, r: f64) -> Mask {
    Grid::from_fn(shape.0, shape.1, |i| {
        let dr = i.row as f64 - cx;
        let dc = i.col as f64 - cy;
        dr * dr + dc * dc <= r * r
    })
    .expect("shape must be non-empty")
}

/// `true` on the half-open block `rows x cols`.
pub fn rect_mask(shape: (usize, usize), rows: Range<usize>, cols: Range<usize>) -> Mask {
    Grid::from_fn(shape.0, shape.1, |i| {
        rows.contains(&i.row) && cols.contains(&i.col)
    })
    .expect("shape must be non-empty")
}

/// Linear phase `kx (row - cx) + ky (col - cy)`, zero at `(cx, cy)`.
pub fn linear_phase(shape: (usize, usize), cx: f64, cy: f64, kx: f64, ky: f64) -> Field {
    Grid::from_fn(shape.0, shape.1, |i| {
        kx * (i.row as f64 - cx) + ky * (i.col as f64 - cy)
    })
    .expect("shape must be non-empty")
}

/// `1.0` on a disc and `0.0` elsewhere; a localized Poisson source.
pub fn disc_source(shape: (usize, usize), cx: f64, cy: f64, r: f64) -> Field {
    circle_mask(shape, cx, cy, r).to_aperture()
}

/// Zero `field` outside `mask`.
pub fn apply_mask(field: &Field, mask: &Mask) -> Field {
    field
        .zip_map(mask, "field vs mask", |&v, &m| if m { v } else { 0.0 })
        .expect("field and mask must have the same shape")
}

/// Overwrite the 2x2 block at `(row, col)` with wrapped values whose
/// discrete curl is non-zero, creating a residue.
///
/// ```text
///   0    π/2
/// -π/2   π
/// ```
pub fn add_residue_block(field: &mut Field, row: usize, col: usize) {
    field[(row, col)] = 0.0;
    field[(row, col + 1)] = PI / 2.0;
    field[(row + 1, col)] = -PI / 2.0;
    field[(row + 1, col + 1)] = PI;
}

/// Zero-mean Gaussian noise with standard deviation `sigma`, deterministic
/// for a given `seed`.
pub fn gaussian_noise(shape: (usize, usize), sigma: f64, seed: u64) -> Field {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Grid::from_fn(shape.0, shape.1, |_| sigma * box_muller(&mut rng))
        .expect("shape must be non-empty")
}

/// Uniform samples in `[lo, hi)`, deterministic for a given `seed`.
pub fn uniform_field(shape: (usize, usize), lo: f64, hi: f64, seed: u64) -> Field {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Grid::from_fn(shape.0, shape.1, |_| lo + (hi - lo) * rng.random::<f64>())
        .expect("shape must be non-empty")
}

/// Gaussian sample via the Box-Muller transform.
fn box_muller(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
