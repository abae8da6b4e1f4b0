//! Least-squares unwrapping against line integration.
//!
//! Demonstrates: build a profile → wrap → unwrap with Itoh and with
//! least squares → compare piston-free errors, then repeat with residues.

use phasekit_bench::{reference_profile, stress_profile, Profile};
use phasekit_core::masked_piston_free_rmse;
use phasekit_test_utils::add_residue_block;
use phasekit_unwrap::{itoh_cols, itoh_rows, unwrap_ls, LsConfig};

fn compare(name: &str, p: &Profile, wrapped: &phasekit_core::Field) {
    let ls = unwrap_ls(wrapped, &p.mask, &LsConfig::default()).unwrap();
    let ls_err = masked_piston_free_rmse(&ls.phase, &p.phase, &p.mask).unwrap();
    let rows_err = masked_piston_free_rmse(&itoh_rows(wrapped), &p.phase, &p.mask).unwrap();
    let cols_err = masked_piston_free_rmse(&itoh_cols(wrapped), &p.phase, &p.mask).unwrap();
    println!(
        "  {:<20} ls={:>9.3e} ({} sweeps, piston {:>6.3})  itoh_rows={:>8.3}  itoh_cols={:>8.3}",
        name, ls_err, ls.report.iterations, ls.piston, rows_err, cols_err
    );
}

fn main() {
    println!("=== Unwrapping comparison (piston-free rms, rad) ===\n");

    for (label, profile) in [("reference", reference_profile()), ("stress", stress_profile())] {
        let p = profile.unwrap();
        let (rows, cols) = p.mask.shape();
        println!(
            "{label}: {rows}x{cols}, {} pixels in the aperture",
            p.mask.count()
        );
        compare("noiseless", &p, &p.wrapped);

        let mut damaged = p.wrapped.clone();
        for k in 1..4 {
            add_residue_block(&mut damaged, rows * k / 4, cols / 2 + k);
        }
        compare("three residues", &p, &damaged);
        println!();
    }
    println!("Done.");
}
