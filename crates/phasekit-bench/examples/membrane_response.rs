//! Membrane response to a disc load under growing sweep budgets.
//!
//! Demonstrates: mask → interior → membrane_sor → SolveReport, and how the
//! Poisson residual falls as the budget grows.

use phasekit_solver::{interior, membrane_sor, poisson_residual, SorConfig, SweepOrder};
use phasekit_test_utils::{circle_mask, disc_source};

fn main() {
    println!("=== Membrane response ===\n");

    let n = 200;
    let centre = (n as f64 - 1.0) / 2.0;
    let free = interior(&circle_mask((n, n), centre, centre, 95.0));
    let source = disc_source((n, n), centre + 15.0, centre - 10.0, 30.0);
    println!("{n}x{n} grid, {} free pixels\n", free.count());

    for order in [SweepOrder::Lexicographic, SweepOrder::RedBlack] {
        println!("{order:?} sweeps:");
        for budget in [10, 100, 1000, 10_000] {
            let cfg = SorConfig::builder()
                .max_iterations(budget)
                .order(order)
                .build()
                .unwrap();
            let (u, report) = membrane_sor(&source, &free, &cfg).unwrap();
            let residual = poisson_residual(&u, &source, &free).unwrap();
            println!(
                "  budget {:>6}: {:?} after {:>5} sweeps, max_change={:>10.3e}, residual={:>10.3e}, min={:>9.3}",
                budget,
                report.status,
                report.iterations,
                report.max_change,
                residual,
                u.as_slice().iter().cloned().fold(f64::INFINITY, f64::min),
            );
        }
        println!();
    }
    println!("Done.");
}
