use std::time::Instant;

use crate::field::coulomb::{CoulombLaw, FieldSet};
use crate::field::grid::SampleGrid;
use crate::field::params::{Parameters, EPSILON_0};
use crate::field::states::{ChargeSystem, NVec2, PointCharge};

/// Helper to build a manual ChargeSystem of size `m`
fn make_system(m: usize) -> ChargeSystem {
    let mut charges = Vec::with_capacity(m);

    for i in 0..m {
        let i_f = i as f64;
        // deterministic positions and alternating signs, no rand needed
        let q = if i % 2 == 0 { 1.0e-9 } else { -1.0e-9 };
        let x = NVec2::new((i_f * 0.37).sin() * 4.0, (i_f * 0.13).cos() * 4.0);

        charges.push(PointCharge { q, x });
    }

    ChargeSystem { charges }
}

fn make_fields() -> FieldSet {
    let parameters = Parameters {
        epsilon_0: EPSILON_0,
    };
    FieldSet::new().with(CoulombLaw {
        k: parameters.coulomb_k(),
    })
}

/// Time one full superposition for a range of grid resolutions
pub fn bench_superpose() {
    // Different grid sizes to test, fixed charge count
    let ns = [50, 100, 200, 400, 800, 1600];
    let sys = make_system(4);
    let fields = make_fields();

    for n in ns {
        let grid = SampleGrid::from_bounds(-5.0, 5.0, n, -5.0, 5.0, n);

        // Warm up
        let _ = fields.superpose(&sys, &grid);

        let t0 = Instant::now();
        let maps = fields.superpose(&sys, &grid);
        let dt = t0.elapsed().as_secs_f64();

        // Touch the output so the evaluation cannot be optimized away
        let checksum: f64 = maps.v.iter().filter(|v| v.is_finite()).sum();

        println!("grid = {n:5}x{n:<5}, superpose = {dt:8.6} s, sum(V) = {checksum:.3e}");
    }
}

/// Time one full superposition for a range of charge counts
pub fn bench_charges() {
    // Fixed grid, growing charge list; cost should scale linearly
    let ms = [1, 2, 4, 8, 16, 32, 64];
    let fields = make_fields();
    let grid = SampleGrid::from_bounds(-5.0, 5.0, 200, -5.0, 5.0, 200);

    for m in ms {
        let sys = make_system(m);

        // Warm up
        let _ = fields.superpose(&sys, &grid);

        let t0 = Instant::now();
        let _ = fields.superpose(&sys, &grid);
        let dt = t0.elapsed().as_secs_f64();

        println!("charges = {m:3}, superpose = {dt:8.6} s");
    }
}

/// Benchmark superpose over a smooth range of grid sizes
/// Paste output directly into a spreadsheet to graph
pub fn bench_superpose_curve() {
    println!("n,ms");

    let sys = make_system(4);
    let fields = make_fields();

    // Steps of 50 to give a smoother graph
    for n in (50..=1000).step_by(50) {
        // Small n: average over a few runs to smooth noise
        let runs = if n <= 300 { 5 } else { 1 };

        let grid = SampleGrid::from_bounds(-5.0, 5.0, n, -5.0, 5.0, n);

        let t0 = Instant::now();
        for _ in 0..runs {
            let _ = fields.superpose(&sys, &grid);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / runs as f64;

        println!("{},{:.6}", n, ms);
    }
}
