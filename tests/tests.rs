use efsim::field::coulomb::{point_charge_field, point_charge_potential, CoulombLaw, FieldSet};
use efsim::field::grid::SampleGrid;
use efsim::field::params::{Parameters, EPSILON_0};
use efsim::field::scenario::Scenario;
use efsim::field::states::{ChargeSystem, NVec2, PointCharge};
use efsim::configuration::config::{RenderModeConfig, ScenarioConfig};

/// Build a single charge at (x, y)
pub fn charge_at(q: f64, x: f64, y: f64) -> PointCharge {
    PointCharge {
        q,
        x: NVec2::new(x, y),
    }
}

/// Default physical parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        epsilon_0: EPSILON_0,
    }
}

/// Build a Coulomb term + FieldSet
pub fn coulomb_set(p: &Parameters) -> FieldSet {
    FieldSet::new().with(CoulombLaw { k: p.coulomb_k() })
}

/// Square grid spanning ±bound with n points per axis
pub fn test_grid(bound: f64, n: usize) -> SampleGrid {
    SampleGrid::from_bounds(-bound, bound, n, -bound, bound, n)
}

// ==================================================================================
// Pointwise Coulomb tests
// ==================================================================================

#[test]
fn potential_matches_closed_form() {
    let p = test_params();
    let k = p.coulomb_k();
    let c = charge_at(1.0e-9, 0.0, 0.0);

    // Probe points off the charge
    for (x, y) in [(0.5, 1.25), (-2.0, 0.75), (3.0, -4.0)] {
        let v = point_charge_potential(k, &c, x, y);
        let expected = k * c.q / (x * x + y * y).sqrt();
        assert!(
            (v - expected).abs() < 1e-12 * expected.abs(),
            "V mismatch at ({x}, {y}): {v} vs {expected}"
        );
    }
}

#[test]
fn potential_scale_check() {
    // 1 nC at the origin probed at (1, 0): V = k * 1e-9 ≈ 8.9876 V
    let p = test_params();
    let c = charge_at(1.0e-9, 0.0, 0.0);

    let v = point_charge_potential(p.coulomb_k(), &c, 1.0, 0.0);

    assert!((v - 8.9876).abs() < 1e-3, "Expected ~8.9876 V, got {v}");
}

#[test]
fn field_points_away_from_positive_charge() {
    let p = test_params();
    let k = p.coulomb_k();

    // Positive charge: E at x > xq points along +x
    let pos = charge_at(1.0e-9, 0.0, 0.0);
    let e = point_charge_field(k, &pos, 2.0, 0.0);
    assert!(e.x > 0.0, "Field of a positive charge should point away");

    // Negative charge at the same relative point: Ex flips sign
    let neg = charge_at(-1.0e-9, 0.0, 0.0);
    let e = point_charge_field(k, &neg, 2.0, 0.0);
    assert!(e.x < 0.0, "Field of a negative charge should point toward it");
}

#[test]
fn field_inverse_square_law() {
    let p = test_params();
    let k = p.coulomb_k();
    let c = charge_at(1.0e-9, 0.0, 0.0);

    let e_r = point_charge_field(k, &c, 1.0, 0.0);
    let e_2r = point_charge_field(k, &c, 2.0, 0.0);

    let ratio = e_r.norm() / e_2r.norm();

    assert!((ratio - 4.0).abs() < 1e-9, "Expected ~4x, got {ratio}");
}

#[test]
fn singularity_is_not_trapped() {
    // Evaluating exactly on the charge divides by zero; the result is
    // non-finite data, not a panic or an error
    let p = test_params();
    let k = p.coulomb_k();
    let c = charge_at(1.0e-9, 1.0, 1.0);

    let v = point_charge_potential(k, &c, 1.0, 1.0);
    let e = point_charge_field(k, &c, 1.0, 1.0);

    assert!(!v.is_finite(), "Potential at the charge should be non-finite, got {v}");
    assert!(
        !e.x.is_finite() && !e.y.is_finite(),
        "Field at the charge should be non-finite, got {e:?}"
    );
}

// ==================================================================================
// Superposition tests
// ==================================================================================

#[test]
fn superpose_is_linear() {
    let p = test_params();
    let c1 = charge_at(1.0e-9, 1.1, 0.3);
    let c2 = charge_at(-2.0e-9, -0.7, 0.9);

    // Grid nodes avoid both charge positions
    let grid = test_grid(2.0, 10);

    let both = coulomb_set(&p).superpose(
        &ChargeSystem {
            charges: vec![c1.clone(), c2.clone()],
        },
        &grid,
    );
    let only1 = coulomb_set(&p).superpose(&ChargeSystem { charges: vec![c1] }, &grid);
    let only2 = coulomb_set(&p).superpose(&ChargeSystem { charges: vec![c2] }, &grid);

    for j in 0..10 {
        for i in 0..10 {
            let sum_v = only1.v[[j, i]] + only2.v[[j, i]];
            let sum_ex = only1.ex[[j, i]] + only2.ex[[j, i]];
            let sum_ey = only1.ey[[j, i]] + only2.ey[[j, i]];

            assert!(
                (both.v[[j, i]] - sum_v).abs() <= 1e-12 * sum_v.abs().max(1.0),
                "V not linear at [{j}, {i}]"
            );
            assert!(
                (both.ex[[j, i]] - sum_ex).abs() <= 1e-12 * sum_ex.abs().max(1.0),
                "Ex not linear at [{j}, {i}]"
            );
            assert!(
                (both.ey[[j, i]] - sum_ey).abs() <= 1e-12 * sum_ey.abs().max(1.0),
                "Ey not linear at [{j}, {i}]"
            );
        }
    }
}

#[test]
fn opposite_charges_cancel_on_axis() {
    // ±1 nC at (±1, 0): equal distances to any point on the y-axis, so the
    // 1/r terms cancel exactly
    let p = test_params();
    let sys = ChargeSystem {
        charges: vec![charge_at(1.0e-9, 1.0, 0.0), charge_at(-1.0e-9, -1.0, 0.0)],
    };

    let k = p.coulomb_k();
    let v: f64 = sys
        .charges
        .iter()
        .map(|c| point_charge_potential(k, c, 0.0, 3.0))
        .sum();

    assert!(v.abs() < 1e-9, "Potential on the symmetry axis should vanish, got {v}");
}

#[test]
fn superpose_picks_up_singularities() {
    // 11 points over ±5 puts a node exactly on a charge at (1, 1)
    let p = test_params();
    let sys = ChargeSystem {
        charges: vec![charge_at(1.0e-9, 1.0, 1.0)],
    };
    let grid = test_grid(5.0, 11);

    let maps = coulomb_set(&p).superpose(&sys, &grid);

    // x = 1 is index 6, y = 1 is index 6
    assert!(
        !maps.v[[6, 6]].is_finite(),
        "Grid node on the charge should hold a non-finite potential"
    );

    // Every other node stays finite
    let finite = maps.v.iter().filter(|v| v.is_finite()).count();
    assert_eq!(finite, 11 * 11 - 1, "Exactly one node coincides with the charge");
}

#[test]
fn superpose_is_deterministic() {
    let p = test_params();
    let sys = ChargeSystem {
        charges: vec![charge_at(1.0e-9, 1.1, 0.3), charge_at(-1.0e-9, -0.7, 0.9)],
    };
    let grid = test_grid(2.0, 16);
    let fields = coulomb_set(&p);

    let a = fields.superpose(&sys, &grid);
    let b = fields.superpose(&sys, &grid);

    // Fixed charge order and traversal: bitwise identical output
    for (x, y) in a.v.iter().zip(b.v.iter()) {
        assert_eq!(x.to_bits(), y.to_bits(), "Repeated evaluation diverged");
    }
    for (x, y) in a.ex.iter().zip(b.ex.iter()) {
        assert_eq!(x.to_bits(), y.to_bits(), "Repeated evaluation diverged");
    }
}

// ==================================================================================
// Grid tests
// ==================================================================================

#[test]
fn meshgrid_shape_and_corners() {
    let grid = SampleGrid::from_bounds(-5.0, 5.0, 100, -2.0, 2.0, 50);

    assert_eq!(grid.shape(), (50, 100));
    assert_eq!(grid.xx[[0, 0]], -5.0);
    assert_eq!(grid.xx[[0, 99]], 5.0);
    assert_eq!(grid.yy[[0, 0]], -2.0);
    assert_eq!(grid.yy[[49, 0]], 2.0);

    // Meshgrid convention: xx constant down a column, yy across a row
    assert_eq!(grid.xx[[20, 7]], grid.x[7]);
    assert_eq!(grid.yy[[20, 7]], grid.y[20]);

    assert_eq!(grid.width(), 10.0);
    assert_eq!(grid.height(), 4.0);
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn yaml_builds_runtime_scenario() {
    let yaml = r#"
engine:
  mode: "raster"

parameters:
  epsilon_0: 8.854e-12

grid:
  x_min: -5.0
  x_max: 5.0
  y_min: -5.0
  y_max: 5.0
  nx: 20
  ny: 10

render:
  width: 400
  height: 400
  field_file: "field_lines.png"
  potential_file: "potential.png"
  combined_file: "field_potential.png"

charges:
  - q: 1.0e-9
    x: 1.0
    y: 1.0
  - q: -1.0e-9
    x: -1.0
    y: 1.0
  - q: 1.0e-9
    x: 0.0
    y: -1.0
"#;

    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("scenario YAML should parse");
    let scenario = Scenario::build_scenario(cfg);

    assert!(matches!(scenario.engine.mode, RenderModeConfig::Raster));
    // Knobs omitted from the YAML fall back to their defaults
    assert_eq!(scenario.engine.arrow_stride, 5);
    assert_eq!(scenario.engine.contour_levels, 50);

    assert_eq!(scenario.system.charges.len(), 3);
    assert!(scenario.system.charges[1].q < 0.0);
    assert_eq!(scenario.system.charges[2].x, NVec2::new(0.0, -1.0));

    assert_eq!(scenario.grid.shape(), (10, 20));

    // The bundle evaluates end to end
    let maps = scenario.evaluate();
    assert_eq!(maps.v.dim(), (10, 20));
}
