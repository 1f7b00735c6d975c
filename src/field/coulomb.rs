//! Field / potential contributors for the electrostatics evaluator
//!
//! Defines the contribution trait, the closed-form Coulomb law for a single
//! point charge, and the superposition over a full sample grid

use ndarray::Zip;

use crate::field::grid::SampleGrid;
use crate::field::states::{ChargeSystem, FieldMaps, NVec2, PointCharge};

/// Collection of field contribution terms
/// Each term implements [`FieldContribution`] and their contributions are
/// summed elementwise into one set of (Ex, Ey, V) maps
pub struct FieldSet {
    terms: Vec<Box<dyn FieldContribution + Send + Sync>>,
}

impl FieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add a contribution term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: FieldContribution + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Superpose all terms over the grid
    /// - starts from zeroed maps matching the grid shape
    /// - every term adds its contribution elementwise
    /// - output shape equals the grid shape, every element is the sum of
    ///   all contributions at that coordinate
    pub fn superpose(&self, sys: &ChargeSystem, grid: &SampleGrid) -> FieldMaps {
        let mut out = FieldMaps::zeros(grid.shape());
        // Iterate over all field contributors
        for term in &self.terms {
            term.accumulate(sys, grid, &mut out);
        }
        out
    }
}

/// Trait for field sources operating on a [`ChargeSystem`]
/// Implementations add their contribution into `out` for each grid point
pub trait FieldContribution {
    fn accumulate(&self, sys: &ChargeSystem, grid: &SampleGrid, out: &mut FieldMaps);
}

/// Electric field of one point charge at (x, y), Coulomb's law:
/// E = k q (r_vec) / r³ with r the distance to the charge
///
/// Exact closed form, no softening: evaluating at the charge position
/// divides by zero and returns a non-finite vector
pub fn point_charge_field(k: f64, c: &PointCharge, x: f64, y: f64) -> NVec2 {
    let dx = x - c.x.x;
    let dy = y - c.x.y;
    let r = (dx * dx + dy * dy).sqrt();
    let r3 = r * r * r;
    NVec2::new(k * c.q * dx / r3, k * c.q * dy / r3)
}

/// Electric potential of one point charge at (x, y): V = k q / r
/// Same unguarded singularity at r = 0 as [`point_charge_field`]
pub fn point_charge_potential(k: f64, c: &PointCharge, x: f64, y: f64) -> f64 {
    let dx = x - c.x.x;
    let dy = y - c.x.y;
    let r = (dx * dx + dy * dy).sqrt();
    k * c.q / r
}

/// Direct Coulomb superposition over all charges in the system
/// No approximation and no softening; the maps pick up ±inf/NaN wherever a
/// grid point sits exactly on a charge
pub struct CoulombLaw {
    pub k: f64, // Coulomb constant 1 / (4π ε₀)
}

impl FieldContribution for CoulombLaw {
    fn accumulate(&self, sys: &ChargeSystem, grid: &SampleGrid, out: &mut FieldMaps) {
        // Outer loop: charges in insertion order, so the summation order is
        // deterministic for a fixed charge list
        for c in &sys.charges {
            // Inner: one elementwise pass over the whole coordinate arrays
            Zip::from(&grid.xx)
                .and(&grid.yy)
                .and(&mut out.ex)
                .and(&mut out.ey)
                .and(&mut out.v)
                .for_each(|&x, &y, ex, ey, v| {
                    let e = point_charge_field(self.k, c, x, y);
                    *ex += e.x;
                    *ey += e.y;
                    *v += point_charge_potential(self.k, c, x, y);
                });
        }
    }
}
