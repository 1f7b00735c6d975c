//! Core state types for the electrostatics evaluator.
//!
//! Defines the static input data and the output arrays:
//! - `PointCharge` / `ChargeSystem` using `NVec2`
//! - `FieldMaps` holding the accumulated (Ex, Ey, V) grids
//!
//! A system holds the ordered list of charges; none of it is mutated after
//! construction.

use nalgebra::Vector2;
use ndarray::Array2;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct PointCharge {
    pub q: f64,   // charge (C), signed
    pub x: NVec2, // position in the plane
}

#[derive(Debug, Clone)]
pub struct ChargeSystem {
    pub charges: Vec<PointCharge>, // collection of charges, in summation order
}

/// Per-grid-point output of the evaluator: the two field components and the
/// potential, all the same shape as the sample grid
///
/// Values at a grid point that coincides with a charge position are ±inf or
/// NaN; they are stored as-is
#[derive(Debug, Clone)]
pub struct FieldMaps {
    pub ex: Array2<f64>, // x component of E
    pub ey: Array2<f64>, // y component of E
    pub v: Array2<f64>,  // scalar potential
}

impl FieldMaps {
    /// Zero-filled maps of the given (rows, cols) shape
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self {
            ex: Array2::zeros(shape),
            ey: Array2::zeros(shape),
            v: Array2::zeros(shape),
        }
    }

    /// |E| = sqrt(Ex² + Ey²) per grid point, used for arrow coloring
    pub fn magnitude(&self) -> Array2<f64> {
        let (rows, cols) = self.ex.dim();
        let mut mag = Array2::<f64>::zeros((rows, cols));
        for j in 0..rows {
            for i in 0..cols {
                mag[[j, i]] = self.ex[[j, i]].hypot(self.ey[[j, i]]);
            }
        }
        mag
    }
}
