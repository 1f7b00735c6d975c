//! Rectangular sample grid for field evaluation
//!
//! Built once per run from bounds and point counts, then read-only. Holds
//! the 1D axes plus the full 2D coordinate arrays (meshgrid convention:
//! `xx[[j, i]] = x[i]`, `yy[[j, i]] = y[j]`, shape `(ny, nx)`), so the
//! evaluator can walk coordinates array-at-a-time.

use ndarray::{Array1, Array2};

#[derive(Debug, Clone)]
pub struct SampleGrid {
    pub x: Array1<f64>,  // axis samples along x, length nx
    pub y: Array1<f64>,  // axis samples along y, length ny
    pub xx: Array2<f64>, // x coordinate of every grid point, (ny, nx)
    pub yy: Array2<f64>, // y coordinate of every grid point, (ny, nx)
}

impl SampleGrid {
    /// Evenly spaced grid spanning [x_min, x_max] × [y_min, y_max] with
    /// nx × ny sample points (endpoints included)
    pub fn from_bounds(x_min: f64, x_max: f64, nx: usize, y_min: f64, y_max: f64, ny: usize) -> Self {
        let x = Array1::linspace(x_min, x_max, nx);
        let y = Array1::linspace(y_min, y_max, ny);

        // Expand the axes into full coordinate arrays
        let mut xx = Array2::<f64>::zeros((ny, nx));
        let mut yy = Array2::<f64>::zeros((ny, nx));
        for j in 0..ny {
            for i in 0..nx {
                xx[[j, i]] = x[i];
                yy[[j, i]] = y[j];
            }
        }

        Self { x, y, xx, yy }
    }

    /// (rows, cols) = (ny, nx)
    pub fn shape(&self) -> (usize, usize) {
        self.xx.dim()
    }

    pub fn x_min(&self) -> f64 {
        self.x[0]
    }

    pub fn x_max(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    pub fn y_min(&self) -> f64 {
        self.y[0]
    }

    pub fn y_max(&self) -> f64 {
        self.y[self.y.len() - 1]
    }

    /// Domain width in plane units
    pub fn width(&self) -> f64 {
        self.x_max() - self.x_min()
    }

    /// Domain height in plane units
    pub fn height(&self) -> f64 {
        self.y_max() - self.y_min()
    }
}
