//! High-level runtime engine settings
//!
//! Selects the output mode (raster export or interactive viewer) and the
//! plot tuning knobs used when rendering an evaluated scenario

use crate::configuration::config::RenderModeConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub mode: RenderModeConfig, // raster or interactive
    pub arrow_stride: usize,    // grid points between quiver arrows
    pub contour_levels: usize,  // number of equipotential lines
}

/// Raster output settings: image size and the fixed output filenames
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub width: u32,             // image width in pixels
    pub height: u32,            // image height in pixels
    pub field_file: String,     // quiver plot
    pub potential_file: String, // contour plot
    pub combined_file: String,  // quiver + contour plot
}
