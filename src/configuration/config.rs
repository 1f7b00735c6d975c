//! Configuration types for loading electrostatics scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – output mode and plot tuning knobs
//! - [`ParametersConfig`] – physical constants
//! - [`GridConfig`]       – sample grid bounds and resolution
//! - [`RenderConfig`]     – image size and output filenames
//! - [`ChargeConfig`]     – one point charge (magnitude and position)
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   mode: "raster"          # "raster" -> save PNGs, "interactive" -> viewer
//!   arrow_stride: 5         # grid points per quiver arrow
//!   contour_levels: 50      # number of equipotential lines
//!
//! parameters:
//!   epsilon_0: 8.854e-12    # vacuum permittivity (F/m)
//!
//! grid:
//!   x_min: -5.0
//!   x_max: 5.0
//!   y_min: -5.0
//!   y_max: 5.0
//!   nx: 100
//!   ny: 100
//!
//! render:
//!   width: 800
//!   height: 800
//!   field_file: "field_lines.png"
//!   potential_file: "potential.png"
//!   combined_file: "field_potential.png"
//!
//! charges:
//!   - q: 1.0e-9             # 1 nC, positive
//!     x: 1.0
//!     y: 1.0
//!   - q: -1.0e-9
//!     x: -1.0
//!     y: 1.0
//! ```
//!
//! The engine then maps this configuration into its internal runtime scenario
//! representation; the charge list and grid are never mutated after that.

use serde::Deserialize;

/// Which output the run produces
/// mode: "raster" or mode: "interactive"
#[derive(Deserialize, Debug, Clone)]
pub enum RenderModeConfig {
    #[serde(rename = "raster")] // Evaluate once, save quiver/contour/combined PNGs, exit
    Raster,

    #[serde(rename = "interactive")] // Evaluate once, open the Bevy viewer instead of saving
    Interactive,
}

/// High-level engine configuration
/// Controls what the run does with the evaluated maps
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub mode: RenderModeConfig, // raster export or interactive viewer
    pub arrow_stride: Option<usize>, // grid points between quiver arrows
    pub contour_levels: Option<usize>, // number of equipotential levels
}

/// Physical constants for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub epsilon_0: f64, // vacuum permittivity (F/m)
}

/// Sample grid bounds and resolution
#[derive(Deserialize, Debug)]
pub struct GridConfig {
    pub x_min: f64, // left edge of the bounding box
    pub x_max: f64, // right edge
    pub y_min: f64, // bottom edge
    pub y_max: f64, // top edge
    pub nx: usize,  // sample points along x
    pub ny: usize,  // sample points along y
}

/// Raster output settings
#[derive(Deserialize, Debug)]
pub struct RenderConfig {
    pub width: u32,             // image width in pixels
    pub height: u32,            // image height in pixels
    pub field_file: String,     // quiver plot filename
    pub potential_file: String, // contour plot filename
    pub combined_file: String,  // combined plot filename
}

/// Configuration for a single point charge
#[derive(Deserialize, Debug)]
pub struct ChargeConfig {
    pub q: f64, // charge in coulombs, signed
    pub x: f64, // x position in plane units
    pub y: f64, // y position in plane units
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // output mode and plot knobs
    pub parameters: ParametersConfig, // physical constants
    pub grid: GridConfig, // sample grid bounds and resolution
    pub render: RenderConfig, // image size and output filenames
    pub charges: Vec<ChargeConfig>, // the charge list, in summation order
}
