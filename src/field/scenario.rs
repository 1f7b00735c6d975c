//! Build fully-initialized scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`) and raster settings (`RenderSettings`)
//! - physical parameters (`Parameters`)
//! - the charge system (`ChargeSystem`)
//! - the sample grid (`SampleGrid`)
//! - the active field contribution set (`FieldSet`)
//!
//! The scenario is inserted into Bevy as a `Resource` when running the
//! interactive viewer, and consumed directly by the raster renderers

use bevy::prelude::Resource;

use crate::configuration::config::{ChargeConfig, ScenarioConfig};
use crate::field::coulomb::{CoulombLaw, FieldSet};
use crate::field::engine::{Engine, RenderSettings};
use crate::field::grid::SampleGrid;
use crate::field::params::Parameters;
use crate::field::states::{ChargeSystem, FieldMaps, NVec2, PointCharge};

/// Bevy resource representing a fully-initialized scenario
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it contains the engine settings, parameters, the static charge system,
/// the sample grid, and the set of active field contributions
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: ChargeSystem,
    pub grid: SampleGrid,
    pub fields: FieldSet,
    pub render: RenderSettings,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Charges: map `ChargeConfig` -> runtime `PointCharge` using nalgebra vectors
        let charges: Vec<PointCharge> = cfg.charges.iter().map(|cc: &ChargeConfig| PointCharge {
            q: cc.q,
            x: NVec2::new(cc.x, cc.y),
        }).collect();

        let system = ChargeSystem {
            charges,
        };

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters {
            epsilon_0: cfg.parameters.epsilon_0,
        };

        // Sample grid from the configured bounds and resolution
        let g_cfg = cfg.grid;
        let grid = SampleGrid::from_bounds(g_cfg.x_min, g_cfg.x_max, g_cfg.nx, g_cfg.y_min, g_cfg.y_max, g_cfg.ny);

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            mode: e_cfg.mode,
            arrow_stride: e_cfg.arrow_stride.unwrap_or(5),
            contour_levels: e_cfg.contour_levels.unwrap_or(50),
        };

        // Raster settings straight from the config
        let r_cfg = cfg.render;
        let render = RenderSettings {
            width: r_cfg.width,
            height: r_cfg.height,
            field_file: r_cfg.field_file,
            potential_file: r_cfg.potential_file,
            combined_file: r_cfg.combined_file,
        };

        // Fields: construct a FieldSet and register the Coulomb law
        let mut fields = FieldSet::new();
        fields = fields.with(CoulombLaw {
            k: parameters.coulomb_k(),
        });

        Self {
            engine,
            parameters,
            system,
            grid,
            fields,
            render,
        }
    }

    /// Evaluate the superposed field and potential over the whole grid
    /// Pure: same scenario in, same maps out
    pub fn evaluate(&self) -> FieldMaps {
        self.fields.superpose(&self.system, &self.grid)
    }
}
