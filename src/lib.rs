pub mod field;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use field::states::{PointCharge, ChargeSystem, FieldMaps, NVec2};
pub use field::coulomb::{point_charge_field, point_charge_potential, FieldContribution, FieldSet, CoulombLaw};
pub use field::grid::SampleGrid;
pub use field::params::{Parameters, EPSILON_0};
pub use field::scenario::Scenario;

pub use configuration::config::{RenderModeConfig, EngineConfig, ParametersConfig, GridConfig, RenderConfig, ChargeConfig, ScenarioConfig};

pub use visualization::{raster::save_plots, field_vis2d::run_interactive};

pub use benchmark::benchmark::{bench_superpose, bench_charges, bench_superpose_curve};
