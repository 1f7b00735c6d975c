use efsim::{ScenarioConfig, Scenario, RenderModeConfig};
use efsim::{save_plots, run_interactive};

use clap::Parser;
use anyhow::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "three_charges.yaml")]
    file_name: String,
}

// load here to keep main clean
fn load_scenario_from_yaml() -> Result<ScenarioConfig> {
    let args = Args::parse();
    let file_name = args.file_name;

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let scenario_cfg = load_scenario_from_yaml().expect("failed to load scenario");

    let scenario = Scenario::build_scenario(scenario_cfg);

    match scenario.engine.mode {
        RenderModeConfig::Raster => save_plots(&scenario)?,
        RenderModeConfig::Interactive => run_interactive(scenario),
    }

    //bench_superpose();
    //bench_charges();
    //bench_superpose_curve();

    Ok(())
}
