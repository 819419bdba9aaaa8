extern crate demand_model;

use anyhow::Context;
use clap::Parser;
use demand_model::input::{ingest_scenario, ScenarioInput};
use demand_model::output::FileOutput;
use demand_model::scenarios::{preset, PRESET_NAMES};
use demand_model::{run_project, DEFAULT_FINAL_YEAR, DEFAULT_INITIAL_YEAR};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct DemandModelArgs {
    /// Harmonized baseline demand table (CSV: Carrier column plus one column
    /// per sector, values in PJ).
    baseline_file: PathBuf,
    /// Built-in scenario preset(s) to run; defaults to all of them.
    #[arg(long, short)]
    scenario: Vec<String>,
    /// JSON scenario configuration file, run instead of the presets.
    #[arg(long, conflicts_with = "scenario")]
    scenario_file: Option<PathBuf>,
    /// Directory the output CSV tables are written to.
    #[arg(long, short, default_value = ".")]
    output_dir: PathBuf,
    #[arg(long, default_value_t = DEFAULT_INITIAL_YEAR)]
    initial_year: u32,
    #[arg(long, default_value_t = DEFAULT_FINAL_YEAR)]
    final_year: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = DemandModelArgs::parse();

    let scenarios: Vec<ScenarioInput> = match args.scenario_file {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("opening scenario file `{}`", path.display()))?;
            vec![ingest_scenario(BufReader::new(file))?]
        }
        None => {
            let names: Vec<String> = if args.scenario.is_empty() {
                PRESET_NAMES.iter().map(|name| name.to_string()).collect()
            } else {
                args.scenario
            };
            names
                .iter()
                .map(|name| Ok(preset(name)?))
                .collect::<anyhow::Result<_>>()?
        }
    };

    let output = FileOutput::new(args.output_dir, "demand_timeseries;{}.csv".into());

    for scenario in &scenarios {
        let baseline = File::open(&args.baseline_file).with_context(|| {
            format!("opening baseline file `{}`", args.baseline_file.display())
        })?;
        run_project(
            BufReader::new(baseline),
            scenario,
            &output,
            args.initial_year,
            args.final_year,
        )?;
    }

    Ok(())
}
