pub mod core;
pub mod errors;
pub mod input;
pub mod output;
pub mod scenarios;

pub use crate::core::projection::{run_scenario, ScenarioResults};
use crate::core::baseline::preprocess_baseline_demand;
use crate::input::{read_baseline_demand, ScenarioInput};
use crate::output::{write_scenario_results, Output};
use std::io::Read;
use tracing::info;

pub const DEFAULT_INITIAL_YEAR: u32 = 2020;
pub const DEFAULT_FINAL_YEAR: u32 = 2050;

/// Runs one scenario end to end: ingests and preprocesses the baseline
/// demand table, projects every sector over the horizon, and writes the
/// per-sector and aggregated CSV tables to the given output.
pub fn run_project(
    baseline: impl Read,
    scenario: &ScenarioInput,
    output: impl Output,
    initial_year: u32,
    final_year: u32,
) -> anyhow::Result<ScenarioResults> {
    let baseline = preprocess_baseline_demand(read_baseline_demand(baseline)?);
    let results = run_scenario(&baseline, scenario, initial_year, final_year)?;

    if !output.is_noop() {
        write_scenario_results(&output, &scenario.name, &results)?;
    }
    info!(scenario = %scenario.name, "scenario run complete");

    Ok(results)
}
