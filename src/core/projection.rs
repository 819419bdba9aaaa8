//! Scenario assembly: runs the sectoral driver for every sector in the
//! baseline table and aggregates the results across sectors.
//!
//! Sector projections are independent of one another and run in parallel;
//! any failing sector aborts the whole scenario run.

use crate::core::baseline::BaselineDemand;
use crate::core::carriers::{base_carrier_name, Sector};
use crate::core::timeseries::{sectoral_demand_timeseries, DemandTimeseries};
use crate::core::units::PJ_PER_TWH;
use crate::input::ScenarioInput;
use anyhow::Context;
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::info;

/// Cross-sector aggregate of a scenario's demand, with derived carriers
/// folded back into their statistical base names.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedDemand {
    initial_year: u32,
    rows: IndexMap<String, Vec<f64>>,
}

impl AggregatedDemand {
    pub fn initial_year(&self) -> u32 {
        self.initial_year
    }

    pub fn years(&self) -> impl Iterator<Item = u32> + '_ {
        let year_count = self
            .rows
            .first()
            .map(|(_, values)| values.len() as u32)
            .unwrap_or_default();
        self.initial_year..self.initial_year + year_count
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.rows
            .iter()
            .map(|(carrier, values)| (carrier.as_str(), values.as_slice()))
    }

    pub fn value(&self, carrier: &str, year: u32) -> Option<f64> {
        let year_idx = year.checked_sub(self.initial_year)? as usize;
        self.rows.get(carrier)?.get(year_idx).copied()
    }

    /// The same table converted from PJ to TWh.
    pub fn to_twh(&self) -> Self {
        Self {
            initial_year: self.initial_year,
            rows: self
                .rows
                .iter()
                .map(|(carrier, values)| {
                    (
                        carrier.clone(),
                        values.iter().map(|pj| pj / PJ_PER_TWH).collect(),
                    )
                })
                .collect(),
        }
    }
}

/// A full scenario run: one timeseries per sector plus the cross-sector
/// aggregate in PJ.
#[derive(Clone, Debug)]
pub struct ScenarioResults {
    pub sectors: IndexMap<Sector, DemandTimeseries>,
    pub aggregated: AggregatedDemand,
}

/// Runs one scenario over every sector present in the (already preprocessed)
/// baseline table.
pub fn run_scenario(
    baseline: &BaselineDemand,
    scenario: &ScenarioInput,
    initial_year: u32,
    final_year: u32,
) -> anyhow::Result<ScenarioResults> {
    info!(
        scenario = %scenario.name,
        sector_count = baseline.sectors().len(),
        initial_year,
        final_year,
        "running scenario"
    );

    let sectors: Vec<(Sector, DemandTimeseries)> = baseline
        .sectors()
        .par_iter()
        .map(|&sector| {
            let column = baseline.sector_column(sector)?;
            let sector_scenario = scenario.sector(sector)?;
            let timeseries = sectoral_demand_timeseries(
                sector,
                &column,
                sector_scenario,
                initial_year,
                final_year,
            )
            .with_context(|| {
                format!("scenario `{}`, sector {sector}", scenario.name)
            })?;
            Ok((sector, timeseries))
        })
        .collect::<anyhow::Result<_>>()?;

    let sectors: IndexMap<Sector, DemandTimeseries> = sectors.into_iter().collect();
    let aggregated = aggregate_sectors(&sectors, initial_year);

    Ok(ScenarioResults {
        sectors,
        aggregated,
    })
}

/// Sums all sector tables into one, stripping the electrifiable and
/// hydrogenizable suffixes so derived rows fold back into their base
/// carriers.
fn aggregate_sectors(
    sectors: &IndexMap<Sector, DemandTimeseries>,
    initial_year: u32,
) -> AggregatedDemand {
    let mut rows: IndexMap<String, Vec<f64>> = IndexMap::new();

    for timeseries in sectors.values() {
        for (carrier, values) in timeseries.rows() {
            let base_carrier = base_carrier_name(carrier);
            match rows.get_mut(base_carrier) {
                Some(totals) => {
                    for (total, value) in totals.iter_mut().zip(&values) {
                        *total += value;
                    }
                }
                None => {
                    rows.insert(base_carrier.to_string(), values);
                }
            }
        }
    }

    AggregatedDemand { initial_year, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::baseline::preprocess_baseline_demand;
    use crate::input::SectorScenario;
    use crate::core::schedule::{GrowthSchedule, RateSchedule};
    use approx::assert_relative_eq;
    use rstest::*;

    fn full_decades(rate: f64) -> RateSchedule {
        RateSchedule::from([(2020, rate), (2030, rate), (2040, rate)])
    }

    fn uniform_sector_scenario() -> SectorScenario {
        SectorScenario {
            demand_change_rates: GrowthSchedule::Uniform(full_decades(0.)),
            target_elec: 0.5,
            target_hydro: 0.5,
            elec_rates: full_decades(0.02),
            hydro_rates: full_decades(0.01),
            elec_conv: 0.9,
            hydro_conv: 1.,
        }
    }

    #[fixture]
    fn baseline() -> BaselineDemand {
        let mut demand = BaselineDemand::new(vec![Sector::Industry, Sector::Transport]);
        demand.insert_row("Electricity", vec![80., 10.]).unwrap();
        demand.insert_row("Hydrogen", vec![5., 0.]).unwrap();
        demand.insert_row("Natural gas", vec![100., 40.]).unwrap();
        preprocess_baseline_demand(demand)
    }

    #[fixture]
    fn scenario() -> ScenarioInput {
        ScenarioInput {
            name: "test".into(),
            sectors: IndexMap::from([
                (Sector::Industry, uniform_sector_scenario()),
                (Sector::Transport, uniform_sector_scenario()),
            ]),
        }
    }

    #[rstest]
    fn runs_every_baseline_sector(baseline: BaselineDemand, scenario: ScenarioInput) {
        let results = run_scenario(&baseline, &scenario, 2020, 2050).unwrap();
        assert_eq!(
            results.sectors.keys().copied().collect::<Vec<_>>(),
            vec![Sector::Industry, Sector::Transport]
        );
        for timeseries in results.sectors.values() {
            assert_eq!(timeseries.years().count(), 31);
        }
    }

    #[rstest]
    fn aggregation_folds_derived_carriers(baseline: BaselineDemand, scenario: ScenarioInput) {
        let results = run_scenario(&baseline, &scenario, 2020, 2050).unwrap();
        let aggregated_carriers: Vec<&str> =
            results.aggregated.rows().map(|(carrier, _)| carrier).collect();
        assert!(aggregated_carriers.contains(&"Natural gas"));
        assert!(!aggregated_carriers
            .iter()
            .any(|c| c.ends_with("electrifiable") || c.ends_with("hydrogenizable")));

        // Year zero: both sectors' gas splits fold back to the full 140 PJ.
        assert_relative_eq!(
            results.aggregated.value("Natural gas", 2020).unwrap(),
            140.
        );
        // Electricity aggregates across sectors.
        assert_relative_eq!(results.aggregated.value("Electricity", 2020).unwrap(), 90.);
    }

    #[rstest]
    fn twh_variant_divides_by_3_6(baseline: BaselineDemand, scenario: ScenarioInput) {
        let results = run_scenario(&baseline, &scenario, 2020, 2050).unwrap();
        let twh = results.aggregated.to_twh();
        for ((_, pj_values), (_, twh_values)) in results.aggregated.rows().zip(twh.rows()) {
            for (pj, twh) in pj_values.iter().zip(twh_values) {
                assert_relative_eq!(*twh, pj / 3.6);
            }
        }
    }

    #[rstest]
    fn missing_sector_scenario_aborts_run(baseline: BaselineDemand) {
        let scenario = ScenarioInput {
            name: "partial".into(),
            sectors: IndexMap::from([(Sector::Industry, uniform_sector_scenario())]),
        };
        let err = run_scenario(&baseline, &scenario, 2020, 2050).unwrap_err();
        assert!(format!("{err:#}").contains("Transport"));
    }

    #[rstest]
    fn parallel_runs_are_deterministic(baseline: BaselineDemand, scenario: ScenarioInput) {
        let first = run_scenario(&baseline, &scenario, 2020, 2050).unwrap();
        let second = run_scenario(&baseline, &scenario, 2020, 2050).unwrap();
        assert_eq!(first.sectors, second.sectors);
        assert_eq!(first.aggregated, second.aggregated);
    }
}
