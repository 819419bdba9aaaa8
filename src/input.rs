//! Ingestion of the two external inputs: the harmonized baseline demand CSV
//! and the scenario configuration (JSON).
//!
//! Both are validated eagerly so the engine can assume well-formed inputs:
//! unknown sector columns, non-numeric or negative demand values, out-of-range
//! target fractions and non-finite rates are all rejected here.

use crate::core::baseline::BaselineDemand;
use crate::core::carriers::Sector;
use crate::core::schedule::{GrowthSchedule, RateSchedule};
use crate::errors::DemandModelError;
use anyhow::{anyhow, bail, Context};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_valid::Validate;
use std::io::Read;

/// Expected header of the baseline table's carrier column.
const CARRIER_COLUMN: &str = "Carrier";

/// Reads the baseline demand table from CSV.
///
/// Expected shape: first column `Carrier`, remaining columns sector names
/// (Industry/Transport/Buildings/Agriculture), cells holding non-negative
/// demand in PJ.
pub fn read_baseline_demand(reader: impl Read) -> anyhow::Result<BaselineDemand> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers = csv_reader.headers().context("reading baseline header")?;
    let mut header_iter = headers.iter();
    match header_iter.next() {
        Some(CARRIER_COLUMN) => {}
        other => {
            return Err(DemandModelError::BaselineShape(format!(
                "first column must be `{CARRIER_COLUMN}`, got {other:?}"
            ))
            .into());
        }
    }
    let sectors = header_iter
        .map(|header| {
            Sector::from_column_header(header).ok_or_else(|| {
                DemandModelError::BaselineShape(format!("unknown sector column `{header}`"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if sectors.is_empty() {
        bail!(DemandModelError::BaselineShape(
            "baseline table has no sector columns".into()
        ));
    }

    let mut demand = BaselineDemand::new(sectors);
    for record in csv_reader.records() {
        let record = record.context("reading baseline row")?;
        let carrier = record
            .get(0)
            .ok_or_else(|| DemandModelError::BaselineShape("empty baseline row".into()))?
            .to_string();
        let values = record
            .iter()
            .skip(1)
            .map(|cell| {
                let value: f64 = cell.trim().parse().map_err(|_| {
                    DemandModelError::BaselineShape(format!(
                        "non-numeric demand value `{cell}` for carrier `{carrier}`"
                    ))
                })?;
                if !value.is_finite() || value < 0. {
                    return Err(DemandModelError::BaselineShape(format!(
                        "demand for carrier `{carrier}` must be a non-negative finite value, got {value}"
                    )));
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>, _>>()?;
        demand.insert_row(carrier, values)?;
    }

    Ok(demand)
}

/// Scenario configuration: one [`SectorScenario`] per sector, plus a name
/// used in output file naming.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioInput {
    pub name: String,
    pub sectors: IndexMap<Sector, SectorScenario>,
}

impl ScenarioInput {
    pub fn sector(&self, sector: Sector) -> Result<&SectorScenario, DemandModelError> {
        self.sectors
            .get(&sector)
            .ok_or(DemandModelError::MissingSectorScenario(sector))
    }

    /// Validates all sector configurations; call after deserialization.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (sector, config) in &self.sectors {
            config
                .validate()
                .map_err(|e| anyhow!("invalid configuration for sector {sector}: {e}"))?;
            config.elec_rates.check_fractions("electrification")?;
            config.hydro_rates.check_fractions("hydrogenization")?;
            config.demand_change_rates.check_finite()?;
            if !config.elec_conv.is_finite() || !config.hydro_conv.is_finite() {
                bail!("conversion efficiencies for sector {sector} must be finite");
            }
        }
        Ok(())
    }
}

/// Per-sector scenario assumptions.
///
/// `target_elec` and `target_hydro` are each fractions in [0, 1] but their
/// sum is unconstrained: a sum below 1 discards part of the fossil baseline
/// at initialization, a sum above 1 inflates it. Both are legitimate
/// scenario assumptions and are not normalized away.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SectorScenario {
    /// Per-decade organic demand change; uniform map for most sectors, an
    /// `Other`/`Heat - space` split for Buildings.
    pub demand_change_rates: GrowthSchedule,
    /// Share of each fossil carrier's demand eligible for electrification.
    #[validate(minimum = 0.)]
    #[validate(maximum = 1.)]
    pub target_elec: f64,
    /// Share of each fossil carrier's demand eligible for hydrogenization.
    #[validate(minimum = 0.)]
    #[validate(maximum = 1.)]
    pub target_hydro: f64,
    /// Per-decade share of eligible demand electrified each year.
    pub elec_rates: RateSchedule,
    /// Per-decade share of eligible demand hydrogenized each year.
    pub hydro_rates: RateSchedule,
    /// Final-energy efficiency of electrified end use relative to the
    /// original carrier (may exceed 1 in principle, never negative).
    #[validate(minimum = 0.)]
    pub elec_conv: f64,
    /// Final-energy efficiency of hydrogenized end use.
    #[validate(minimum = 0.)]
    pub hydro_conv: f64,
}

/// Deserializes and validates a scenario configuration from JSON.
pub fn ingest_scenario(json: impl Read) -> anyhow::Result<ScenarioInput> {
    let scenario: ScenarioInput =
        serde_json::from_reader(json).context("parsing scenario configuration")?;
    scenario.validate()?;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::io::Cursor;

    #[rstest]
    fn reads_baseline_table() {
        let csv = "Carrier,Industry,Buildings\nNatural gas,100.5,50\nElectricity,80,30.25\n";
        let demand = read_baseline_demand(Cursor::new(csv)).unwrap();
        assert_eq!(demand.sectors(), &[Sector::Industry, Sector::Buildings]);
        let column = demand.sector_column(Sector::Buildings).unwrap();
        assert_eq!(column["Natural gas"], 50.);
        assert_eq!(column["Electricity"], 30.25);
    }

    #[rstest]
    fn rejects_unknown_sector_column() {
        let csv = "Carrier,Industry,Gross total\nElectricity,80,200\n";
        let err = read_baseline_demand(Cursor::new(csv)).unwrap_err();
        assert!(err.to_string().contains("unknown sector column"));
    }

    #[rstest]
    fn rejects_missing_carrier_column() {
        let csv = "Fuel,Industry\nElectricity,80\n";
        assert!(read_baseline_demand(Cursor::new(csv)).is_err());
    }

    #[rstest]
    #[case("Carrier,Industry\nElectricity,eighty\n")]
    #[case("Carrier,Industry\nElectricity,-1\n")]
    fn rejects_bad_demand_values(#[case] csv: &str) {
        assert!(read_baseline_demand(Cursor::new(csv)).is_err());
    }

    fn scenario_json(target_elec: f64) -> String {
        format!(
            r#"{{
                "name": "test",
                "sectors": {{
                    "Industry": {{
                        "demand_change_rates": {{"2020": 0.005}},
                        "target_elec": {target_elec},
                        "target_hydro": 0.25,
                        "elec_rates": {{"2020": 0.01}},
                        "hydro_rates": {{"2020": 0.0}},
                        "elec_conv": 0.9,
                        "hydro_conv": 1.0
                    }}
                }}
            }}"#
        )
    }

    #[rstest]
    fn ingests_valid_scenario() {
        let scenario = ingest_scenario(Cursor::new(scenario_json(0.75))).unwrap();
        assert_eq!(scenario.name, "test");
        let industry = scenario.sector(Sector::Industry).unwrap();
        assert_eq!(industry.target_elec, 0.75);
        assert_eq!(industry.elec_rates.rate_for_year(2025), Some(0.01));
    }

    #[rstest]
    fn rejects_out_of_range_target_fraction() {
        assert!(ingest_scenario(Cursor::new(scenario_json(1.5))).is_err());
    }

    #[rstest]
    fn rejects_unknown_fields() {
        let json = r#"{"name": "x", "sectors": {}, "plotting": true}"#;
        assert!(ingest_scenario(Cursor::new(json)).is_err());
    }

    #[rstest]
    fn missing_sector_scenario_is_an_error() {
        let scenario = ingest_scenario(Cursor::new(scenario_json(0.75))).unwrap();
        assert!(matches!(
            scenario.sector(Sector::Transport),
            Err(DemandModelError::MissingSectorScenario(Sector::Transport))
        ));
    }

    #[rstest]
    fn rejects_out_of_range_switching_rate() {
        let json = scenario_json(0.75).replace(r#""elec_rates": {"2020": 0.01}"#, r#""elec_rates": {"2020": 1.01}"#);
        assert!(ingest_scenario(Cursor::new(json)).is_err());
    }
}
