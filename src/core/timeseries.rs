//! The sectoral timeseries driver: the year-by-year recurrence producing one
//! sector's carrier × year demand table.
//!
//! The year loop is strictly sequential (each step consumes the previous
//! step's vector); parallelism lives one level up, across sectors.

use crate::core::carriers::Sector;
use crate::core::conversion::conversion_matrix;
use crate::core::fuel_switch::initialize_demand;
use crate::core::growth::growth_vector;
use crate::errors::DemandModelError;
use crate::input::SectorScenario;
use anyhow::Context;
use indexmap::IndexMap;
use nalgebra::DVector;
use tracing::debug;

/// One sector's projected demand: a fixed carrier list and one PJ vector per
/// year from `initial_year` to the final year inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct DemandTimeseries {
    sector: Sector,
    carriers: Vec<String>,
    initial_year: u32,
    values: Vec<DVector<f64>>,
}

impl DemandTimeseries {
    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn carriers(&self) -> &[String] {
        &self.carriers
    }

    pub fn initial_year(&self) -> u32 {
        self.initial_year
    }

    pub fn final_year(&self) -> u32 {
        self.initial_year + self.values.len() as u32 - 1
    }

    pub fn years(&self) -> impl Iterator<Item = u32> + '_ {
        self.initial_year..=self.final_year()
    }

    /// The demand for one carrier in one year, if both are in range.
    pub fn value(&self, carrier: &str, year: u32) -> Option<f64> {
        let carrier_idx = self.carriers.iter().position(|c| c == carrier)?;
        let year_idx = year.checked_sub(self.initial_year)? as usize;
        self.values.get(year_idx).map(|v| v[carrier_idx])
    }

    /// Iterates carrier rows, each with one value per year of the horizon.
    pub fn rows(&self) -> impl Iterator<Item = (&str, Vec<f64>)> {
        self.carriers.iter().enumerate().map(|(carrier_idx, carrier)| {
            (
                carrier.as_str(),
                self.values.iter().map(|v| v[carrier_idx]).collect(),
            )
        })
    }
}

/// Projects one sector's baseline demand over the full horizon.
///
/// The initial state is the fuel-switch-expanded baseline vector at
/// `initial_year`; each transition applies the conversion matrix followed by
/// the elementwise growth factor. Any missing schedule period aborts the
/// sector's projection; there is no partial output.
pub fn sectoral_demand_timeseries(
    sector: Sector,
    baseline: &IndexMap<String, f64>,
    scenario: &SectorScenario,
    initial_year: u32,
    final_year: u32,
) -> anyhow::Result<DemandTimeseries> {
    if final_year <= initial_year {
        return Err(DemandModelError::InvalidHorizon {
            initial_year,
            final_year,
        }
        .into());
    }

    let initial = initialize_demand(baseline, scenario.target_elec, scenario.target_hydro);
    let carriers = initial.carriers().to_vec();
    debug!(
        %sector,
        carrier_count = carriers.len(),
        initial_year,
        final_year,
        "initialized sector demand vector"
    );

    let mut values = Vec::with_capacity((final_year - initial_year + 1) as usize);
    values.push(initial.values().clone());

    for year in initial_year..final_year {
        let growth = growth_vector(year, &carriers, sector, &scenario.demand_change_rates)
            .with_context(|| format!("building growth vector for sector {sector}, year {year}"))?;
        let conversion = conversion_matrix(
            year,
            &carriers,
            &scenario.elec_rates,
            &scenario.hydro_rates,
            scenario.elec_conv,
            scenario.hydro_conv,
        )
        .with_context(|| format!("building conversion matrix for sector {sector}, year {year}"))?;

        let current = values.last().expect("at least the initial vector is present");
        values.push(growth.component_mul(&(conversion * current)));
    }

    Ok(DemandTimeseries {
        sector,
        carriers,
        initial_year,
        values,
    })
}
