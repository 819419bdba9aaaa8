//! Baseline demand table and its preprocessing step.
//!
//! The baseline table has one row per carrier and one column per sector,
//! holding annual final energy demand in PJ. Before projection, all heat
//! rows (centralized, decentralized, ...) are merged and re-split into
//! space and water heating, which are projected separately.

use crate::core::carriers::{Sector, HEAT_PREFIX, HEAT_SPACE, HEAT_WATER};
use crate::errors::DemandModelError;
use indexmap::IndexMap;

/// Share of total heat demand attributed to space heating; the remainder is
/// water heating. Split from national household energy statistics.
pub const SPACE_HEAT_SHARE: f64 = 0.8;
pub const WATER_HEAT_SHARE: f64 = 0.2;

/// Carrier × sector table of baseline demand in PJ.
///
/// Row (carrier) order is explicit and preserved from the source table; it
/// seeds the carrier ordering used throughout the projection.
#[derive(Clone, Debug, PartialEq)]
pub struct BaselineDemand {
    sectors: Vec<Sector>,
    rows: IndexMap<String, Vec<f64>>,
}

impl BaselineDemand {
    pub fn new(sectors: Vec<Sector>) -> Self {
        Self {
            sectors,
            rows: Default::default(),
        }
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn carriers(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Appends a carrier row. The values must be aligned with [`Self::sectors`].
    pub fn insert_row(
        &mut self,
        carrier: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), DemandModelError> {
        let carrier = carrier.into();
        if values.len() != self.sectors.len() {
            return Err(DemandModelError::BaselineShape(format!(
                "row `{carrier}` has {} values for {} sector columns",
                values.len(),
                self.sectors.len()
            )));
        }
        if self.rows.contains_key(&carrier) {
            return Err(DemandModelError::BaselineShape(format!(
                "duplicate carrier row `{carrier}`"
            )));
        }
        self.rows.insert(carrier, values);
        Ok(())
    }

    /// Extracts one sector's demand vector, keyed by carrier in row order.
    pub fn sector_column(&self, sector: Sector) -> Result<IndexMap<String, f64>, DemandModelError> {
        let column_idx = self
            .sectors
            .iter()
            .position(|s| *s == sector)
            .ok_or(DemandModelError::MissingSectorColumn(sector))?;
        Ok(self
            .rows
            .iter()
            .map(|(carrier, values)| (carrier.clone(), values[column_idx]))
            .collect())
    }
}

/// Merges every row whose carrier starts with "Heat" into a single heat total
/// per sector, then splits it 80/20 into "Heat - space" and "Heat - water".
///
/// Total heat demand is unchanged by the split. A baseline with no heat rows
/// yields two all-zero heat rows, which is valid input downstream.
pub fn preprocess_baseline_demand(demand: BaselineDemand) -> BaselineDemand {
    let sector_count = demand.sectors.len();
    let mut heat_totals = vec![0.; sector_count];
    let mut preprocessed = BaselineDemand::new(demand.sectors);

    for (carrier, values) in demand.rows {
        if carrier.starts_with(HEAT_PREFIX) {
            for (total, value) in heat_totals.iter_mut().zip(&values) {
                *total += value;
            }
        } else {
            preprocessed.rows.insert(carrier, values);
        }
    }

    preprocessed.rows.insert(
        HEAT_SPACE.into(),
        heat_totals.iter().map(|h| h * SPACE_HEAT_SHARE).collect(),
    );
    preprocessed.rows.insert(
        HEAT_WATER.into(),
        heat_totals.iter().map(|h| h * WATER_HEAT_SHARE).collect(),
    );

    preprocessed
}
