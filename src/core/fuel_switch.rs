//! Fuel switch initialization: expansion of a sector's baseline demand
//! vector into the simulation year-zero state.
//!
//! Each fossil fuel carrier is replaced by two derived rows holding the
//! portions of its demand eligible for conversion to electricity and to
//! hydrogen. The expanded carrier list is fixed here for the whole
//! simulation horizon; the conversion matrix and growth vector are indexed
//! against it and never against incidental table ordering.

use crate::core::carriers::{
    is_fossil_fuel, ELECTRIFIABLE_SUFFIX, HYDROGENIZABLE_SUFFIX,
};
use indexmap::IndexMap;
use nalgebra::DVector;

/// A sector's demand for one year: an explicit ordered carrier list plus the
/// PJ value for each carrier.
#[derive(Clone, Debug, PartialEq)]
pub struct DemandVector {
    carriers: Vec<String>,
    values: DVector<f64>,
}

impl DemandVector {
    pub fn new(carriers: Vec<String>, values: DVector<f64>) -> Self {
        debug_assert_eq!(carriers.len(), values.len());
        Self { carriers, values }
    }

    pub fn carriers(&self) -> &[String] {
        &self.carriers
    }

    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    pub fn get(&self, carrier: &str) -> Option<f64> {
        self.carriers
            .iter()
            .position(|c| c == carrier)
            .map(|idx| self.values[idx])
    }
}

/// Expands a baseline demand vector into the year-zero simulation state.
///
/// Non-fossil carriers pass through unchanged. Each fossil carrier with
/// demand `d` is dropped and replaced by `"{carrier} - electrifiable"` =
/// `d * target_elec` and `"{carrier} - hydrogenizable"` = `d * target_hydro`.
///
/// Contract: `target_elec` and `target_hydro` are fractions in [0, 1]
/// (enforced at configuration load) but are NOT required to sum to 1. When
/// they do not, fossil baseline mass is deliberately not conserved: the
/// derived rows sum to `d * (target_elec + target_hydro)`. This is a
/// scenario design knob, not silent truncation.
///
/// Ordering of the expanded vector: non-fossil carriers in baseline order,
/// then all electrifiable rows, then all hydrogenizable rows (each in
/// baseline fossil order).
pub fn initialize_demand(
    baseline: &IndexMap<String, f64>,
    target_elec: f64,
    target_hydro: f64,
) -> DemandVector {
    let mut carriers = Vec::with_capacity(baseline.len() * 2);
    let mut values = Vec::with_capacity(baseline.len() * 2);

    for (carrier, demand) in baseline {
        if !is_fossil_fuel(carrier) {
            carriers.push(carrier.clone());
            values.push(*demand);
        }
    }
    for (carrier, demand) in baseline {
        if is_fossil_fuel(carrier) {
            carriers.push(format!("{carrier}{ELECTRIFIABLE_SUFFIX}"));
            values.push(demand * target_elec);
        }
    }
    for (carrier, demand) in baseline {
        if is_fossil_fuel(carrier) {
            carriers.push(format!("{carrier}{HYDROGENIZABLE_SUFFIX}"));
            values.push(demand * target_hydro);
        }
    }

    DemandVector::new(carriers, DVector::from_vec(values))
}
