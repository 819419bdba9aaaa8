//! Growth vector construction.
//!
//! The growth vector holds the multiplicative factor `1 + rate` applied to
//! each carrier after the conversion step. For every sector but Buildings
//! the factor is uniform across carriers; Buildings applies its dedicated
//! "Heat - space" schedule to that carrier and the "Other" schedule to the
//! rest.

use crate::core::carriers::Sector;
use crate::core::schedule::GrowthSchedule;
use crate::errors::DemandModelError;
use nalgebra::DVector;

/// Builds the per-carrier growth factor vector for one year, indexed by the
/// fixed carrier set.
pub fn growth_vector(
    year: u32,
    carriers: &[String],
    sector: Sector,
    demand_change_rates: &GrowthSchedule,
) -> Result<DVector<f64>, DemandModelError> {
    let factors = carriers
        .iter()
        .map(|carrier| {
            demand_change_rates
                .rate_for(sector, carrier, year)
                .map(|rate| 1. + rate)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DVector::from_vec(factors))
}
