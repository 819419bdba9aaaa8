//! Conversion matrix construction.
//!
//! For a given year the conversion matrix maps the current demand vector to
//! the pre-growth next-year vector. It is the identity over the carrier set
//! with switching flows added: a share `rate` of each eligible carrier's
//! demand leaves its diagonal and arrives at Electricity (or Hydrogen)
//! scaled by the sector's conversion efficiency. For an eligible column the
//! sum is therefore `1 - rate + conv * rate`, i.e. switching carries the
//! end-use efficiency difference.

use crate::core::carriers::{
    is_electrifiable, is_hydrogenizable, ELECTRICITY, ELECTRIFIABLE_SUFFIX, HYDROGEN,
    HYDROGENIZABLE_SUFFIX,
};
use crate::core::schedule::{period_for_year, RateSchedule};
use crate::errors::DemandModelError;
use nalgebra::DMatrix;

/// Builds the carrier × carrier conversion matrix for one year.
///
/// `carriers` is the fixed ordered carrier set established at fuel switch
/// initialization; rows and columns are indexed by it. Rate schedules must
/// define the decade containing `year`; an unlisted period is an error even
/// when the sector has no switchable carriers.
pub fn conversion_matrix(
    year: u32,
    carriers: &[String],
    elec_rates: &RateSchedule,
    hydro_rates: &RateSchedule,
    elec_conv: f64,
    hydro_conv: f64,
) -> Result<DMatrix<f64>, DemandModelError> {
    let elec_rate =
        elec_rates
            .rate_for_year(year)
            .ok_or(DemandModelError::MissingRatePeriod {
                schedule: "electrification",
                year,
                period: period_for_year(year),
            })?;
    let hydro_rate =
        hydro_rates
            .rate_for_year(year)
            .ok_or(DemandModelError::MissingRatePeriod {
                schedule: "hydrogenization",
                year,
                period: period_for_year(year),
            })?;

    let mut matrix = DMatrix::identity(carriers.len(), carriers.len());

    let electricity_row = carriers.iter().position(|c| c == ELECTRICITY);
    let hydrogen_row = carriers.iter().position(|c| c == HYDROGEN);

    for (column, carrier) in carriers.iter().enumerate() {
        if is_electrifiable(carrier) {
            let row = electricity_row.ok_or(DemandModelError::MissingTargetCarrier {
                target: ELECTRICITY,
                suffix: ELECTRIFIABLE_SUFFIX,
            })?;
            matrix[(row, column)] = elec_conv * elec_rate;
            matrix[(column, column)] = 1. - elec_rate;
        } else if is_hydrogenizable(carrier) {
            let row = hydrogen_row.ok_or(DemandModelError::MissingTargetCarrier {
                target: HYDROGEN,
                suffix: HYDROGENIZABLE_SUFFIX,
            })?;
            matrix[(row, column)] = hydro_conv * hydro_rate;
            matrix[(column, column)] = 1. - hydro_rate;
        }
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::*;

    fn carriers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[fixture]
    fn switchable_carriers() -> Vec<String> {
        carriers(&[
            "Electricity",
            "Hydrogen",
            "Natural gas - electrifiable",
            "Natural gas - hydrogenizable",
            "Biofuels",
        ])
    }

    #[rstest]
    fn identity_at_zero_rates(switchable_carriers: Vec<String>) {
        let matrix = conversion_matrix(
            2020,
            &switchable_carriers,
            &RateSchedule::from([(2020, 0.)]),
            &RateSchedule::from([(2020, 0.)]),
            0.9,
            1.,
        )
        .unwrap();
        assert_eq!(matrix, DMatrix::identity(5, 5));
    }

    #[rstest]
    fn switching_flows_and_reduced_diagonals(switchable_carriers: Vec<String>) {
        let matrix = conversion_matrix(
            2020,
            &switchable_carriers,
            &RateSchedule::from([(2020, 0.1)]),
            &RateSchedule::from([(2020, 0.05)]),
            0.5,
            1.,
        )
        .unwrap();

        // Electricity row picks up conv * rate from the electrifiable column.
        assert_relative_eq!(matrix[(0, 2)], 0.5 * 0.1);
        assert_relative_eq!(matrix[(2, 2)], 0.9);
        // Hydrogen row symmetrically.
        assert_relative_eq!(matrix[(1, 3)], 1. * 0.05);
        assert_relative_eq!(matrix[(3, 3)], 0.95);
        // Unaffected carriers stay identity.
        assert_relative_eq!(matrix[(4, 4)], 1.);
        assert_relative_eq!(matrix[(0, 4)], 0.);
    }

    /// Column sum for a switchable carrier is `(1 - rate) + conv * rate`.
    #[rstest]
    #[case(0., 0.9)]
    #[case(0.1, 0.5)]
    #[case(0.5, 1.)]
    #[case(1., 0.3)]
    fn column_sum_property(#[case] rate: f64, #[case] conv: f64) {
        let carrier_set = carriers(&["Electricity", "Coal and coal products - electrifiable"]);
        let matrix = conversion_matrix(
            2030,
            &carrier_set,
            &RateSchedule::from([(2030, rate)]),
            &RateSchedule::from([(2030, 0.)]),
            conv,
            1.,
        )
        .unwrap();
        let column_sum: f64 = matrix.column(1).iter().sum();
        assert_relative_eq!(column_sum, (1. - rate) + conv * rate);
    }

    #[rstest]
    fn missing_period_fails_even_without_switchable_carriers() {
        let carrier_set = carriers(&["Electricity", "Biofuels"]);
        let result = conversion_matrix(
            2050,
            &carrier_set,
            &RateSchedule::from([(2020, 0.1)]),
            &RateSchedule::from([(2020, 0.1)]),
            0.9,
            1.,
        );
        assert!(matches!(
            result,
            Err(DemandModelError::MissingRatePeriod {
                schedule: "electrification",
                year: 2050,
                period: 2050,
            })
        ));
    }

    #[rstest]
    fn electrifiable_without_electricity_carrier_is_an_error() {
        let carrier_set = carriers(&["Natural gas - electrifiable"]);
        let result = conversion_matrix(
            2020,
            &carrier_set,
            &RateSchedule::from([(2020, 0.1)]),
            &RateSchedule::from([(2020, 0.)]),
            0.9,
            1.,
        );
        assert!(matches!(
            result,
            Err(DemandModelError::MissingTargetCarrier {
                target: "Electricity",
                ..
            })
        ));
    }
}
