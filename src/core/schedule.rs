//! Decade-keyed rate schedules.
//!
//! All scenario rates (electrification, hydrogenization, demand change) are
//! step functions over decades: a mapping from decade-start year (2020, 2030,
//! 2040) to a rate. A query year is truncated down to its decade; querying a
//! decade the schedule does not define is a hard error, never a silent zero.

use crate::core::carriers::{Sector, HEAT_SPACE};
use crate::errors::DemandModelError;
use anyhow::bail;
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Truncates a year down to the decade bucket used for schedule lookups.
pub fn period_for_year(year: u32) -> u32 {
    year / 10 * 10
}

/// A mapping from decade-start year to a rate value.
///
/// Deserialized from a JSON object whose keys are decade-start years (JSON
/// object keys are strings, so `{"2020": 0.01}`).
#[derive(Clone, Debug, PartialEq)]
pub struct RateSchedule(IndexMap<u32, f64>);

impl RateSchedule {
    /// Looks up the rate for the decade containing `year`.
    pub fn rate_for_year(&self, year: u32) -> Option<f64> {
        self.0.get(&period_for_year(year)).copied()
    }

    pub fn rates(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.0.iter().map(|(period, rate)| (*period, *rate))
    }

    /// Checks that every rate is a fraction in [0, 1]; used for the
    /// electrification/hydrogenization schedules, where a rate is the share
    /// of eligible demand switched per year.
    pub(crate) fn check_fractions(&self, label: &str) -> anyhow::Result<()> {
        for (period, rate) in self.rates() {
            if !rate.is_finite() || !(0. ..=1.).contains(&rate) {
                bail!("{label} rate for period {period} must be a fraction in [0, 1], got {rate}");
            }
        }
        Ok(())
    }

    /// Checks that every rate is finite; demand change rates may legitimately
    /// be negative (declining demand).
    pub(crate) fn check_finite(&self, label: &str) -> anyhow::Result<()> {
        for (period, rate) in self.rates() {
            if !rate.is_finite() {
                bail!("{label} rate for period {period} must be finite, got {rate}");
            }
        }
        Ok(())
    }
}

impl<const N: usize> From<[(u32, f64); N]> for RateSchedule {
    fn from(rates: [(u32, f64); N]) -> Self {
        Self(IndexMap::from(rates))
    }
}

impl<'de> Deserialize<'de> for RateSchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // JSON object keys arrive as strings and need parsing into years.
        let raw = IndexMap::<String, f64>::deserialize(deserializer)?;
        let mut rates = IndexMap::with_capacity(raw.len());
        for (period, rate) in raw {
            let period = period.parse::<u32>().map_err(|_| {
                de::Error::custom(format!(
                    "rate schedule period `{period}` is not a decade-start year"
                ))
            })?;
            rates.insert(period, rate);
        }
        Ok(Self(rates))
    }
}

/// The demand change schedule for a sector.
///
/// Most sectors grow uniformly across carriers; Buildings carves out
/// "Heat - space" with its own schedule (space heating declines with
/// insulation retrofits while other building demand grows).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GrowthSchedule {
    Uniform(RateSchedule),
    Split {
        #[serde(rename = "Other")]
        other: RateSchedule,
        #[serde(rename = "Heat - space")]
        heat_space: RateSchedule,
    },
}

impl GrowthSchedule {
    /// The growth rate for one carrier in one year.
    ///
    /// Returns a `GrowthScheduleMismatch` error when the schedule shape does
    /// not fit the sector: Buildings requires a split schedule, every other
    /// sector a uniform one.
    pub fn rate_for(
        &self,
        sector: Sector,
        carrier: &str,
        year: u32,
    ) -> Result<f64, DemandModelError> {
        let schedule = match (sector, self) {
            (Sector::Buildings, GrowthSchedule::Split { other, heat_space }) => {
                if carrier == HEAT_SPACE {
                    heat_space
                } else {
                    other
                }
            }
            (Sector::Buildings, GrowthSchedule::Uniform(_)) => {
                return Err(DemandModelError::GrowthScheduleMismatch {
                    sector,
                    expected: "split (`Other`/`Heat - space`)",
                });
            }
            (_, GrowthSchedule::Uniform(schedule)) => schedule,
            (_, GrowthSchedule::Split { .. }) => {
                return Err(DemandModelError::GrowthScheduleMismatch {
                    sector,
                    expected: "uniform",
                });
            }
        };

        schedule
            .rate_for_year(year)
            .ok_or(DemandModelError::MissingRatePeriod {
                schedule: "demand change",
                year,
                period: period_for_year(year),
            })
    }

    pub(crate) fn check_finite(&self) -> anyhow::Result<()> {
        match self {
            GrowthSchedule::Uniform(schedule) => schedule.check_finite("demand change"),
            GrowthSchedule::Split { other, heat_space } => {
                other.check_finite("demand change (Other)")?;
                heat_space.check_finite("demand change (Heat - space)")
            }
        }
    }
}
