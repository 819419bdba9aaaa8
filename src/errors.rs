use crate::core::carriers::Sector;
use thiserror::Error;

/// Error taxonomy for the demand projection engine.
///
/// All of these are fail-fast: a missing rate or a malformed table aborts the
/// run for the affected sector/scenario rather than substituting a default.
#[derive(Debug, Error)]
pub enum DemandModelError {
    #[error("no {schedule} rate defined for period {period} (queried for year {year})")]
    MissingRatePeriod {
        schedule: &'static str,
        year: u32,
        period: u32,
    },
    #[error("carrier set contains `{suffix}` carriers but no `{target}` carrier to receive switched demand")]
    MissingTargetCarrier {
        target: &'static str,
        suffix: &'static str,
    },
    #[error("sector {sector} requires a {expected} demand change schedule")]
    GrowthScheduleMismatch {
        sector: Sector,
        expected: &'static str,
    },
    #[error("baseline table has no column for sector {0}")]
    MissingSectorColumn(Sector),
    #[error("scenario defines no configuration for sector {0}")]
    MissingSectorScenario(Sector),
    #[error("unknown scenario preset `{0}` (expected one of: ambitious, baseline, slow_transformation)")]
    UnknownScenario(String),
    #[error("final year {final_year} must be after initial year {initial_year}")]
    InvalidHorizon { initial_year: u32, final_year: u32 },
    #[error("malformed baseline table: {0}")]
    BaselineShape(String),
}
