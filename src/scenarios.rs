//! Built-in scenario presets.
//!
//! Three scenarios ship with the model, differing in how fast demand is
//! electrified/hydrogenized and how fast building space heat demand falls.
//! The target splits and conversion efficiencies are shared assumptions
//! across all presets; only the rate schedules vary.

use crate::core::carriers::Sector;
use crate::core::schedule::{GrowthSchedule, RateSchedule};
use crate::errors::DemandModelError;
use crate::input::{ScenarioInput, SectorScenario};
use indexmap::IndexMap;
use strum::IntoEnumIterator;

pub const PRESET_NAMES: [&str; 3] = ["ambitious", "baseline", "slow_transformation"];

/// Returns the named built-in scenario.
pub fn preset(name: &str) -> Result<ScenarioInput, DemandModelError> {
    if !PRESET_NAMES.contains(&name) {
        return Err(DemandModelError::UnknownScenario(name.to_string()));
    }
    Ok(ScenarioInput {
        name: name.to_string(),
        sectors: Sector::iter()
            .map(|sector| {
                (
                    sector,
                    SectorScenario {
                        demand_change_rates: demand_change_rates(name, sector),
                        target_elec: target_elec(sector),
                        target_hydro: 1. - target_elec(sector),
                        elec_rates: elec_rates(name, sector),
                        hydro_rates: hydro_rates(name, sector),
                        elec_conv: elec_conv(sector),
                        hydro_conv: hydro_conv(sector),
                    },
                )
            })
            .collect::<IndexMap<_, _>>(),
    })
}

/// Share of each fossil carrier's demand earmarked for electrification; the
/// remainder goes to hydrogen.
fn target_elec(sector: Sector) -> f64 {
    match sector {
        Sector::Industry => 0.75,
        Sector::Transport => 0.2,
        Sector::Buildings => 1.0,
        Sector::Agriculture => 0.5,
    }
}

/// Final-energy efficiency of electrified end use relative to combustion
/// (e.g. heat pumps and EV drivetrains need far less final energy).
fn elec_conv(sector: Sector) -> f64 {
    match sector {
        Sector::Industry => 0.9,
        Sector::Transport => 0.3,
        Sector::Buildings => 0.5,
        Sector::Agriculture => 0.3,
    }
}

fn hydro_conv(sector: Sector) -> f64 {
    match sector {
        Sector::Industry | Sector::Transport => 1.,
        Sector::Buildings | Sector::Agriculture => 0.,
    }
}

fn demand_change_rates(scenario: &str, sector: Sector) -> GrowthSchedule {
    match sector {
        Sector::Industry => GrowthSchedule::Uniform(RateSchedule::from([
            (2020, 0.0050),
            (2030, 0.0025),
            (2040, 0.0025),
        ])),
        Sector::Transport => GrowthSchedule::Uniform(match scenario {
            "ambitious" => RateSchedule::from([(2020, 0.010), (2030, -0.010), (2040, -0.020)]),
            "baseline" => RateSchedule::from([(2020, 0.010), (2030, 0.00), (2040, -0.010)]),
            _ => RateSchedule::from([(2020, 0.010), (2030, 0.005), (2040, 0.000)]),
        }),
        Sector::Buildings => GrowthSchedule::Split {
            other: RateSchedule::from([(2020, 0.0050), (2030, 0.0025), (2040, 0.0025)]),
            heat_space: match scenario {
                "ambitious" => RateSchedule::from([(2020, -0.005), (2030, -0.04), (2040, -0.04)]),
                "baseline" => {
                    RateSchedule::from([(2020, -0.005), (2030, -0.025), (2040, -0.025)])
                }
                _ => RateSchedule::from([(2020, -0.005), (2030, -0.005), (2040, -0.005)]),
            },
        },
        Sector::Agriculture => {
            GrowthSchedule::Uniform(RateSchedule::from([(2020, 0.0), (2030, 0.0), (2040, 0.0)]))
        }
    }
}

fn elec_rates(scenario: &str, sector: Sector) -> RateSchedule {
    match scenario {
        "ambitious" => match sector {
            Sector::Industry => RateSchedule::from([(2020, 0.01), (2030, 0.03), (2040, 0.03)]),
            Sector::Transport | Sector::Buildings => {
                RateSchedule::from([(2020, 0.02), (2030, 0.04), (2040, 0.04)])
            }
            Sector::Agriculture => {
                RateSchedule::from([(2020, 0.01), (2030, 0.025), (2040, 0.025)])
            }
        },
        "baseline" => match sector {
            Sector::Industry => RateSchedule::from([(2020, 0.01), (2030, 0.02), (2040, 0.02)]),
            Sector::Transport | Sector::Buildings => {
                RateSchedule::from([(2020, 0.02), (2030, 0.03), (2040, 0.03)])
            }
            Sector::Agriculture => {
                RateSchedule::from([(2020, 0.01), (2030, 0.025), (2040, 0.025)])
            }
        },
        _ => match sector {
            Sector::Industry => RateSchedule::from([(2020, 0.01), (2030, 0.01), (2040, 0.01)]),
            Sector::Transport | Sector::Buildings => {
                RateSchedule::from([(2020, 0.02), (2030, 0.02), (2040, 0.02)])
            }
            Sector::Agriculture => {
                RateSchedule::from([(2020, 0.01), (2030, 0.025), (2040, 0.025)])
            }
        },
    }
}

fn hydro_rates(scenario: &str, sector: Sector) -> RateSchedule {
    match scenario {
        "ambitious" => match sector {
            Sector::Buildings => RateSchedule::from([(2020, 0.0), (2030, 0.0), (2040, 0.0)]),
            _ => RateSchedule::from([(2020, 0.000), (2030, 0.015), (2040, 0.030)]),
        },
        "baseline" => match sector {
            Sector::Buildings => RateSchedule::from([(2020, 0.0), (2030, 0.0), (2040, 0.0)]),
            _ => RateSchedule::from([(2020, 0.000), (2030, 0.005), (2040, 0.020)]),
        },
        _ => RateSchedule::from([(2020, 0.000), (2030, 0.0025), (2040, 0.0100)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("ambitious")]
    #[case("baseline")]
    #[case("slow_transformation")]
    fn presets_are_valid_and_cover_all_sectors(#[case] name: &str) {
        let scenario = preset(name).unwrap();
        assert_eq!(scenario.name, name);
        assert_eq!(scenario.sectors.len(), 4);
        scenario.validate().unwrap();
    }

    #[rstest]
    fn unknown_preset_is_an_error() {
        assert!(matches!(
            preset("net_zero_overnight"),
            Err(DemandModelError::UnknownScenario(_))
        ));
    }

    #[rstest]
    fn target_splits_are_complementary() {
        let scenario = preset("baseline").unwrap();
        for config in scenario.sectors.values() {
            assert_eq!(config.target_elec + config.target_hydro, 1.);
        }
    }

    #[rstest]
    fn ambitious_electrifies_faster_than_slow_transformation() {
        let ambitious = preset("ambitious").unwrap();
        let slow = preset("slow_transformation").unwrap();
        let ambitious_rate = ambitious.sectors[&Sector::Industry]
            .elec_rates
            .rate_for_year(2035)
            .unwrap();
        let slow_rate = slow.sectors[&Sector::Industry]
            .elec_rates
            .rate_for_year(2035)
            .unwrap();
        assert!(ambitious_rate > slow_rate);
    }

    #[rstest]
    fn buildings_growth_is_split_everywhere_else_uniform() {
        let scenario = preset("baseline").unwrap();
        assert!(matches!(
            scenario.sectors[&Sector::Buildings].demand_change_rates,
            GrowthSchedule::Split { .. }
        ));
        assert!(matches!(
            scenario.sectors[&Sector::Industry].demand_change_rates,
            GrowthSchedule::Uniform(_)
        ));
    }
}
