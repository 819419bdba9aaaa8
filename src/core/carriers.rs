//! Static taxonomy of energy carriers and consuming sectors.
//!
//! Carrier names are plain strings matching the harmonized statistics the
//! baseline table is built from; the functions here encode the prefix/suffix
//! conventions the rest of the engine keys off.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

pub const ELECTRICITY: &str = "Electricity";
pub const HYDROGEN: &str = "Hydrogen";
pub const HEAT_PREFIX: &str = "Heat";
pub const HEAT_SPACE: &str = "Heat - space";
pub const HEAT_WATER: &str = "Heat - water";

/// Suffixes of the derived carriers created by the fuel switch initialization.
pub const ELECTRIFIABLE_SUFFIX: &str = " - electrifiable";
pub const HYDROGENIZABLE_SUFFIX: &str = " - hydrogenizable";

/// Prefix match is case-sensitive, e.g. "Coal and coal products",
/// "Oil and petroleum products".
const FOSSIL_FUEL_PREFIXES: [&str; 3] = ["Coal", "Natural gas", "Oil"];

/// A consuming segment of the economy. Sector names double as column headers
/// in the baseline table and as keys in scenario configuration.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
pub enum Sector {
    Industry,
    Transport,
    Buildings,
    Agriculture,
}

impl Sector {
    /// Parses a baseline table column header into a sector, if it names one.
    pub fn from_column_header(header: &str) -> Option<Self> {
        Self::from_str(header).ok()
    }
}

/// Whether a carrier is subject to fuel switching at initialization.
pub fn is_fossil_fuel(carrier: &str) -> bool {
    FOSSIL_FUEL_PREFIXES
        .iter()
        .any(|prefix| carrier.starts_with(prefix))
}

pub fn is_electrifiable(carrier: &str) -> bool {
    carrier.ends_with(ELECTRIFIABLE_SUFFIX)
}

pub fn is_hydrogenizable(carrier: &str) -> bool {
    carrier.ends_with(HYDROGENIZABLE_SUFFIX)
}

/// Strips the electrifiable/hydrogenizable suffix (if any), recovering the
/// statistical carrier name used when aggregating across sectors.
pub fn base_carrier_name(carrier: &str) -> &str {
    carrier
        .strip_suffix(ELECTRIFIABLE_SUFFIX)
        .or_else(|| carrier.strip_suffix(HYDROGENIZABLE_SUFFIX))
        .unwrap_or(carrier)
}
