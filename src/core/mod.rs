pub mod baseline;
pub mod carriers;
pub mod conversion;
pub mod fuel_switch;
pub mod growth;
pub mod projection;
pub mod schedule;
pub mod timeseries;
pub mod units;
