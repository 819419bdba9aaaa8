//! Output destinations and the CSV writers for projection results.
//!
//! Everything goes through the [`Output`] trait so the library can be driven
//! against in-memory buffers or a no-op sink; the binary plugs in
//! [`FileOutput`] pointed at a directory.

use crate::core::projection::{AggregatedDemand, ScenarioResults};
use crate::core::timeseries::DemandTimeseries;
use crate::core::units::round_to_dp;
use formatx::formatx;
use std::fmt::Debug;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Decimal places used in the published tables.
const SECTOR_TABLE_DECIMALS: u32 = 3;
const AGGREGATE_TABLE_DECIMALS: u32 = 1;

pub trait Output: Debug {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write>;
    /// Whether this output can be considered a no-op and therefore that any code that only writes to the output can be skipped.
    fn is_noop(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct FileOutput {
    directory_path: PathBuf,
    file_template: String,
}

impl FileOutput {
    pub fn new(directory_path: PathBuf, file_template: String) -> Self {
        Self {
            directory_path,
            file_template,
        }
    }
}

impl Output for FileOutput {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write> {
        Ok(BufWriter::new(File::create(self.directory_path.join(
            formatx!(&self.file_template, location_key).unwrap(),
        ))?))
    }
}

impl Output for &FileOutput {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write> {
        <FileOutput as Output>::writer_for_location_key(self, location_key)
    }
}

/// An output that goes to nowhere/ a "sink"/ /dev/null.
#[derive(Debug, Default)]
pub struct SinkOutput;

impl Output for SinkOutput {
    fn writer_for_location_key(&self, _location_key: &str) -> anyhow::Result<impl Write> {
        Ok(io::sink())
    }

    fn is_noop(&self) -> bool {
        true
    }
}

/// Writes every table of a scenario run: one CSV per sector plus the
/// aggregated PJ and TWh tables.
pub fn write_scenario_results(
    output: &impl Output,
    scenario_name: &str,
    results: &ScenarioResults,
) -> anyhow::Result<()> {
    for (sector, timeseries) in &results.sectors {
        let location_key = format!("scenario={scenario_name};sector={sector}");
        let writer = output.writer_for_location_key(&location_key)?;
        write_sector_timeseries(writer, timeseries)?;
    }
    let location_key = format!("scenario={scenario_name};unit=PJ");
    let writer = output.writer_for_location_key(&location_key)?;
    write_aggregated_demand(writer, &results.aggregated)?;
    let location_key = format!("scenario={scenario_name};unit=TWh");
    let writer = output.writer_for_location_key(&location_key)?;
    write_aggregated_demand(writer, &results.aggregated.to_twh())?;
    Ok(())
}

/// Writes one sector's carrier × year table.
///
/// Values are rounded to 3 decimal places; carriers with no demand anywhere
/// in the horizon are dropped from the published table.
pub fn write_sector_timeseries(
    writer: impl Write,
    timeseries: &DemandTimeseries,
) -> anyhow::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    write_header(&mut csv_writer, timeseries.years())?;

    for (carrier, values) in timeseries.rows() {
        if !values.iter().any(|value| *value > 0.) {
            continue;
        }
        write_row(
            &mut csv_writer,
            carrier,
            &values,
            SECTOR_TABLE_DECIMALS,
        )?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes an aggregated cross-sector table, rounded to 1 decimal place.
pub fn write_aggregated_demand(
    writer: impl Write,
    aggregated: &AggregatedDemand,
) -> anyhow::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    write_header(&mut csv_writer, aggregated.years())?;

    for (carrier, values) in aggregated.rows() {
        write_row(&mut csv_writer, carrier, values, AGGREGATE_TABLE_DECIMALS)?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn write_header(
    csv_writer: &mut csv::Writer<impl Write>,
    years: impl Iterator<Item = u32>,
) -> anyhow::Result<()> {
    let mut header = vec!["Carrier".to_string()];
    header.extend(years.map(|year| year.to_string()));
    csv_writer.write_record(&header)?;
    Ok(())
}

fn write_row(
    csv_writer: &mut csv::Writer<impl Write>,
    carrier: &str,
    values: &[f64],
    decimal_places: u32,
) -> anyhow::Result<()> {
    let mut row = vec![carrier.to_string()];
    row.extend(
        values
            .iter()
            .map(|value| round_to_dp(*value, decimal_places).to_string()),
    );
    csv_writer.write_record(&row)?;
    Ok(())
}
