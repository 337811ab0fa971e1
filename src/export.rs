// src/export.rs

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::constants::{EXPORT_DELIMITER, SECONDS_PASSED_COLUMN};
use crate::data_analysis::aligned_series::AlignedSeries;
use crate::error::Result;

/// Writes `series` as CSV to `path`. Missing values become empty cells.
pub fn write_aligned_csv<P: AsRef<Path>>(path: P, series: &AlignedSeries) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_aligned_csv_to(file, series)?;
    info!(
        "Exported {} rows x {} channels to {}",
        series.len(),
        series.channels().len(),
        path.display()
    );
    Ok(())
}

pub fn write_aligned_csv_to<W: Write>(sink: W, series: &AlignedSeries) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(EXPORT_DELIMITER)
        .from_writer(sink);

    let mut header = Vec::with_capacity(series.channels().len() + 1);
    header.push(SECONDS_PASSED_COLUMN.to_string());
    header.extend(series.channels().iter().cloned());
    writer.write_record(&header)?;

    for row in series.rows() {
        let mut record = Vec::with_capacity(row.values.len() + 1);
        record.push(row.seconds_passed.to_string());
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
