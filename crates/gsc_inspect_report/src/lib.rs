//! CSV report generation from accumulated inspection rows.

use gsc_inspect::{Record, ReportData};
use std::collections::BTreeSet;
use std::path::Path;

/// Header for `records`: the sorted union of field names across all rows.
/// The base fields are always present; `error` joins the header only when
/// at least one row carries it.
pub fn header(records: &[Record]) -> Vec<&'static str> {
    let mut names: BTreeSet<&'static str> = Record::FIELD_NAMES.iter().copied().collect();
    if records.iter().any(|r| r.error.is_some()) {
        names.insert("error");
    }
    names.into_iter().collect()
}

/// Build the CSV document in memory (for testing or embedding). One header
/// line, then one line per record in accumulation order; cells a row lacks
/// render empty.
pub fn build_csv(data: &ReportData) -> Result<String, ReportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let header = header(&data.records);
    wtr.write_record(&header).map_err(ReportError::Csv)?;
    for record in &data.records {
        wtr.write_record(header.iter().map(|name| record.cell(name)))
            .map_err(ReportError::Csv)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ReportError::Io(std::io::Error::other(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Io(std::io::Error::other(e.to_string())))
}

/// Write the CSV report to `out_path`, overwriting any existing file. Plain
/// single write; no temp-file swap.
pub fn write_report(data: &ReportData, out_path: impl AsRef<Path>) -> Result<(), ReportError> {
    let csv = build_csv(data)?;
    std::fs::write(out_path.as_ref(), csv).map_err(ReportError::Io)?;
    Ok(())
}

#[derive(Debug)]
pub enum ReportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "io: {}", e),
            ReportError::Csv(e) => write!(f, "csv: {}", e),
        }
    }
}

impl std::error::Error for ReportError {}
