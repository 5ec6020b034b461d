//! Report data structure (CSV is rendered in the gsc_inspect_report crate).

use crate::extract::Record;
use serde::{Deserialize, Serialize};

/// Data handed to the CSV renderer: the inspected property and the rows in
/// run order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportData {
    pub site_url: String,
    pub records: Vec<Record>,
}
