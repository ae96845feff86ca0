//! JSON output formatter

use crate::error::Result;
use crate::format::{NearbyReport, OutputFormatter};

/// JSON formatter - outputs the result array as the HTTP API would
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Result array as returned by the API"
    }

    fn format(&self, report: &NearbyReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(&report.results)?)
    }
}
