//! Human-readable text output formatter

use crate::error::Result;
use crate::format::{NearbyReport, OutputFormatter};

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &NearbyReport) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&format!("Nearby places ({})\n", report.mode));
        output.push_str(&format!("Origin: {}\n", report.origin));
        output.push_str(&format!(
            "Scanned: {} (skipped {})\n\n",
            report.scanned, report.skipped
        ));

        if report.results.is_empty() {
            output.push_str("No places found.\n");
            return Ok(output);
        }

        for (rank, result) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {} [{:.1}] {:.2} km\n",
                rank + 1,
                result.name,
                result.rating,
                result.distance
            ));
            if !result.location.is_empty() {
                output.push_str(&format!("     {}\n", result.location));
            }
        }

        Ok(output)
    }
}
