//! GPX output formatter

use crate::error::Result;
use crate::format::{NearbyReport, OutputFormatter};

/// GPX formatter - outputs one waypoint per result plus the query point
pub struct GpxFormatter;

/// Escape text for use in XML element content
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, report: &NearbyReport) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="travel-guide">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>Nearby places ({})</name>\n", report.mode));
        gpx.push_str(&format!("    <time>{}</time>\n", report.generated_at.to_rfc3339()));
        gpx.push_str("  </metadata>\n");

        // Origin waypoint
        gpx.push_str(&format!(
            r#"  <wpt lat="{}" lon="{}">"#,
            report.origin.lat, report.origin.lon
        ));
        gpx.push('\n');
        gpx.push_str("    <name>Origin</name>\n");
        gpx.push_str("    <sym>flag</sym>\n");
        gpx.push_str("  </wpt>\n");

        // One waypoint per located result
        for result in &report.results {
            let (Some(lat), Some(lon)) = (result.latitude, result.longitude) else {
                continue;
            };

            gpx.push_str(&format!(r#"  <wpt lat="{}" lon="{}">"#, lat, lon));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(&result.name)));
            gpx.push_str(&format!(
                "    <desc>rating {:.1}, {:.2} km</desc>\n",
                result.rating, result.distance
            ));
            if let Some(image) = &result.image {
                gpx.push_str(&format!("    <link href=\"{}\"/>\n", escape(image)));
            }
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
