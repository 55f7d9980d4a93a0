use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::error::Result;

pub const KEY_COMPETITOR: &str = "Competitor";
pub const KEY_LOGO: &str = "Logo";
pub const KEY_TOTAL_REVIEWS: &str = "total_reviews";

/// Output keys an attribute value must not shadow.
pub const RESERVED_KEYS: [&str; 3] = [KEY_COMPETITOR, KEY_LOGO, KEY_TOTAL_REVIEWS];

/// One competitor's row in the report.
///
/// Serializes as a flat JSON object: `Competitor`, `Logo`, one key per
/// attribute value holding its proportion, then `total_reviews`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorReport {
    pub competitor: String,
    pub logo: String,
    pub shares: Vec<(String, f64)>,
    pub total_reviews: Option<i64>,
}

impl CompetitorReport {
    pub fn share(&self, value: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|(k, _)| k == value)
            .map(|(_, share)| *share)
    }
}

impl Serialize for CompetitorReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shares.len() + 3))?;
        map.serialize_entry(KEY_COMPETITOR, &self.competitor)?;
        map.serialize_entry(KEY_LOGO, &self.logo)?;
        for (value, share) in &self.shares {
            map.serialize_entry(value, share)?;
        }
        map.serialize_entry(KEY_TOTAL_REVIEWS, &self.total_reviews)?;
        map.end()
    }
}

/// Render the report as a JSON array indented with four spaces.
pub fn render(reports: &[CompetitorReport]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    reports.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write the report to `path`, replacing any previous file.
pub fn write_report(path: &Path, reports: &[CompetitorReport]) -> Result<()> {
    let content = render(reports)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    info!(path = %path.display(), records = reports.len(), "report written");
    Ok(())
}
