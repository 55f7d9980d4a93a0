use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub const COL_SOFTWARE_NAME: &str = "software.name";
pub const COL_CATEGORY: &str = "Sub.cat1";
pub const COL_TOTAL_REVIEWS: &str = "total.reviews";
pub const COL_LOGO: &str = "logo";
pub const COL_BUSINESS: &str = "business";
pub const COL_JOB_TITLE: &str = "job_title";

/// Cell contents treated as a missing value, in addition to the empty string.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell counts as missing. Cells are not trimmed, so `" "` is a value.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_MARKERS.contains(&cell)
}

/// Reviewer dimension a distribution is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeKind {
    #[default]
    Business,
    JobTitle,
}

impl AttributeKind {
    pub fn column(self) -> &'static str {
        match self {
            AttributeKind::Business => COL_BUSINESS,
            AttributeKind::JobTitle => COL_JOB_TITLE,
        }
    }
}

impl FromStr for AttributeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "business" => Ok(AttributeKind::Business),
            "job_title" => Ok(AttributeKind::JobTitle),
            other => Err(Error::UnsupportedKind(other.to_string())),
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareRecord {
    pub software_name: String,
    pub category: Option<String>,
    /// Raw numeric value; `None` is the missing-value marker.
    pub total_reviews: Option<f64>,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub software_name: String,
    pub business: Option<String>,
    pub job_title: Option<String>,
}

impl ReviewRecord {
    pub fn attribute(&self, kind: AttributeKind) -> Option<&str> {
        match kind {
            AttributeKind::Business => self.business.as_deref(),
            AttributeKind::JobTitle => self.job_title.as_deref(),
        }
    }
}

/// Software/category registry (`result_base`).
#[derive(Debug, Clone, Default)]
pub struct Registry {
    rows: Vec<SoftwareRecord>,
}

impl Registry {
    pub fn from_records(rows: Vec<SoftwareRecord>) -> Self {
        Self { rows }
    }

    /// Load the registry, filling missing `total.reviews` with 0 and missing `logo` with "".
    pub fn load(path: &Path, delimiter: u8) -> Result<Self> {
        let table = Table::read(path, delimiter)?;
        let name_idx = table.column(COL_SOFTWARE_NAME)?;
        let category_idx = table.column(COL_CATEGORY)?;
        let total_idx = table.column(COL_TOTAL_REVIEWS)?;
        let logo_idx = table.column(COL_LOGO)?;

        let mut rows = Vec::with_capacity(table.records.len());
        let mut skipped = 0usize;
        for record in &table.records {
            let Some(software_name) = cell(record, name_idx) else {
                skipped += 1;
                continue;
            };
            let total_reviews = match cell(record, total_idx) {
                Some(raw) => Some(parse_count(raw).ok_or_else(|| Error::Parse {
                    path: path.to_path_buf(),
                    message: format!(
                        "line {}: {COL_TOTAL_REVIEWS} is not numeric: {raw:?}",
                        line_of(record)
                    ),
                })?),
                None => Some(0.0),
            };
            rows.push(SoftwareRecord {
                software_name: software_name.to_string(),
                category: cell(record, category_idx).map(str::to_string),
                total_reviews,
                logo: cell(record, logo_idx).unwrap_or_default().to_string(),
            });
        }
        if skipped > 0 {
            warn!(
                path = %path.display(),
                skipped,
                "registry rows without {COL_SOFTWARE_NAME} skipped"
            );
        }
        info!(path = %path.display(), rows = rows.len(), "registry loaded");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[SoftwareRecord] {
        &self.rows
    }

    /// First registry row for a software name.
    pub fn first_row(&self, software_name: &str) -> Option<&SoftwareRecord> {
        self.rows.iter().find(|r| r.software_name == software_name)
    }

    /// Distinct software names in `category`, in first-occurrence order.
    pub fn competitors(&self, category: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            if row.category.as_deref() == Some(category)
                && !names.contains(&row.software_name.as_str())
            {
                names.push(&row.software_name);
            }
        }
        names
    }
}

/// Per-review ledger (`review_base`).
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    rows: Vec<ReviewRecord>,
}

impl Ledger {
    pub fn from_records(rows: Vec<ReviewRecord>) -> Self {
        Self { rows }
    }

    pub fn load(path: &Path, delimiter: u8) -> Result<Self> {
        let table = Table::read(path, delimiter)?;
        let name_idx = table.column(COL_SOFTWARE_NAME)?;
        let business_idx = table.column(COL_BUSINESS)?;
        let job_idx = table.column(COL_JOB_TITLE)?;

        let rows: Vec<ReviewRecord> = table
            .records
            .iter()
            .filter_map(|record| {
                let software_name = cell(record, name_idx)?;
                Some(ReviewRecord {
                    software_name: software_name.to_string(),
                    business: cell(record, business_idx).map(str::to_string),
                    job_title: cell(record, job_idx).map(str::to_string),
                })
            })
            .collect();
        let dropped = table.records.len() - rows.len();
        if dropped > 0 {
            debug!(dropped, "ledger rows without {COL_SOFTWARE_NAME} ignored");
        }
        info!(path = %path.display(), rows = rows.len(), "ledger loaded");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ReviewRecord] {
        &self.rows
    }
}

struct Table<'a> {
    path: &'a Path,
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl<'a> Table<'a> {
    fn read(path: &'a Path, delimiter: u8) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(file);

        let parse_err = |e: csv::Error| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let headers = reader.headers().map_err(parse_err)?.clone();
        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(parse_err)?;
        debug!(path = %path.display(), columns = headers.len(), "table read");

        Ok(Self {
            path,
            headers,
            records,
        })
    }

    fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::Parse {
                path: self.path.to_path_buf(),
                message: format!("missing column: {name}"),
            })
    }
}

fn cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).filter(|c| !is_missing(c))
}

fn parse_count(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}
