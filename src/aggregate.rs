use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::dataset::{AttributeKind, Ledger, Registry, ReviewRecord};
use crate::error::{Error, Result};
use crate::report::{CompetitorReport, RESERVED_KEYS};

/// Upstream filter applied to the ledger before any grouping.
///
/// With `require_business` set, reviews lacking a `business` value are dropped
/// whatever attribute is being aggregated, so a `job_title` distribution only
/// counts reviews that also carry a business size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewFilter {
    pub require_business: bool,
}

impl Default for ReviewFilter {
    fn default() -> Self {
        Self {
            require_business: true,
        }
    }
}

impl ReviewFilter {
    pub fn keeps(&self, review: &ReviewRecord) -> bool {
        !self.require_business || review.business.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalysisOptions {
    pub kind: AttributeKind,
    pub filter: ReviewFilter,
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Coerce a registry count to an integer, passing the missing marker through.
pub fn coerce_total(raw: Option<f64>) -> Option<i64> {
    raw.filter(|v| v.is_finite()).map(|v| v.trunc() as i64)
}

fn is_blank_key(key: &str) -> bool {
    !key.is_empty() && key.trim().is_empty()
}

/// Proportion of reviews per attribute value, ordered by value.
///
/// Reviews without the attribute are not counted. Each proportion is rounded
/// on its own, so the sum may be off from 1.0 by up to 0.005 per bucket.
pub fn distribution<'a, I>(reviews: I, kind: AttributeKind) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for review in reviews {
        if let Some(value) = review.attribute(kind) {
            *counts.entry(value).or_default() += 1;
        }
    }
    let total: usize = counts.values().sum();

    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), round2(count as f64 / total as f64)))
        .collect()
}

/// Drop keys that cannot appear in the output object: whitespace-only values
/// and values that would shadow a fixed report field.
fn retain_emittable(software: &str, shares: &mut Vec<(String, f64)>) {
    shares.retain(|(key, _)| {
        if is_blank_key(key) {
            debug!(software, key = ?key, "blank attribute value dropped");
            return false;
        }
        if RESERVED_KEYS.contains(&key.as_str()) {
            warn!(software, key = %key, "attribute value collides with a report field, dropped");
            return false;
        }
        true
    });
}

/// Build the report row for one software from the already-filtered reviews.
pub fn analyse_software<'a, I>(
    registry: &Registry,
    reviews: I,
    software: &str,
    kind: AttributeKind,
) -> Result<CompetitorReport>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let first = registry
        .first_row(software)
        .ok_or_else(|| Error::Lookup(format!("no registry row for software: {software}")))?;

    let mut shares = distribution(
        reviews.into_iter().filter(|r| r.software_name == software),
        kind,
    );
    retain_emittable(software, &mut shares);

    Ok(CompetitorReport {
        competitor: software.to_string(),
        logo: first.logo.clone(),
        shares,
        total_reviews: coerce_total(first.total_reviews),
    })
}

/// One report row per distinct software in `category`, in registry order.
pub fn analyse_category(
    registry: &Registry,
    ledger: &Ledger,
    category: &str,
    options: &AnalysisOptions,
) -> Result<Vec<CompetitorReport>> {
    let kept: Vec<&ReviewRecord> = ledger
        .rows()
        .iter()
        .filter(|r| options.filter.keeps(r))
        .collect();
    debug!(
        kept = kept.len(),
        dropped = ledger.rows().len() - kept.len(),
        "review filter applied"
    );

    let competitors = registry.competitors(category);
    debug!(category, competitors = competitors.len(), kind = %options.kind, "aggregating");

    competitors
        .into_iter()
        .map(|software| analyse_software(registry, kept.iter().copied(), software, options.kind))
        .collect()
}
