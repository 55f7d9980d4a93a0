use std::path::PathBuf;

use tracing::info;

use crate::aggregate::{AnalysisOptions, analyse_category};
use crate::config::Config;
use crate::dataset::{Ledger, Registry};
use crate::error::Result;
use crate::report::{CompetitorReport, write_report};
use crate::resolver::CategoryIndex;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub category: String,
    pub competitors: usize,
    pub output: PathBuf,
}

/// Resolve `identifier` to a category and build one report row per competitor in it.
pub fn build_report(
    registry: &Registry,
    ledger: &Ledger,
    identifier: &str,
    options: &AnalysisOptions,
) -> Result<(String, Vec<CompetitorReport>)> {
    let category = CategoryIndex::build(registry).resolve(identifier)?;
    let reports = analyse_category(registry, ledger, &category, options)?;
    Ok((category, reports))
}

/// Load both datasets, build the report and write it to `config.output`.
///
/// The output file is only touched once every row has been computed.
pub fn run(config: &Config, identifier: &str) -> Result<RunSummary> {
    let registry = Registry::load(&config.registry, config.delimiter)?;
    let ledger = Ledger::load(&config.reviews, config.delimiter)?;

    let (category, reports) =
        build_report(&registry, &ledger, identifier, &config.analysis_options())?;
    info!(identifier, category = %category, competitors = reports.len(), "report built");

    write_report(&config.output, &reports)?;

    Ok(RunSummary {
        category,
        competitors: reports.len(),
        output: config.output.clone(),
    })
}
