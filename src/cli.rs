use clap::Parser;

/// competitor-report — reviewer profile of every competitor in a software category
#[derive(Parser, Debug, Clone)]
#[command(name = "competitor-report", version, about)]
pub struct Cli {
    /// Software name or category name to analyse (exact, case-sensitive)
    pub identifier: String,

    /// Reviewer attribute to aggregate (business, job_title)
    #[arg(long)]
    pub kind: Option<String>,

    /// Software/category registry CSV (default: data/result_base.csv)
    #[arg(long)]
    pub registry: Option<String>,

    /// Review ledger CSV (default: data/review_base.csv)
    #[arg(long)]
    pub reviews: Option<String>,

    /// JSON report path, overwritten on success (default: data/industry_name.json)
    #[arg(long)]
    pub output: Option<String>,

    /// Field delimiter of both input files (default: ',')
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Path to config file
    #[arg(long)]
    pub config: Option<String>,

    /// Count reviews that have no business value instead of dropping them
    #[arg(long)]
    pub keep_missing_business: bool,
}
