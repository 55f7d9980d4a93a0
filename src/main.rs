use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use competitor_report::analyst;
use competitor_report::cli::Cli;
use competitor_report::config::Config;

const LOG_ENV: &str = "COMPETITOR_REPORT_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    info!("competitor-report starting");

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    info!(?config, "config loaded");

    match analyst::run(&config, &cli.identifier) {
        Ok(summary) => {
            info!(
                category = %summary.category,
                competitors = summary.competitors,
                output = %summary.output.display(),
                "run finished"
            );
            println!("complete");
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
