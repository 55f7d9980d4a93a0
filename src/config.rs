use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::aggregate::{AnalysisOptions, ReviewFilter};
use crate::cli::Cli;
use crate::dataset::AttributeKind;
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = ".competitor-report.toml";
pub const DEFAULT_REGISTRY_PATH: &str = "data/result_base.csv";
pub const DEFAULT_REVIEWS_PATH: &str = "data/review_base.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "data/industry_name.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub registry: Option<String>,
    pub reviews: Option<String>,
    pub output: Option<String>,
    pub kind: Option<String>,
    pub delimiter: Option<String>,
    pub require_business: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub registry: PathBuf,
    pub reviews: PathBuf,
    pub output: PathBuf,
    pub kind: AttributeKind,
    pub delimiter: u8,
    pub require_business: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: PathBuf::from(DEFAULT_REGISTRY_PATH),
            reviews: PathBuf::from(DEFAULT_REVIEWS_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            kind: AttributeKind::default(),
            delimiter: b',',
            require_business: true,
        }
    }
}

impl Config {
    /// Load the config file (explicit `--config` must exist, the default one is optional)
    /// and apply CLI overrides on top.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config {
            Some(ref path) => {
                let path = Path::new(path);
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(path)?)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    parse_config(&std::fs::read_to_string(path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        merge(file_config, cli)
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            kind: self.kind,
            filter: ReviewFilter {
                require_business: self.require_business,
            },
        }
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(ref kind) = config.kind
        && kind.parse::<AttributeKind>().is_err()
    {
        return Err(Error::ConfigValidation(format!(
            "unknown kind: {kind} (expected: business, job_title)"
        )));
    }
    if let Some(ref delimiter) = config.delimiter {
        let mut chars = delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                delimiter_byte(c)?;
            }
            _ => {
                return Err(Error::ConfigValidation(format!(
                    "delimiter must be a single character: {delimiter:?}"
                )));
            }
        }
    }
    Ok(())
}

fn delimiter_byte(c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(Error::ConfigValidation(format!(
            "delimiter must be an ASCII character: {c:?}"
        )))
    }
}

pub fn merge(file: ConfigFile, cli: &Cli) -> Result<Config> {
    let defaults = Config::default();

    let kind = match cli.kind.clone().or(file.kind) {
        Some(kind) => kind.parse::<AttributeKind>()?,
        None => defaults.kind,
    };
    let delimiter = match cli
        .delimiter
        .or_else(|| file.delimiter.and_then(|d| d.chars().next()))
    {
        Some(c) => delimiter_byte(c)?,
        None => defaults.delimiter,
    };

    Ok(Config {
        registry: cli
            .registry
            .clone()
            .or(file.registry)
            .map(PathBuf::from)
            .unwrap_or(defaults.registry),
        reviews: cli
            .reviews
            .clone()
            .or(file.reviews)
            .map(PathBuf::from)
            .unwrap_or(defaults.reviews),
        output: cli
            .output
            .clone()
            .or(file.output)
            .map(PathBuf::from)
            .unwrap_or(defaults.output),
        kind,
        delimiter,
        require_business: !cli.keep_missing_business
            && file.require_business.unwrap_or(defaults.require_business),
    })
}
