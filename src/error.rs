use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("wrong input: {0}")]
    InvalidInput(String),

    #[error("unsupported kind: {0} (expected: business, job_title)")]
    UnsupportedKind(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("lookup error: {0}")]
    Lookup(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code for this error. Clap's own usage errors exit with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidInput(_)
            | Error::UnsupportedKind(_)
            | Error::ConfigNotFound(_)
            | Error::ConfigParse(_)
            | Error::ConfigValidation(_) => 1,
            Error::FileAccess { .. } | Error::Parse { .. } | Error::Io(_) | Error::Json(_) => 3,
            Error::Lookup(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
