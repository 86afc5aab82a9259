use thiserror::Error;

/// Failures that can end a run or drop a single template from it.
///
/// Only `Download` is recoverable: the coordinator reports it and moves on.
/// Everything else aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    /// The template catalog could not be resolved (network, status or body).
    #[error("catalog unavailable: {0}")]
    Catalog(String),

    /// One template could not be downloaded.
    #[error("download of '{name}' failed: {reason}")]
    Download { name: String, reason: String },

    /// The merged output could not be written.
    #[error("could not write output: {0}")]
    Persist(#[from] std::io::Error),

    /// The config file exists but could not be understood.
    #[error("invalid config: {0}")]
    Config(String),

    /// The HTTP client could not be built.
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
