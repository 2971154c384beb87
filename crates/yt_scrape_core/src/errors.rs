use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error (status={status}, message={message})")]
    Api { status: u16, message: String },
    #[error("unexpected response shape from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("writing delimited output failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("channel export failed: {0}")]
    Core(#[from] ScrapeError),
    #[error("channel export failed: {0}")]
    Context(String),
}

impl ExportError {
    pub fn context<T: Into<String>>(self, message: T) -> Self {
        let message = message.into();
        match self {
            ExportError::Core(err) => ExportError::Context(format!("{message}: {err}")),
            ExportError::Context(existing) => {
                ExportError::Context(format!("{message}: {existing}"))
            }
        }
    }
}
