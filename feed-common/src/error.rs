use config_env::EnvConfigError;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("network error when accessing backend: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend rejected the credentials")]
    Unauthorized,
    #[error("operation not permitted for this user")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("post {0} already has a reaction change in flight")]
    Busy(u64),
    #[error("{0}")]
    Config(#[from] EnvConfigError),
}

impl Error {
    /// Maps a non-success HTTP status to its typed error
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            status => Self::Status(status),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
