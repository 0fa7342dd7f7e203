use thiserror::Error;

/// Failure of the quick-add network exchange.
///
/// Every variant surfaces to the user as the same generic message; the
/// variant only matters for logs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Malformed response body: {0}")]
    Malformed(String),
    #[error("Invalid form action {action:?}: {reason}")]
    InvalidUrl { action: String, reason: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Logging setup errors
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter {filter:?}: {reason}")]
    Filter { filter: String, reason: String },
    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
