use thiserror::Error;

/// A scan page request failed. The whole fetch is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to scan tip records: {message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single notification could not be published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to publish notification: {message}")]
pub struct PublishError {
    message: String,
}

impl PublishError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("record {index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },
    #[error("tip amount '{raw}' for '{created_by}' is not a finite number")]
    NonNumericAmount { created_by: String, raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}
