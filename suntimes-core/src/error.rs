use thiserror::Error;

/// Errors produced while resolving a location or building a report.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to parse date '{input}' (expected format {format})")]
    Parse {
        input: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("location not found: '{0}'")]
    LocationNotFound(String),

    #[error("could not determine timezone for coordinates {latitude}, {longitude}")]
    TimezoneNotFound { latitude: f64, longitude: f64 },

    #[error("{context}")]
    Network {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    HttpStatus {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response from {service}: {reason}")]
    DataFormat { service: &'static str, reason: String },

    #[error("invalid {field} '{format}': not a chrono format string")]
    OutputFormat { field: &'static str, format: String },

    #[error("failed to render report")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn network(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network { context: context.into(), source }
    }

    pub(crate) fn data_format(service: &'static str, reason: impl Into<String>) -> Self {
        Self::DataFormat { service, reason: reason.into() }
    }
}
