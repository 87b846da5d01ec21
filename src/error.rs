//! Error taxonomy for the lookup and lead-delivery pipeline
//!
//! Each subsystem has its own thiserror enum; external-call failures are
//! converted to values at the component boundary and never cross it as
//! panics. Only a failure of the last-resort fallback record propagates
//! out of `LeadPipeline::submit`.

use thiserror::Error;

/// Input validation failures, surfaced before any external call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("tax identifier must contain 10 or 12 digits, got {digits}")]
    TaxIdLength { digits: usize },

    #[error("required lead field '{field}' is empty")]
    MissingField { field: &'static str },
}

/// Failures of the external registry at either protocol phase
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("registry returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("registry request failed: {0}")]
    Transport(String),

    #[error("unexpected registry response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RegistryError {
    fn from(error: reqwest::Error) -> Self {
        RegistryError::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(error: serde_json::Error) -> Self {
        RegistryError::Decode(error.to_string())
    }
}

/// A CRM target rejected the lead or was unreachable
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("{target} rejected lead with {status}: {body}")]
    Rejected {
        target: &'static str,
        status: u16,
        body: String,
    },

    #[error("{target} request failed: {message}")]
    Transport {
        target: &'static str,
        message: String,
    },
}

/// Invalid deployment configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Failure to write the durable fallback record itself
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("failed to serialize fallback record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("fallback sink unavailable: {0}")]
    Sink(String),
}

/// Errors that `LeadPipeline::submit` can report to its caller
///
/// Delivery failures are absorbed by the fallback path and never appear
/// here; a structurally valid lead fails only when the fallback record
/// cannot be written.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("invalid lead: {0}")]
    Validation(#[from] ValidationError),

    #[error("fallback record failed: {0}")]
    Record(#[from] RecordError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
pub type DeliveryResult<T> = Result<T, DeliveryError>;
pub type SubmitResult<T> = Result<T, SubmitError>;
