//! Shared error type across worldstat crates.

use thiserror::Error;

/// Caller-facing error kinds (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No metric registered under the requested name.
    UnknownMetric,
    /// The metric exists but its producer failed.
    EvaluationFailed,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal defect (schema, key collision, data width).
    Internal,
}

impl ErrorKind {
    /// String representation used by tooling and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownMetric => "UNKNOWN_METRIC",
            ErrorKind::EvaluationFailed => "EVALUATION_FAILED",
            ErrorKind::BadConfig => "BAD_CONFIG",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and agent.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    #[error("metric {metric} failed: {cause}")]
    Evaluation { metric: String, cause: String },
    #[error("duplicate key in table {table}: {key}")]
    DuplicateKey { table: &'static str, key: String },
    #[error("invalid schema: {0}")]
    Schema(String),
    #[error("bad data: {0}")]
    Data(String),
    #[error("bad config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl MetricsError {
    /// Map an error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MetricsError::UnknownMetric(_) => ErrorKind::UnknownMetric,
            MetricsError::Evaluation { .. } => ErrorKind::EvaluationFailed,
            MetricsError::Config(_) => ErrorKind::BadConfig,
            MetricsError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            MetricsError::DuplicateKey { .. }
            | MetricsError::Schema(_)
            | MetricsError::Data(_) => ErrorKind::Internal,
        }
    }
}
