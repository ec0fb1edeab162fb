use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("{message}")]
    Transport { message: String },

    #[error("Missing user id")]
    MissingUserId,

    #[error("invalid shape: {reason}")]
    InvalidShape { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        EtlError::Transport {
            message: format!("Error fetching data: {}", cause),
        }
    }

    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        EtlError::InvalidShape {
            reason: reason.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::Transport { .. } => ErrorSeverity::Medium,
            EtlError::MissingUserId | EtlError::InvalidShape { .. } => ErrorSeverity::High,
            EtlError::SerializationError(_) | EtlError::CsvError(_) => ErrorSeverity::High,
            EtlError::IoError(_)
            | EtlError::StorageError { .. }
            | EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::Transport { message } => {
                format!("Could not reach the posts API: {}", message)
            }
            EtlError::MissingUserId => "A user id is required".to_string(),
            EtlError::InvalidShape { reason } => {
                format!("The posts API returned an unexpected document ({})", reason)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::Transport { .. } => {
                "Check network connectivity and the endpoint template, then retry"
            }
            EtlError::MissingUserId => "Pass a user id, e.g. `reaction-etl 5`",
            EtlError::InvalidShape { .. } => {
                "Make sure the endpoint returns a document with a `posts` array"
            }
            EtlError::IoError(_) | EtlError::StorageError { .. } => {
                "Check that the output location exists and is writable"
            }
            EtlError::SerializationError(_) | EtlError::CsvError(_) => {
                "This is likely a bug; re-run with --verbose and report the output"
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
