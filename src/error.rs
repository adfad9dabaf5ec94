use thiserror::Error;

/// Main error type for schema normalization
#[derive(Error, Debug)]
pub enum TripError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required field `{field}` on {entity}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Unsupported currency: {0}. Only USD is currently supported.")]
    UnsupportedCurrency(String),

    #[error("Consistency error: {0}")]
    Consistency(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TripError>;

/// Coarse error classes callers branch on.
///
/// `Validation` means a single field or record was malformed;
/// `Consistency` means the record contradicts itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Consistency,
    Io,
    Tool,
    Config,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Consistency => "consistency",
            ErrorKind::Io => "io",
            ErrorKind::Tool => "tool",
            ErrorKind::Config => "config",
        }
    }
}

impl TripError {
    pub fn validation(message: impl Into<String>) -> Self {
        TripError::Validation(message.into())
    }

    pub fn consistency(message: impl Into<String>) -> Self {
        TripError::Consistency(message.into())
    }

    /// Which side of the validation/consistency split this error falls on
    pub fn kind(&self) -> ErrorKind {
        match self {
            TripError::Validation(_)
            | TripError::MissingField { .. }
            | TripError::UnsupportedCurrency(_)
            | TripError::Serialization(_) => ErrorKind::Validation,
            TripError::Consistency(_) => ErrorKind::Consistency,
            TripError::Io(_) => ErrorKind::Io,
            TripError::ToolNotFound(_) | TripError::ToolExecution(_) => ErrorKind::Tool,
            TripError::Config(_) => ErrorKind::Config,
        }
    }

    pub fn is_consistency(&self) -> bool {
        self.kind() == ErrorKind::Consistency
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TripError::Validation(_) => "VALIDATION_ERROR",
            TripError::MissingField { .. } => "MISSING_FIELD",
            TripError::UnsupportedCurrency(_) => "UNSUPPORTED_CURRENCY",
            TripError::Consistency(_) => "CONSISTENCY_ERROR",
            TripError::Serialization(_) => "SERIALIZATION_ERROR",
            TripError::Io(_) => "IO_ERROR",
            TripError::Config(_) => "CONFIG_ERROR",
            TripError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            TripError::ToolExecution(_) => "TOOL_EXECUTION_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "kind": self.kind().as_str(),
                "message": self.to_string()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_errors_are_validation_errors() {
        let err = TripError::UnsupportedCurrency("EUR".to_string());
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_consistency());
        assert!(err.to_string().contains("EUR"));
    }

    #[test]
    fn payload_carries_code_and_kind() {
        let payload = TripError::consistency("sum mismatch").to_error_payload();
        assert_eq!(payload["error"]["code"], "CONSISTENCY_ERROR");
        assert_eq!(payload["error"]["kind"], "consistency");
    }
}
