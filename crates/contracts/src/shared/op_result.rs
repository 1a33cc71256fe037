use serde::{Deserialize, Serialize};

/// Результат операции над схемой формы
pub type OpResult<T> = Result<T, OpError>;

/// Ошибка операции над схемой формы
///
/// Every failure is local and recoverable: a rejected operation leaves the
/// store unchanged, it never escapes as a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl OpError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Rejected input, e.g. a blank template name or duplicate option values
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Operation referenced an id that does not exist
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    /// Condition set would create a dependency cycle
    pub fn cycle(message: impl Into<String>) -> Self {
        Self::new("CYCLE_DETECTED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn is_code(&self, code: &str) -> bool {
        self.code == code
    }
}

impl std::fmt::Display for OpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for OpError {}

impl From<anyhow::Error> for OpError {
    fn from(err: anyhow::Error) -> Self {
        OpError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_details() {
        let err = OpError::validation("template name is required").with_details("fields: 2");
        assert_eq!(
            err.to_string(),
            "[VALIDATION_ERROR] template name is required: fields: 2"
        );
        assert!(err.is_code("VALIDATION_ERROR"));
    }
}
