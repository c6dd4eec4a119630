use thiserror::Error;

#[derive(Debug, Error)]
pub enum CetesError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CetesError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CetesError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CetesError {
    fn from(e: serde_json::Error) -> Self {
        CetesError::SerializationError(e.to_string())
    }
}
