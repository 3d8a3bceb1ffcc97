#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Malformed JSON in '{field}': {reason}")]
    MalformedJson { field: &'static str, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
