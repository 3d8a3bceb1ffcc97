//! Downstream failure classification.
//!
//! Raw engine failures are mapped onto a small fixed taxonomy before they
//! reach a caller. Content-moderation rejections are detected by substring
//! markers in the provider's error text and are answered with fixed guidance
//! instead of the raw provider message.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Moderation markers
// ---------------------------------------------------------------------------

/// Provider error code for a request rejected by the content filter.
pub const MODERATION_CODE: &str = "3030";

/// Case-sensitive substrings that mark a content-moderation rejection.
pub const MODERATION_MARKERS: &[&str] = &[MODERATION_CODE, "flagged", "copyright"];

// ---------------------------------------------------------------------------
// Caller-facing text
// ---------------------------------------------------------------------------

pub const MODERATION_MESSAGE: &str =
    "Your prompt may contain restricted content and was rejected by the image model's content filter";

pub const MODERATION_DETAILS: &str = "The request was flagged by content moderation. This usually \
     happens when a prompt references copyrighted content, public figures, or brand names.";

pub const MODERATION_SUGGESTIONS: [&str; 3] = [
    "Describe the subject generically instead of naming a specific character, person, or brand",
    "Remove trademarks, logos, and franchise names from the prompt",
    "Focus on visual attributes such as style, colours, lighting, and composition",
];

pub const ENGINE_FAILURE_MESSAGE: &str = "Image generation failed";

pub const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Stable error category returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ContentModeration,
    EngineError,
    ValidationError,
    NotFound,
}

impl ErrorKind {
    /// Machine-readable code placed in the error body's `code` field.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::ContentModeration => "CONTENT_MODERATION",
            ErrorKind::EngineError => "ENGINE_ERROR",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
        }
    }
}

/// A failure reported by the engine, untouched by any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFailure {
    pub message: String,
    pub cause: Option<String>,
}

impl RawFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Capture an error's display text and the display text of its source.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            message: err.to_string(),
            cause: std::error::Error::source(err).map(ToString::to_string),
        }
    }
}

/// Caller-facing error with optional guidance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub user_message: String,
    pub details: Option<String>,
    pub suggestions: Option<Vec<String>>,
}

impl ClassifiedError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ValidationError,
            user_message: message.into(),
            details: None,
            suggestions: None,
        }
    }

    pub fn engine(details: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::EngineError,
            user_message: ENGINE_FAILURE_MESSAGE.to_string(),
            details: Some(details.into()),
            suggestions: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            kind: ErrorKind::NotFound,
            user_message: NOT_FOUND_MESSAGE.to_string(),
            details: None,
            suggestions: None,
        }
    }

    pub fn content_moderation() -> Self {
        Self {
            kind: ErrorKind::ContentModeration,
            user_message: MODERATION_MESSAGE.to_string(),
            details: Some(MODERATION_DETAILS.to_string()),
            suggestions: Some(MODERATION_SUGGESTIONS.iter().map(|s| s.to_string()).collect()),
        }
    }
}

impl From<CoreError> for ClassifiedError {
    fn from(err: CoreError) -> Self {
        ClassifiedError::validation(err.to_string())
    }
}

/// Maps raw engine failures to [`ClassifiedError`]s. Implementations must be
/// total: every input yields a classification.
pub trait FailureClassifier: Send + Sync {
    fn classify(&self, failure: &RawFailure) -> ClassifiedError;
}

/// Default classifier: moderation if any marker occurs in the message,
/// engine error otherwise.
#[derive(Debug, Clone)]
pub struct MarkerClassifier {
    markers: Vec<String>,
}

impl Default for MarkerClassifier {
    fn default() -> Self {
        Self::new(MODERATION_MARKERS.iter().copied())
    }
}

impl MarkerClassifier {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Add another moderation marker, e.g. a newly observed provider code.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    pub fn is_moderation(&self, message: &str) -> bool {
        self.markers.iter().any(|m| message.contains(m.as_str()))
    }
}

impl FailureClassifier for MarkerClassifier {
    fn classify(&self, failure: &RawFailure) -> ClassifiedError {
        if self.is_moderation(&failure.message) {
            ClassifiedError::content_moderation()
        } else {
            ClassifiedError::engine(failure.message.clone())
        }
    }
}
