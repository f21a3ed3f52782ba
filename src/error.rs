//! Structured error types for the Folio report engine.
//!
//! Input problems (parse failures, missing or malformed fields) are
//! reported before any layout happens. Font and render failures come from
//! the drawing surface and abort the build where they occur.

use thiserror::Error;

/// The unified error type returned by all public Folio API functions.
#[derive(Debug, Error)]
pub enum FolioError {
    /// A JSON input document failed to parse.
    #[error("Failed to parse {document}: {source}{}", format_hint(.hint))]
    Parse {
        document: &'static str,
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// A required field is absent or empty.
    #[error("Missing required field `{0}`")]
    MissingField(String),
    /// A field is present but its value cannot be rendered.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
    /// A font could not be resolved by the drawing surface.
    #[error("Font error: {0}")]
    Font(String),
    /// Layout or PDF generation failed.
    #[error("Render error: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

impl FolioError {
    /// Wrap a serde_json error for the named input document, attaching a hint
    /// derived from the error category.
    pub fn parse(document: &'static str, e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the report schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::Parse {
            document,
            source: e,
            hint,
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FolioError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
