use mythos_core::error::CoreError;

/// Errors raised while editing or submitting an article form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("{0}")]
    Validation(String),

    /// No project to create the article in.
    #[error("A project is required to create an article")]
    MissingProject,

    /// A submission is already in flight.
    #[error("Form is busy saving")]
    Busy,
}

impl FormError {
    pub(crate) fn unknown(field: &str) -> Self {
        FormError::UnknownField {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        FormError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<CoreError> for FormError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => FormError::Validation(message),
            other => FormError::Validation(other.to_string()),
        }
    }
}
