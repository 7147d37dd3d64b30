//! Error types for the page runtime.

use thiserror::Error;

use crate::form::FormField;
use crate::sections::SectionKind;

/// Result type for page operations.
pub type Result<T> = std::result::Result<T, PageError>;

/// Errors raised by misuse of the page lifecycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    /// The section is already mounted.
    #[error("section {0:?} is already mounted")]
    AlreadyMounted(SectionKind),

    /// The section is not mounted.
    #[error("section {0:?} is not mounted")]
    NotMounted(SectionKind),

    /// No section answers to this in-page link.
    #[error("unknown anchor: {0}")]
    UnknownAnchor(String),

    /// The page has been disposed.
    #[error("page has been disposed")]
    Disposed,

    /// The contact form rejected a submission.
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Reasons a contact form submission is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is empty.
    #[error("required field {0} is empty")]
    MissingField(FormField),

    /// The service is not one of the offered options.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// The previous submission is still being acknowledged.
    #[error("a submission is already being acknowledged")]
    AlreadySubmitted,
}
