use thiserror::Error;

/// Reasons a component refuses to mount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("required element `{selector}` not found")]
    MissingElement { selector: String },

    #[error("expected {expected} indicators, found {found}")]
    IndicatorMismatch { expected: usize, found: usize },

    #[error("sequence is empty")]
    EmptySequence,

    #[error("initial index {index} is outside a sequence of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl CarouselError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CarouselError>;
