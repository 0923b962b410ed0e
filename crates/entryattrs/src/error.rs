use thiserror::Error;

/// Why a mutation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The key is one of the default attributes, which can never be removed.
    DefaultKey,
    /// The key is not present in the store.
    MissingKey,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::DefaultKey => write!(f, "default attributes cannot be removed"),
            InvalidReason::MissingKey => write!(f, "attribute does not exist"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AttributesError {
    #[error("Invalid operation on '{key}': {reason}")]
    InvalidOperation { key: String, reason: InvalidReason },

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, AttributesError>;
