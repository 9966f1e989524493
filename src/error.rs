use thiserror::Error;

/// Failures surfaced by the store. Deletes never produce one for a missing target.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{kind} not found")]
    NotFound { kind: RecordKind, id: String },

    #[error("Error de-serialising stored {key}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Company,
    Product,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Company => write!(f, "Company"),
            RecordKind::Product => write!(f, "Product"),
        }
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Rejected user input, caught before anything reaches the store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("Enter a valid URL: {0}")]
    InvalidUrl(String),

    #[error("amount must not be negative")]
    NegativeAmount,

    #[error("amount must be a number: {0}")]
    InvalidAmount(String),

    #[error("{value} is not a valid {field}")]
    NotAnOption { field: &'static str, value: String },

    #[error("Unknown company {0}")]
    UnknownCompany(String),

    #[error("Unknown field {0}")]
    UnknownField(String),

    #[error("Expected field=value, got {0}")]
    MalformedAssignment(String),
}
