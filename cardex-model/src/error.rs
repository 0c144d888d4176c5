use std::fmt::{self, Display};

/// Errors produced by model parsing and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownSortKey(String),
    UnknownFacetCategory(String),
    UnknownQuickFilter(String),
    InvalidRecord(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownSortKey(key) => {
                write!(f, "unknown sort key: {key}")
            }
            ModelError::UnknownFacetCategory(name) => {
                write!(f, "unknown facet category: {name}")
            }
            ModelError::UnknownQuickFilter(name) => {
                write!(f, "unknown quick filter: {name}")
            }
            ModelError::InvalidRecord(msg) => {
                write!(f, "invalid card record: {msg}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
