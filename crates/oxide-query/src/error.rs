//! Error types for filter compilation and statement options.

use thiserror::Error;

use crate::operator::Operator;

/// Errors raised while turning a filter description into SQL.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A condition names an operator outside the supported set.
    #[error("Operation not found: '{0}', use ({names})", names = Operator::NAMES.join(", "))]
    UnknownOperator(String),

    /// A group join keyword other than `AND` or `OR`.
    #[error("unknown join operator '{0}', use (AND, OR)")]
    UnknownJoin(String),

    /// An ORDER BY direction other than `ASC` or `DESC`.
    #[error("unknown order direction '{0}', use (ASC, DESC)")]
    UnknownDirection(String),

    /// The input is not shaped like a filter description.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// The input is not shaped like statement options.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Malformed JSON text.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for query building.
pub type Result<T> = std::result::Result<T, QueryError>;
