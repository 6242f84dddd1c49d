//! Comparison operators and group join keywords.

use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// Comparison operators a condition may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Equals,
    /// Not equal (<>)
    NotEquals,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Pattern match (LIKE)
    Contains,
    /// List membership (IN)
    In,
    /// List exclusion (NOT IN)
    NotIn,
}

impl Operator {
    /// Every operator, in table order.
    pub const ALL: [Self; 9] = [
        Self::Equals,
        Self::NotEquals,
        Self::Lt,
        Self::Lte,
        Self::Gt,
        Self::Gte,
        Self::Contains,
        Self::In,
        Self::NotIn,
    ];

    /// Operator names as they appear in filter descriptions, in table order.
    pub const NAMES: [&'static str; 9] = [
        "equals",
        "notEquals",
        "lt",
        "lte",
        "gt",
        "gte",
        "contains",
        "in",
        "notIn",
    ];

    /// Returns the SQL comparison token.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Contains => "LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }

    /// Returns the name used in filter descriptions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Returns true for the operators that expand list values.
    #[must_use]
    pub const fn takes_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .position(|name| *name == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

/// Boolean keyword joining sibling fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Join {
    /// AND (the default).
    #[default]
    And,
    /// OR
    Or,
}

impl Join {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

impl FromStr for Join {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            other => Err(QueryError::UnknownJoin(other.to_string())),
        }
    }
}
