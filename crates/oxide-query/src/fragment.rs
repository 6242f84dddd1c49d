//! SQL fragments with their bind values.

use crate::operator::Join;
use crate::placeholder::PLACEHOLDER;
use crate::value::Value;

/// A piece of SQL text and the values for its placeholders, left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    sql: String,
    params: Vec<Value>,
}

impl Fragment {
    /// Creates a fragment from SQL text and its bind values.
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Creates an empty fragment.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Joins the non-empty fragments with `join`, concatenating their params.
    #[must_use]
    pub fn join<I>(fragments: I, join: Join) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let separator = format!(" {join} ");
        let mut sql = String::new();
        let mut params = vec![];
        for fragment in fragments.into_iter().filter(|f| !f.is_empty()) {
            if !sql.is_empty() {
                sql.push_str(&separator);
            }
            sql.push_str(&fragment.sql);
            params.extend(fragment.params);
        }
        Self { sql, params }
    }

    /// Prepends `keyword` and a space unless the fragment is empty.
    #[must_use]
    pub fn prefixed(self, keyword: &str) -> Self {
        if self.is_empty() {
            return self;
        }
        Self {
            sql: format!("{keyword} {}", self.sql),
            params: self.params,
        }
    }

    /// Returns the SQL string.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Returns true when there is no SQL text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Counts `?` placeholders in the SQL text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches(PLACEHOLDER).count()
    }

    /// Consumes the fragment and returns the SQL and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}
