//! SELECT statement assembly.
//!
//! [`build_select`] composes the column list, the compiled WHERE clause,
//! ORDER BY and pagination into one statement string.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::QueryError;
use crate::filter::{build_where, FilterNode};
use crate::value::Value;

/// ORDER BY direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(QueryError::UnknownDirection(other.to_string())),
        }
    }
}

/// Options for [`build_select`].
///
/// Defaults: all columns, no filter, `ORDER BY id DESC`, no pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOptions {
    columns: Vec<String>,
    filter: FilterNode,
    order: Vec<(String, Direction)>,
    default_order: bool,
    page: Option<u64>,
    limit: Option<u64>,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            columns: vec![String::from("*")],
            filter: FilterNode::default(),
            order: vec![(String::from("id"), Direction::Desc)],
            default_order: true,
            page: None,
            limit: None,
        }
    }
}

impl SelectOptions {
    /// Creates options with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selected columns.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Replaces the filter.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<FilterNode>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Replaces the ordering with the given `(column, direction)` pairs.
    #[must_use]
    pub fn order(mut self, order: Vec<(String, Direction)>) -> Self {
        self.order = order;
        self.default_order = false;
        self
    }

    /// Appends a column to the ordering, after any already set.
    ///
    /// The default `id DESC` is replaced on the first call.
    #[must_use]
    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        if self.default_order {
            self.order.clear();
            self.default_order = false;
        }
        match self.order.iter_mut().find(|(existing, _)| existing == column) {
            Some(entry) => entry.1 = direction,
            None => self.order.push((String::from(column), direction)),
        }
        self
    }

    /// Sets the 1-indexed page. Only takes effect together with a limit.
    #[must_use]
    pub const fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the LIMIT.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets or clears the page.
    #[must_use]
    pub const fn with_page(mut self, page: Option<u64>) -> Self {
        self.page = page;
        self
    }

    /// Sets or clears the LIMIT.
    #[must_use]
    pub const fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Returns the selected columns.
    #[must_use]
    pub fn selected_columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the filter.
    #[must_use]
    pub const fn filter_node(&self) -> &FilterNode {
        &self.filter
    }

    /// Returns the ordering.
    #[must_use]
    pub fn ordering(&self) -> &[(String, Direction)] {
        &self.order
    }

    /// Returns the OFFSET implied by limit and page, if both are set.
    ///
    /// Page 1 (and page 0) start at offset 0. An offset that overflows
    /// `u64` yields `None`, so no OFFSET is emitted for it.
    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        match (self.limit, self.page) {
            (Some(limit), Some(page)) => limit.checked_mul(page.saturating_sub(1)),
            _ => None,
        }
    }
}

/// Builds the statement that fetches a single row by id.
#[must_use]
pub fn find_by_id(table: &str) -> String {
    format!("SELECT * FROM {table} WHERE id = ? LIMIT 1;")
}

/// Builds a SELECT statement and returns SQL with parameters.
#[must_use]
pub fn build_select(table: &str, options: &SelectOptions) -> (String, Vec<Value>) {
    let (where_sql, params) = build_where(&options.filter).into_parts();
    let order = options
        .order
        .iter()
        .map(|(column, direction)| format!("{column} {direction}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut parts = vec![
        String::from("SELECT"),
        options.columns.join(", "),
        String::from("FROM"),
        String::from(table),
        where_sql,
    ];
    if !order.is_empty() {
        parts.push(String::from("ORDER BY"));
        parts.push(order);
    }
    if let Some(limit) = options.limit {
        parts.push(format!("LIMIT {limit}"));
        if let Some(offset) = options.offset() {
            parts.push(format!("OFFSET {offset}"));
        }
    }

    parts.retain(|part| !part.is_empty());
    let sql = parts.join(" ");
    debug!(table, params = params.len(), "built select statement");
    (sql, params)
}
