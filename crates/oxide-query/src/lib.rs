//! # oxide-query
//!
//! Parameterized SQL generation from filter descriptions.
//!
//! A filter description is a tree of field-level comparisons. This crate
//! compiles it into a `WHERE` clause with `?` placeholders and returns the
//! bind values in the order the placeholders appear. Values are never
//! written into the SQL text.
//!
//! ```rust
//! use oxide_query::{build_select, Conditions, FilterNode, SelectOptions, Value};
//!
//! let options = SelectOptions::new()
//!     .columns(&["id", "name", "status"])
//!     .filter(FilterNode::field("status", Conditions::new().is_in(vec!["new", "open"])))
//!     .limit(10)
//!     .page(2);
//!
//! let (sql, params) = build_select("tickets", &options);
//! assert_eq!(
//!     sql,
//!     "SELECT id, name, status FROM tickets WHERE status IN (?, ?) ORDER BY id DESC LIMIT 10 OFFSET 10"
//! );
//! assert_eq!(params, vec![Value::from("new"), Value::from("open")]);
//! ```
//!
//! Filter descriptions can also be read from JSON:
//!
//! ```rust
//! use oxide_query::{build_where, FilterNode};
//!
//! let filter: FilterNode = r#"{"a": {"equals": 1, "operator": "OR"}, "b": {"equals": 2}}"#
//!     .parse()
//!     .unwrap();
//! assert_eq!(build_where(&filter).sql(), "WHERE a = ? OR b = ?");
//! ```

pub mod condition;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod json;
pub mod operator;
pub mod placeholder;
pub mod select;
pub mod value;

pub use condition::{compile_conditions, Conditions};
pub use error::{QueryError, Result};
pub use filter::{build_where, compile_filter, FilterNode, Group};
pub use fragment::Fragment;
pub use operator::{Join, Operator};
pub use placeholder::{bind_values_for, placeholders_for, PLACEHOLDER};
pub use select::{build_select, find_by_id, Direction, SelectOptions};
pub use value::Value;
