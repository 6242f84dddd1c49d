//! JSON filter descriptions and statement options.
//!
//! ```json
//! {
//!   "columns": ["id", "name", "status"],
//!   "where": [
//!     { "status": { "equals": "finished", "operator": "OR" } },
//!     { "age": { "gte": 18, "lte": 65 } }
//!   ],
//!   "order": { "name": "ASC" },
//!   "page": 2,
//!   "limit": 10
//! }
//! ```
//!
//! Object keys keep their document order, which is the order comparisons
//! and fields are emitted in.

use std::str::FromStr;

use serde_json::{Map, Value as Json};

use crate::condition::Conditions;
use crate::error::{QueryError, Result};
use crate::filter::{FilterNode, Group};
use crate::operator::{Join, Operator};
use crate::select::{Direction, SelectOptions};
use crate::value::Value;

/// Reserved operator-map key holding the group join.
pub const OPERATOR_KEY: &str = "operator";

impl Value {
    /// Converts a JSON value into a bind value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilter` for JSON objects, which have no bind form,
    /// and for integers outside the `i64` range.
    pub fn from_json(json: &Json) -> Result<Self> {
        Ok(match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if n.is_f64() {
                    n.as_f64()
                        .map(Self::Float)
                        .ok_or_else(|| QueryError::InvalidFilter(format!("unsupported number {n}")))?
                } else {
                    return Err(QueryError::InvalidFilter(format!("integer {n} out of range")));
                }
            }
            Json::String(s) => Self::Text(s.clone()),
            Json::Array(items) => Self::List(
                items
                    .iter()
                    .map(Self::from_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Json::Object(_) => {
                return Err(QueryError::InvalidFilter(String::from(
                    "objects cannot be bound as values",
                )))
            }
        })
    }
}

impl Conditions {
    /// Reads one field's operator map.
    ///
    /// # Errors
    ///
    /// Returns `UnknownOperator` for a key outside the operator table,
    /// `UnknownJoin` or `InvalidFilter` for a malformed `operator` entry.
    pub fn from_json(map: &Map<String, Json>) -> Result<Self> {
        let mut conditions = Self::new();
        for (key, value) in map {
            if key == OPERATOR_KEY {
                let join = value.as_str().ok_or_else(|| {
                    QueryError::InvalidFilter(format!("'{OPERATOR_KEY}' must be a string"))
                })?;
                conditions.set_operator(Some(join.parse::<Join>()?));
                continue;
            }
            let op = key.parse::<Operator>()?;
            conditions.set(op, Some(Value::from_json(value)?));
        }
        Ok(conditions)
    }
}

impl FilterNode {
    /// Reads a filter description: objects are groups, arrays are
    /// sequences and `null` is an empty group.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilter` when the shape is wrong and
    /// `UnknownOperator` when a condition names an unsupported operator.
    pub fn from_json(json: &Json) -> Result<Self> {
        match json {
            Json::Null => Ok(Self::default()),
            Json::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Self::Sequence),
            Json::Object(fields) => {
                let mut group = Group::new();
                for (field, conditions) in fields {
                    if field == OPERATOR_KEY && conditions.is_string() {
                        return Err(QueryError::InvalidFilter(format!(
                            "'{OPERATOR_KEY}' belongs inside a field's operator map, \
                             e.g. {{\"a\": {{\"equals\": 1, \"{OPERATOR_KEY}\": {conditions}}}}}"
                        )));
                    }
                    let map = conditions.as_object().ok_or_else(|| {
                        QueryError::InvalidFilter(format!(
                            "field '{field}' must map to an object of operators"
                        ))
                    })?;
                    group.insert(field.as_str(), Conditions::from_json(map)?);
                }
                Ok(Self::Group(group))
            }
            other => Err(QueryError::InvalidFilter(format!(
                "expected an object or an array, got {other}"
            ))),
        }
    }
}

impl FromStr for FilterNode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(&serde_json::from_str(s)?)
    }
}

fn read_count(json: &Json, key: &str) -> Result<Option<u64>> {
    match json {
        Json::Null => Ok(None),
        other => other.as_u64().map(Some).ok_or_else(|| {
            QueryError::InvalidOptions(format!("'{key}' must be a non-negative integer"))
        }),
    }
}

impl SelectOptions {
    /// Reads statement options; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOptions` for unknown keys or wrongly typed values,
    /// plus any error from parsing `where`.
    pub fn from_json(json: &Json) -> Result<Self> {
        let Some(map) = json.as_object() else {
            if json.is_null() {
                return Ok(Self::default());
            }
            return Err(QueryError::InvalidOptions(String::from(
                "options must be an object",
            )));
        };

        let mut options = Self::default();
        for (key, value) in map {
            options = match key.as_str() {
                "columns" => {
                    let columns = value
                        .as_array()
                        .and_then(|items| items.iter().map(Json::as_str).collect::<Option<Vec<_>>>())
                        .ok_or_else(|| {
                            QueryError::InvalidOptions(String::from(
                                "'columns' must be an array of strings",
                            ))
                        })?;
                    options.columns(&columns)
                }
                "where" => options.filter(FilterNode::from_json(value)?),
                "order" => {
                    let order = value
                        .as_object()
                        .ok_or_else(|| {
                            QueryError::InvalidOptions(String::from(
                                "'order' must map columns to ASC or DESC",
                            ))
                        })?
                        .iter()
                        .map(|(column, direction)| {
                            let direction = direction.as_str().ok_or_else(|| {
                                QueryError::InvalidOptions(format!(
                                    "direction for '{column}' must be a string"
                                ))
                            })?;
                            Ok((column.clone(), direction.parse::<Direction>()?))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    options.order(order)
                }
                "page" => options.with_page(read_count(value, key)?),
                "limit" => options.with_limit(read_count(value, key)?),
                other => {
                    return Err(QueryError::InvalidOptions(format!("unknown key '{other}'")));
                }
            };
        }
        Ok(options)
    }
}

impl FromStr for SelectOptions {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(&serde_json::from_str(s)?)
    }
}
