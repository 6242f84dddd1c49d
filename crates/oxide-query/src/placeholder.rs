//! Placeholder derivation.
//!
//! A list value under `in` or `notIn` takes one placeholder per element;
//! everything else takes exactly one.

use crate::operator::Operator;
use crate::value::Value;

/// The positional placeholder token.
pub const PLACEHOLDER: &str = "?";

/// Returns the placeholder text for `value` compared with `op`.
///
/// A list under `in`/`notIn` yields `(?, ?, ...)`. An empty list yields
/// `()`, which most engines reject; callers filtering on a possibly empty
/// set should drop the condition instead.
#[must_use]
pub fn placeholders_for(op: Operator, value: &Value) -> String {
    match (op.takes_list(), value.as_list()) {
        (true, Some(items)) => {
            let marks: Vec<&str> = items.iter().map(|_| PLACEHOLDER).collect();
            format!("({})", marks.join(", "))
        }
        _ => String::from(PLACEHOLDER),
    }
}

/// Returns the bind values that fill [`placeholders_for`]`(op, value)`, in order.
#[must_use]
pub fn bind_values_for(op: Operator, value: &Value) -> Vec<Value> {
    match (op.takes_list(), value.as_list()) {
        (true, Some(items)) => items.to_vec(),
        _ => vec![value.clone()],
    }
}
