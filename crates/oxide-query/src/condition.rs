//! Per-field conditions.
//!
//! A [`Conditions`] is the operator map attached to one field in a filter
//! description, e.g. `status -> {equals: "finished"}` or a range
//! `age -> {gte: 18, lte: 65}`. Every comparison it holds becomes
//! `<field> <op> <placeholder>`, joined by `AND`.

use tracing::trace;

use crate::fragment::Fragment;
use crate::operator::{Join, Operator};
use crate::placeholder::{bind_values_for, placeholders_for};
use crate::value::Value;

/// Ordered operator map for a single field.
///
/// An entry whose value is `None` is present but undefined: it filters
/// nothing and is dropped at compile time. The optional join is the
/// reserved `operator` key; it steers the enclosing group and is never
/// compiled as a comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    entries: Vec<(Operator, Option<Value>)>,
    join: Option<Join>,
}

impl Conditions {
    /// Creates an empty operator map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `op` to `value`, replacing an existing entry in place.
    #[must_use]
    pub fn with(mut self, op: Operator, value: Option<Value>) -> Self {
        self.set(op, value);
        self
    }

    /// In-place form of [`Conditions::with`].
    pub fn set(&mut self, op: Operator, value: Option<Value>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == op) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((op, value)),
        }
    }

    /// Sets the group join carried by this field.
    #[must_use]
    pub const fn operator(mut self, join: Join) -> Self {
        self.join = Some(join);
        self
    }

    /// Sets or clears the group join carried by this field.
    pub fn set_operator(&mut self, join: Option<Join>) {
        self.join = join;
    }

    /// Adds `equals`.
    #[must_use]
    pub fn equals(self, value: impl Into<Value>) -> Self {
        self.with(Operator::Equals, Some(value.into()))
    }

    /// Adds `notEquals`.
    #[must_use]
    pub fn not_equals(self, value: impl Into<Value>) -> Self {
        self.with(Operator::NotEquals, Some(value.into()))
    }

    /// Adds `lt`.
    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Self {
        self.with(Operator::Lt, Some(value.into()))
    }

    /// Adds `lte`.
    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Self {
        self.with(Operator::Lte, Some(value.into()))
    }

    /// Adds `gt`.
    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Self {
        self.with(Operator::Gt, Some(value.into()))
    }

    /// Adds `gte`.
    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Self {
        self.with(Operator::Gte, Some(value.into()))
    }

    /// Adds `contains`. The pattern is bound as given; include `%` wildcards.
    #[must_use]
    pub fn contains(self, pattern: impl Into<Value>) -> Self {
        self.with(Operator::Contains, Some(pattern.into()))
    }

    /// Adds `in`.
    #[must_use]
    pub fn is_in<T: Into<Value>>(self, values: Vec<T>) -> Self {
        self.with(Operator::In, Some(Value::from(values)))
    }

    /// Adds `notIn`.
    #[must_use]
    pub fn not_in<T: Into<Value>>(self, values: Vec<T>) -> Self {
        self.with(Operator::NotIn, Some(Value::from(values)))
    }

    /// Adds `op` with an undefined value.
    #[must_use]
    pub fn undefined(self, op: Operator) -> Self {
        self.with(op, None)
    }

    /// Returns the group join carried by this field, if any.
    #[must_use]
    pub const fn join(&self) -> Option<Join> {
        self.join
    }

    /// Returns every entry, undefined ones included, in encounter order.
    #[must_use]
    pub fn entries(&self) -> &[(Operator, Option<Value>)] {
        &self.entries
    }

    /// Iterates the defined comparisons in encounter order.
    pub fn defined(&self) -> impl Iterator<Item = (Operator, &Value)> {
        self.entries
            .iter()
            .filter_map(|(op, value)| value.as_ref().map(|v| (*op, v)))
    }

    /// Returns true when no comparison is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defined().next().is_none()
    }
}

/// Compiles one field's comparisons into `field op ? AND field op ? ...`.
///
/// Undefined entries and the join metadata produce nothing, so a field
/// with no defined comparison compiles to an empty fragment.
#[must_use]
pub fn compile_conditions(field: &str, conditions: &Conditions) -> Fragment {
    let pieces = conditions.defined().map(|(op, value)| {
        Fragment::new(
            format!("{field} {} {}", op.sql(), placeholders_for(op, value)),
            bind_values_for(op, value),
        )
    });
    let fragment = Fragment::join(pieces, Join::And);
    trace!(field, sql = fragment.sql(), "compiled field conditions");
    fragment
}
