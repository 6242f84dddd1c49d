//! Filter trees.
//!
//! A filter description is either a group of fields, each with its own
//! operator map, or an ordered sequence of nested descriptions:
//!
//! ```rust
//! use oxide_query::{build_where, Conditions, FilterNode, Join};
//!
//! let filter = FilterNode::sequence(vec![
//!     FilterNode::group()
//!         .field("status", Conditions::new().equals("finished").operator(Join::Or))
//!         .field("archived", Conditions::new().equals(true))
//!         .into(),
//!     FilterNode::group()
//!         .field("age", Conditions::new().gte(18))
//!         .into(),
//! ]);
//!
//! let clause = build_where(&filter);
//! assert_eq!(clause.sql(), "WHERE status = ? OR archived = ? AND age >= ?");
//! assert_eq!(clause.params().len(), 3);
//! ```
//!
//! Fragments are joined as flat text; nested groups are not parenthesized.

use tracing::debug;

use crate::condition::{compile_conditions, Conditions};
use crate::fragment::Fragment;
use crate::operator::Join;

/// A group of fields whose compiled conditions share one join keyword.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    fields: Vec<(String, Conditions)>,
}

impl Group {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing an existing field of the same name in place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, conditions: Conditions) -> Self {
        self.insert(name, conditions);
        self
    }

    /// In-place form of [`Group::field`].
    pub fn insert(&mut self, name: impl Into<String>, conditions: Conditions) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = conditions,
            None => self.fields.push((name, conditions)),
        }
    }

    /// Returns the fields in encounter order.
    #[must_use]
    pub fn fields(&self) -> &[(String, Conditions)] {
        &self.fields
    }

    /// Resolves the group's join: `AND` unless a field carries one, the
    /// last field that does wins.
    #[must_use]
    pub fn join(&self) -> Join {
        self.fields
            .iter()
            .fold(Join::default(), |join, (_, conditions)| {
                conditions.join().unwrap_or(join)
            })
    }

    /// Returns true if the group has no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A node of a filter description.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// Fields joined by the group's resolved operator.
    Group(Group),
    /// Nested nodes joined by the operator the last one reports.
    Sequence(Vec<FilterNode>),
}

impl FilterNode {
    /// Starts an empty group.
    #[must_use]
    pub fn group() -> Group {
        Group::new()
    }

    /// Creates a sequence node.
    #[must_use]
    pub const fn sequence(nodes: Vec<Self>) -> Self {
        Self::Sequence(nodes)
    }

    /// Creates a group node holding a single field.
    #[must_use]
    pub fn field(name: impl Into<String>, conditions: Conditions) -> Self {
        Self::Group(Group::new().field(name, conditions))
    }
}

impl Default for FilterNode {
    fn default() -> Self {
        Self::Group(Group::new())
    }
}

impl From<Group> for FilterNode {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<Vec<FilterNode>> for FilterNode {
    fn from(nodes: Vec<FilterNode>) -> Self {
        Self::Sequence(nodes)
    }
}

/// Compiles a filter node, returning the fragment and the join it used.
///
/// For a sequence the join is the one reported by its last child, whether
/// or not that child compiled to anything; an empty sequence reports `AND`.
#[must_use]
pub fn compile_filter(node: &FilterNode) -> (Fragment, Join) {
    match node {
        FilterNode::Sequence(children) => {
            let compiled: Vec<(Fragment, Join)> = children.iter().map(compile_filter).collect();
            let join = compiled.last().map_or_else(Join::default, |(_, join)| *join);
            let fragment = Fragment::join(compiled.into_iter().map(|(f, _)| f), join);
            (fragment, join)
        }
        FilterNode::Group(group) => {
            let join = group.join();
            let fragment = Fragment::join(
                group
                    .fields()
                    .iter()
                    .map(|(field, conditions)| compile_conditions(field, conditions)),
                join,
            );
            (fragment, join)
        }
    }
}

/// Builds `WHERE <fragment>`, or an empty fragment when nothing filters.
#[must_use]
pub fn build_where(node: &FilterNode) -> Fragment {
    let (fragment, join) = compile_filter(node);
    debug!(
        placeholders = fragment.placeholder_count(),
        join = %join,
        "compiled where clause"
    );
    fragment.prefixed("WHERE")
}
