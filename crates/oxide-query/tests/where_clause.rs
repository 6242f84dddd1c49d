//! WHERE clause compilation from filter descriptions.

mod common;
use common::*;

use oxide_query::{
    build_where, compile_conditions, compile_filter, Conditions, FilterNode, Join, Operator,
    QueryError, Value,
};

// ===================================================================
// Empty filters
// ===================================================================

#[test]
fn empty_group_has_no_where() {
    assert_eq!(where_sql("{}"), "");
}

#[test]
fn empty_sequence_has_no_where() {
    assert_eq!(where_sql("[]"), "");
}

#[test]
fn nested_empty_sequences_have_no_where() {
    assert_eq!(where_sql("[[], {}, [{}]]"), "");
}

// ===================================================================
// Joining
// ===================================================================

#[test]
fn sequence_joins_with_and_by_default() {
    assert_eq!(
        where_sql(r#"[{"a": {"equals": 1}}, {"b": {"equals": 2}}]"#),
        "WHERE a = ? AND b = ?"
    );
}

#[test]
fn group_fields_join_with_and_by_default() {
    assert_eq!(
        where_sql(r#"{"a": {"equals": 1}, "b": {"equals": 2}}"#),
        "WHERE a = ? AND b = ?"
    );
}

#[test]
fn group_operator_override() {
    assert_eq!(
        where_sql(r#"{"a": {"equals": 1, "operator": "OR"}, "b": {"equals": 2}}"#),
        "WHERE a = ? OR b = ?"
    );
}

#[test]
fn group_operator_on_later_field_applies_to_whole_group() {
    assert_eq!(
        where_sql(r#"{"a": {"equals": 1}, "b": {"equals": 2}, "c": {"operator": "OR"}}"#),
        "WHERE a = ? OR b = ?"
    );
}

#[test]
fn group_last_operator_wins() {
    assert_eq!(
        where_sql(
            r#"{"a": {"equals": 1, "operator": "OR"}, "b": {"equals": 2, "operator": "AND"}}"#
        ),
        "WHERE a = ? AND b = ?"
    );
}

#[test]
fn sequence_uses_last_child_operator() {
    let sql = where_sql(
        r#"[{"a": {"equals": 1}}, {"b": {"equals": 2}}, {"c": {"equals": 3, "operator": "OR"}}]"#,
    );
    assert_eq!(sql, "WHERE a = ? OR b = ? OR c = ?");
}

#[test]
fn sequence_ignores_earlier_child_operator() {
    let sql = where_sql(
        r#"[{"a": {"equals": 1, "operator": "OR"}}, {"b": {"equals": 2}}, {"c": {"equals": 3}}]"#,
    );
    assert_eq!(sql, "WHERE a = ? AND b = ? AND c = ?");
}

#[test]
fn sequence_reports_operator_to_parent() {
    let node = filter(r#"[{"a": {"equals": 1}}, {"b": {"equals": 2, "operator": "OR"}}]"#);
    let (fragment, join) = compile_filter(&node);
    assert_eq!(join, Join::Or);
    assert_eq!(fragment.sql(), "a = ? OR b = ?");
}

#[test]
fn no_trailing_operator() {
    let sql = where_sql(r#"[{"a": {"equals": 1}}, {"b": {"equals": 2}}, {}]"#);
    assert_eq!(sql, "WHERE a = ? AND b = ?");
    assert!(!sql.ends_with("AND"));
}

#[test]
fn nested_groups_are_flat() {
    let sql = where_sql(
        r#"[{"a": {"equals": 1, "operator": "OR"}, "b": {"equals": 2}}, {"c": {"gt": 3}}]"#,
    );
    assert_eq!(sql, "WHERE a = ? OR b = ? AND c > ?");
}

// ===================================================================
// Placeholders
// ===================================================================

#[test]
fn every_operator_with_scalar_has_one_placeholder() {
    for op in Operator::ALL {
        let fragment = compile_conditions("f", &Conditions::new().with(op, Some(Value::from("v"))));
        assert_eq!(fragment.sql().matches('?').count(), 1, "{op}");
        assert_balanced(&fragment);
    }
}

#[test]
fn in_list_placeholders() {
    assert_eq!(
        where_sql(r#"{"status": {"in": ["a", "b", "c"]}}"#),
        "WHERE status IN (?, ?, ?)"
    );
    assert_eq!(
        where_sql(r#"{"status": {"notIn": ["a"]}}"#),
        "WHERE status NOT IN (?)"
    );
}

#[test]
fn empty_in_list_keeps_empty_parens() {
    let clause = build_where(&filter(r#"{"status": {"in": []}}"#));
    assert_eq!(clause.sql(), "WHERE status IN ()");
    assert!(clause.params().is_empty());
}

#[test]
fn bind_values_follow_placeholder_order() {
    let clause = build_where(&filter(
        r#"[
            {"status": {"in": ["new", "open"]}, "age": {"gte": 18, "lte": 65}},
            {"name": {"contains": "%ann%", "operator": "OR"}}
        ]"#,
    ));
    assert_eq!(
        clause.sql(),
        "WHERE status IN (?, ?) AND age >= ? AND age <= ? OR name LIKE ?"
    );
    assert_eq!(
        clause.params(),
        &[
            Value::from("new"),
            Value::from("open"),
            Value::Int(18),
            Value::Int(65),
            Value::from("%ann%"),
        ]
    );
    assert_balanced(&clause);
}

#[test]
fn operator_tokens() {
    let cases = [
        ("equals", "="),
        ("notEquals", "<>"),
        ("lt", "<"),
        ("lte", "<="),
        ("gt", ">"),
        ("gte", ">="),
        ("contains", "LIKE"),
    ];
    for (name, token) in cases {
        let sql = where_sql(&format!(r#"{{"f": {{"{name}": 1}}}}"#));
        assert_eq!(sql, format!("WHERE f {token} ?"));
    }
}

// ===================================================================
// Undefined values
// ===================================================================

#[test]
fn undefined_value_is_dropped() {
    let fragment = compile_conditions("a", &Conditions::new().undefined(Operator::Equals));
    assert_eq!(fragment.sql(), "");
}

#[test]
fn undefined_field_is_excluded_from_group() {
    let node: FilterNode = FilterNode::group()
        .field("a", Conditions::new().undefined(Operator::Equals))
        .field("b", Conditions::new().equals(2))
        .into();
    let clause = build_where(&node);
    assert_eq!(clause.sql(), "WHERE b = ?");
    assert_eq!(clause.params(), &[Value::Int(2)]);
}

#[test]
fn json_null_value_is_bound() {
    let clause = build_where(&filter(r#"{"deleted_at": {"equals": null}}"#));
    assert_eq!(clause.sql(), "WHERE deleted_at = ?");
    assert_eq!(clause.params(), &[Value::Null]);
}

// ===================================================================
// Errors
// ===================================================================

#[test]
fn unknown_operator_lists_valid_names() {
    let err = r#"{"a": {"like": "x"}}"#.parse::<FilterNode>().unwrap_err();
    assert!(matches!(err, QueryError::UnknownOperator(ref name) if name == "like"));
    let message = err.to_string();
    for name in [
        "equals",
        "notEquals",
        "lt",
        "lte",
        "gt",
        "gte",
        "contains",
        "in",
        "notIn",
    ] {
        assert!(message.contains(name), "{message} is missing {name}");
    }
}

#[test]
fn unknown_operator_inside_sequence() {
    let err = r#"[{"a": {"equals": 1}}, [{"b": {"between": 1}}]]"#
        .parse::<FilterNode>()
        .unwrap_err();
    assert!(matches!(err, QueryError::UnknownOperator(_)));
}
