#![allow(dead_code)]

use oxide_query::{build_where, FilterNode, Fragment, SelectOptions};

pub fn filter(json: &str) -> FilterNode {
    json.parse()
        .unwrap_or_else(|e| panic!("Failed to parse filter: {json}\nError: {e:?}"))
}

pub fn options(json: &str) -> SelectOptions {
    json.parse()
        .unwrap_or_else(|e| panic!("Failed to parse options: {json}\nError: {e:?}"))
}

pub fn where_sql(json: &str) -> String {
    build_where(&filter(json)).sql().to_string()
}

/// Asserts that placeholders and bind values line up one-to-one.
pub fn assert_balanced(fragment: &Fragment) {
    assert_eq!(
        fragment.placeholder_count(),
        fragment.params().len(),
        "Placeholder/param mismatch in: {}",
        fragment.sql()
    );
}
