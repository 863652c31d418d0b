//! Common test utilities
//!
//! Shared helpers for the integration suites.
//!
//! - [`convert_cleanly`] - Convert source, panicking with a rendered report on failure
//! - [`convert_err`] - Convert source, expecting failure
//! - [`nodes`] / [`edges`] - Split a statement sequence by kind
//! - [`property`] - Look up a property by name

#![allow(dead_code)]

use dot_cypher::{
    ConvertError, ConvertOptions, CreateEdge, CreateNode, PropertyValue, SourceFile, Statement,
    TypedProperty, convert_with,
};

/// Converts `source` with default options and returns the statements.
///
/// # Panics
/// Panics with the miette rendering of the error if conversion fails.
pub fn convert_cleanly(source: &str) -> Vec<Statement> {
    convert_cleanly_with(source, &ConvertOptions::default())
}

pub fn convert_cleanly_with(source: &str, options: &ConvertOptions) -> Vec<Statement> {
    match convert_with(source, options) {
        Ok(statements) => statements,
        Err(err) => {
            let report = err.to_report(&SourceFile::with_name(source, "test.dot"));
            panic!("expected {source:?} to convert, got:\n{report:?}");
        }
    }
}

/// Converts `source`, expecting an error.
///
/// # Panics
/// Panics if conversion succeeds.
pub fn convert_err(source: &str) -> ConvertError {
    convert_err_with(source, &ConvertOptions::default())
}

pub fn convert_err_with(source: &str, options: &ConvertOptions) -> ConvertError {
    match convert_with(source, options) {
        Ok(statements) => panic!("expected {source:?} to fail, got {statements:#?}"),
        Err(err) => err,
    }
}

pub fn nodes(statements: &[Statement]) -> Vec<&CreateNode> {
    statements.iter().filter_map(Statement::as_create_node).collect()
}

pub fn edges(statements: &[Statement]) -> Vec<&CreateEdge> {
    statements.iter().filter_map(Statement::as_create_edge).collect()
}

pub fn property<'a>(properties: &'a [TypedProperty], name: &str) -> Option<&'a PropertyValue> {
    properties
        .iter()
        .find(|p| p.name.as_str() == name)
        .map(|p| &p.value)
}

/// `(source, target, rel_type)` triples for every relationship, in order.
pub fn edge_triples(statements: &[Statement]) -> Vec<(String, String, String)> {
    edges(statements)
        .into_iter()
        .map(|e| (e.source.to_string(), e.target.to_string(), e.rel_type.to_string()))
        .collect()
}
