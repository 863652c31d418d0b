//! Reference renderer from [`Statement`]s to Cypher text.
//!
//! Nodes are created with their DOT identifier stored under
//! [`CypherOptions::id_property`]; relationships look both endpoints up by
//! that property before creating the edge. A node property with the same name
//! as the id property is dropped so the lookup key stays unique.

use crate::config::CypherOptions;
use crate::emit::{CreateEdge, CreateNode, Statement};
use crate::resolve::{PropertyValue, TypedProperty, is_plain_identifier};
use std::borrow::Cow;

fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\0'))
}

/// Escapes a string for use inside a single-quoted Cypher literal.
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Single-quotes and escapes a string literal.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Returns `name` as-is when it is a plain identifier, otherwise wrapped in
/// backticks with embedded backticks doubled.
pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if is_plain_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("`{}`", name.replace('`', "``")))
    }
}

/// Renders a typed value with literal syntax matching its kind.
pub fn literal(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Boolean(b) => b.to_string(),
        PropertyValue::Integer(i) => i.to_string(),
        PropertyValue::Float(f) => {
            let s = f.to_string();
            if s.contains(['.', 'e', 'E']) {
                s
            } else {
                format!("{s}.0")
            }
        }
        PropertyValue::String(s) => quote_string(s),
    }
}

/// `{id: 'A', k: v}` with the identifier property first; empty when there is
/// nothing to write. Properties named like the identifier key are skipped.
fn property_map(id: Option<(&str, &str)>, properties: &[TypedProperty]) -> String {
    let mut entries = Vec::with_capacity(properties.len() + 1);
    if let Some((key, value)) = id {
        entries.push(format!("{}: {}", escape_identifier(key), quote_string(value)));
    }
    let id_key = id.map(|(key, _)| key);
    for property in properties {
        if id_key == Some(property.name.as_str()) {
            continue;
        }
        entries.push(format!(
            "{}: {}",
            escape_identifier(&property.name),
            literal(&property.value)
        ));
    }
    if entries.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", entries.join(", "))
    }
}

fn render_node(node: &CreateNode, options: &CypherOptions) -> String {
    let keyword = if options.merge_nodes { "MERGE" } else { "CREATE" };
    let mut labels = String::new();
    for label in &node.labels {
        labels.push(':');
        labels.push_str(&escape_identifier(label));
    }
    let props = property_map(
        Some((options.id_property.as_str(), node.identifier.as_str())),
        &node.properties,
    );
    let separator = if labels.is_empty() || props.is_empty() { "" } else { " " };
    format!("{keyword} ({labels}{separator}{props})")
}

/// Cypher only creates directed relationships, so an undirected edge becomes
/// one relationship per direction in the same `CREATE`.
fn render_edge(edge: &CreateEdge, options: &CypherOptions) -> String {
    let id_key = escape_identifier(&options.id_property);
    let mut props = property_map(None, &edge.properties);
    if !props.is_empty() {
        props.insert(0, ' ');
    }
    let rel = format!("[:{}{props}]", escape_identifier(&edge.rel_type));
    let pattern = if edge.directed {
        format!("(a)-{rel}->(b)")
    } else {
        format!("(a)-{rel}->(b), (b)-{rel}->(a)")
    };
    format!(
        "MATCH (a {{{id_key}: {}}}), (b {{{id_key}: {}}}) CREATE {pattern}",
        quote_string(&edge.source),
        quote_string(&edge.target),
    )
}

/// Renders one statement without a trailing terminator.
pub fn render_statement(statement: &Statement, options: &CypherOptions) -> String {
    match statement {
        Statement::CreateNode(node) => render_node(node, options),
        Statement::CreateEdge(edge) => render_edge(edge, options),
    }
}

/// Renders a whole statement sequence as a `;`-separated script.
pub fn render_script(statements: &[Statement], options: &CypherOptions) -> String {
    let mut script = statements
        .iter()
        .map(|statement| render_statement(statement, options))
        .collect::<Vec<_>>()
        .join(";\n");
    if options.terminate_statements && !script.is_empty() {
        script.push(';');
    }
    script
}
