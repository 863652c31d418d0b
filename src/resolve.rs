//! Attribute resolution: labels, relationship types and typed properties.
//!
//! The reserved `label` attribute means different things on nodes and edges,
//! so the two cases go through separate functions: [`resolve_node_labels`]
//! and [`resolve_edge_type`]. Every other attribute becomes a
//! [`TypedProperty`] via [`coerce_value`].

use crate::ast::AttributeList;
use crate::config::ConvertOptions;
use crate::error::{ConvertError, INVALID_RELATIONSHIP_TYPE, Result};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use tracing::debug;

/// The reserved attribute holding node labels or the relationship type.
pub const LABEL_ATTRIBUTE: &str = "label";

/// A property value with its inferred type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of the inferred kind, for diagnostics and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::Float(_) => "float",
            PropertyValue::String(_) => "string",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(b) => write!(f, "{b}"),
            PropertyValue::Integer(i) => write!(f, "{i}"),
            PropertyValue::Float(x) => write!(f, "{x:?}"),
            PropertyValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedProperty {
    pub name: SmolStr,
    pub value: PropertyValue,
}

impl TypedProperty {
    pub fn new(name: impl Into<SmolStr>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A node after attribute resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    pub identifier: SmolStr,
    pub labels: Vec<SmolStr>,
    pub properties: Vec<TypedProperty>,
}

/// An edge after attribute resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEdge {
    pub source: SmolStr,
    pub target: SmolStr,
    pub rel_type: SmolStr,
    pub properties: Vec<TypedProperty>,
    pub directed: bool,
}

/// The canonical graph with labels and property types resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGraph {
    /// In first-appearance order.
    pub nodes: Vec<ResolvedNode>,
    /// In declaration order.
    pub edges: Vec<ResolvedEdge>,
}

/// Splits a node's `label` on `:` into trimmed, non-empty labels.
///
/// A missing `label` yields no labels.
pub fn resolve_node_labels(attrs: &AttributeList) -> Vec<SmolStr> {
    attrs
        .value(LABEL_ATTRIBUTE)
        .map(|raw| {
            raw.split(':')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(SmolStr::new)
                .collect()
        })
        .unwrap_or_default()
}

/// Resolves an edge's relationship type from its `label`.
///
/// A missing `label` falls back to the configured default. A value that is
/// empty or only whitespace is an error. Anything else is kept verbatim,
/// surrounding whitespace included, unless upper-casing is enabled and the
/// value is a plain identifier.
pub fn resolve_edge_type(attrs: &AttributeList, options: &ConvertOptions) -> Result<SmolStr> {
    let (raw, span) = match attrs.get(LABEL_ATTRIBUTE) {
        Some(attr) => (attr.value.as_str(), Some(attr.span.clone())),
        None => (options.default_relationship_type.as_str(), None),
    };

    if raw.trim().is_empty() {
        return Err(ConvertError::Resolution {
            value: raw.to_string(),
            reason: INVALID_RELATIONSHIP_TYPE.to_string(),
            span,
            position: None,
        });
    }

    if options.uppercase_relationship_types && is_plain_identifier(raw) {
        Ok(SmolStr::new(raw.to_ascii_uppercase()))
    } else {
        Ok(SmolStr::new(raw))
    }
}

/// Converts every attribute except `label` into a typed property, keeping
/// attribute order.
pub fn resolve_properties(attrs: &AttributeList) -> Vec<TypedProperty> {
    attrs
        .iter()
        .filter(|(name, _)| name.as_str() != LABEL_ATTRIBUTE)
        .map(|(name, attr)| TypedProperty::new(name.clone(), coerce_value(&attr.value)))
        .collect()
}

/// Infers a typed value from a raw attribute string.
///
/// Tries, in order: boolean (`true`/`false`, any case), integer, float, and
/// finally falls back to the string itself. Never fails.
pub fn coerce_value(raw: &str) -> PropertyValue {
    if raw.eq_ignore_ascii_case("true") {
        return PropertyValue::Boolean(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return PropertyValue::Boolean(false);
    }
    if is_integer_literal(raw)
        && let Ok(value) = raw.parse::<i64>()
    {
        return PropertyValue::Integer(value);
    }
    if is_float_literal(raw)
        && let Ok(value) = raw.parse::<f64>()
        && value.is_finite()
    {
        return PropertyValue::Float(value);
    }
    PropertyValue::String(raw.to_string())
}

fn strip_sign(text: &str) -> &str {
    text.strip_prefix(['+', '-']).unwrap_or(text)
}

/// `[+-]?[0-9]+`
fn is_integer_literal(text: &str) -> bool {
    let digits = strip_sign(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `[+-]?(digits with at most one '.')([eE][+-]?[0-9]+)?` with at least one
/// mantissa digit. Rejects `inf`, `NaN` and friends that `f64::from_str` takes.
fn is_float_literal(text: &str) -> bool {
    let body = strip_sign(text);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(index) => (&body[..index], Some(&body[index + 1..])),
        None => (body, None),
    };

    let mut seen_dot = false;
    let mut seen_digit = false;
    for b in mantissa.bytes() {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    if !seen_digit {
        return false;
    }

    match exponent {
        Some(exp) => is_integer_literal(exp),
        None => true,
    }
}

/// Letters, digits and `_`, not starting with a digit.
pub(crate) fn is_plain_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Resolves labels, relationship types and properties for the whole graph.
pub fn resolve(graph: &Graph, options: &ConvertOptions) -> Result<ResolvedGraph> {
    let nodes = graph
        .nodes()
        .map(|(_, node)| ResolvedNode {
            identifier: node.identifier.clone(),
            labels: resolve_node_labels(&node.attrs),
            properties: resolve_properties(&node.attrs),
        })
        .collect::<Vec<_>>();

    let edges = graph
        .edges()
        .map(|(_, edge)| {
            Ok(ResolvedEdge {
                source: graph.node(edge.source).identifier.clone(),
                target: graph.node(edge.target).identifier.clone(),
                rel_type: resolve_edge_type(&edge.attrs, options)?,
                properties: resolve_properties(&edge.attrs),
                directed: edge.directed,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(nodes = nodes.len(), edges = edges.len(), "resolved attributes");
    Ok(ResolvedGraph { nodes, edges })
}
