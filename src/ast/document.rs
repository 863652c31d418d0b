//! Syntax tree for a parsed DOT document.

use super::span::{Span, Spanned};
use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;
use std::fmt;

/// Whether the document was declared with `graph` or `digraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    /// `graph`: every edge uses `--`.
    Undirected,
    /// `digraph`: every edge uses `->`.
    Directed,
}

impl GraphKind {
    pub fn is_directed(self) -> bool {
        matches!(self, GraphKind::Directed)
    }

    /// The only edge operator allowed under this kind.
    pub fn edge_op(self) -> EdgeOp {
        match self {
            GraphKind::Directed => EdgeOp::Directed,
            GraphKind::Undirected => EdgeOp::Undirected,
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Undirected => write!(f, "graph"),
            GraphKind::Directed => write!(f, "digraph"),
        }
    }
}

/// An edge operator as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeOp {
    /// `->`
    Directed,
    /// `--`
    Undirected,
}

impl fmt::Display for EdgeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeOp::Directed => write!(f, "->"),
            EdgeOp::Undirected => write!(f, "--"),
        }
    }
}

/// A raw attribute value together with the span of its `key = value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrValue {
    pub value: SmolStr,
    pub span: Span,
}

/// Attribute name to raw value, one entry per key.
///
/// Writing an existing key replaces its value, so merging lists left to right
/// gives the later list priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    entries: IndexMap<SmolStr, AttrValue>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>, span: Span) {
        self.entries.insert(
            key.into(),
            AttrValue {
                value: value.into(),
                span,
            },
        );
    }

    /// Overlays `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: &AttributeList) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Fills in keys from `defaults` that `self` does not already define.
    pub fn merge_defaults(&mut self, defaults: &AttributeList) {
        for (key, value) in &defaults.entries {
            if let Entry::Vacant(slot) = self.entries.entry(key.clone()) {
                slot.insert(value.clone());
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Returns the raw string value for `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| v.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &AttrValue)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = (&'a SmolStr, &'a AttrValue);
    type IntoIter = indexmap::map::Iter<'a, SmolStr, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// `id [attrs]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStmt {
    pub id: Spanned<SmolStr>,
    pub attrs: AttributeList,
    pub span: Span,
}

/// `source op target [attrs]`, one per hop of an edge chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeStmt {
    pub source: Spanned<SmolStr>,
    pub target: Spanned<SmolStr>,
    pub op: Spanned<EdgeOp>,
    pub attrs: AttributeList,
    pub span: Span,
}

/// Which element kind a default-attribute statement applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrTarget {
    Graph,
    Node,
    Edge,
}

/// `graph [..]`, `node [..]` or `edge [..]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrStmt {
    pub target: AttrTarget,
    pub attrs: AttributeList,
    pub span: Span,
}

/// A statement in the body of a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Node(NodeStmt),
    Edge(EdgeStmt),
    Attr(AttrStmt),
    /// Bare `key = value` at graph level.
    GraphAttr {
        key: Spanned<SmolStr>,
        value: Spanned<SmolStr>,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Node(stmt) => stmt.span.clone(),
            Stmt::Edge(stmt) => stmt.span.clone(),
            Stmt::Attr(stmt) => stmt.span.clone(),
            Stmt::GraphAttr { key, value } => key.span.start..value.span.end,
        }
    }
}

/// A complete `[strict] (graph|digraph) [name] { ... }` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphDocument {
    pub strict: bool,
    pub kind: GraphKind,
    pub name: Option<Spanned<SmolStr>>,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl GraphDocument {
    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_list_last_write_wins() {
        let mut attrs = AttributeList::new();
        attrs.insert("age", "30", 0..6);
        attrs.insert("city", "NYC", 7..15);
        attrs.insert("age", "31", 16..22);

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.value("age"), Some("31"));
        assert_eq!(attrs.get("age").map(|v| v.span.clone()), Some(16..22));
    }

    #[test]
    fn merge_overrides_existing_keys() {
        let mut base = AttributeList::new();
        base.insert("color", "red", 0..1);
        base.insert("name", "a", 0..1);
        let mut later = AttributeList::new();
        later.insert("color", "blue", 2..3);

        base.merge(&later);
        assert_eq!(base.value("color"), Some("blue"));
        assert_eq!(base.value("name"), Some("a"));
    }

    #[test]
    fn merge_defaults_never_overrides() {
        let mut explicit = AttributeList::new();
        explicit.insert("shape", "box", 0..1);
        let mut defaults = AttributeList::new();
        defaults.insert("shape", "circle", 2..3);
        defaults.insert("team", "core", 4..5);

        explicit.merge_defaults(&defaults);
        assert_eq!(explicit.value("shape"), Some("box"));
        assert_eq!(explicit.value("team"), Some("core"));
    }

    #[test]
    fn graph_kind_edge_ops() {
        assert_eq!(GraphKind::Directed.edge_op(), EdgeOp::Directed);
        assert_eq!(GraphKind::Undirected.edge_op(), EdgeOp::Undirected);
        assert_eq!(GraphKind::Directed.to_string(), "digraph");
        assert_eq!(EdgeOp::Undirected.to_string(), "--");
    }
}
