//! Canonical graph model built from a parsed document.
//!
//! Nodes live in a registry keyed by their DOT identifier, so every identifier
//! maps to exactly one [`NodeRecord`] no matter how many statements mention
//! it. Records are addressed by [`NodeId`] handles that index the registry in
//! first-appearance order. Edges are kept in declaration order and are never
//! deduplicated.

use crate::ast::{AttrTarget, AttributeList, GraphDocument, GraphKind, Span, Stmt};
use crate::config::{ConvertOptions, Limits};
use crate::error::{ConvertError, Result};
use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

/// Handle to a node in [`Graph`], ordered by first appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to an edge in [`Graph`], ordered by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node and the attributes merged from every statement that mentions it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub identifier: SmolStr,
    pub attrs: AttributeList,
    /// Span of the first mention.
    pub span: Span,
    /// False when the node only ever appeared as an edge endpoint.
    pub declared: bool,
}

/// One edge statement hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    /// Inherited from the document's graph kind.
    pub directed: bool,
    pub attrs: AttributeList,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub kind: GraphKind,
    pub strict: bool,
    pub name: Option<SmolStr>,
    /// Graph-level attributes from `graph [..]` and `key = value` statements.
    pub attrs: AttributeList,
    nodes: IndexMap<SmolStr, NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl Graph {
    fn new(kind: GraphKind, strict: bool, name: Option<SmolStr>) -> Self {
        Self {
            kind,
            strict,
            name,
            attrs: AttributeList::new(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> &NodeRecord {
        &self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &EdgeRecord {
        &self.edges[id.0]
    }

    /// Looks a node up by its DOT identifier.
    pub fn find_node(&self, identifier: &str) -> Option<(NodeId, &NodeRecord)> {
        self.nodes
            .get_full(identifier)
            .map(|(index, _, record)| (NodeId(index), record))
    }

    /// Nodes in first-appearance order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeId, &NodeRecord)> {
        self.nodes
            .values()
            .enumerate()
            .map(|(index, record)| (NodeId(index), record))
    }

    /// Edges in declaration order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeId, &EdgeRecord)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(index, record)| (EdgeId(index), record))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Walks document statements in order, maintaining node and edge defaults.
struct GraphBuilder<'o> {
    graph: Graph,
    node_defaults: AttributeList,
    edge_defaults: AttributeList,
    limits: &'o Limits,
}

impl GraphBuilder<'_> {
    /// Returns the handle for `identifier`, creating the record on first sight.
    fn intern(&mut self, identifier: &SmolStr, span: &Span, declared: bool) -> Result<NodeId> {
        if let Some(index) = self.graph.nodes.get_index_of(identifier) {
            let record = &mut self.graph.nodes[index];
            record.declared |= declared;
            return Ok(NodeId(index));
        }

        Limits::check("nodes", self.graph.nodes.len() + 1, self.limits.max_nodes)?;
        if !declared {
            trace!(node = %identifier, "creating implicit endpoint node");
        }
        let (index, _) = self.graph.nodes.insert_full(
            identifier.clone(),
            NodeRecord {
                identifier: identifier.clone(),
                attrs: self.node_defaults.clone(),
                span: span.clone(),
                declared,
            },
        );
        Ok(NodeId(index))
    }

    fn apply(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Node(node) => {
                let id = self.intern(&node.id.node, &node.id.span, true)?;
                self.graph.nodes[id.0].attrs.merge(&node.attrs);
            }
            Stmt::Edge(edge) => {
                if edge.op.node != self.graph.kind.edge_op() {
                    return Err(ConvertError::Build {
                        identifier: edge.source.node.clone(),
                        reason: format!(
                            "edge operator `{}` does not belong in a `{}`",
                            edge.op.node, self.graph.kind
                        ),
                    });
                }
                let source = self.intern(&edge.source.node, &edge.source.span, false)?;
                let target = self.intern(&edge.target.node, &edge.target.span, false)?;
                Limits::check("edges", self.graph.edges.len() + 1, self.limits.max_edges)?;

                let mut attrs = self.edge_defaults.clone();
                attrs.merge(&edge.attrs);
                self.graph.edges.push(EdgeRecord {
                    source,
                    target,
                    directed: self.graph.kind.is_directed(),
                    attrs,
                    span: edge.span.clone(),
                });
            }
            Stmt::Attr(attr) => match attr.target {
                AttrTarget::Graph => self.graph.attrs.merge(&attr.attrs),
                AttrTarget::Node => self.node_defaults.merge(&attr.attrs),
                AttrTarget::Edge => self.edge_defaults.merge(&attr.attrs),
            },
            Stmt::GraphAttr { key, value } => {
                self.graph.attrs.insert(
                    key.node.clone(),
                    value.node.clone(),
                    key.span.start..value.span.end,
                );
            }
        }
        Ok(())
    }
}

/// Builds the canonical graph for `document`.
///
/// Identifiers first seen as edge endpoints get implicit records. Node and
/// edge defaults from `node [..]`/`edge [..]` apply to records created after
/// them and never override explicit attributes.
pub fn build(document: &GraphDocument, options: &ConvertOptions) -> Result<Graph> {
    Limits::check(
        "statements",
        document.statements.len(),
        options.limits.max_statements,
    )?;

    let mut builder = GraphBuilder {
        graph: Graph::new(
            document.kind,
            document.strict,
            document.name.as_ref().map(|n| n.node.clone()),
        ),
        node_defaults: AttributeList::new(),
        edge_defaults: AttributeList::new(),
        limits: &options.limits,
    };

    for stmt in &document.statements {
        builder.apply(stmt)?;
    }

    let graph = builder.graph;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built canonical graph"
    );
    Ok(graph)
}
