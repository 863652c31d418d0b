//! Statement emission: the final, ordered output of a conversion.

use crate::resolve::{ResolvedGraph, TypedProperty};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::debug;

/// Create one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNode {
    /// The DOT identifier, used by later [`CreateEdge`] statements to refer
    /// back to this node.
    pub identifier: SmolStr,
    pub labels: Vec<SmolStr>,
    pub properties: Vec<TypedProperty>,
}

/// Create one relationship between two previously created nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEdge {
    pub source: SmolStr,
    pub target: SmolStr,
    pub rel_type: SmolStr,
    pub properties: Vec<TypedProperty>,
    /// Always true: undirected DOT edges are emitted as two directed
    /// statements, one per direction.
    pub directed: bool,
}

/// One graph-mutation instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    CreateNode(CreateNode),
    CreateEdge(CreateEdge),
}

impl Statement {
    pub fn as_create_node(&self) -> Option<&CreateNode> {
        match self {
            Statement::CreateNode(node) => Some(node),
            Statement::CreateEdge(_) => None,
        }
    }

    pub fn as_create_edge(&self) -> Option<&CreateEdge> {
        match self {
            Statement::CreateEdge(edge) => Some(edge),
            Statement::CreateNode(_) => None,
        }
    }
}

/// Emits one `CreateNode` per node in first-appearance order, then the
/// relationships in declaration order.
///
/// Undirected edges expand to `source -> target` immediately followed by
/// `target -> source`, both with the same type and properties.
pub fn emit(graph: &ResolvedGraph) -> Vec<Statement> {
    let undirected = graph.edges.iter().filter(|e| !e.directed).count();
    let mut statements = Vec::with_capacity(graph.nodes.len() + graph.edges.len() + undirected);

    statements.extend(graph.nodes.iter().map(|node| {
        Statement::CreateNode(CreateNode {
            identifier: node.identifier.clone(),
            labels: node.labels.clone(),
            properties: node.properties.clone(),
        })
    }));

    for edge in &graph.edges {
        let forward = CreateEdge {
            source: edge.source.clone(),
            target: edge.target.clone(),
            rel_type: edge.rel_type.clone(),
            properties: edge.properties.clone(),
            directed: true,
        };
        if edge.directed {
            statements.push(Statement::CreateEdge(forward));
        } else {
            let reverse = CreateEdge {
                source: forward.target.clone(),
                target: forward.source.clone(),
                ..forward.clone()
            };
            statements.push(Statement::CreateEdge(forward));
            statements.push(Statement::CreateEdge(reverse));
        }
    }

    debug!(
        statements = statements.len(),
        expanded = undirected,
        "emitted statements"
    );
    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{PropertyValue, ResolvedEdge, ResolvedNode};

    fn node(id: &str) -> ResolvedNode {
        ResolvedNode {
            identifier: id.into(),
            labels: Vec::new(),
            properties: Vec::new(),
        }
    }

    fn edge(source: &str, target: &str, directed: bool) -> ResolvedEdge {
        ResolvedEdge {
            source: source.into(),
            target: target.into(),
            rel_type: "KNOWS".into(),
            properties: vec![TypedProperty::new("since", PropertyValue::Integer(2020))],
            directed,
        }
    }

    #[test]
    fn nodes_precede_edges() {
        let graph = ResolvedGraph {
            nodes: vec![node("a"), node("b")],
            edges: vec![edge("a", "b", true)],
        };
        let statements = emit(&graph);
        assert_eq!(statements.len(), 3);
        assert!(statements[0].as_create_node().is_some());
        assert!(statements[1].as_create_node().is_some());
        let rel = statements[2].as_create_edge().expect("edge");
        assert_eq!((rel.source.as_str(), rel.target.as_str()), ("a", "b"));
        assert!(rel.directed);
    }

    #[test]
    fn undirected_edge_expands_to_both_directions() {
        let graph = ResolvedGraph {
            nodes: vec![node("a"), node("b")],
            edges: vec![edge("a", "b", false)],
        };
        let statements = emit(&graph);
        let edges: Vec<&CreateEdge> = statements.iter().filter_map(Statement::as_create_edge).collect();
        assert_eq!(edges.len(), 2);
        assert_eq!((edges[0].source.as_str(), edges[0].target.as_str()), ("a", "b"));
        assert_eq!((edges[1].source.as_str(), edges[1].target.as_str()), ("b", "a"));
        assert_eq!(edges[0].rel_type, edges[1].rel_type);
        assert_eq!(edges[0].properties, edges[1].properties);
        assert!(edges.iter().all(|e| e.directed));
    }

    #[test]
    fn empty_graph_emits_nothing() {
        let graph = ResolvedGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        assert!(emit(&graph).is_empty());
    }

    #[test]
    fn statements_serialize_with_type_tag() {
        let statement = Statement::CreateNode(CreateNode {
            identifier: "A".into(),
            labels: vec!["Person".into()],
            properties: vec![TypedProperty::new("age", PropertyValue::Integer(30))],
        });
        let json = serde_json::to_string(&statement).expect("serialize");
        assert_eq!(
            json,
            r#"{"type":"create_node","identifier":"A","labels":["Person"],"properties":[{"name":"age","value":30}]}"#
        );
    }
}
