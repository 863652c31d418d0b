//! Property-based tests for conversion
//!
//! Random well-formed documents are generated from a small model (node
//! declarations plus edges between a pool of identifiers) so that the
//! expected statement counts can be computed independently.

mod common;

use common::{edges, nodes};
use dot_cypher::{Statement, convert};
use proptest::prelude::*;
use std::collections::HashSet;

// Identifiers starting with `v` can never collide with a keyword.
fn identifier() -> impl Strategy<Value = String> {
    "v[a-z0-9_]{0,6}"
}

#[derive(Debug, Clone)]
struct Model {
    directed: bool,
    declared: Vec<(String, Option<String>)>,
    edges: Vec<(String, String)>,
}

impl Model {
    fn to_dot(&self) -> String {
        let (keyword, op) = if self.directed {
            ("digraph", "->")
        } else {
            ("graph", "--")
        };
        let mut body = String::new();
        for (id, label) in &self.declared {
            match label {
                Some(label) => body.push_str(&format!("  {id} [label=\"{label}\", w=1];\n")),
                None => body.push_str(&format!("  {id};\n")),
            }
        }
        for (source, target) in &self.edges {
            body.push_str(&format!("  {source} {op} {target} [label=\"LINKS\"];\n"));
        }
        format!("{keyword} G {{\n{body}}}")
    }

    fn distinct_identifiers(&self) -> usize {
        self.declared
            .iter()
            .map(|(id, _)| id)
            .chain(self.edges.iter().flat_map(|(s, t)| [s, t]))
            .collect::<HashSet<_>>()
            .len()
    }
}

fn model() -> impl Strategy<Value = Model> {
    let label = prop::option::of("[A-Z][a-zA-Z]{0,8}");
    (
        any::<bool>(),
        prop::collection::vec((identifier(), label), 0..12),
        prop::collection::vec((identifier(), identifier()), 0..20),
    )
        .prop_map(|(directed, declared, edges)| Model {
            directed,
            declared,
            edges,
        })
}

proptest! {
    /// Property: the same input always yields byte-identical output
    #[test]
    fn prop_conversion_is_deterministic(model in model()) {
        let source = model.to_dot();
        let first = serde_json::to_vec(&convert(&source).unwrap()).unwrap();
        let second = serde_json::to_vec(&convert(&source).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: one CreateNode per distinct identifier
    #[test]
    fn prop_one_node_per_identifier(model in model()) {
        let statements = convert(&model.to_dot()).unwrap();
        let created = nodes(&statements);
        prop_assert_eq!(created.len(), model.distinct_identifiers());

        let unique: HashSet<_> = created.iter().map(|n| n.identifier.clone()).collect();
        prop_assert_eq!(unique.len(), created.len());
    }

    /// Property: undirected edges are doubled, directed ones are not
    #[test]
    fn prop_edge_expansion(model in model()) {
        let statements = convert(&model.to_dot()).unwrap();
        let expected = if model.directed { model.edges.len() } else { 2 * model.edges.len() };
        prop_assert_eq!(edges(&statements).len(), expected);
        prop_assert!(edges(&statements).iter().all(|e| e.directed));
    }

    /// Property: every CreateEdge follows every CreateNode and refers to one
    #[test]
    fn prop_nodes_precede_edges(model in model()) {
        let statements = convert(&model.to_dot()).unwrap();
        let split = statements
            .iter()
            .position(|s| matches!(s, Statement::CreateEdge(_)))
            .unwrap_or(statements.len());
        prop_assert!(statements[split..].iter().all(|s| matches!(s, Statement::CreateEdge(_))));

        let known: HashSet<_> = nodes(&statements).iter().map(|n| n.identifier.clone()).collect();
        for edge in edges(&statements) {
            prop_assert!(known.contains(&edge.source));
            prop_assert!(known.contains(&edge.target));
        }
    }

    /// Property: arbitrary text never panics, it either converts or errors
    #[test]
    fn prop_never_panics(source in "\\PC{0,80}") {
        let _ = convert(&source);
    }

    /// Property: arbitrary text inside a graph body never panics
    #[test]
    fn prop_body_never_panics(body in "[a-z0-9 \\[\\]=;,\"\\-> ]{0,60}") {
        let _ = convert(&format!("digraph {{ {body} }}"));
    }
}
