//! DOT to property-graph statement converter with rich diagnostics.
//!
//! A DOT document goes through five stages: the [`lexer`] turns text into
//! tokens, the [`parser`] builds a [`GraphDocument`], [`build`] interns nodes
//! and edges into a [`Graph`], [`resolve`] turns reserved attributes into
//! labels and relationship types, and [`emit`] produces the ordered
//! [`Statement`] sequence. Each stage fails fast with a [`ConvertError`].
//!
//! # Example
//!
//! ```
//! use dot_cypher::{convert, PropertyValue, Statement};
//!
//! let source = r#"digraph G {
//!     A [label="Person", name="John", age=30];
//!     B [label="Company", name="Acme Corp"];
//!     A -> B [label="WORKS_AT", role="Developer"];
//! }"#;
//! let statements = convert(source).unwrap();
//!
//! assert_eq!(statements.len(), 3);
//! let Statement::CreateNode(person) = &statements[0] else { panic!() };
//! assert_eq!(person.labels, ["Person"]);
//! assert_eq!(person.properties[1].value, PropertyValue::Integer(30));
//!
//! let Statement::CreateEdge(works_at) = &statements[2] else { panic!() };
//! assert_eq!(works_at.rel_type, "WORKS_AT");
//! ```

pub mod ast;
pub mod config;
pub mod cypher;
pub mod diag;
pub mod emit;
pub mod error;
pub mod graph;
pub mod lexer;
pub mod parser;
pub mod resolve;

use tracing::debug;

// Re-export syntax tree and span primitives.
pub use ast::{
    AttrStmt, AttrTarget, AttrValue, AttributeList, EdgeOp, EdgeStmt, GraphDocument, GraphKind,
    NodeStmt, Position, Span, Spanned, Stmt,
};

// Re-export the pipeline stages and their outputs.
pub use config::{ConvertOptions, CypherOptions, Limits};
pub use cypher::{render_script, render_statement};
pub use diag::{Diag, DiagLabel, LabelRole, SourceFile};
pub use emit::{CreateEdge, CreateNode, Statement, emit};
pub use error::{ConvertError, Result};
pub use graph::{EdgeId, EdgeRecord, Graph, NodeId, NodeRecord, build};
pub use lexer::token::{Token, TokenKind};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, parse, parse_tokens};
pub use resolve::{
    PropertyValue, ResolvedEdge, ResolvedGraph, ResolvedNode, TypedProperty, resolve,
};

/// Converts DOT text with default options.
pub fn convert(source: &str) -> Result<Vec<Statement>> {
    convert_with(source, &ConvertOptions::default())
}

/// Runs the full pipeline. Either every statement is returned or the first
/// error is; there is no partial output.
pub fn convert_with(source: &str, options: &ConvertOptions) -> Result<Vec<Statement>> {
    Limits::check("input bytes", source.len(), options.limits.max_input_bytes)?;

    let tokens = tokenize(source)?;
    let document = parse_tokens(&tokens, source)?;
    let graph = build(&document, options)?;
    let resolved = resolve(&graph, options).map_err(|err| err.locate(source))?;
    let statements = emit(&resolved);

    debug!(
        bytes = source.len(),
        statements = statements.len(),
        "converted document"
    );
    Ok(statements)
}
