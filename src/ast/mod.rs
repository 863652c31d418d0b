//! Syntax tree types and source spans.

mod document;
mod span;

pub use document::{
    AttrStmt, AttrTarget, AttrValue, AttributeList, EdgeOp, EdgeStmt, GraphDocument, GraphKind,
    NodeStmt, Stmt,
};
pub use span::{Position, Span, Spanned};
