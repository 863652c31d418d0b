//! Statement parsing for the graph body.

use super::Parser;
use super::base::merge_spans;
use crate::ast::{AttrStmt, AttrTarget, EdgeOp, EdgeStmt, NodeStmt, Spanned, Stmt};
use crate::error::{EDGE_OPERATOR_MISMATCH, Result};
use crate::lexer::token::TokenKind;
use smol_str::SmolStr;

impl Parser<'_, '_> {
    /// Parses statements up to (not including) the closing `}`.
    pub(super) fn parse_stmt_list(&mut self) -> Result<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.stream.check(&TokenKind::RBrace) && !self.stream.at_eof() {
            self.parse_stmt(&mut statements)?;
            self.stream.consume(&TokenKind::Semicolon);
        }
        Ok(statements)
    }

    /// Parses one source statement, appending the statements it expands to.
    fn parse_stmt(&mut self, out: &mut Vec<Stmt>) -> Result<()> {
        let token = self.stream.current();
        match &token.kind {
            TokenKind::Graph => self.parse_attr_stmt(AttrTarget::Graph, "graph", out),
            TokenKind::Node => self.parse_attr_stmt(AttrTarget::Node, "node", out),
            TokenKind::Edge => self.parse_attr_stmt(AttrTarget::Edge, "edge", out),
            TokenKind::Subgraph | TokenKind::LBrace => Err(self.unsupported_subgraph()),
            kind if kind.id_text().is_some() => {
                let first = self.stream.expect_id("node identifier")?;
                self.reject_port()?;
                match self.stream.current().kind {
                    TokenKind::Eq => self.parse_graph_attr(first, out),
                    TokenKind::Arrow | TokenKind::DoubleDash => self.parse_edge_stmt(first, out),
                    _ => self.parse_node_stmt(first, out),
                }
            }
            other => Err(self
                .stream
                .error_here(format!("expected statement, found {other}"))),
        }
    }

    fn parse_attr_stmt(&mut self, target: AttrTarget, owner: &str, out: &mut Vec<Stmt>) -> Result<()> {
        let start = self.stream.advance().span.clone();
        let attrs = self.parse_required_attr_lists(owner)?;
        out.push(Stmt::Attr(AttrStmt {
            target,
            attrs,
            span: merge_spans(&start, &self.stream.previous_span()),
        }));
        Ok(())
    }

    /// `key = value` at graph level.
    fn parse_graph_attr(&mut self, key: Spanned<SmolStr>, out: &mut Vec<Stmt>) -> Result<()> {
        self.stream.expect(TokenKind::Eq, "after graph attribute name")?;
        let value = self.stream.expect_id("graph attribute value")?;
        out.push(Stmt::GraphAttr { key, value });
        Ok(())
    }

    /// `id [, id]* [attrs]*`; each identifier becomes its own node statement
    /// sharing the same attributes.
    fn parse_node_stmt(&mut self, first: Spanned<SmolStr>, out: &mut Vec<Stmt>) -> Result<()> {
        let mut ids = vec![first];
        while self.stream.consume(&TokenKind::Comma) {
            ids.push(self.stream.expect_id("node identifier after `,`")?);
            self.reject_port()?;
        }

        let attrs = self.parse_attr_lists()?;
        let end = self.stream.previous_span();
        for id in ids {
            let span = merge_spans(&id.span, &end);
            out.push(Stmt::Node(NodeStmt {
                id,
                attrs: attrs.clone(),
                span,
            }));
        }
        Ok(())
    }

    /// `id (op id)+ [attrs]*`; each hop becomes its own edge statement.
    fn parse_edge_stmt(&mut self, first: Spanned<SmolStr>, out: &mut Vec<Stmt>) -> Result<()> {
        let mut endpoints = vec![first];
        let mut ops = Vec::new();

        while self.stream.current().kind.is_edge_op() {
            ops.push(self.parse_edge_op()?);
            if matches!(
                self.stream.current().kind,
                TokenKind::Subgraph | TokenKind::LBrace
            ) {
                return Err(self.unsupported_subgraph());
            }
            endpoints.push(self.stream.expect_id("edge target identifier")?);
            self.reject_port()?;
        }

        let attrs = self.parse_attr_lists()?;
        let end = self.stream.previous_span();
        for (hop, op) in ops.into_iter().enumerate() {
            let source = endpoints[hop].clone();
            let target = endpoints[hop + 1].clone();
            let span = merge_spans(&source.span, &end);
            out.push(Stmt::Edge(EdgeStmt {
                source,
                target,
                op,
                attrs: attrs.clone(),
                span,
            }));
        }
        Ok(())
    }

    /// Consumes an edge operator, rejecting the one that does not belong to
    /// the declared graph kind.
    fn parse_edge_op(&mut self) -> Result<Spanned<EdgeOp>> {
        let token = self.stream.advance();
        let op = match token.kind {
            TokenKind::Arrow => EdgeOp::Directed,
            _ => EdgeOp::Undirected,
        };
        if op != self.kind.edge_op() {
            return Err(self
                .stream
                .error_at(token.span.clone(), EDGE_OPERATOR_MISMATCH, "P002")
                .with_context(self.kind_span.clone()));
        }
        Ok(Spanned::new(op, token.span.clone()))
    }

    fn reject_port(&self) -> Result<()> {
        if self.stream.check(&TokenKind::Colon) {
            return Err(self.stream.error_at(
                self.stream.current().span.clone(),
                "node ports are not supported",
                "P003",
            ));
        }
        Ok(())
    }

    fn unsupported_subgraph(&self) -> crate::error::ConvertError {
        self.stream.error_at(
            self.stream.current().span.clone(),
            "subgraphs are not supported",
            "P003",
        )
    }
}
