//! Parser for the supported DOT subset.
//!
//! The parser consumes the lexer's token stream and produces a
//! [`GraphDocument`]. Parsing is fail-fast: the first grammar violation is
//! returned as [`ConvertError::Parse`](crate::ConvertError::Parse).

mod attributes;
pub mod base;
mod statement;

use crate::ast::{GraphDocument, GraphKind, Span};
use crate::error::Result;
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::tokenize;
use base::{TokenStream, merge_spans};
use tracing::debug;

/// Recursive-descent DOT parser over a borrowed token slice.
pub struct Parser<'t, 's> {
    stream: TokenStream<'t, 's>,
    /// Set once the graph keyword has been read.
    kind: GraphKind,
    /// Span of the `graph`/`digraph` keyword.
    kind_span: Span,
}

impl<'t, 's> Parser<'t, 's> {
    /// Creates a parser. `tokens` must end with an `Eof` token, as produced by
    /// [`tokenize`].
    pub fn new(tokens: &'t [Token], source: &'s str) -> Self {
        Self {
            stream: TokenStream::new(tokens, source),
            kind: GraphKind::Directed,
            kind_span: 0..0,
        }
    }

    /// Parses `[strict] (graph|digraph) [ID] { stmt* }`.
    pub fn parse_document(mut self) -> Result<GraphDocument> {
        let start = self.stream.current().span.clone();
        let strict = self.stream.consume(&TokenKind::Strict);

        self.kind = match self.stream.current().kind {
            TokenKind::Graph => GraphKind::Undirected,
            TokenKind::Digraph => GraphKind::Directed,
            ref other => {
                return Err(self
                    .stream
                    .error_here(format!("expected `graph` or `digraph`, found {other}")));
            }
        };
        self.kind_span = self.stream.advance().span.clone();

        let name = self.stream.check_id();
        if name.is_some() {
            self.stream.advance();
        }

        self.stream.expect(TokenKind::LBrace, "to open the graph body")?;
        let statements = self.parse_stmt_list()?;
        let end = self.stream.expect(TokenKind::RBrace, "to close the graph body")?;

        if !self.stream.at_eof() {
            return Err(self.stream.error_here(format!(
                "expected end of input after the graph body, found {}",
                self.stream.current().kind
            )));
        }

        let document = GraphDocument {
            strict,
            kind: self.kind,
            name,
            statements,
            span: merge_spans(&start, &end),
        };
        debug!(
            kind = %document.kind,
            strict = document.strict,
            statements = document.statements.len(),
            "parsed DOT document"
        );
        Ok(document)
    }
}

/// Parses a token stream into a document.
pub fn parse_tokens(tokens: &[Token], source: &str) -> Result<GraphDocument> {
    if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
        let eof_pos = tokens.last().map(|t| t.span.end).unwrap_or(0);
        let mut owned = tokens.to_vec();
        owned.push(Token::new(TokenKind::Eof, eof_pos..eof_pos));
        return Parser::new(&owned, source).parse_document();
    }
    Parser::new(tokens, source).parse_document()
}

/// Lexes and parses DOT source text.
pub fn parse(source: &str) -> Result<GraphDocument> {
    let tokens = tokenize(source)?;
    parse_tokens(&tokens, source)
}
