//! Token stream navigation shared by the statement and attribute parsers.

use crate::ast::{Span, Spanned};
use crate::error::{ConvertError, Result};
use crate::lexer::token::{Token, TokenKind};
use smol_str::SmolStr;

/// Cursor over a token slice that always ends in [`TokenKind::Eof`].
pub struct TokenStream<'t, 's> {
    tokens: &'t [Token],
    source: &'s str,
    pos: usize,
}

impl<'t, 's> TokenStream<'t, 's> {
    /// Creates a stream over `tokens`.
    ///
    /// `tokens` must be non-empty and end with `Eof`; [`Parser`](super::Parser)
    /// guarantees this before constructing a stream.
    pub fn new(tokens: &'t [Token], source: &'s str) -> Self {
        Self {
            tokens,
            source,
            pos: 0,
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Returns the current token; past the end this is the final `Eof`.
    pub fn current(&self) -> &'t Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    /// Returns the token after the current one without consuming anything.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos + 1)
    }

    /// Advances to the next token. Does nothing at `Eof`.
    pub fn advance(&mut self) -> &'t Token {
        let token = self.current();
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
        token
    }

    pub fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    pub fn at_eof(&self) -> bool {
        self.check(&TokenKind::Eof)
    }

    /// Consumes the current token if it matches `kind`.
    pub fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `kind` or fails describing what was expected.
    pub fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Span> {
        if self.check(&kind) {
            Ok(self.advance().span.clone())
        } else {
            Err(self.error_here(format!(
                "expected {kind} {context}, found {}",
                self.current().kind
            )))
        }
    }

    /// Returns the current token's ID text if it is a bare, numeral or quoted ID.
    pub fn check_id(&self) -> Option<Spanned<SmolStr>> {
        let token = self.current();
        token
            .kind
            .id_text()
            .map(|text| Spanned::new(text.clone(), token.span.clone()))
    }

    /// Consumes an ID or fails with `expected <what>`.
    pub fn expect_id(&mut self, what: &str) -> Result<Spanned<SmolStr>> {
        match self.check_id() {
            Some(id) => {
                self.advance();
                Ok(id)
            }
            None => Err(self.error_here(format!("expected {what}, found {}", self.current().kind))),
        }
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span.clone()
        } else {
            self.current().span.clone()
        }
    }

    pub fn error_here(&self, message: impl Into<String>) -> ConvertError {
        self.error_at(self.current().span.clone(), message, "P001")
    }

    pub fn error_at(&self, span: Span, message: impl Into<String>, code: &'static str) -> ConvertError {
        ConvertError::parse(self.source, span, message, code)
    }
}

/// Merges two spans into a single span covering both.
pub fn merge_spans(start: &Span, end: &Span) -> Span {
    start.start..end.end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn advance_stops_at_eof() {
        let tokens = tokenize("a").expect("lex");
        let mut stream = TokenStream::new(&tokens, "a");
        stream.advance();
        assert!(stream.at_eof());
        stream.advance();
        assert!(stream.at_eof());
        assert_eq!(stream.previous_span(), 0..1);
    }

    #[test]
    fn expect_reports_context() {
        let source = "graph x";
        let tokens = tokenize(source).expect("lex");
        let mut stream = TokenStream::new(&tokens, source);
        stream.advance();
        stream.advance();
        let err = stream
            .expect(TokenKind::LBrace, "to open the graph body")
            .expect_err("should fail");
        assert_eq!(
            err.to_string(),
            "parse error at 1:8: expected `{` to open the graph body, found end of input"
        );
    }

    #[test]
    fn expect_id_accepts_all_id_forms() {
        let source = "a 1 \"q\" ;";
        let tokens = tokenize(source).expect("lex");
        let mut stream = TokenStream::new(&tokens, source);
        assert_eq!(stream.expect_id("node").expect("id").node, "a");
        assert_eq!(stream.expect_id("node").expect("id").node, "1");
        let quoted = stream.expect_id("node").expect("id");
        assert_eq!(quoted.node, "q");
        assert_eq!(quoted.span, 4..7);
        assert!(stream.expect_id("node").is_err());
    }

    #[test]
    fn merge_spans_covers_both() {
        assert_eq!(merge_spans(&(2..4), &(8..12)), 2..12);
    }
}
