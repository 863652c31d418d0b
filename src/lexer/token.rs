//! Token types for DOT lexical analysis.

use crate::ast::Span;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords (case-insensitive)
    Strict,
    Graph,
    Digraph,
    Node,
    Edge,
    Subgraph,

    // Identifiers
    /// Bare alphanumeric identifier.
    Ident(SmolStr),
    /// Numeral such as `42`, `-1.5` or `.5`.
    Numeral(SmolStr),
    /// Double-quoted string with escapes already processed.
    Quoted(SmolStr),

    // Edge operators
    Arrow,      // ->
    DoubleDash, // --

    // Punctuation
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;
    Eq,        // =
    Colon,     // :

    Eof,
}

impl TokenKind {
    /// Returns true for the case-insensitive DOT keywords.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Strict
                | TokenKind::Graph
                | TokenKind::Digraph
                | TokenKind::Node
                | TokenKind::Edge
                | TokenKind::Subgraph
        )
    }

    /// The text of a token usable as a DOT ID (bare, numeral or quoted).
    pub fn id_text(&self) -> Option<&SmolStr> {
        match self {
            TokenKind::Ident(text) | TokenKind::Numeral(text) | TokenKind::Quoted(text) => {
                Some(text)
            }
            _ => None,
        }
    }

    /// Returns true for `->` and `--`.
    pub fn is_edge_op(&self) -> bool {
        matches!(self, TokenKind::Arrow | TokenKind::DoubleDash)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Strict => write!(f, "`strict`"),
            TokenKind::Graph => write!(f, "`graph`"),
            TokenKind::Digraph => write!(f, "`digraph`"),
            TokenKind::Node => write!(f, "`node`"),
            TokenKind::Edge => write!(f, "`edge`"),
            TokenKind::Subgraph => write!(f, "`subgraph`"),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Numeral(n) => write!(f, "numeral `{n}`"),
            TokenKind::Quoted(s) => write!(f, "string \"{s}\""),
            TokenKind::Arrow => write!(f, "`->`"),
            TokenKind::DoubleDash => write!(f, "`--`"),
            TokenKind::LBracket => write!(f, "`[`"),
            TokenKind::RBracket => write!(f, "`]`"),
            TokenKind::LBrace => write!(f, "`{{`"),
            TokenKind::RBrace => write!(f, "`}}`"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::Semicolon => write!(f, "`;`"),
            TokenKind::Eq => write!(f, "`=`"),
            TokenKind::Colon => write!(f, "`:`"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A lexical token with its kind and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Byte range of the token in the source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the source slice covered by this token.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}
