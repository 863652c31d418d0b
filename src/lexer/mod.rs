//! Lexical analysis for DOT.
//!
//! The lexer turns source text into a flat token stream terminated by
//! [`TokenKind::Eof`]. Whitespace, `//` and `/* */` comments, and `#` lines
//! are discarded. Scanning stops at the first malformed sequence.

pub mod keywords;
pub mod token;

use crate::error::{ConvertError, Result};
use token::{Token, TokenKind};
use tracing::debug;

/// A lexical analyzer for DOT source text.
pub struct Lexer<'a> {
    /// The DOT text being scanned.
    source: &'a str,
    /// Current byte position in source.
    pos: usize,
    /// Tokens produced so far.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenizes the whole source, consuming the lexer.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        loop {
            self.skip_trivia()?;
            if self.is_at_end() {
                break;
            }
            self.scan_token()?;
        }

        let eof_pos = self.source.len();
        self.tokens.push(Token::new(TokenKind::Eof, eof_pos..eof_pos));
        debug!(tokens = self.tokens.len(), bytes = self.source.len(), "lexed DOT source");
        Ok(self.tokens)
    }

    /// Scans one token starting at the current position.
    fn scan_token(&mut self) -> Result<()> {
        let start = self.pos;
        let ch = self.advance();

        match ch {
            '[' => self.add_token(TokenKind::LBracket, start),
            ']' => self.add_token(TokenKind::RBracket, start),
            '{' => self.add_token(TokenKind::LBrace, start),
            '}' => self.add_token(TokenKind::RBrace, start),
            ',' => self.add_token(TokenKind::Comma, start),
            ';' => self.add_token(TokenKind::Semicolon, start),
            '=' => self.add_token(TokenKind::Eq, start),
            ':' => self.add_token(TokenKind::Colon, start),

            '-' => {
                if self.match_char('>') {
                    self.add_token(TokenKind::Arrow, start);
                } else if self.match_char('-') {
                    self.add_token(TokenKind::DoubleDash, start);
                } else if self.peek().is_ascii_digit() || self.peek() == '.' {
                    self.scan_numeral(start)?;
                } else {
                    return Err(self.unexpected(start, '-'));
                }
            }
            '.' if self.peek().is_ascii_digit() => self.scan_numeral(start)?,
            '0'..='9' => self.scan_numeral(start)?,

            '"' => self.scan_quoted(start)?,

            '<' => {
                return Err(ConvertError::lex(
                    self.source,
                    start..self.pos,
                    "HTML-like strings are not supported",
                    Some('<'),
                    "L001",
                ));
            }

            c if Self::is_id_start(c) => self.scan_identifier_or_keyword(start),

            c => return Err(self.unexpected(start, c)),
        }
        Ok(())
    }

    /// Scans a bare identifier and classifies keywords.
    fn scan_identifier_or_keyword(&mut self, start: usize) {
        while Self::is_id_continue(self.peek()) {
            self.advance();
        }

        let text = &self.source[start..self.pos];
        let kind = keywords::lookup_keyword(text).unwrap_or_else(|| TokenKind::Ident(text.into()));
        self.add_token(kind, start);
    }

    /// Scans `[-]?(.[0-9]+ | [0-9]+(.[0-9]*)?)`; any sign is already consumed.
    fn scan_numeral(&mut self, start: usize) -> Result<()> {
        let has_digit = self.source[start..self.pos].bytes().any(|b| b.is_ascii_digit());
        if !has_digit && self.peek() == '.' {
            self.advance();
            if !self.peek().is_ascii_digit() {
                return Err(ConvertError::lex(
                    self.source,
                    start..self.pos,
                    "malformed numeral",
                    None,
                    "L001",
                ));
            }
        }
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == '.' && !self.source[start..self.pos].contains('.') {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = &self.source[start..self.pos];
        self.add_token(TokenKind::Numeral(text.into()), start);
        Ok(())
    }

    /// Scans a double-quoted string. The opening quote is already consumed.
    ///
    /// `\"` yields a quote, `\\` a backslash and a backslash-newline is a line
    /// continuation. Other escapes are kept verbatim.
    fn scan_quoted(&mut self, start: usize) -> Result<()> {
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                return Err(ConvertError::lex(
                    self.source,
                    start..self.pos,
                    "unterminated quoted string",
                    Some('"'),
                    "L002",
                ));
            }
            match self.advance() {
                '"' => break,
                '\\' => match self.peek() {
                    '"' => {
                        self.advance();
                        value.push('"');
                    }
                    '\\' => {
                        self.advance();
                        value.push('\\');
                    }
                    '\n' => {
                        self.advance();
                    }
                    '\r' if self.peek_next() == '\n' => {
                        self.advance();
                        self.advance();
                    }
                    _ => value.push('\\'),
                },
                c => value.push(c),
            }
        }

        self.add_token(TokenKind::Quoted(value.into()), start);
        Ok(())
    }

    /// Skips whitespace and comments. Fails on an unterminated block comment.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                ' ' | '\t' | '\r' | '\n' | '\u{feff}' => {
                    self.advance();
                }
                '/' if self.peek_next() == '/' => self.skip_line(),
                '/' if self.peek_next() == '*' => {
                    let comment_start = self.pos;
                    self.advance();
                    self.advance();
                    loop {
                        if self.is_at_end() {
                            return Err(ConvertError::lex(
                                self.source,
                                comment_start..comment_start + 2,
                                "unterminated block comment",
                                None,
                                "L003",
                            ));
                        }
                        if self.peek() == '*' && self.peek_next() == '/' {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                '#' if self.at_line_start() => self.skip_line(),
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        while self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }
    }

    /// True when only whitespace precedes the cursor on the current line.
    fn at_line_start(&self) -> bool {
        self.source[..self.pos]
            .chars()
            .rev()
            .take_while(|&c| c != '\n')
            .all(|c| c == ' ' || c == '\t' || c == '\r')
    }

    fn is_id_start(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_' || (!ch.is_ascii() && ch != '\u{feff}')
    }

    fn is_id_continue(ch: char) -> bool {
        ch != '\0' && (Self::is_id_start(ch) || ch.is_ascii_digit())
    }

    /// Pushes a token spanning `start` to the current position.
    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, start..self.pos));
    }

    fn unexpected(&self, start: usize, ch: char) -> ConvertError {
        ConvertError::lex(
            self.source,
            start..self.pos,
            format!("unexpected character '{ch}'"),
            Some(ch),
            "L001",
        )
    }

    /// Returns the current character without consuming it, `'\0'` at the end.
    fn peek(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Returns the character after the current one.
    fn peek_next(&self) -> char {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next().unwrap_or('\0')
    }

    /// Consumes and returns the current character.
    fn advance(&mut self) -> char {
        let ch = self.peek();
        if !self.is_at_end() {
            self.pos += ch.len_utf8();
        }
        ch
    }

    /// Consumes the current character if it equals `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }
}

/// Tokenizes a DOT source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Position;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("source should lex")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Ident(s.into())
    }

    #[test]
    fn empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("  \t\n "), vec![TokenKind::Eof]);
    }

    #[test]
    fn graph_header() {
        assert_eq!(
            kinds("strict digraph G {}"),
            vec![
                TokenKind::Strict,
                TokenKind::Digraph,
                ident("G"),
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_case_insensitive_but_quoted_are_ids() {
        assert_eq!(
            kinds("GRAPH Node \"graph\""),
            vec![
                TokenKind::Graph,
                TokenKind::Node,
                TokenKind::Quoted("graph".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn edge_operators() {
        assert_eq!(
            kinds("a -> b -- c"),
            vec![
                ident("a"),
                TokenKind::Arrow,
                ident("b"),
                TokenKind::DoubleDash,
                ident("c"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn operators_without_spaces() {
        assert_eq!(
            kinds("a->b"),
            vec![ident("a"), TokenKind::Arrow, ident("b"), TokenKind::Eof]
        );
        assert_eq!(
            kinds("1--2"),
            vec![
                TokenKind::Numeral("1".into()),
                TokenKind::DoubleDash,
                TokenKind::Numeral("2".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn attribute_list_punctuation() {
        assert_eq!(
            kinds("[label=\"Person\", age=30; w=.5]"),
            vec![
                TokenKind::LBracket,
                ident("label"),
                TokenKind::Eq,
                TokenKind::Quoted("Person".into()),
                TokenKind::Comma,
                ident("age"),
                TokenKind::Eq,
                TokenKind::Numeral("30".into()),
                TokenKind::Semicolon,
                ident("w"),
                TokenKind::Eq,
                TokenKind::Numeral(".5".into()),
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn numerals() {
        assert_eq!(
            kinds("42 -1.5 3. -.25"),
            vec![
                TokenKind::Numeral("42".into()),
                TokenKind::Numeral("-1.5".into()),
                TokenKind::Numeral("3.".into()),
                TokenKind::Numeral("-.25".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn trailing_dot_numerals() {
        assert_eq!(
            kinds("3. -3. [w=3.]"),
            vec![
                TokenKind::Numeral("3.".into()),
                TokenKind::Numeral("-3.".into()),
                TokenKind::LBracket,
                ident("w"),
                TokenKind::Eq,
                TokenKind::Numeral("3.".into()),
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn error_dot_without_digits() {
        let err = tokenize("a [w=-.]").expect_err("should fail");
        assert_eq!(err.code(), "L001");
        assert!(err.to_string().contains("malformed numeral"));
    }

    #[test]
    fn quoted_strings_keep_whitespace_and_escaped_quotes() {
        assert_eq!(
            kinds(r#""New  York" "say \"hi\"" "a\\b""#),
            vec![
                TokenKind::Quoted("New  York".into()),
                TokenKind::Quoted("say \"hi\"".into()),
                TokenKind::Quoted("a\\b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn quoted_strings_keep_other_escapes_verbatim() {
        assert_eq!(
            kinds(r#""line\nbreak""#),
            vec![TokenKind::Quoted("line\\nbreak".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn quoted_line_continuation() {
        assert_eq!(
            kinds("\"Employee:\\\nExecutive\""),
            vec![TokenKind::Quoted("Employee:Executive".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn unicode_identifiers() {
        assert_eq!(kinds("Zürich"), vec![ident("Zürich"), TokenKind::Eof]);
    }

    #[test]
    fn comments_are_discarded() {
        let source = "// header\ndigraph { /* inline */ a # not a comment here\n# preprocessor line\n}";
        let err = tokenize(source).expect_err("mid-line '#' is not a comment");
        assert!(matches!(err, ConvertError::Lex { unexpected: Some('#'), .. }));

        let source = "// header\ndigraph { /* inline\n multi-line */ a\n# preprocessor line\n}";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Digraph,
                TokenKind::LBrace,
                ident("a"),
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn spans_cover_lexemes() {
        let tokens = tokenize("a -> \"b c\"").expect("source should lex");
        assert_eq!(tokens[0].span, 0..1);
        assert_eq!(tokens[1].span, 2..4);
        assert_eq!(tokens[2].span, 5..10);
        assert_eq!(tokens[3].span, 10..10);
    }

    #[test]
    fn error_unterminated_string() {
        let err = tokenize("graph {\n  a [label=\"oops]\n}").expect_err("should fail");
        match err {
            ConvertError::Lex { code, position, .. } => {
                assert_eq!(code, "L002");
                assert_eq!(position, Position::new(2, 12));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_unterminated_block_comment() {
        let err = tokenize("graph { /* never closed").expect_err("should fail");
        assert_eq!(err.code(), "L003");
    }

    #[test]
    fn error_invalid_character() {
        let err = tokenize("a @ b").expect_err("should fail");
        match err {
            ConvertError::Lex {
                unexpected, span, ..
            } => {
                assert_eq!(unexpected, Some('@'));
                assert_eq!(span, 2..3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_lone_dash() {
        let err = tokenize("a - b").expect_err("should fail");
        assert!(matches!(err, ConvertError::Lex { unexpected: Some('-'), .. }));
    }

    #[test]
    fn error_html_string() {
        let err = tokenize("a [label=<b>x</b>]").expect_err("should fail");
        assert!(err.to_string().contains("HTML-like"));
    }
}
