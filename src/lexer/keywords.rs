//! DOT keyword recognition. Keywords are case-insensitive.

use super::token::TokenKind;

/// Looks up a keyword by name (case-insensitive).
pub fn lookup_keyword(name: &str) -> Option<TokenKind> {
    match name.to_ascii_lowercase().as_str() {
        "strict" => Some(TokenKind::Strict),
        "graph" => Some(TokenKind::Graph),
        "digraph" => Some(TokenKind::Digraph),
        "node" => Some(TokenKind::Node),
        "edge" => Some(TokenKind::Edge),
        "subgraph" => Some(TokenKind::Subgraph),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(lookup_keyword("digraph"), Some(TokenKind::Digraph));
        assert_eq!(lookup_keyword("DiGraph"), Some(TokenKind::Digraph));
        assert_eq!(lookup_keyword("STRICT"), Some(TokenKind::Strict));
    }

    #[test]
    fn non_keywords() {
        assert_eq!(lookup_keyword("label"), None);
        assert_eq!(lookup_keyword("graphs"), None);
    }
}
