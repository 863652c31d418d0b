//! Attribute list parsing: `[k = v, k = v] [k = v]`.

use super::Parser;
use super::base::merge_spans;
use crate::ast::AttributeList;
use crate::error::Result;
use crate::lexer::token::TokenKind;

impl Parser<'_, '_> {
    /// Parses zero or more consecutive attribute lists, merged left to right.
    pub(super) fn parse_attr_lists(&mut self) -> Result<AttributeList> {
        let mut attrs = AttributeList::new();
        while self.stream.check(&TokenKind::LBracket) {
            self.parse_attr_list_into(&mut attrs)?;
        }
        Ok(attrs)
    }

    /// Parses one or more attribute lists; used after `graph`, `node` and `edge`.
    pub(super) fn parse_required_attr_lists(&mut self, owner: &str) -> Result<AttributeList> {
        if !self.stream.check(&TokenKind::LBracket) {
            return Err(self.stream.error_here(format!(
                "expected attribute list after `{owner}`, found {}",
                self.stream.current().kind
            )));
        }
        self.parse_attr_lists()
    }

    /// Parses a single `[ ... ]` list into `attrs`. Items may be separated by
    /// `,`, `;` or nothing.
    fn parse_attr_list_into(&mut self, attrs: &mut AttributeList) -> Result<()> {
        self.stream.expect(TokenKind::LBracket, "to open an attribute list")?;

        while !self.stream.check(&TokenKind::RBracket) {
            let key = self.stream.expect_id("attribute name")?;
            self.stream.expect(TokenKind::Eq, "after attribute name")?;
            let value = self.stream.expect_id("attribute value")?;
            attrs.insert(key.node, value.node, merge_spans(&key.span, &value.span));

            if !self.stream.consume(&TokenKind::Comma) {
                self.stream.consume(&TokenKind::Semicolon);
            }
        }

        self.stream.expect(TokenKind::RBracket, "to close an attribute list")?;
        Ok(())
    }
}
