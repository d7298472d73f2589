//! Modifier parsing.
//!
//! Modifier keywords are contextual: `const` in `<const T>` is a modifier,
//! `const` followed by a line break is not, `in` in `<in T>` is a modifier
//! while `in` in `[K in T]` is an operator. A keyword only counts as a
//! modifier when the token after it could follow one.

use crate::state::ParserState;
use tydoc_ast::token::{Keyword, Punct, Token, TokenKind};

pub(crate) const MODIFIER_KINDS: [Keyword; 15] = [
    Keyword::Abstract,
    Keyword::Accessor,
    Keyword::Async,
    Keyword::Const,
    Keyword::Declare,
    Keyword::Default,
    Keyword::Export,
    Keyword::In,
    Keyword::Public,
    Keyword::Private,
    Keyword::Protected,
    Keyword::Readonly,
    Keyword::Static,
    Keyword::Out,
    Keyword::Override,
];

impl ParserState<'_> {
    pub(crate) fn is_modifier_kind(&mut self) -> bool {
        self.look_ahead(|p| MODIFIER_KINDS.iter().any(|kind| p.eat_keyword(*kind).is_some()))
    }

    /// Parse a run of modifiers; `None` when there are none.
    pub(crate) fn parse_modifiers(&mut self, permit_const_as_modifier: bool) -> Option<Vec<Token>> {
        let mut list: Vec<Token> = Vec::new();
        let mut has_seen_static = false;
        while let Some(modifier) = self.try_parse_modifier(has_seen_static, permit_const_as_modifier)
        {
            if modifier.is_keyword(Keyword::Static) {
                has_seen_static = true;
            }
            list.push(modifier);
        }
        if list.is_empty() {
            None
        } else {
            Some(list)
        }
    }

    fn try_parse_modifier(
        &mut self,
        has_seen_static: bool,
        permit_const_as_modifier: bool,
    ) -> Option<Token> {
        self.try_parse(|p| {
            let token = MODIFIER_KINDS.iter().find_map(|kind| p.eat_keyword(*kind))?;

            if has_seen_static && token.is_keyword(Keyword::Static) {
                return None;
            }
            if token.is_keyword(Keyword::Const) && permit_const_as_modifier {
                // Whatever `const` modifies must start on the same line, so a
                // standalone `const` declaration is not misread as a modifier.
                if !p.next_is_on_same_line_and_can_follow_modifier(token.loc.end.line) {
                    return None;
                }
            } else if !p.can_apply_modifier(&token) {
                return None;
            }
            Some(token)
        })
    }

    fn can_apply_modifier(&mut self, modifier: &Token) -> bool {
        if modifier.is_keyword(Keyword::Static) {
            return self.can_follow_modifier();
        }
        self.next_is_on_same_line_and_can_follow_modifier(modifier.loc.end.line)
    }

    fn next_is_on_same_line_and_can_follow_modifier(&mut self, line: u32) -> bool {
        self.current_on_same_line(line) && self.can_follow_modifier()
    }

    fn can_follow_modifier(&mut self) -> bool {
        self.look_ahead_punct(Punct::OpenBracket)
            || self.look_ahead_punct(Punct::OpenBrace)
            || self.look_ahead_punct(Punct::Asterisk)
            || self.look_ahead_punct(Punct::DotDotDot)
            || self.is_literal_property_name()
    }

    pub(crate) fn is_literal_property_name(&self) -> bool {
        matches!(
            self.current().map(|t| t.kind),
            Some(TokenKind::Identifier | TokenKind::String | TokenKind::Numeric)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tydoc_scanner::{TextLines, Tokenizer};

    fn modifiers_of(text: &str, permit_const: bool) -> Vec<String> {
        let lines = TextLines::new(text);
        let mut state = ParserState::new(Tokenizer::new(&lines));
        state
            .parse_modifiers(permit_const)
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn test_modifiers_before_name() {
        assert_eq!(modifiers_of("in T", false), vec!["in"]);
        assert_eq!(modifiers_of("in out T", false), vec!["in", "out"]);
    }

    #[test]
    fn test_keyword_alone_is_not_a_modifier() {
        // `out` here is the declared name, not a modifier
        assert_eq!(modifiers_of("out >", false), Vec::<String>::new());
    }

    #[test]
    fn test_const_requires_same_line() {
        assert_eq!(modifiers_of("const T", true), vec!["const"]);
        assert_eq!(modifiers_of("const\nT", true), Vec::<String>::new());
    }
}
