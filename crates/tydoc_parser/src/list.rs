//! The shared delimited-list helper.
//!
//! Every bracketed, comma-separated production (named imports, import
//! attributes, type arguments, type parameters, tuple members, parameter
//! lists, binding patterns) goes through this one loop: the close token is
//! checked before each element, so empty lists and trailing commas fall out
//! for free, and each element parse is its own transaction.

use crate::state::ParserState;
use tydoc_ast::token::{Punct, Token};

pub(crate) struct Delimited<E> {
    pub elements: Vec<E>,
    pub close: Token,
}

impl ParserState<'_> {
    pub(crate) fn parse_delimited_list<E>(
        &mut self,
        close: Punct,
        parse_element: impl Fn(&mut Self) -> Option<E>,
    ) -> Option<Delimited<E>> {
        let mut elements = Vec::new();
        loop {
            if let Some(close_token) = self.eat_punct(close) {
                return Some(Delimited { elements, close: close_token });
            }
            let element = self.try_parse(|p| parse_element(p))?;
            elements.push(element);
            if self.eat_punct(Punct::Comma).is_none() {
                break;
            }
        }
        let close_token = self.eat_punct(close)?;
        Some(Delimited { elements, close: close_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tydoc_ast::token::TokenKind;
    use tydoc_scanner::{TextLines, Tokenizer};

    fn idents(text: &str) -> Option<Vec<String>> {
        let lines = TextLines::new(text);
        let mut state = ParserState::new(Tokenizer::new(&lines));
        state.eat_punct(Punct::OpenBrace)?;
        let list = state.parse_delimited_list(Punct::CloseBrace, |p| {
            p.eat(TokenKind::Identifier).map(|t| t.value)
        })?;
        Some(list.elements)
    }

    #[test]
    fn test_elements_and_close() {
        assert_eq!(idents("{a, b, c}").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(idents("{}").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(idents("{a, b,}").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_missing_close_is_no_match() {
        assert_eq!(idents("{a, b"), None);
        assert_eq!(idents("{a b}"), None);
    }
}
