//! Destructuring patterns, used where parameter lists admit them.
//!
//! Computed property names and initializer expressions are not part of the
//! grammar: an element containing either is a non-match, which fails the
//! enclosing pattern rather than producing a guessed sub-tree.

use crate::state::ParserState;
use tydoc_ast::build;
use tydoc_ast::node::{
    ArrayPattern, ArrayPatternElement, BindingElement, BindingName, NumericKind, ObjectPattern,
    ObjectPatternProperty, PatternProperty, PropertyKey, RestElement,
};
use tydoc_ast::token::{Punct, TokenKind};
use tydoc_core::Location;

impl ParserState<'_> {
    pub(crate) fn parse_identifier_or_pattern(&mut self) -> Option<BindingName> {
        if self.look_ahead_punct(Punct::OpenBracket) {
            return self.parse_array_binding_pattern().map(BindingName::Array);
        }
        if self.look_ahead_punct(Punct::OpenBrace) {
            return self.parse_object_binding_pattern().map(BindingName::Object);
        }
        let token = self.eat(TokenKind::Identifier)?;
        Some(BindingName::Identifier(build::identifier(&token)))
    }

    pub(crate) fn is_binding_identifier_or_pattern(&self) -> bool {
        self.look_ahead_punct(Punct::OpenBrace)
            || self.look_ahead_punct(Punct::OpenBracket)
            || self.look_ahead_kind(TokenKind::Identifier)
    }

    fn parse_array_binding_pattern(&mut self) -> Option<ArrayPattern> {
        self.try_parse(|p| {
            let open = p.eat_punct(Punct::OpenBracket)?;
            let list = p.parse_delimited_list(Punct::CloseBracket, |p| {
                p.parse_array_binding_element()
            })?;
            Some(ArrayPattern {
                loc: Location::between(open.loc, list.close.loc),
                elements: list.elements,
            })
        })
    }

    fn parse_object_binding_pattern(&mut self) -> Option<ObjectPattern> {
        self.try_parse(|p| {
            let open = p.eat_punct(Punct::OpenBrace)?;
            let list =
                p.parse_delimited_list(Punct::CloseBrace, |p| p.parse_object_binding_element())?;
            Some(ObjectPattern {
                loc: Location::between(open.loc, list.close.loc),
                properties: list.elements,
            })
        })
    }

    /// One array pattern slot; `None` is an elision (`[a, , b]`).
    fn parse_array_binding_element(&mut self) -> Option<Option<ArrayPatternElement>> {
        if self.look_ahead_punct(Punct::Comma) {
            return Some(None);
        }
        self.try_parse(|p| {
            let dots = p.eat_punct(Punct::DotDotDot);
            let name = p.parse_identifier_or_pattern()?;
            if let Some(dots) = dots {
                return Some(Some(ArrayPatternElement::Rest(RestElement {
                    loc: Location::between(dots.loc, name.loc()),
                    argument: Box::new(name),
                })));
            }
            if p.look_ahead_punct(Punct::Equals) {
                // initializer expressions are unsupported
                return None;
            }
            Some(Some(ArrayPatternElement::Binding(name)))
        })
    }

    fn parse_object_binding_element(&mut self) -> Option<ObjectPatternProperty> {
        self.try_parse(|p| {
            let dots = p.eat_punct(Punct::DotDotDot);
            let id_token = p.eat(TokenKind::Identifier);
            if let Some(id_token) = &id_token {
                if !p.look_ahead_punct(Punct::Colon) {
                    let ident = build::identifier(id_token);
                    if let Some(dots) = dots {
                        return Some(ObjectPatternProperty::Rest(RestElement {
                            loc: Location::between(dots.loc, ident.loc),
                            argument: Box::new(BindingName::Identifier(ident)),
                        }));
                    }
                    if p.look_ahead_punct(Punct::Equals) {
                        return None;
                    }
                    // shorthand
                    return Some(ObjectPatternProperty::Property(PatternProperty {
                        loc: ident.loc,
                        key: PropertyKey::Identifier(ident.clone()),
                        shorthand: true,
                        value: BindingElement::Name(BindingName::Identifier(ident)),
                    }));
                }
            }
            if dots.is_some() {
                return None;
            }
            let key = match id_token {
                Some(id_token) => PropertyKey::Identifier(build::identifier(&id_token)),
                None => p.parse_property_name()?,
            };
            p.eat_punct(Punct::Colon)?;
            let value = p.parse_identifier_or_pattern()?;
            if p.look_ahead_punct(Punct::Equals) {
                return None;
            }
            Some(ObjectPatternProperty::Property(PatternProperty {
                loc: Location::between(key.loc(), value.loc()),
                key,
                shorthand: false,
                value: BindingElement::Name(value),
            }))
        })
    }

    /// An identifier, string, or (non-bigint) numeric property name.
    /// Computed names (`[expr]`) are unsupported and fail closed.
    pub(crate) fn parse_property_name(&mut self) -> Option<PropertyKey> {
        self.try_parse(|p| {
            if let Some(token) = p.eat(TokenKind::String) {
                return Some(PropertyKey::String(build::string_literal(&token)));
            }
            if let Some(token) = p.eat(TokenKind::Numeric) {
                let literal = build::numeric_literal(&token);
                if literal.kind == NumericKind::BigInt {
                    return None;
                }
                return Some(PropertyKey::Numeric(literal));
            }
            if p.look_ahead_punct(Punct::OpenBracket) {
                return None;
            }
            let token = p.eat(TokenKind::Identifier)?;
            Some(PropertyKey::Identifier(build::identifier(&token)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tydoc_scanner::{TextLines, Tokenizer};

    fn parse_pattern(text: &str) -> Option<BindingName> {
        let lines = TextLines::new(text);
        let mut state = ParserState::new(Tokenizer::new(&lines));
        state.parse_identifier_or_pattern()
    }

    #[test]
    fn test_object_pattern_shapes() {
        let Some(BindingName::Object(pattern)) = parse_pattern("{a, b: c, ...rest}") else {
            panic!("expected object pattern");
        };
        assert_eq!(pattern.properties.len(), 3);
        match &pattern.properties[0] {
            ObjectPatternProperty::Property(p) => assert!(p.shorthand),
            other => panic!("unexpected {other:?}"),
        }
        match &pattern.properties[1] {
            ObjectPatternProperty::Property(p) => assert!(!p.shorthand),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            &pattern.properties[2],
            ObjectPatternProperty::Rest(_)
        ));
    }

    #[test]
    fn test_array_pattern_with_elision_and_rest() {
        let Some(BindingName::Array(pattern)) = parse_pattern("[a, , {b}, ...c]") else {
            panic!("expected array pattern");
        };
        assert_eq!(pattern.elements.len(), 4);
        assert!(pattern.elements[1].is_none());
        assert!(matches!(
            pattern.elements[3],
            Some(ArrayPatternElement::Rest(_))
        ));
    }

    #[test]
    fn test_string_and_numeric_keys() {
        let Some(BindingName::Object(pattern)) = parse_pattern("{'a-b': x, 0: y}") else {
            panic!("expected object pattern");
        };
        assert!(matches!(
            &pattern.properties[0],
            ObjectPatternProperty::Property(PatternProperty { key: PropertyKey::String(_), .. })
        ));
        assert!(matches!(
            &pattern.properties[1],
            ObjectPatternProperty::Property(PatternProperty { key: PropertyKey::Numeric(_), .. })
        ));
    }

    #[test]
    fn test_initializer_fails_closed() {
        assert!(parse_pattern("[a = 1]").is_none());
        assert!(parse_pattern("{a = 1}").is_none());
        assert!(parse_pattern("{a: b = 1}").is_none());
    }

    #[test]
    fn test_computed_key_fails_closed() {
        assert!(parse_pattern("{[k]: v}").is_none());
    }
}
