//! Function and constructor types, type parameter lists, and parameters.
//!
//! `(` is ambiguous between a parenthesized type and a function type's
//! parameter list; the disambiguation lookahead scans for a parameter-like
//! token pattern (or `) =>`) without consuming input, so the committed parse
//! never backtracks out of a half-built parameter list.

use crate::state::ParserState;
use tydoc_ast::build;
use tydoc_ast::node::{
    ConstructorType, FunctionType, Parameter, TypeNode, TypeParameter, TypeParameterDeclaration,
    TypeParameterModifiers,
};
use tydoc_ast::token::{Keyword, Punct, TokenKind};
use tydoc_core::Location;

impl ParserState<'_> {
    pub(crate) fn is_start_of_function_type_or_constructor_type(&mut self) -> bool {
        if self.look_ahead_punct(Punct::LessThan) {
            return true;
        }
        if self.look_ahead(|p| {
            p.eat_punct(Punct::OpenParen).is_some() && p.is_unambiguously_start_of_function_type()
        }) {
            return true;
        }
        self.look_ahead_keyword(Keyword::New)
            || self.look_ahead(|p| {
                p.eat_keyword(Keyword::Abstract).is_some() && p.look_ahead_keyword(Keyword::New)
            })
    }

    /// Called with the `(` already consumed.
    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        if self.look_ahead_punct(Punct::CloseParen) || self.look_ahead_punct(Punct::DotDotDot) {
            // ( )
            // ( ...
            return true;
        }
        self.look_ahead(|p| {
            if p.skip_parameter_start() {
                if p.look_ahead_punct(Punct::Colon)
                    || p.look_ahead_punct(Punct::Comma)
                    || p.look_ahead_punct(Punct::Question)
                    || p.look_ahead_punct(Punct::Equals)
                {
                    // ( xxx :
                    // ( xxx ,
                    // ( xxx ?
                    // ( xxx =
                    return true;
                }
                if p.eat_punct(Punct::CloseParen).is_some()
                    && p.look_ahead_punct(Punct::EqualsGreaterThan)
                {
                    // ( xxx ) =>
                    return true;
                }
            }
            false
        })
    }

    fn skip_parameter_start(&mut self) -> bool {
        if self.is_modifier_kind() {
            self.parse_modifiers(false);
        }
        if self.eat(TokenKind::Identifier).is_some() {
            return true;
        }
        if self.look_ahead_punct(Punct::OpenBracket) || self.look_ahead_punct(Punct::OpenBrace) {
            return self.parse_identifier_or_pattern().is_some();
        }
        false
    }

    pub(crate) fn is_start_of_parameter(&mut self, is_jsdoc_parameter: bool) -> bool {
        if self.look_ahead_punct(Punct::DotDotDot) {
            return true;
        }
        self.is_binding_identifier_or_pattern()
            || self.is_modifier_kind()
            || self.is_start_of_type(!is_jsdoc_parameter)
    }

    pub(crate) fn parse_function_or_constructor_type(&mut self) -> Option<TypeNode> {
        self.try_parse(|p| {
            let abstract_token = p.eat_keyword(Keyword::Abstract);
            let new_token = p.eat_keyword(Keyword::New);
            let type_parameters = p.parse_type_parameters();
            let open = p.eat_punct(Punct::OpenParen)?;
            let params = p.parse_delimited_list(Punct::CloseParen, |p| p.parse_parameter())?;
            p.eat_punct(Punct::EqualsGreaterThan)?;
            let return_type = p.parse_type_or_type_predicate()?;

            let start = abstract_token
                .as_ref()
                .or(new_token.as_ref())
                .map(|t| t.loc)
                .or_else(|| type_parameters.as_ref().map(|tp| tp.loc))
                .unwrap_or(open.loc);
            let loc = Location::between(start, return_type.loc());
            if new_token.is_some() {
                Some(TypeNode::Constructor(ConstructorType {
                    loc,
                    is_abstract: abstract_token.is_some(),
                    type_parameters,
                    parameters: params.elements,
                    return_type: Box::new(return_type),
                }))
            } else {
                Some(TypeNode::Function(FunctionType {
                    loc,
                    type_parameters,
                    parameters: params.elements,
                    return_type: Box::new(return_type),
                }))
            }
        })
    }

    /// `<T, const U extends V = W>`; `None` when there is no `<` or the list
    /// does not parse.
    pub(crate) fn parse_type_parameters(&mut self) -> Option<TypeParameterDeclaration> {
        self.try_parse(|p| {
            let less_than = p.eat_punct(Punct::LessThan)?;
            let list = p.parse_delimited_list(Punct::GreaterThan, |p| p.parse_type_parameter())?;
            if list.elements.is_empty() {
                return None;
            }
            Some(TypeParameterDeclaration {
                loc: Location::between(less_than.loc, list.close.loc),
                params: list.elements,
            })
        })
    }

    fn parse_type_parameter(&mut self) -> Option<TypeParameter> {
        let modifier_tokens = self.parse_modifiers(true).unwrap_or_default();
        let name_token = self.eat(TokenKind::Identifier)?;
        let name = build::identifier(&name_token);

        let mut constraint = None;
        if self.eat_keyword(Keyword::Extends).is_some() {
            // A constraint that is an expression rather than a type is left
            // for the list parser to reject.
            if self.is_start_of_type(false) {
                constraint = self.parse_type();
            }
        }
        let default = if self.eat_punct(Punct::Equals).is_some() {
            self.parse_type()
        } else {
            None
        };

        let mut modifiers = TypeParameterModifiers::empty();
        for token in &modifier_tokens {
            if token.is_keyword(Keyword::Const) {
                modifiers |= TypeParameterModifiers::CONST;
            } else if token.is_keyword(Keyword::In) {
                modifiers |= TypeParameterModifiers::IN;
            } else if token.is_keyword(Keyword::Out) {
                modifiers |= TypeParameterModifiers::OUT;
            }
        }

        let start = modifier_tokens.first().map_or(name.loc, |t| t.loc);
        let end = default
            .as_ref()
            .map(TypeNode::loc)
            .or_else(|| constraint.as_ref().map(TypeNode::loc))
            .unwrap_or(name.loc);
        Some(TypeParameter {
            loc: Location::between(start, end),
            modifiers,
            name,
            constraint,
            default,
        })
    }

    pub(crate) fn parse_parameter(&mut self) -> Option<Parameter> {
        let dots = self.eat_punct(Punct::DotDotDot);
        let name = self.parse_identifier_or_pattern()?;
        let question = self.eat_punct(Punct::Question);
        let type_annotation = if self.eat_punct(Punct::Colon).is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        if self.look_ahead_punct(Punct::Equals) {
            // parameter initializers are unsupported
            return None;
        }
        let start = dots.as_ref().map_or(name.loc(), |t| t.loc);
        let end = type_annotation
            .as_ref()
            .map(TypeNode::loc)
            .or(question.as_ref().map(|t| t.loc))
            .unwrap_or(name.loc());
        Some(Parameter {
            loc: Location::between(start, end),
            dot_dot_dot: dots.is_some(),
            name,
            question: question.is_some(),
            type_annotation,
        })
    }
}
