//! The type expression grammar.
//!
//! Precedence, outermost-in: conditional, union, intersection, type
//! operators (`keyof`/`unique`/`readonly`/`infer`), postfix `[]`/`[K]`, then
//! the non-array types. Function and constructor types are recognized up
//! front by a dedicated lookahead so `(` never has to be reparsed.

use crate::state::ParserState;
use tydoc_ast::build;
use tydoc_ast::node::{
    ArrayType, CallSignature, ConditionalType, ConstructSignature, EntityName, ImportType,
    IndexSignature, IndexedAccessType, InferType, IntersectionType, KeywordType, LiteralType,
    LiteralTypeValue, MappedType, MappedTypeModifier, MethodSignature, NamedTupleMember,
    NamepathType, OptionalDefaultType, OptionalType, Parameter, ParenthesizedType, PredicateName,
    PropertySignature, QualifiedName, RestType, TemplateElement, TemplateLiteralType,
    TemplateTypeSpan, ThisType, TupleType, TypeElement, TypeKeyword, TypeLiteral, TypeNode,
    TypeOperator, TypeOperatorKind, TypeParameter, TypeParameterDeclaration,
    TypeParameterModifiers, TypePredicate, TypeQuery, TypeReference, TypeRoot, UnionType,
    VariadicType,
};
use tydoc_ast::token::{Keyword, Punct, TokenKind};
use tydoc_core::Location;

/// Keywords that can begin a type.
const TYPE_START_KEYWORDS: [Keyword; 23] = [
    Keyword::Any,
    Keyword::Unknown,
    Keyword::String,
    Keyword::Number,
    Keyword::BigInt,
    Keyword::Boolean,
    Keyword::Readonly,
    Keyword::Symbol,
    Keyword::Unique,
    Keyword::Void,
    Keyword::Undefined,
    Keyword::Null,
    Keyword::This,
    Keyword::TypeOf,
    Keyword::KeyOf,
    Keyword::Never,
    Keyword::New,
    Keyword::True,
    Keyword::False,
    Keyword::Object,
    Keyword::Infer,
    Keyword::Import,
    Keyword::Asserts,
];

struct MemberSignature {
    start: Location,
    type_parameters: Option<TypeParameterDeclaration>,
    parameters: Vec<Parameter>,
    return_type: Option<TypeNode>,
    end: Location,
}

impl ParserState<'_> {
    // ========================================================================
    // Root
    // ========================================================================

    /// The entry production for the contents of a `{...}` annotation.
    pub(crate) fn parse_type_annotation_root(&mut self) -> Option<TypeRoot> {
        if let Some(module_token) = self.eat_keyword(Keyword::Module) {
            // `module:x` namepath escape: consume verbatim until `,`, `}`, or
            // the end of input.
            let mut last = module_token.clone();
            loop {
                if self.look_ahead_punct(Punct::Comma) || self.look_ahead_punct(Punct::CloseBrace)
                {
                    break;
                }
                match self.bump() {
                    Some(token) => last = token,
                    None => break,
                }
            }
            return Some(TypeRoot::Namepath(NamepathType {
                loc: Location::between(module_token.loc, last.loc),
            }));
        }

        let dots = self.eat_punct(Punct::DotDotDot);

        let annotation = self.parse_type_or_type_predicate()?;
        let root = match annotation {
            TypeNode::Predicate(predicate) => TypeRoot::Predicate(predicate),
            type_node => TypeRoot::Type(type_node),
        };

        if let Some(dots) = dots {
            return Some(TypeRoot::Variadic(VariadicType {
                loc: Location::between(dots.loc, root.loc()),
                type_annotation: Box::new(root),
            }));
        }

        if let Some(equals) = self.eat_punct(Punct::Equals) {
            // `T=` — optional with default
            let TypeRoot::Type(type_node) = root else {
                return None;
            };
            return Some(TypeRoot::Optional(OptionalDefaultType {
                loc: Location::between(type_node.loc(), equals.loc),
                type_node: Box::new(type_node),
            }));
        }

        Some(root)
    }

    pub(crate) fn parse_type_or_type_predicate(&mut self) -> Option<TypeNode> {
        let predicate_name = self.try_parse(|p| p.parse_type_predicate_prefix());
        let type_node = self.try_parse(|p| p.parse_type())?;
        if let Some(parameter_name) = predicate_name {
            return Some(TypeNode::Predicate(TypePredicate {
                loc: Location::between(parameter_name.loc(), type_node.loc()),
                asserts: false,
                parameter_name,
                type_annotation: Box::new(type_node),
            }));
        }
        Some(type_node)
    }

    fn parse_type_predicate_prefix(&mut self) -> Option<PredicateName> {
        let name_token = self.eat(TokenKind::Identifier)?;
        let name = if name_token.value == "this" {
            PredicateName::This(ThisType { loc: name_token.loc })
        } else {
            PredicateName::Identifier(build::identifier(&name_token))
        };
        let is_token = self.eat_keyword(Keyword::Is)?;
        // `is` on a later line is not a predicate
        if name_token.loc.end.line != is_token.loc.start.line {
            return None;
        }
        Some(name)
    }

    // ========================================================================
    // Precedence levels
    // ========================================================================

    pub(crate) fn parse_type(&mut self) -> Option<TypeNode> {
        if self.is_start_of_function_type_or_constructor_type() {
            return self.parse_function_or_constructor_type();
        }
        let type_node = self.parse_union_type_or_higher()?;
        if !self.conditional_types_disallowed()
            && self.current_on_same_line(type_node.loc().end.line)
            && self.eat_keyword(Keyword::Extends).is_some()
        {
            // The type following `extends` is not permitted to be another
            // conditional type.
            let extends_type = self.with_conditional_types(false, |p| p.parse_type())?;
            self.eat_punct(Punct::Question)?;
            let true_type = self.with_conditional_types(true, |p| p.parse_type())?;
            self.eat_punct(Punct::Colon)?;
            let false_type = self.with_conditional_types(true, |p| p.parse_type())?;
            let loc = Location::between(type_node.loc(), false_type.loc());
            return Some(TypeNode::Conditional(ConditionalType {
                loc,
                check_type: Box::new(type_node),
                extends_type: Box::new(extends_type),
                true_type: Box::new(true_type),
                false_type: Box::new(false_type),
            }));
        }
        Some(type_node)
    }

    fn parse_union_type_or_higher(&mut self) -> Option<TypeNode> {
        let leading = self.eat_punct(Punct::Bar);
        let first = self.parse_intersection_type_or_higher()?;
        if leading.is_none() && !self.look_ahead_punct(Punct::Bar) {
            return Some(first);
        }
        let start = leading.as_ref().map_or(first.loc(), |t| t.loc);
        let mut types = vec![first];
        while self.eat_punct(Punct::Bar).is_some() {
            types.push(self.parse_intersection_type_or_higher()?);
        }
        let end = types.last().map_or(start, TypeNode::loc);
        Some(TypeNode::Union(UnionType {
            loc: Location::between(start, end),
            types,
        }))
    }

    fn parse_intersection_type_or_higher(&mut self) -> Option<TypeNode> {
        let leading = self.eat_punct(Punct::Ampersand);
        let first = self.parse_type_operator_or_higher()?;
        if leading.is_none() && !self.look_ahead_punct(Punct::Ampersand) {
            return Some(first);
        }
        let start = leading.as_ref().map_or(first.loc(), |t| t.loc);
        let mut types = vec![first];
        while self.eat_punct(Punct::Ampersand).is_some() {
            types.push(self.parse_type_operator_or_higher()?);
        }
        let end = types.last().map_or(start, TypeNode::loc);
        Some(TypeNode::Intersection(IntersectionType {
            loc: Location::between(start, end),
            types,
        }))
    }

    fn parse_type_operator_or_higher(&mut self) -> Option<TypeNode> {
        match self.current().and_then(|t| t.keyword()) {
            Some(Keyword::KeyOf) => self.parse_type_operator(TypeOperatorKind::KeyOf),
            Some(Keyword::Unique) => self.parse_type_operator(TypeOperatorKind::Unique),
            Some(Keyword::Readonly) => self.parse_type_operator(TypeOperatorKind::Readonly),
            Some(Keyword::Infer) => self.parse_infer_type(),
            _ => self.parse_postfix_type_or_higher(),
        }
    }

    fn parse_type_operator(&mut self, operator: TypeOperatorKind) -> Option<TypeNode> {
        let operator_token = self.bump()?;
        let operand = self.parse_type_operator_or_higher()?;
        Some(TypeNode::TypeOperator(TypeOperator {
            loc: Location::between(operator_token.loc, operand.loc()),
            operator,
            type_node: Box::new(operand),
        }))
    }

    fn parse_infer_type(&mut self) -> Option<TypeNode> {
        let infer_token = self.bump()?;
        let name_token = self.eat(TokenKind::Identifier)?;
        let name = build::identifier(&name_token);
        // `infer U extends V` — but when a conditional's `?` could own the
        // `extends`, the constraint reading loses.
        let constraint = self.try_parse(|p| {
            p.eat_keyword(Keyword::Extends)?;
            let constraint = p.with_conditional_types(false, |p| p.parse_type())?;
            if p.conditional_types_disallowed() || !p.look_ahead_punct(Punct::Question) {
                Some(constraint)
            } else {
                None
            }
        });
        let parameter_loc = Location::between(
            name.loc,
            constraint.as_ref().map_or(name.loc, TypeNode::loc),
        );
        Some(TypeNode::Infer(InferType {
            loc: Location::between(infer_token.loc, parameter_loc),
            type_parameter: Box::new(TypeParameter {
                loc: parameter_loc,
                modifiers: TypeParameterModifiers::empty(),
                name,
                constraint,
                default: None,
            }),
        }))
    }

    fn parse_postfix_type_or_higher(&mut self) -> Option<TypeNode> {
        let mut type_node = self.parse_non_array_type()?;
        // Postfix forms must start on the same line as the operand.
        while self.current_on_same_line(type_node.loc().end.line)
            && self.look_ahead_punct(Punct::OpenBracket)
        {
            self.bump();
            if let Some(close) = self.eat_punct(Punct::CloseBracket) {
                // T[]
                let loc = Location::between(type_node.loc(), close.loc);
                type_node = TypeNode::Array(ArrayType {
                    loc,
                    element_type: Box::new(type_node),
                });
            } else {
                // T[K]
                let index_type = self.parse_type()?;
                let close = self.eat_punct(Punct::CloseBracket)?;
                let loc = Location::between(type_node.loc(), close.loc);
                type_node = TypeNode::IndexedAccess(IndexedAccessType {
                    loc,
                    object_type: Box::new(type_node),
                    index_type: Box::new(index_type),
                });
            }
        }
        Some(type_node)
    }

    // ========================================================================
    // Non-array types
    // ========================================================================

    fn parse_non_array_type(&mut self) -> Option<TypeNode> {
        let current = self.current()?;
        let kind = current.kind;
        let value = current.value.clone();

        match kind {
            TokenKind::String => {
                let token = self.bump()?;
                Some(TypeNode::Literal(LiteralType {
                    loc: token.loc,
                    value: LiteralTypeValue::String(build::string_literal(&token)),
                }))
            }
            TokenKind::Numeric => {
                let token = self.bump()?;
                Some(TypeNode::Literal(LiteralType {
                    loc: token.loc,
                    value: LiteralTypeValue::Numeric(build::numeric_literal(&token)),
                }))
            }
            TokenKind::Template => self.parse_template_literal_type(),
            TokenKind::Punctuator => match value.as_str() {
                "-" => {
                    let minus = self.bump()?;
                    let token = self.eat(TokenKind::Numeric)?;
                    Some(TypeNode::Literal(LiteralType {
                        loc: Location::between(minus.loc, token.loc),
                        value: LiteralTypeValue::NegativeNumeric(build::numeric_literal(&token)),
                    }))
                }
                "[" => self.parse_tuple_type(),
                "(" => self.parse_parenthesized_type(),
                "{" => self.parse_type_literal_or_mapped_type(),
                _ => None,
            },
            TokenKind::Identifier => {
                if let Some(keyword) = TypeKeyword::from_str(&value) {
                    let token = self.bump()?;
                    return Some(TypeNode::Keyword(KeywordType {
                        loc: token.loc,
                        keyword,
                    }));
                }
                match Keyword::from_str(&value) {
                    Some(Keyword::True) => self.parse_boolean_literal_type(true),
                    Some(Keyword::False) => self.parse_boolean_literal_type(false),
                    Some(Keyword::This) => {
                        let token = self.bump()?;
                        Some(TypeNode::This(ThisType { loc: token.loc }))
                    }
                    Some(Keyword::TypeOf) => self.parse_type_query(),
                    Some(Keyword::Import) => self.parse_import_type_node(),
                    _ => self.parse_type_reference(),
                }
            }
        }
    }

    fn parse_boolean_literal_type(&mut self, value: bool) -> Option<TypeNode> {
        let token = self.bump()?;
        Some(TypeNode::Literal(LiteralType {
            loc: token.loc,
            value: LiteralTypeValue::Boolean(value),
        }))
    }

    fn parse_type_reference(&mut self) -> Option<TypeNode> {
        let type_name = self.parse_entity_name()?;
        let mut loc = type_name.loc();
        let mut type_arguments = None;
        if self.look_ahead_punct(Punct::LessThan) && self.current_on_same_line(loc.end.line) {
            if let Some((arguments, arguments_loc)) = self.try_parse_type_arguments() {
                loc = Location::between(loc, arguments_loc);
                type_arguments = Some(arguments);
            }
        }
        Some(TypeNode::TypeReference(TypeReference {
            loc,
            type_name,
            type_arguments,
        }))
    }

    fn parse_entity_name(&mut self) -> Option<EntityName> {
        let first = self.eat(TokenKind::Identifier)?;
        let mut name = EntityName::Identifier(build::identifier(&first));
        while self.eat_punct(Punct::Dot).is_some() {
            let right_token = self.eat(TokenKind::Identifier)?;
            let right = build::identifier(&right_token);
            let loc = Location::between(name.loc(), right.loc);
            name = EntityName::Qualified(Box::new(QualifiedName { loc, left: name, right }));
        }
        Some(name)
    }

    /// `<T, U>` behind a transaction: a `<` that does not close falls back to
    /// the bare reference.
    fn try_parse_type_arguments(&mut self) -> Option<(Vec<TypeNode>, Location)> {
        self.try_parse(|p| {
            let less_than = p.eat_punct(Punct::LessThan)?;
            let list = p.parse_delimited_list(Punct::GreaterThan, |p| p.parse_type())?;
            if list.elements.is_empty() {
                return None;
            }
            Some((
                list.elements,
                Location::between(less_than.loc, list.close.loc),
            ))
        })
    }

    fn parse_type_query(&mut self) -> Option<TypeNode> {
        let typeof_token = self.bump()?;
        let expr_name = self.parse_entity_name()?;
        let mut loc = Location::between(typeof_token.loc, expr_name.loc());
        let mut type_arguments = None;
        if self.look_ahead_punct(Punct::LessThan) && self.current_on_same_line(loc.end.line) {
            if let Some((arguments, arguments_loc)) = self.try_parse_type_arguments() {
                loc = Location::between(loc, arguments_loc);
                type_arguments = Some(arguments);
            }
        }
        Some(TypeNode::TypeQuery(TypeQuery {
            loc,
            expr_name,
            type_arguments,
        }))
    }

    fn parse_import_type_node(&mut self) -> Option<TypeNode> {
        let import_token = self.bump()?;
        self.eat_punct(Punct::OpenParen)?;
        let source_token = self.eat(TokenKind::String)?;
        let argument = build::string_literal(&source_token);
        let close = self.eat_punct(Punct::CloseParen)?;
        let mut loc = Location::between(import_token.loc, close.loc);

        let qualifier = if self.eat_punct(Punct::Dot).is_some() {
            let name = self.parse_entity_name()?;
            loc = Location::between(loc, name.loc());
            Some(name)
        } else {
            None
        };
        let mut type_arguments = None;
        if self.look_ahead_punct(Punct::LessThan) && self.current_on_same_line(loc.end.line) {
            if let Some((arguments, arguments_loc)) = self.try_parse_type_arguments() {
                loc = Location::between(loc, arguments_loc);
                type_arguments = Some(arguments);
            }
        }
        Some(TypeNode::ImportType(ImportType {
            loc,
            argument,
            qualifier,
            type_arguments,
        }))
    }

    fn parse_parenthesized_type(&mut self) -> Option<TypeNode> {
        let open = self.eat_punct(Punct::OpenParen)?;
        let type_node = self.parse_type()?;
        let close = self.eat_punct(Punct::CloseParen)?;
        Some(TypeNode::Parenthesized(ParenthesizedType {
            loc: Location::between(open.loc, close.loc),
            type_node: Box::new(type_node),
        }))
    }

    // ========================================================================
    // Tuples
    // ========================================================================

    fn parse_tuple_type(&mut self) -> Option<TypeNode> {
        let open = self.eat_punct(Punct::OpenBracket)?;
        let list = self.parse_delimited_list(Punct::CloseBracket, |p| p.parse_tuple_element())?;
        Some(TypeNode::Tuple(TupleType {
            loc: Location::between(open.loc, list.close.loc),
            elements: list.elements,
        }))
    }

    fn parse_tuple_element(&mut self) -> Option<TypeNode> {
        if self.is_tuple_element_name() {
            return self.parse_named_tuple_member();
        }
        if let Some(dots) = self.eat_punct(Punct::DotDotDot) {
            let type_node = self.parse_type()?;
            return Some(TypeNode::Rest(RestType {
                loc: Location::between(dots.loc, type_node.loc()),
                type_node: Box::new(type_node),
            }));
        }
        let type_node = self.parse_type()?;
        if let Some(question) = self.eat_punct(Punct::Question) {
            return Some(TypeNode::Optional(OptionalType {
                loc: Location::between(type_node.loc(), question.loc),
                type_node: Box::new(type_node),
            }));
        }
        Some(type_node)
    }

    fn is_tuple_element_name(&mut self) -> bool {
        self.look_ahead(|p| {
            let _ = p.eat_punct(Punct::DotDotDot);
            p.eat(TokenKind::Identifier).is_some()
                && (p.look_ahead_punct(Punct::Colon)
                    || (p.eat_punct(Punct::Question).is_some()
                        && p.look_ahead_punct(Punct::Colon)))
        })
    }

    fn parse_named_tuple_member(&mut self) -> Option<TypeNode> {
        let dots = self.eat_punct(Punct::DotDotDot);
        let name_token = self.eat(TokenKind::Identifier)?;
        let name = build::identifier(&name_token);
        let question = self.eat_punct(Punct::Question).is_some();
        self.eat_punct(Punct::Colon)?;
        let type_node = self.parse_type()?;
        let start = dots.as_ref().map_or(name.loc, |t| t.loc);
        Some(TypeNode::NamedTupleMember(NamedTupleMember {
            loc: Location::between(start, type_node.loc()),
            dot_dot_dot: dots.is_some(),
            name,
            question,
            type_node: Box::new(type_node),
        }))
    }

    // ========================================================================
    // Template literal types
    // ========================================================================

    fn parse_template_literal_type(&mut self) -> Option<TypeNode> {
        let head_token = self.eat(TokenKind::Template)?;
        let head = TemplateElement {
            loc: head_token.loc,
            raw: head_token.value.clone(),
        };
        let mut spans = Vec::new();
        let mut last = head_token;
        // A fragment ending in `${` opens a substitution; one ending in a
        // backtick closes the template.
        while last.value.ends_with("${") {
            let type_node = self.parse_type()?;
            let literal_token = self.eat(TokenKind::Template)?;
            let literal = TemplateElement {
                loc: literal_token.loc,
                raw: literal_token.value.clone(),
            };
            spans.push(TemplateTypeSpan {
                loc: Location::between(type_node.loc(), literal.loc),
                type_node,
                literal,
            });
            last = literal_token;
        }
        Some(TypeNode::TemplateLiteral(TemplateLiteralType {
            loc: Location::between(head.loc, last.loc),
            head,
            spans,
        }))
    }

    // ========================================================================
    // Type literals and mapped types
    // ========================================================================

    fn parse_type_literal_or_mapped_type(&mut self) -> Option<TypeNode> {
        if self.is_start_of_mapped_type() {
            return self.parse_mapped_type();
        }
        let open = self.eat_punct(Punct::OpenBrace)?;
        let mut members = Vec::new();
        loop {
            if let Some(close) = self.eat_punct(Punct::CloseBrace) {
                return Some(TypeNode::TypeLiteral(TypeLiteral {
                    loc: Location::between(open.loc, close.loc),
                    members,
                }));
            }
            let member = self.try_parse(|p| p.parse_type_member())?;
            members.push(member);
            if self.eat_punct(Punct::Comma).is_none()
                && self.eat_punct(Punct::Semicolon).is_none()
                && !self.look_ahead_punct(Punct::CloseBrace)
            {
                return None;
            }
        }
    }

    fn is_start_of_mapped_type(&mut self) -> bool {
        self.look_ahead(|p| {
            if p.eat_punct(Punct::OpenBrace).is_none() {
                return false;
            }
            if p.eat_punct(Punct::Plus).is_some() || p.eat_punct(Punct::Minus).is_some() {
                return p.look_ahead_keyword(Keyword::Readonly);
            }
            let _ = p.eat_keyword(Keyword::Readonly);
            p.eat_punct(Punct::OpenBracket).is_some()
                && p.eat(TokenKind::Identifier).is_some()
                && p.look_ahead_keyword(Keyword::In)
        })
    }

    fn parse_mapped_type(&mut self) -> Option<TypeNode> {
        let open = self.eat_punct(Punct::OpenBrace)?;

        let readonly_modifier = if self.eat_punct(Punct::Plus).is_some() {
            self.eat_keyword(Keyword::Readonly)?;
            Some(MappedTypeModifier::Plus)
        } else if self.eat_punct(Punct::Minus).is_some() {
            self.eat_keyword(Keyword::Readonly)?;
            Some(MappedTypeModifier::Minus)
        } else if self.eat_keyword(Keyword::Readonly).is_some() {
            Some(MappedTypeModifier::Bare)
        } else {
            None
        };

        self.eat_punct(Punct::OpenBracket)?;
        let name_token = self.eat(TokenKind::Identifier)?;
        let name = build::identifier(&name_token);
        self.eat_keyword(Keyword::In)?;
        let constraint = self.parse_type()?;
        let type_parameter = TypeParameter {
            loc: Location::between(name.loc, constraint.loc()),
            modifiers: TypeParameterModifiers::empty(),
            name,
            constraint: Some(constraint),
            default: None,
        };
        let name_type = if self.eat_keyword(Keyword::As).is_some() {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        self.eat_punct(Punct::CloseBracket)?;

        let question_modifier = if self.eat_punct(Punct::Plus).is_some() {
            self.eat_punct(Punct::Question)?;
            Some(MappedTypeModifier::Plus)
        } else if self.eat_punct(Punct::Minus).is_some() {
            self.eat_punct(Punct::Question)?;
            Some(MappedTypeModifier::Minus)
        } else if self.eat_punct(Punct::Question).is_some() {
            Some(MappedTypeModifier::Bare)
        } else {
            None
        };

        let type_node = if self.eat_punct(Punct::Colon).is_some() {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        let _ = self.eat_punct(Punct::Semicolon);
        let close = self.eat_punct(Punct::CloseBrace)?;
        Some(TypeNode::Mapped(MappedType {
            loc: Location::between(open.loc, close.loc),
            readonly_modifier,
            type_parameter: Box::new(type_parameter),
            name_type,
            question_modifier,
            type_node,
        }))
    }

    // ========================================================================
    // Type literal members
    // ========================================================================

    fn parse_type_member(&mut self) -> Option<TypeElement> {
        if self.look_ahead_punct(Punct::OpenParen) || self.look_ahead_punct(Punct::LessThan) {
            let signature = self.parse_member_signature()?;
            return Some(TypeElement::Call(CallSignature {
                loc: Location::between(signature.start, signature.end),
                type_parameters: signature.type_parameters,
                parameters: signature.parameters,
                return_type: signature.return_type.map(Box::new),
            }));
        }
        if self.look_ahead_keyword(Keyword::New)
            && self.look_ahead(|p| {
                p.bump();
                p.look_ahead_punct(Punct::OpenParen) || p.look_ahead_punct(Punct::LessThan)
            })
        {
            let new_token = self.bump()?;
            let signature = self.parse_member_signature()?;
            return Some(TypeElement::Construct(ConstructSignature {
                loc: Location::between(new_token.loc, signature.end),
                type_parameters: signature.type_parameters,
                parameters: signature.parameters,
                return_type: signature.return_type.map(Box::new),
            }));
        }
        if self.is_index_signature() {
            return self.parse_index_signature();
        }
        self.parse_property_or_method_signature()
    }

    fn parse_member_signature(&mut self) -> Option<MemberSignature> {
        let type_parameters = self.parse_type_parameters();
        let open = self.eat_punct(Punct::OpenParen)?;
        let params = self.parse_delimited_list(Punct::CloseParen, |p| p.parse_parameter())?;
        let (return_type, end) = if self.eat_punct(Punct::Colon).is_some() {
            let type_node = self.parse_type_or_type_predicate()?;
            let loc = type_node.loc();
            (Some(type_node), loc)
        } else {
            (None, params.close.loc)
        };
        Some(MemberSignature {
            start: type_parameters.as_ref().map_or(open.loc, |tp| tp.loc),
            type_parameters,
            parameters: params.elements,
            return_type,
            end,
        })
    }

    fn is_index_signature(&mut self) -> bool {
        self.look_ahead_punct(Punct::OpenBracket)
            && self.look_ahead(|p| {
                p.bump();
                p.eat(TokenKind::Identifier).is_some() && p.look_ahead_punct(Punct::Colon)
            })
    }

    fn parse_index_signature(&mut self) -> Option<TypeElement> {
        let open = self.eat_punct(Punct::OpenBracket)?;
        let name_token = self.eat(TokenKind::Identifier)?;
        let name = build::identifier(&name_token);
        self.eat_punct(Punct::Colon)?;
        let key_type = self.parse_type()?;
        let parameter = Parameter {
            loc: Location::between(name.loc, key_type.loc()),
            dot_dot_dot: false,
            name: tydoc_ast::node::BindingName::Identifier(name),
            question: false,
            type_annotation: Some(key_type),
        };
        self.eat_punct(Punct::CloseBracket)?;
        self.eat_punct(Punct::Colon)?;
        let value_type = self.parse_type()?;
        Some(TypeElement::Index(IndexSignature {
            loc: Location::between(open.loc, value_type.loc()),
            parameter: Box::new(parameter),
            type_annotation: Box::new(value_type),
        }))
    }

    fn parse_property_or_method_signature(&mut self) -> Option<TypeElement> {
        let readonly_token = self.try_parse(|p| {
            let token = p.eat_keyword(Keyword::Readonly)?;
            if p.is_literal_property_name() || p.look_ahead_punct(Punct::OpenBracket) {
                Some(token)
            } else {
                None
            }
        });
        let key = self.parse_property_name()?;
        let question = self.eat_punct(Punct::Question);

        if self.look_ahead_punct(Punct::OpenParen) || self.look_ahead_punct(Punct::LessThan) {
            if readonly_token.is_some() {
                return None;
            }
            let signature = self.parse_member_signature()?;
            return Some(TypeElement::Method(MethodSignature {
                loc: Location::between(key.loc(), signature.end),
                key,
                optional: question.is_some(),
                type_parameters: signature.type_parameters,
                parameters: signature.parameters,
                return_type: signature.return_type.map(Box::new),
            }));
        }

        let type_annotation = if self.eat_punct(Punct::Colon).is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        let start = readonly_token.as_ref().map_or(key.loc(), |t| t.loc);
        let end = type_annotation
            .as_ref()
            .map(TypeNode::loc)
            .or(question.as_ref().map(|t| t.loc))
            .unwrap_or(key.loc());
        Some(TypeElement::Property(PropertySignature {
            loc: Location::between(start, end),
            readonly: readonly_token.is_some(),
            key,
            optional: question.is_some(),
            type_annotation: type_annotation.map(Box::new),
        }))
    }

    // ========================================================================
    // Start-of-type lookaheads
    // ========================================================================

    pub(crate) fn is_start_of_type(&mut self, in_start_of_parameter: bool) -> bool {
        let Some(current) = self.current() else {
            return false;
        };
        let kind = current.kind;
        let value = current.value.clone();
        match kind {
            TokenKind::String | TokenKind::Numeric | TokenKind::Template => true,
            TokenKind::Punctuator => match value.as_str() {
                "{" | "[" | "<" | "|" | "&" | "*" | "?" | "!" | "..." => true,
                "-" => {
                    !in_start_of_parameter
                        && self.look_ahead(|p| {
                            p.bump();
                            p.eat(TokenKind::Numeric).is_some()
                        })
                }
                "(" => {
                    !in_start_of_parameter
                        && self.look_ahead(|p| {
                            p.bump();
                            p.is_start_of_parenthesized_or_function_type()
                        })
                }
                _ => false,
            },
            TokenKind::Identifier => {
                if let Some(keyword) = Keyword::from_str(&value) {
                    if TYPE_START_KEYWORDS.contains(&keyword) {
                        return true;
                    }
                    if keyword == Keyword::Function {
                        return !in_start_of_parameter;
                    }
                }
                true
            }
        }
    }

    /// Called with the `(` already consumed.
    fn is_start_of_parenthesized_or_function_type(&mut self) -> bool {
        self.look_ahead_punct(Punct::CloseParen)
            || self.look_ahead(|p| p.is_start_of_parameter(false) || p.is_start_of_type(false))
    }
}
