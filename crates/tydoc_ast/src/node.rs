//! AST node definitions for the comment type and import grammars.
//!
//! Nodes fall into three families: type nodes (a slice of TypeScript's type
//! grammar), import nodes (`import` tag clauses), and pattern nodes
//! (destructuring in parameter positions). Every node owns its children by
//! value; a tree lives for one parse-format cycle and is then discarded.

use crate::token::Token;
use bitflags::bitflags;
use tydoc_core::Location;

// ============================================================================
// Shared leaves
// ============================================================================

/// An identifier with its escape sequences decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub loc: Location,
    pub name: String,
}

/// A string literal: decoded value plus the raw text including quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub loc: Location,
    pub value: String,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Number,
    BigInt,
}

/// A numeric literal. The raw text is kept verbatim; classification only
/// distinguishes bigints (`n` suffix) from plain numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericLiteral {
    pub loc: Location,
    pub raw: String,
    pub kind: NumericKind,
}

/// One raw chunk of a template literal (head, middle, or tail fragment).
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    pub loc: Location,
    pub raw: String,
}

/// A property name in object patterns and type-literal members.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(Identifier),
    String(StringLiteral),
    Numeric(NumericLiteral),
}

impl PropertyKey {
    pub fn loc(&self) -> Location {
        match self {
            PropertyKey::Identifier(n) => n.loc,
            PropertyKey::String(n) => n.loc,
            PropertyKey::Numeric(n) => n.loc,
        }
    }
}

// ============================================================================
// Type nodes
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Keyword(KeywordType),
    Literal(LiteralType),
    Union(UnionType),
    Intersection(IntersectionType),
    TemplateLiteral(TemplateLiteralType),
    TypeReference(TypeReference),
    TypeQuery(TypeQuery),
    TypeOperator(TypeOperator),
    Infer(InferType),
    Array(ArrayType),
    Tuple(TupleType),
    NamedTupleMember(NamedTupleMember),
    Optional(OptionalType),
    Rest(RestType),
    Parenthesized(ParenthesizedType),
    Function(FunctionType),
    Constructor(ConstructorType),
    Conditional(ConditionalType),
    IndexedAccess(IndexedAccessType),
    Mapped(MappedType),
    TypeLiteral(TypeLiteral),
    ImportType(ImportType),
    This(ThisType),
    Predicate(TypePredicate),
}

impl TypeNode {
    pub fn loc(&self) -> Location {
        match self {
            TypeNode::Keyword(n) => n.loc,
            TypeNode::Literal(n) => n.loc,
            TypeNode::Union(n) => n.loc,
            TypeNode::Intersection(n) => n.loc,
            TypeNode::TemplateLiteral(n) => n.loc,
            TypeNode::TypeReference(n) => n.loc,
            TypeNode::TypeQuery(n) => n.loc,
            TypeNode::TypeOperator(n) => n.loc,
            TypeNode::Infer(n) => n.loc,
            TypeNode::Array(n) => n.loc,
            TypeNode::Tuple(n) => n.loc,
            TypeNode::NamedTupleMember(n) => n.loc,
            TypeNode::Optional(n) => n.loc,
            TypeNode::Rest(n) => n.loc,
            TypeNode::Parenthesized(n) => n.loc,
            TypeNode::Function(n) => n.loc,
            TypeNode::Constructor(n) => n.loc,
            TypeNode::Conditional(n) => n.loc,
            TypeNode::IndexedAccess(n) => n.loc,
            TypeNode::Mapped(n) => n.loc,
            TypeNode::TypeLiteral(n) => n.loc,
            TypeNode::ImportType(n) => n.loc,
            TypeNode::This(n) => n.loc,
            TypeNode::Predicate(n) => n.loc,
        }
    }
}

/// The keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKeyword {
    Any,
    Unknown,
    String,
    Number,
    BigInt,
    Boolean,
    Symbol,
    Object,
    Void,
    Undefined,
    Null,
    Never,
}

impl TypeKeyword {
    pub fn from_str(text: &str) -> Option<TypeKeyword> {
        Some(match text {
            "any" => TypeKeyword::Any,
            "unknown" => TypeKeyword::Unknown,
            "string" => TypeKeyword::String,
            "number" => TypeKeyword::Number,
            "bigint" => TypeKeyword::BigInt,
            "boolean" => TypeKeyword::Boolean,
            "symbol" => TypeKeyword::Symbol,
            "object" => TypeKeyword::Object,
            "void" => TypeKeyword::Void,
            "undefined" => TypeKeyword::Undefined,
            "null" => TypeKeyword::Null,
            "never" => TypeKeyword::Never,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordType {
    pub loc: Location,
    pub keyword: TypeKeyword,
}

/// The value of a literal type.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralTypeValue {
    String(StringLiteral),
    Numeric(NumericLiteral),
    /// A numeric literal preceded by a unary minus.
    NegativeNumeric(NumericLiteral),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralType {
    pub loc: Location,
    pub value: LiteralTypeValue,
}

/// `` `a${T}b` `` — a template literal type. `spans` is empty for a
/// substitution-free template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteralType {
    pub loc: Location,
    pub head: TemplateElement,
    pub spans: Vec<TemplateTypeSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateTypeSpan {
    pub loc: Location,
    pub type_node: TypeNode,
    pub literal: TemplateElement,
}

/// A possibly-qualified name: `A` or `A.B.C`.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityName {
    Identifier(Identifier),
    Qualified(Box<QualifiedName>),
}

impl EntityName {
    pub fn loc(&self) -> Location {
        match self {
            EntityName::Identifier(n) => n.loc,
            EntityName::Qualified(n) => n.loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedName {
    pub loc: Location,
    pub left: EntityName,
    pub right: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    pub loc: Location,
    pub type_name: EntityName,
    pub type_arguments: Option<Vec<TypeNode>>,
}

/// `typeof x.y`, optionally instantiated: `typeof f<string>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeQuery {
    pub loc: Location,
    pub expr_name: EntityName,
    pub type_arguments: Option<Vec<TypeNode>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOperatorKind {
    KeyOf,
    Unique,
    Readonly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeOperator {
    pub loc: Location,
    pub operator: TypeOperatorKind,
    pub type_node: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InferType {
    pub loc: Location,
    pub type_parameter: Box<TypeParameter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub loc: Location,
    pub element_type: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleType {
    pub loc: Location,
    pub elements: Vec<TypeNode>,
}

/// `name: T`, `name?: T`, or `...name: T` inside a tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTupleMember {
    pub loc: Location,
    pub dot_dot_dot: bool,
    pub name: Identifier,
    pub question: bool,
    pub type_node: Box<TypeNode>,
}

/// A tuple element with a postfix `?`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalType {
    pub loc: Location,
    pub type_node: Box<TypeNode>,
}

/// A tuple element with a leading `...`.
#[derive(Debug, Clone, PartialEq)]
pub struct RestType {
    pub loc: Location,
    pub type_node: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedType {
    pub loc: Location,
    pub type_node: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub loc: Location,
    pub type_parameters: Option<TypeParameterDeclaration>,
    pub parameters: Vec<Parameter>,
    pub return_type: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorType {
    pub loc: Location,
    pub is_abstract: bool,
    pub type_parameters: Option<TypeParameterDeclaration>,
    pub parameters: Vec<Parameter>,
    pub return_type: Box<TypeNode>,
}

/// `T extends U ? X : Y`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalType {
    pub loc: Location,
    pub check_type: Box<TypeNode>,
    pub extends_type: Box<TypeNode>,
    pub true_type: Box<TypeNode>,
    pub false_type: Box<TypeNode>,
}

/// `T[K]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedAccessType {
    pub loc: Location,
    pub object_type: Box<TypeNode>,
    pub index_type: Box<TypeNode>,
}

/// `A | B | C`. Intersection binds tighter, so constituents here may be
/// intersections but never unions.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub loc: Location,
    pub types: Vec<TypeNode>,
}

/// `A & B & C`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionType {
    pub loc: Location,
    pub types: Vec<TypeNode>,
}

/// `+`/`-`/bare on a mapped type's `readonly` or `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedTypeModifier {
    Bare,
    Plus,
    Minus,
}

/// `{ [K in T as U]?: V }`
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    pub loc: Location,
    pub readonly_modifier: Option<MappedTypeModifier>,
    pub type_parameter: Box<TypeParameter>,
    pub name_type: Option<Box<TypeNode>>,
    pub question_modifier: Option<MappedTypeModifier>,
    pub type_node: Option<Box<TypeNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeLiteral {
    pub loc: Location,
    pub members: Vec<TypeElement>,
}

/// A member of a type literal.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeElement {
    Property(PropertySignature),
    Method(MethodSignature),
    Call(CallSignature),
    Construct(ConstructSignature),
    Index(IndexSignature),
}

impl TypeElement {
    pub fn loc(&self) -> Location {
        match self {
            TypeElement::Property(n) => n.loc,
            TypeElement::Method(n) => n.loc,
            TypeElement::Call(n) => n.loc,
            TypeElement::Construct(n) => n.loc,
            TypeElement::Index(n) => n.loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    pub loc: Location,
    pub readonly: bool,
    pub key: PropertyKey,
    pub optional: bool,
    pub type_annotation: Option<Box<TypeNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub loc: Location,
    pub key: PropertyKey,
    pub optional: bool,
    pub type_parameters: Option<TypeParameterDeclaration>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Box<TypeNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallSignature {
    pub loc: Location,
    pub type_parameters: Option<TypeParameterDeclaration>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Box<TypeNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructSignature {
    pub loc: Location,
    pub type_parameters: Option<TypeParameterDeclaration>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Box<TypeNode>>,
}

/// `[key: K]: V`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSignature {
    pub loc: Location,
    pub parameter: Box<Parameter>,
    pub type_annotation: Box<TypeNode>,
}

/// `import("mod").A<T>`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportType {
    pub loc: Location,
    pub argument: StringLiteral,
    pub qualifier: Option<EntityName>,
    pub type_arguments: Option<Vec<TypeNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThisType {
    pub loc: Location,
}

/// `x is T`. The parameter name of a predicate may be `this`.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateName {
    Identifier(Identifier),
    This(ThisType),
}

impl PredicateName {
    pub fn loc(&self) -> Location {
        match self {
            PredicateName::Identifier(n) => n.loc,
            PredicateName::This(n) => n.loc,
        }
    }
}

/// The grammar never produces `asserts == true`; the flag is carried so the
/// node shape matches the host language's predicate node.
#[derive(Debug, Clone, PartialEq)]
pub struct TypePredicate {
    pub loc: Location,
    pub asserts: bool,
    pub parameter_name: PredicateName,
    pub type_annotation: Box<TypeNode>,
}

bitflags! {
    /// Modifiers on a type parameter declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypeParameterModifiers: u8 {
        const CONST = 1 << 0;
        const IN = 1 << 1;
        const OUT = 1 << 2;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub loc: Location,
    pub modifiers: TypeParameterModifiers,
    pub name: Identifier,
    pub constraint: Option<TypeNode>,
    pub default: Option<TypeNode>,
}

/// `<T, U extends V = W>`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterDeclaration {
    pub loc: Location,
    pub params: Vec<TypeParameter>,
}

/// A parameter of a function/constructor type or signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub loc: Location,
    pub dot_dot_dot: bool,
    pub name: BindingName,
    pub question: bool,
    pub type_annotation: Option<TypeNode>,
}

// ============================================================================
// Root wrappers
// ============================================================================

/// `{module:a/b}` — an opaque namepath escape; the tokens are consumed
/// verbatim and never given structure.
#[derive(Debug, Clone, PartialEq)]
pub struct NamepathType {
    pub loc: Location,
}

/// `{...T}` — a variadic wrapper around a type or predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct VariadicType {
    pub loc: Location,
    pub type_annotation: Box<TypeRoot>,
}

/// `{T=}` — an optional-with-default wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalDefaultType {
    pub loc: Location,
    pub type_node: Box<TypeNode>,
}

/// The top-level shape of a parsed type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRoot {
    Namepath(NamepathType),
    Variadic(VariadicType),
    Optional(OptionalDefaultType),
    Predicate(TypePredicate),
    Type(TypeNode),
}

impl TypeRoot {
    pub fn loc(&self) -> Location {
        match self {
            TypeRoot::Namepath(n) => n.loc,
            TypeRoot::Variadic(n) => n.loc,
            TypeRoot::Optional(n) => n.loc,
            TypeRoot::Predicate(n) => n.loc,
            TypeRoot::Type(n) => n.loc(),
        }
    }
}

/// A fully parsed type expression plus the ordered tokens it consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpression {
    pub loc: Location,
    pub root: TypeRoot,
    pub tokens: Vec<Token>,
}

// ============================================================================
// Import nodes
// ============================================================================

/// Whether a named specifier is type-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Type,
    Value,
}

/// The imported name of a specifier: `{ x }` or `{ "a-b" as x }`.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleExportName {
    Identifier(Identifier),
    String(StringLiteral),
}

impl ModuleExportName {
    pub fn loc(&self) -> Location {
        match self {
            ModuleExportName::Identifier(n) => n.loc,
            ModuleExportName::String(n) => n.loc,
        }
    }
}

/// `X` in `import X from "mod"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDefaultSpecifier {
    pub loc: Location,
    pub local: Identifier,
}

/// `* as X`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportNamespaceSpecifier {
    pub loc: Location,
    pub local: Identifier,
}

/// One entry of `{ ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifier {
    pub loc: Location,
    pub import_kind: ImportKind,
    pub imported: ModuleExportName,
    pub local: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifierNode {
    Default(ImportDefaultSpecifier),
    Namespace(ImportNamespaceSpecifier),
    Named(ImportSpecifier),
}

impl ImportSpecifierNode {
    pub fn loc(&self) -> Location {
        match self {
            ImportSpecifierNode::Default(n) => n.loc,
            ImportSpecifierNode::Namespace(n) => n.loc,
            ImportSpecifierNode::Named(n) => n.loc,
        }
    }
}

/// `key: "value"` inside `with { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportAttribute {
    pub loc: Location,
    pub key: ModuleExportName,
    pub value: StringLiteral,
}

/// A whole parsed import clause plus the ordered tokens within its span.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportTagType {
    pub loc: Location,
    pub specifiers: Vec<ImportSpecifierNode>,
    pub source: StringLiteral,
    pub attributes: Vec<ImportAttribute>,
    pub tokens: Vec<Token>,
}

// ============================================================================
// Pattern nodes
// ============================================================================

/// A binding target: an identifier or a destructuring pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingName {
    Identifier(Identifier),
    Array(ArrayPattern),
    Object(ObjectPattern),
}

impl BindingName {
    pub fn loc(&self) -> Location {
        match self {
            BindingName::Identifier(n) => n.loc,
            BindingName::Array(n) => n.loc,
            BindingName::Object(n) => n.loc,
        }
    }
}

/// `[a, , b]` — `None` elements are elisions.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    pub loc: Location,
    pub elements: Vec<Option<ArrayPatternElement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayPatternElement {
    Binding(BindingName),
    Assignment(AssignmentPattern),
    Rest(RestElement),
}

impl ArrayPatternElement {
    pub fn loc(&self) -> Location {
        match self {
            ArrayPatternElement::Binding(n) => n.loc(),
            ArrayPatternElement::Assignment(n) => n.loc,
            ArrayPatternElement::Rest(n) => n.loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub loc: Location,
    pub properties: Vec<ObjectPatternProperty>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProperty {
    Property(PatternProperty),
    Rest(RestElement),
}

impl ObjectPatternProperty {
    pub fn loc(&self) -> Location {
        match self {
            ObjectPatternProperty::Property(n) => n.loc,
            ObjectPatternProperty::Rest(n) => n.loc,
        }
    }
}

/// `key: value` or shorthand `key` in an object pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternProperty {
    pub loc: Location,
    pub key: PropertyKey,
    pub shorthand: bool,
    pub value: BindingElement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindingElement {
    Name(BindingName),
    Assignment(Box<AssignmentPattern>),
}

impl BindingElement {
    pub fn loc(&self) -> Location {
        match self {
            BindingElement::Name(n) => n.loc(),
            BindingElement::Assignment(n) => n.loc,
        }
    }
}

/// `...rest` in a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct RestElement {
    pub loc: Location,
    pub argument: Box<BindingName>,
}

/// Expression-level initializers are not part of the grammar. The marker
/// records where one would sit; the parsers never construct it — a pattern
/// containing an initializer is a non-match, not a guessed sub-tree.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedExpression {
    pub loc: Location,
}

/// `left = <expr>` — only representable, never produced (see
/// [`UnsupportedExpression`]).
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    pub loc: Location,
    pub left: BindingName,
    pub right: UnsupportedExpression,
}
