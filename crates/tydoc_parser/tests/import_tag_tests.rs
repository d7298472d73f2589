//! End-to-end tests for the import clause grammar, including the full
//! `type`/`as` disambiguation table.

use tydoc_ast::node::*;
use tydoc_core::Position;
use tydoc_parser::parse_import_tag;
use tydoc_scanner::TextLines;

fn parse(text: &str) -> Option<ImportTagType> {
    let lines = TextLines::new(text);
    parse_import_tag(&lines)
}

fn single_named(tag: &ImportTagType) -> &ImportSpecifier {
    assert_eq!(tag.specifiers.len(), 1);
    match &tag.specifiers[0] {
        ImportSpecifierNode::Named(specifier) => specifier,
        other => panic!("expected a named specifier, got {other:?}"),
    }
}

fn imported_name(specifier: &ImportSpecifier) -> &str {
    match &specifier.imported {
        ModuleExportName::Identifier(identifier) => &identifier.name,
        ModuleExportName::String(literal) => &literal.value,
    }
}

#[test]
fn namespace_import() {
    let tag = parse("* as ns from 'mod'").unwrap();
    assert_eq!(tag.specifiers.len(), 1);
    let ImportSpecifierNode::Namespace(namespace) = &tag.specifiers[0] else {
        panic!("expected a namespace specifier");
    };
    assert_eq!(namespace.local.name, "ns");
    assert_eq!(tag.source.value, "mod");
    assert_eq!(tag.source.raw, "'mod'");
}

#[test]
fn default_import() {
    let tag = parse("Foo from \"mod\"").unwrap();
    assert!(matches!(
        &tag.specifiers[0],
        ImportSpecifierNode::Default(default) if default.local.name == "Foo"
    ));
}

#[test]
fn default_plus_named_imports() {
    let tag = parse("Foo, { Bar, type Baz as Qux } from 'mod'").unwrap();
    assert_eq!(tag.specifiers.len(), 3);
    assert!(matches!(&tag.specifiers[0], ImportSpecifierNode::Default(_)));
    let ImportSpecifierNode::Named(bar) = &tag.specifiers[1] else {
        panic!("expected a named specifier");
    };
    assert_eq!(bar.import_kind, ImportKind::Value);
    assert_eq!(bar.local.name, "Bar");
    let ImportSpecifierNode::Named(baz) = &tag.specifiers[2] else {
        panic!("expected a named specifier");
    };
    assert_eq!(baz.import_kind, ImportKind::Type);
    assert_eq!(imported_name(baz), "Baz");
    assert_eq!(baz.local.name, "Qux");
}

#[test]
fn string_imported_name_requires_rename() {
    let tag = parse("{ 'a-b' as x } from 'mod'").unwrap();
    let specifier = single_named(&tag);
    assert_eq!(imported_name(specifier), "a-b");
    assert_eq!(specifier.local.name, "x");

    assert!(parse("{ 'a-b' } from 'mod'").is_none());
}

// The five ambiguous `type`/`as` shapes, each resolving to a fixed
// (imported, local, kind) triple.

#[test]
fn bare_type_is_a_value_import_named_type() {
    let tag = parse("{ type } from 'mod'").unwrap();
    let specifier = single_named(&tag);
    assert_eq!(specifier.import_kind, ImportKind::Value);
    assert_eq!(imported_name(specifier), "type");
    assert_eq!(specifier.local.name, "type");
}

#[test]
fn type_as_x_renames_the_value_type() {
    let tag = parse("{ type as X } from 'mod'").unwrap();
    let specifier = single_named(&tag);
    assert_eq!(specifier.import_kind, ImportKind::Value);
    assert_eq!(imported_name(specifier), "type");
    assert_eq!(specifier.local.name, "X");
}

#[test]
fn type_as_is_a_type_only_import_of_as() {
    let tag = parse("{ type as } from 'mod'").unwrap();
    let specifier = single_named(&tag);
    assert_eq!(specifier.import_kind, ImportKind::Type);
    assert_eq!(imported_name(specifier), "as");
    assert_eq!(specifier.local.name, "as");
}

#[test]
fn type_as_as_renames_the_value_type_to_as() {
    let tag = parse("{ type as as } from 'mod'").unwrap();
    let specifier = single_named(&tag);
    assert_eq!(specifier.import_kind, ImportKind::Value);
    assert_eq!(imported_name(specifier), "type");
    assert_eq!(specifier.local.name, "as");
}

#[test]
fn type_as_as_x_is_a_type_only_rename_of_as() {
    let tag = parse("{ type as as X } from 'mod'").unwrap();
    let specifier = single_named(&tag);
    assert_eq!(specifier.import_kind, ImportKind::Type);
    assert_eq!(imported_name(specifier), "as");
    assert_eq!(specifier.local.name, "X");
}

#[test]
fn type_as_as_as_is_a_type_only_rename_of_as_to_as() {
    let tag = parse("{ type as as as } from 'mod'").unwrap();
    let specifier = single_named(&tag);
    assert_eq!(specifier.import_kind, ImportKind::Type);
    assert_eq!(imported_name(specifier), "as");
    assert_eq!(specifier.local.name, "as");
}

#[test]
fn import_attributes() {
    let tag = parse("X from 'mod' with { type: \"json\", 'resolution-mode': \"import\" }").unwrap();
    assert_eq!(tag.attributes.len(), 2);
    assert!(matches!(
        &tag.attributes[0].key,
        ModuleExportName::Identifier(identifier) if identifier.name == "type"
    ));
    assert_eq!(tag.attributes[0].value.value, "json");
    assert!(matches!(
        &tag.attributes[1].key,
        ModuleExportName::String(literal) if literal.value == "resolution-mode"
    ));
    // the node extends through the attributes' closing brace
    let last_token = tag.tokens.last().unwrap();
    assert_eq!(last_token.value, "}");
    assert_eq!(tag.loc.end, last_token.loc.end);
}

#[test]
fn unterminated_attributes_fall_back_to_the_clause() {
    let tag = parse("X from 'mod' with {").unwrap();
    assert!(tag.attributes.is_empty());
    // the node ends at the source string; `with {` is not part of it
    assert_eq!(tag.loc.end, tag.source.loc.end);
    assert_eq!(tag.tokens.last().unwrap().value, "'mod'");
}

#[test]
fn malformed_attribute_value_falls_back_to_the_clause() {
    let tag = parse("X from 'mod' with { type: json }").unwrap();
    assert!(tag.attributes.is_empty());
    assert_eq!(tag.loc.end, tag.source.loc.end);
}

#[test]
fn trailing_semicolon_extends_the_node() {
    let tag = parse("X from 'mod';").unwrap();
    assert_eq!(tag.loc.end, Position::new(1, 13));
    assert_eq!(tag.tokens.last().unwrap().value, ";");

    let tag = parse("X from 'mod' with { type: \"json\" };").unwrap();
    assert_eq!(tag.tokens.last().unwrap().value, ";");
}

#[test]
fn multi_line_clause() {
    let tag = parse("Foo,\n  { Bar,\n    type Baz }\n  from 'mod'").unwrap();
    assert_eq!(tag.specifiers.len(), 3);
    assert_eq!(tag.loc.start, Position::new(1, 0));
    assert_eq!(tag.loc.end, Position::new(4, 12));
}

#[test]
fn empty_named_imports() {
    let tag = parse("{} from 'mod'").unwrap();
    assert!(tag.specifiers.is_empty());
}

#[test]
fn trailing_comma_in_named_imports() {
    let tag = parse("{ A, B, } from 'mod'").unwrap();
    assert_eq!(tag.specifiers.len(), 2);
}

#[test]
fn malformed_clauses_are_no_match() {
    assert!(parse("X 'mod'").is_none());
    assert!(parse("{ X } from").is_none());
    assert!(parse("* as from 'mod'").is_none());
    assert!(parse("from 'mod'").is_none());
    assert!(parse("{ X } from 'unterminated").is_none());
}
