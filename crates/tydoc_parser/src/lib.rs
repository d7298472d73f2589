//! tydoc_parser: backtracking recursive-descent parsers for the type and
//! import grammars that appear as text inside documentation comments.
//!
//! Both entry points are total: any input that does not match the grammar —
//! including input the tokenizer cannot classify — yields `None`, never a
//! panic or a partial tree. Callers leave the original text untouched on
//! `None`.

mod functions;
mod imports;
mod list;
mod modifiers;
mod patterns;
pub mod state;
mod types;

pub use state::ParserState;

use tydoc_ast::build;
use tydoc_ast::node::{ImportTagType, TypeExpression};
use tydoc_ast::token::{Keyword, Punct, Token, TokenKind};
use tydoc_core::Location;
use tydoc_scanner::{LineSource, Tokenizer};

/// Parse the contents of a `{...}` type annotation.
pub fn parse_type_expression(lines: &dyn LineSource) -> Option<TypeExpression> {
    let tokenizer = Tokenizer::new(lines);
    let mut state = ParserState::new(tokenizer);
    let root = state.parse_type_annotation_root()?;
    let loc = root.loc();
    let tokens = state.tokens().to_vec();
    Some(TypeExpression { loc, root, tokens })
}

/// Parse an import tag's clause text (everything after the `@import` tag
/// name).
pub fn parse_import_tag(lines: &dyn LineSource) -> Option<ImportTagType> {
    let tokenizer = Tokenizer::new(lines);
    let mut state = ParserState::new(tokenizer);

    let (specifiers, source) = state.try_parse(|p| {
        let specifiers = p.parse_import_clause()?;
        p.eat_keyword(Keyword::From)?;
        let source_token = p.eat(TokenKind::String)?;
        Some((specifiers, build::string_literal(&source_token)))
    })?;

    let mut attributes = Vec::new();
    let mut end = source.loc.end;
    if let Some(semi) = state.eat_punct(Punct::Semicolon) {
        end = semi.loc.end;
    } else if let Some(parsed_attributes) = state.try_parse(|p| {
        // A `with` whose attribute list does not parse must not invalidate
        // the clause already accepted; the node then ends before `with`.
        p.eat_keyword(Keyword::With)?;
        p.parse_import_attributes()
    }) {
        end = parsed_attributes.close.loc.end;
        attributes = parsed_attributes.elements;
        if let Some(semi) = state.eat_punct(Punct::Semicolon) {
            end = semi.loc.end;
        }
    }

    let start = state.tokens().first()?.loc.start;
    let tokens: Vec<Token> = state
        .tokens()
        .iter()
        .filter(|t| t.loc.end <= end)
        .cloned()
        .collect();
    Some(ImportTagType {
        loc: Location::new(start, end),
        specifiers,
        source,
        attributes,
        tokens,
    })
}
