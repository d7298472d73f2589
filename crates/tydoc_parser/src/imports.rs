//! The import clause grammar: `import <clause> from "<source>"
//! [with { <attrs> }] [;]`.
//!
//! The `type` contextual keyword makes named specifiers genuinely ambiguous
//! (`{ type as as as }` is legal); the cascade in `parse_import_specifier`
//! resolves each shape to a fixed (imported, local, kind) triple.

use crate::list::Delimited;
use crate::state::ParserState;
use tydoc_ast::build;
use tydoc_ast::node::{
    ImportAttribute, ImportDefaultSpecifier, ImportKind, ImportNamespaceSpecifier, ImportSpecifier,
    ImportSpecifierNode, ModuleExportName,
};
use tydoc_ast::token::{Keyword, Punct, TokenKind};
use tydoc_core::Location;

impl ParserState<'_> {
    pub(crate) fn parse_import_clause(&mut self) -> Option<Vec<ImportSpecifierNode>> {
        if let Some(asterisk) = self.eat_punct(Punct::Asterisk) {
            // import * as X from "mod"
            self.eat_keyword(Keyword::As)?;
            let local_token = self.eat(TokenKind::Identifier)?;
            let local = build::identifier(&local_token);
            return Some(vec![ImportSpecifierNode::Namespace(
                ImportNamespaceSpecifier {
                    loc: Location::between(asterisk.loc, local.loc),
                    local,
                },
            )]);
        }
        if let Some(local_token) = self.eat(TokenKind::Identifier) {
            let local = build::identifier(&local_token);
            let default_specifier = ImportSpecifierNode::Default(ImportDefaultSpecifier {
                loc: local.loc,
                local,
            });
            if self.eat_punct(Punct::Comma).is_none() {
                // import X from "mod"
                return Some(vec![default_specifier]);
            }
            // import X, {...} from "mod"
            let mut specifiers = vec![default_specifier];
            specifiers.extend(self.parse_named_imports()?);
            return Some(specifiers);
        }
        // import {...} from "mod"
        self.parse_named_imports()
    }

    fn parse_named_imports(&mut self) -> Option<Vec<ImportSpecifierNode>> {
        self.eat_punct(Punct::OpenBrace)?;
        let list = self.parse_delimited_list(Punct::CloseBrace, |p| p.parse_import_specifier())?;
        Some(
            list.elements
                .into_iter()
                .map(ImportSpecifierNode::Named)
                .collect(),
        )
    }

    fn parse_import_specifier(&mut self) -> Option<ImportSpecifier> {
        let type_token = self.eat_keyword(Keyword::Type);
        if let Some(type_token) = &type_token {
            if let Some(as1) = self.eat_keyword(Keyword::As) {
                let as2 = self.eat_keyword(Keyword::As);
                let local_token = self.eat(TokenKind::Identifier);
                if let (Some(local_token), Some(_)) = (&local_token, &as2) {
                    // import { type as as as } from "mod"
                    // import { type as as X } from "mod"
                    let local = build::identifier(local_token);
                    return Some(ImportSpecifier {
                        loc: Location::between(type_token.loc, local.loc),
                        import_kind: ImportKind::Type,
                        imported: ModuleExportName::Identifier(build::identifier(&as1)),
                        local,
                    });
                }
                if let Some(value_local) = as2.as_ref().or(local_token.as_ref()) {
                    // import { type as X } from "mod"
                    // import { type as as } from "mod"
                    let local = build::identifier(value_local);
                    return Some(ImportSpecifier {
                        loc: Location::between(type_token.loc, local.loc),
                        import_kind: ImportKind::Value,
                        imported: ModuleExportName::Identifier(build::identifier(type_token)),
                        local,
                    });
                }
                // import { type as } from "mod"
                let as_identifier = build::identifier(&as1);
                return Some(ImportSpecifier {
                    loc: Location::between(type_token.loc, as1.loc),
                    import_kind: ImportKind::Type,
                    imported: ModuleExportName::Identifier(as_identifier.clone()),
                    local: as_identifier,
                });
            }
        }

        let imported_token = self
            .eat(TokenKind::Identifier)
            .or_else(|| self.eat(TokenKind::String));
        let Some(imported_token) = imported_token else {
            // import { type } from "mod"
            let type_token = type_token?;
            let identifier = build::identifier(&type_token);
            return Some(ImportSpecifier {
                loc: type_token.loc,
                import_kind: ImportKind::Value,
                imported: ModuleExportName::Identifier(identifier.clone()),
                local: identifier,
            });
        };
        let import_kind = if type_token.is_some() {
            ImportKind::Type
        } else {
            ImportKind::Value
        };
        let start = type_token.as_ref().map_or(imported_token.loc, |t| t.loc);
        if self.eat_keyword(Keyword::As).is_some() {
            // import { x as X } from "mod"
            // import { 'str' as X } from "mod"
            let local_token = self.eat(TokenKind::Identifier)?;
            let local = build::identifier(&local_token);
            return Some(ImportSpecifier {
                loc: Location::between(start, local.loc),
                import_kind,
                imported: build::identifier_or_literal(&imported_token),
                local,
            });
        }
        if imported_token.kind != TokenKind::Identifier {
            // a string import must be renamed with `as`
            return None;
        }
        // import { X } from "mod"
        let identifier = build::identifier(&imported_token);
        Some(ImportSpecifier {
            loc: Location::between(start, imported_token.loc),
            import_kind,
            imported: ModuleExportName::Identifier(identifier.clone()),
            local: identifier,
        })
    }

    pub(crate) fn parse_import_attributes(&mut self) -> Option<Delimited<ImportAttribute>> {
        self.eat_punct(Punct::OpenBrace)?;
        self.parse_delimited_list(Punct::CloseBrace, |p| p.parse_import_attribute())
    }

    fn parse_import_attribute(&mut self) -> Option<ImportAttribute> {
        let key_token = self
            .eat(TokenKind::Identifier)
            .or_else(|| self.eat(TokenKind::String))?;
        self.eat_punct(Punct::Colon)?;
        let value_token = self.eat(TokenKind::String)?;
        let key = build::identifier_or_literal(&key_token);
        let value = build::string_literal(&value_token);
        Some(ImportAttribute {
            loc: Location::between(key.loc(), value.loc),
            key,
            value,
        })
    }
}
