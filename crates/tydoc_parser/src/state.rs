//! Parser state: single-token lookahead over the tokenizer plus the
//! transactional primitives every speculative grammar rule is built on.
//!
//! `try_parse` is the sole backtracking mechanism: it snapshots the consumed
//! position, runs a rule, and rewinds exactly to the snapshot when the rule
//! reports no match, so failed alternatives leave no trace in the consumed
//! token list. `look_ahead` always rewinds and is used for disambiguation
//! that must not consume input.

use tydoc_ast::token::{Keyword, Punct, Token, TokenKind};
use tydoc_diagnostics::DiagnosticCollection;
use tydoc_scanner::Tokenizer;

pub struct ParserState<'a> {
    tokenizer: Tokenizer<'a>,
    current: Option<Token>,
    /// When set, `extends` after a type is not the start of a conditional
    /// type (the rule TypeScript applies inside a conditional's extends-type).
    no_conditional_types: bool,
}

impl<'a> ParserState<'a> {
    pub fn new(tokenizer: Tokenizer<'a>) -> Self {
        let mut state = Self {
            tokenizer,
            current: None,
            no_conditional_types: false,
        };
        state.current = state.tokenizer.next();
        state
    }

    /// The lookahead token, if any.
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Consume and return the lookahead token.
    pub(crate) fn bump(&mut self) -> Option<Token> {
        let token = self.current.take()?;
        self.current = self.tokenizer.next();
        Some(token)
    }

    /// Consume the current token iff its kind matches.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current.as_ref()?.kind != kind {
            return None;
        }
        self.bump()
    }

    /// Consume the current token iff it is an identifier spelling `keyword`.
    pub fn eat_keyword(&mut self, keyword: Keyword) -> Option<Token> {
        if !self.current.as_ref()?.is_keyword(keyword) {
            return None;
        }
        self.bump()
    }

    /// Consume the current token iff it is the punctuator `punct`.
    pub fn eat_punct(&mut self, punct: Punct) -> Option<Token> {
        if !self.current.as_ref()?.is_punct(punct) {
            return None;
        }
        self.bump()
    }

    pub fn look_ahead_keyword(&self, keyword: Keyword) -> bool {
        self.current.as_ref().is_some_and(|t| t.is_keyword(keyword))
    }

    pub fn look_ahead_punct(&self, punct: Punct) -> bool {
        self.current.as_ref().is_some_and(|t| t.is_punct(punct))
    }

    pub fn look_ahead_kind(&self, kind: TokenKind) -> bool {
        self.current.as_ref().is_some_and(|t| t.kind == kind)
    }

    /// Whether the lookahead token starts on the given line. Grammar rules
    /// that forbid a preceding line break (`is` predicates, postfix `[`,
    /// conditional `extends`) check this against the previous node's end.
    pub(crate) fn current_on_same_line(&self, line: u32) -> bool {
        self.current.as_ref().is_some_and(|t| t.loc.start.line == line)
    }

    /// Index of the lookahead token in the consumed stream.
    fn mark(&self) -> usize {
        self.tokenizer.mark() - usize::from(self.current.is_some())
    }

    fn rewind(&mut self, mark: usize) {
        if self.mark() == mark {
            return;
        }
        self.tokenizer.back_to(mark);
        self.current = self.tokenizer.next();
    }

    /// Run `f`; if it returns `None`, rewind the token stream exactly to
    /// where it was before the attempt.
    pub fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.current.is_none() {
            return None;
        }
        let mark = self.mark();
        let result = f(self);
        if result.is_none() {
            self.rewind(mark);
        }
        result
    }

    /// Run `f` and rewind regardless of its result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let mark = self.mark();
        let result = f(self);
        self.rewind(mark);
        result
    }

    /// The consumed tokens in source order, excluding the unconsumed
    /// lookahead token.
    pub fn tokens(&self) -> &[Token] {
        &self.tokenizer.tokens()[..self.mark()]
    }

    /// Tokenizer diagnostics accumulated so far (unterminated literals,
    /// unclassifiable characters).
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        self.tokenizer.diagnostics()
    }

    pub(crate) fn conditional_types_disallowed(&self) -> bool {
        self.no_conditional_types
    }

    /// Run `f` with conditional types allowed or disallowed, restoring the
    /// previous context afterwards.
    pub(crate) fn with_conditional_types<T>(
        &mut self,
        allowed: bool,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.no_conditional_types;
        self.no_conditional_types = !allowed;
        let result = f(self);
        self.no_conditional_types = saved;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tydoc_scanner::{TextLines, Tokenizer};

    fn state_over(lines: &TextLines) -> ParserState<'_> {
        ParserState::new(Tokenizer::new(lines))
    }

    #[test]
    fn test_eat_matches_kind_and_value() {
        let lines = TextLines::new("type as |");
        let mut state = state_over(&lines);
        assert!(state.eat_keyword(Keyword::As).is_none());
        assert!(state.eat_keyword(Keyword::Type).is_some());
        assert!(state.eat(TokenKind::Identifier).is_some());
        assert!(state.eat_punct(Punct::Ampersand).is_none());
        assert!(state.eat_punct(Punct::Bar).is_some());
        assert!(state.current().is_none());
    }

    #[test]
    fn test_try_parse_rewinds_on_failure() {
        let lines = TextLines::new("a . b . c");
        let mut state = state_over(&lines);
        let failed: Option<()> = state.try_parse(|p| {
            p.eat(TokenKind::Identifier)?;
            p.eat_punct(Punct::Dot)?;
            p.eat(TokenKind::Identifier)?;
            // fail deep into the rule
            p.eat_punct(Punct::Comma)?;
            Some(())
        });
        assert!(failed.is_none());
        // position must be exactly as before the attempt
        assert_eq!(state.tokens().len(), 0);
        assert_eq!(state.current().unwrap().value, "a");
    }

    #[test]
    fn test_try_parse_commits_on_success() {
        let lines = TextLines::new("a b");
        let mut state = state_over(&lines);
        let parsed = state.try_parse(|p| p.eat(TokenKind::Identifier));
        assert_eq!(parsed.unwrap().value, "a");
        assert_eq!(state.current().unwrap().value, "b");
        assert_eq!(state.tokens().len(), 1);
    }

    #[test]
    fn test_look_ahead_always_rewinds() {
        let lines = TextLines::new("a b c");
        let mut state = state_over(&lines);
        let saw = state.look_ahead(|p| {
            p.bump();
            p.bump().map(|t| t.value)
        });
        assert_eq!(saw.as_deref(), Some("b"));
        assert_eq!(state.current().unwrap().value, "a");
        assert_eq!(state.tokens().len(), 0);
    }

    #[test]
    fn test_nested_try_parse() {
        let lines = TextLines::new("a b c d");
        let mut state = state_over(&lines);
        let result = state.try_parse(|p| {
            p.eat(TokenKind::Identifier)?;
            let inner: Option<()> = p.try_parse(|p| {
                p.eat(TokenKind::Identifier)?;
                p.eat_punct(Punct::Comma)?;
                Some(())
            });
            assert!(inner.is_none());
            // inner failure must rewind to "b" only
            p.eat(TokenKind::Identifier).map(|t| t.value)
        });
        assert_eq!(result.as_deref(), Some("b"));
        assert_eq!(state.current().unwrap().value, "c");
    }

    #[test]
    fn test_tokens_excludes_lookahead() {
        let lines = TextLines::new("a b");
        let mut state = state_over(&lines);
        state.bump();
        // "a" consumed; "b" is the lookahead
        let values: Vec<&str> = state.tokens().iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["a"]);
    }
}
