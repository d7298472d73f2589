//! The comment-text tokenizer.
//!
//! Converts a [`LineSource`] into a stream of tokens with (line, column)
//! spans. Scanning is an explicit cursor over one line's characters at a
//! time; builders are tried in a fixed priority order and the first match
//! wins. When no builder recognizes the current character the tokenizer
//! records a diagnostic and returns `None`, which the parser treats as a
//! plain "no match" — malformed input never panics.
//!
//! Consumed tokens are retained in order, and a replay queue lets the parser
//! rewind to any earlier point cheaply (`mark` / `back_to`), which is what
//! makes unbounded-lookahead speculative parsing affordable.

use std::collections::VecDeque;

use crate::lines::LineSource;
use tydoc_ast::token::{Punct, Token, TokenKind};
use tydoc_core::{Location, Position};
use tydoc_diagnostics::{messages, Diagnostic, DiagnosticCollection};

/// One entered template literal. A `{` seen inside an interpolation deepens
/// the scope; the matching `}` shallows it; a `}` at depth zero resumes the
/// template text instead of being a punctuator.
struct TemplateScope {
    braces: u32,
}

pub struct Tokenizer<'a> {
    source: &'a dyn LineSource,
    /// Cursor: the position scanning will resume from.
    pos: Position,
    template_stack: Vec<TemplateScope>,
    /// Every token handed out, in source order.
    tokens: Vec<Token>,
    /// Tokens pushed back by `back_to`, replayed before any new scanning.
    buffer: VecDeque<Token>,
    diagnostics: DiagnosticCollection,
    /// Where scanning failed, so repeated calls don't re-diagnose.
    exhausted_at: Option<Position>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a dyn LineSource) -> Self {
        Self {
            source,
            pos: Position::origin(),
            template_stack: Vec::new(),
            tokens: Vec::new(),
            buffer: VecDeque::new(),
            diagnostics: DiagnosticCollection::new(),
            exhausted_at: None,
        }
    }

    /// Produce the next token, or `None` at end of input or on a malformed
    /// token.
    pub fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.buffer.pop_front() {
            self.tokens.push(token.clone());
            return Some(token);
        }

        // Skip whitespace, crossing line boundaries; a missing line is the
        // end of input.
        let chars: Vec<char> = loop {
            let text = self.source.get_line(self.pos.line)?;
            let chars: Vec<char> = text.chars().collect();
            let mut col = self.pos.column as usize;
            while col < chars.len() && is_whitespace(chars[col]) {
                col += 1;
            }
            if col >= chars.len() {
                self.pos = Position::new(self.pos.line + 1, 0);
                continue;
            }
            self.pos.column = col as u32;
            break chars;
        };

        if self.exhausted_at == Some(self.pos) {
            return None;
        }

        match self.scan_token(&chars) {
            Some(token) => {
                self.pos = token.loc.end;
                self.tokens.push(token.clone());
                Some(token)
            }
            None => {
                self.exhausted_at = Some(self.pos);
                None
            }
        }
    }

    /// Peek the next token without consuming it.
    pub fn look_ahead(&mut self) -> Option<Token> {
        if let Some(front) = self.buffer.front() {
            return Some(front.clone());
        }
        let mark = self.mark();
        let token = self.next();
        if token.is_some() {
            self.back_to(mark);
        }
        token
    }

    /// Number of tokens consumed so far. A mark taken here can be rewound to
    /// with [`Tokenizer::back_to`].
    pub fn mark(&self) -> usize {
        self.tokens.len()
    }

    /// Push every token consumed since `mark` back onto the replay queue, so
    /// later `next` calls re-yield them. O(number of rolled-back tokens).
    pub fn back_to(&mut self, mark: usize) {
        debug_assert!(mark <= self.tokens.len());
        let tail = self.tokens.split_off(mark);
        for token in tail.into_iter().rev() {
            self.buffer.push_front(token);
        }
    }

    /// The consumed tokens, in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    // ========================================================================
    // Token builders, in priority order
    // ========================================================================

    fn scan_token(&mut self, chars: &[char]) -> Option<Token> {
        let diagnostics_before = self.diagnostics.len();
        if let Some(t) = self.scan_identifier(chars) {
            return Some(t);
        }
        if let Some(t) = self.scan_string(chars) {
            return Some(t);
        }
        if let Some(t) = self.scan_radix_number(chars) {
            return Some(t);
        }
        if let Some(t) = self.scan_bigint(chars) {
            return Some(t);
        }
        if let Some(t) = self.scan_decimal(chars) {
            return Some(t);
        }
        if let Some(t) = self.scan_template_start(chars) {
            return Some(t);
        }
        if let Some(t) = self.scan_template_resume(chars) {
            return Some(t);
        }
        if let Some(t) = self.scan_punctuator(chars) {
            return Some(t);
        }
        if self.diagnostics.len() == diagnostics_before {
            self.diagnostics.add(Diagnostic::with_location(
                Location::empty(self.pos),
                &messages::INVALID_CHARACTER,
                &[],
            ));
        }
        None
    }

    fn token_on_line(&self, kind: TokenKind, start: usize, end: usize, chars: &[char]) -> Token {
        let value: String = chars[start..end].iter().collect();
        Token::new(
            kind,
            value,
            Location::on_line(self.pos.line, start as u32, end as u32),
        )
    }

    fn scan_identifier(&self, chars: &[char]) -> Option<Token> {
        let start = self.pos.column as usize;
        if !is_identifier_start(chars[start]) {
            return None;
        }
        let mut i = start + 1;
        while i < chars.len() {
            let c = chars[i];
            if is_identifier_part(c) {
                i += 1;
            } else if c == '\\' {
                match scan_identifier_escape(chars, i) {
                    Some(end) => i = end,
                    None => break,
                }
            } else {
                break;
            }
        }
        Some(self.token_on_line(TokenKind::Identifier, start, i, chars))
    }

    fn scan_string(&mut self, chars: &[char]) -> Option<Token> {
        let start = self.pos.column as usize;
        let quote = chars[start];
        if quote != '"' && quote != '\'' {
            return None;
        }
        let mut i = start + 1;
        loop {
            if i >= chars.len() {
                // Strings may not span lines.
                self.diagnostics.add(Diagnostic::with_location(
                    Location::on_line(self.pos.line, start as u32, i as u32),
                    &messages::UNTERMINATED_STRING_LITERAL,
                    &[],
                ));
                return None;
            }
            let c = chars[i];
            if c == quote {
                i += 1;
                break;
            }
            if c == '\\' {
                if i + 1 >= chars.len() {
                    self.diagnostics.add(Diagnostic::with_location(
                        Location::on_line(self.pos.line, start as u32, i as u32),
                        &messages::UNTERMINATED_STRING_LITERAL,
                        &[],
                    ));
                    return None;
                }
                i += 2;
                continue;
            }
            i += 1;
        }
        Some(self.token_on_line(TokenKind::String, start, i, chars))
    }

    /// Hexadecimal, octal, and binary literals, with `_` separators and an
    /// optional bigint suffix.
    fn scan_radix_number(&self, chars: &[char]) -> Option<Token> {
        let start = self.pos.column as usize;
        if chars[start] != '0' {
            return None;
        }
        let is_digit: fn(char) -> bool = match chars.get(start + 1) {
            Some('x') | Some('X') => |c| c.is_ascii_hexdigit(),
            Some('o') | Some('O') => |c| ('0'..='7').contains(&c),
            Some('b') | Some('B') => |c| c == '0' || c == '1',
            _ => return None,
        };
        let mut i = scan_digit_run(chars, start + 2, is_digit)?;
        if chars.get(i) == Some(&'n') {
            i += 1;
        }
        Some(self.token_on_line(TokenKind::Numeric, start, i, chars))
    }

    /// `0n` and decimal bigints.
    fn scan_bigint(&self, chars: &[char]) -> Option<Token> {
        let start = self.pos.column as usize;
        if chars[start] == '0' && chars.get(start + 1) == Some(&'n') {
            return Some(self.token_on_line(TokenKind::Numeric, start, start + 2, chars));
        }
        if !('1'..='9').contains(&chars[start]) {
            return None;
        }
        let i = scan_digit_run(chars, start, |c| c.is_ascii_digit())?;
        if chars.get(i) != Some(&'n') {
            return None;
        }
        Some(self.token_on_line(TokenKind::Numeric, start, i + 1, chars))
    }

    fn scan_decimal(&self, chars: &[char]) -> Option<Token> {
        let start = self.pos.column as usize;
        let mut i;
        if chars[start] == '.' {
            // .5 — fraction digits are mandatory
            i = scan_digit_run(chars, start + 1, |c| c.is_ascii_digit())?;
        } else if chars[start] == '0' {
            i = start + 1;
            i = self.scan_fraction(chars, i);
        } else if ('1'..='9').contains(&chars[start]) {
            i = scan_digit_run(chars, start, |c| c.is_ascii_digit())?;
            i = self.scan_fraction(chars, i);
        } else {
            return None;
        }
        // Exponent only counts when at least one digit follows.
        if matches!(chars.get(i), Some('e') | Some('E')) {
            let mut j = i + 1;
            if matches!(chars.get(j), Some('+') | Some('-')) {
                j += 1;
            }
            if let Some(end) = scan_digit_run(chars, j, |c| c.is_ascii_digit()) {
                i = end;
            }
        }
        Some(self.token_on_line(TokenKind::Numeric, start, i, chars))
    }

    fn scan_fraction(&self, chars: &[char], i: usize) -> usize {
        if chars.get(i) != Some(&'.') {
            return i;
        }
        // A trailing dot with no digits is still part of the literal.
        scan_digit_run(chars, i + 1, |c| c.is_ascii_digit()).unwrap_or(i + 1)
    }

    fn scan_template_start(&mut self, chars: &[char]) -> Option<Token> {
        if chars[self.pos.column as usize] != '`' {
            return None;
        }
        self.template_stack.push(TemplateScope { braces: 0 });
        let token = self.read_template_token();
        if token.is_none() {
            self.template_stack.pop();
        }
        token
    }

    /// A `}` closing an interpolation resumes the innermost template's text.
    fn scan_template_resume(&mut self, chars: &[char]) -> Option<Token> {
        if chars[self.pos.column as usize] != '}' {
            return None;
        }
        if !self.template_stack.last().is_some_and(|s| s.braces == 0) {
            return None;
        }
        self.read_template_token()
    }

    /// Read template text from the opening `` ` `` or resuming `}` up to the
    /// closing backtick, the next `${`, or — malformed — the end of input.
    /// The token's value joins its per-line fragments with `\n` and excludes
    /// the opening delimiter.
    fn read_template_token(&mut self) -> Option<Token> {
        let start = self.pos;
        let mut line = start.line;
        let mut scan_start = start.column as usize + 1;
        let mut fragments: Vec<String> = Vec::new();
        loop {
            let Some(text) = self.source.get_line(line) else {
                self.diagnostics.add(Diagnostic::with_location(
                    Location::new(start, Position::new(line, 0)),
                    &messages::UNTERMINATED_TEMPLATE_LITERAL,
                    &[],
                ));
                return None;
            };
            let chars: Vec<char> = text.chars().collect();
            let mut i = scan_start;
            let mut closed = false;
            let mut substitution = false;
            while i < chars.len() {
                match chars[i] {
                    '`' => {
                        i += 1;
                        closed = true;
                        break;
                    }
                    '$' => {
                        if chars.get(i + 1) == Some(&'{') {
                            i += 2;
                            substitution = true;
                            break;
                        }
                        // A lone `$` cannot appear in template text.
                        return None;
                    }
                    '\\' => {
                        if i + 1 >= chars.len() {
                            return None;
                        }
                        i += 2;
                    }
                    _ => i += 1,
                }
            }
            if !closed && !substitution && i == scan_start {
                // Nothing on this line: neither content nor a terminator.
                return None;
            }
            fragments.push(chars[scan_start.min(chars.len())..i].iter().collect());
            if closed || substitution {
                if closed {
                    self.template_stack.pop();
                }
                let loc = Location::new(start, Position::new(line, i as u32));
                return Some(Token::new(TokenKind::Template, fragments.join("\n"), loc));
            }
            line += 1;
            scan_start = 0;
        }
    }

    fn scan_punctuator(&mut self, chars: &[char]) -> Option<Token> {
        let start = self.pos.column as usize;
        if chars[start..].starts_with(&['.', '.', '.']) {
            return Some(self.token_on_line(TokenKind::Punctuator, start, start + 3, chars));
        }
        if chars[start..].starts_with(&['=', '>']) {
            return Some(self.token_on_line(TokenKind::Punctuator, start, start + 2, chars));
        }
        let c = chars[start];
        Punct::from_char(c)?;
        if c == '{' {
            if let Some(scope) = self.template_stack.last_mut() {
                scope.braces += 1;
            }
        } else if c == '}' {
            if let Some(scope) = self.template_stack.last_mut() {
                scope.braces = scope.braces.saturating_sub(1);
            }
        }
        Some(self.token_on_line(TokenKind::Punctuator, start, start + 1, chars))
    }
}

/// Scan a `digit (_? digit)*` run. Returns the index past the run, or `None`
/// when there is no leading digit.
fn scan_digit_run(chars: &[char], start: usize, is_digit: impl Fn(char) -> bool) -> Option<usize> {
    if start >= chars.len() || !is_digit(chars[start]) {
        return None;
    }
    let mut i = start + 1;
    loop {
        if i < chars.len() && chars[i] == '_' && i + 1 < chars.len() && is_digit(chars[i + 1]) {
            i += 2;
        } else if i < chars.len() && is_digit(chars[i]) {
            i += 1;
        } else {
            break;
        }
    }
    Some(i)
}

/// `\uXXXX` or `\u{X+}` inside an identifier. Returns the index past the
/// escape.
fn scan_identifier_escape(chars: &[char], backslash: usize) -> Option<usize> {
    if chars.get(backslash + 1) != Some(&'u') {
        return None;
    }
    if chars.get(backslash + 2) == Some(&'{') {
        let mut i = backslash + 3;
        while chars.get(i).is_some_and(|c| c.is_ascii_hexdigit()) {
            i += 1;
        }
        if i == backslash + 3 || chars.get(i) != Some(&'}') {
            return None;
        }
        Some(i + 1)
    } else {
        for offset in 0..4 {
            if !chars.get(backslash + 2 + offset).is_some_and(|c| c.is_ascii_hexdigit()) {
                return None;
            }
        }
        Some(backslash + 6)
    }
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

fn is_identifier_start(c: char) -> bool {
    c == '_'
        || c == '$'
        || c == '\\'
        || c.is_ascii_alphabetic()
        || (c as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_start(c))
}

fn is_identifier_part(c: char) -> bool {
    c == '_'
        || c == '$'
        || c == '\u{200C}'
        || c == '\u{200D}'
        || c.is_ascii_alphanumeric()
        || (c as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_continue(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::TextLines;

    fn kinds_and_values(text: &str) -> Vec<(TokenKind, String)> {
        let lines = TextLines::new(text);
        let mut tokenizer = Tokenizer::new(&lines);
        let mut out = Vec::new();
        while let Some(token) = tokenizer.next() {
            out.push((token.kind, token.value));
        }
        out
    }

    #[test]
    fn test_scan_simple_tokens() {
        let tokens = kinds_and_values("foo | bar");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, "foo".to_string()),
                (TokenKind::Punctuator, "|".to_string()),
                (TokenKind::Identifier, "bar".to_string()),
            ]
        );
    }

    #[test]
    fn test_scan_across_lines() {
        let lines = TextLines::new("foo\n  bar");
        let mut tokenizer = Tokenizer::new(&lines);
        let foo = tokenizer.next().unwrap();
        assert_eq!(foo.loc, Location::on_line(1, 0, 3));
        let bar = tokenizer.next().unwrap();
        assert_eq!(bar.loc, Location::on_line(2, 2, 5));
        assert_eq!(tokenizer.next(), None);
    }

    #[test]
    fn test_scan_multi_char_punctuators() {
        let tokens = kinds_and_values("... => . =");
        let values: Vec<&str> = tokens.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, vec!["...", "=>", ".", "="]);
    }

    #[test]
    fn test_scan_number_formats() {
        let tokens = kinds_and_values("42 3.14 .5 1. 0xff 0o7_7 0b1010 1_000e-2 0n 12n");
        for (kind, _) in &tokens {
            assert_eq!(*kind, TokenKind::Numeric);
        }
        let values: Vec<&str> = tokens.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(
            values,
            vec!["42", "3.14", ".5", "1.", "0xff", "0o7_7", "0b1010", "1_000e-2", "0n", "12n"]
        );
    }

    #[test]
    fn test_exponent_requires_digits() {
        let tokens = kinds_and_values("1e");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Numeric, "1".to_string()),
                (TokenKind::Identifier, "e".to_string()),
            ]
        );
    }

    #[test]
    fn test_scan_strings() {
        let tokens = kinds_and_values(r#""hello" 'it\'s' "a'b""#);
        assert_eq!(
            tokens,
            vec![
                (TokenKind::String, r#""hello""#.to_string()),
                (TokenKind::String, r"'it\'s'".to_string()),
                (TokenKind::String, r#""a'b""#.to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_no_match() {
        let lines = TextLines::new(r#""oops"#);
        let mut tokenizer = Tokenizer::new(&lines);
        assert_eq!(tokenizer.next(), None);
        assert!(tokenizer.diagnostics().has_errors());
        // Repeated calls stay at no-match without duplicating diagnostics.
        assert_eq!(tokenizer.next(), None);
        assert_eq!(tokenizer.diagnostics().len(), 1);
    }

    #[test]
    fn test_identifier_escapes() {
        let tokens = kinds_and_values(r"aAb $x _y");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, r"aAb".to_string()),
                (TokenKind::Identifier, "$x".to_string()),
                (TokenKind::Identifier, "_y".to_string()),
            ]
        );
    }

    #[test]
    fn test_template_simple() {
        let tokens = kinds_and_values("`abc`");
        assert_eq!(tokens, vec![(TokenKind::Template, "abc`".to_string())]);
    }

    #[test]
    fn test_template_with_substitution() {
        let tokens = kinds_and_values("`a${x}b`");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Template, "a${".to_string()),
                (TokenKind::Identifier, "x".to_string()),
                (TokenKind::Template, "b`".to_string()),
            ]
        );
    }

    #[test]
    fn test_template_nested_braces_and_templates() {
        // `a${ {x:`b${y}`} }` — the outer template resumes only when the
        // inner object's braces have balanced out.
        let tokens = kinds_and_values("`a${ {x:`b${y}`} }`");
        let expected = vec![
            (TokenKind::Template, "a${".to_string()),
            (TokenKind::Punctuator, "{".to_string()),
            (TokenKind::Identifier, "x".to_string()),
            (TokenKind::Punctuator, ":".to_string()),
            (TokenKind::Template, "b${".to_string()),
            (TokenKind::Identifier, "y".to_string()),
            (TokenKind::Template, "`".to_string()),
            (TokenKind::Punctuator, "}".to_string()),
            (TokenKind::Template, "`".to_string()),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_template_across_lines() {
        let lines = TextLines::new("`ab\ncd`");
        let mut tokenizer = Tokenizer::new(&lines);
        let token = tokenizer.next().unwrap();
        assert_eq!(token.kind, TokenKind::Template);
        assert_eq!(token.value, "ab\ncd`");
        assert_eq!(token.loc.start, Position::new(1, 0));
        assert_eq!(token.loc.end, Position::new(2, 3));
    }

    #[test]
    fn test_unterminated_template_is_no_match() {
        let tokens = kinds_and_values("`abc");
        assert_eq!(tokens, vec![]);
    }

    #[test]
    fn test_look_ahead_does_not_consume() {
        let lines = TextLines::new("a b");
        let mut tokenizer = Tokenizer::new(&lines);
        let peeked = tokenizer.look_ahead().unwrap();
        assert_eq!(peeked.value, "a");
        let first = tokenizer.next().unwrap();
        assert_eq!(first, peeked);
    }

    #[test]
    fn test_back_to_replays_tokens() {
        let lines = TextLines::new("a b c");
        let mut tokenizer = Tokenizer::new(&lines);
        let mark = tokenizer.mark();
        assert_eq!(tokenizer.next().unwrap().value, "a");
        assert_eq!(tokenizer.next().unwrap().value, "b");
        tokenizer.back_to(mark);
        assert_eq!(tokenizer.next().unwrap().value, "a");
        assert_eq!(tokenizer.next().unwrap().value, "b");
        assert_eq!(tokenizer.next().unwrap().value, "c");
        assert_eq!(tokenizer.tokens().len(), 3);
    }
}
