//! tydoc_diagnostics: diagnostic messages for comment-text tokenizing.
//!
//! Parse failures are reported to callers as plain "no match" results; the
//! diagnostics collected here are the side channel that records *why* a token
//! stream ended early (an unterminated literal, a character no token builder
//! recognizes). Hosts that silently leave unparsable text untouched can ignore
//! them; tooling that wants to surface the reason can read them off the
//! tokenizer.

use std::fmt;
use tydoc_core::Location;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// The diagnostic messages the tokenizer can produce.
pub mod messages {
    use super::{DiagnosticCategory, DiagnosticMessage};

    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: 1002,
        category: DiagnosticCategory::Error,
        message: "Unterminated string literal.",
    };
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: 1160,
        category: DiagnosticCategory::Error,
        message: "Unterminated template literal.",
    };
    pub const INVALID_CHARACTER: DiagnosticMessage = DiagnosticMessage {
        code: 1127,
        category: DiagnosticCategory::Error,
        message: "Invalid character.",
    };
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The span where this diagnostic occurred, if known.
    pub location: Option<Location>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            location: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    pub fn with_location(location: Location, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            location: Some(location),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.location {
            write!(f, "{}: ", loc.start)?;
        }
        write!(f, "{} TD{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated while tokenizing one comment.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self { diagnostics: Vec::new() }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }
}
