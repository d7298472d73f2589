//! tydoc_core: shared source-location primitives.
//!
//! Comment text never exists as one flat buffer: each line is produced
//! independently after the comment delimiters have been stripped, so every
//! position in this crate is a (line, column) pair rather than a byte offset.

pub mod text;

pub use text::{Location, Position};

use thiserror::Error;

/// Errors raised when a caller hands a span that does not fit the text it is
/// applied to. These only occur at the host boundary; spans produced by the
/// tokenizer are valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error("line {0} is out of range")]
    LineOutOfRange(u32),
    #[error("column {column} is past the end of line {line}")]
    ColumnOutOfRange { line: u32, column: u32 },
}
