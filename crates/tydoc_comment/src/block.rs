//! The comment-block collaborator model.
//!
//! The host comment parser owns `/** ... */` syntax; what reaches this crate
//! is one tag-like region at a time: its lines' numbers, their delimiter
//! prefixes, and the type-region text per line. This crate never sees `@tag`
//! or `*` markers as syntax.

use tydoc_scanner::TagTypeLines;

/// One physical line of a doc comment, as delivered by the host comment
/// model.
#[derive(Debug, Clone)]
pub struct CommentLine {
    /// 1-based line number within the comment block.
    pub number: u32,
    /// The delimiter prefix: leading whitespace, the `*`, and the whitespace
    /// after it.
    pub indent: String,
    /// The type-region text of the line; empty when the line carries none.
    pub text: String,
}

impl CommentLine {
    pub fn new(number: u32, indent: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number,
            indent: indent.into(),
            text: text.into(),
        }
    }
}

/// A tag-like region of a comment block.
#[derive(Debug, Clone)]
pub struct TagRegion {
    lines: Vec<CommentLine>,
}

impl TagRegion {
    pub fn new(lines: Vec<CommentLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CommentLine] {
        &self.lines
    }

    pub fn first_line(&self) -> Option<u32> {
        self.lines.first().map(|l| l.number)
    }

    pub fn last_line(&self) -> Option<u32> {
        self.lines.last().map(|l| l.number)
    }

    /// The delimiter prefix of the given comment line.
    pub fn indent_at(&self, number: u32) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.number == number)
            .map(|l| l.indent.as_str())
    }

    /// The logical line source for this region's type text, with the
    /// surrounding braces blanked out.
    pub fn type_lines(&self) -> TagTypeLines {
        TagTypeLines::new(self.lines.iter().map(|l| l.text.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tydoc_scanner::LineSource;

    #[test]
    fn test_region_lookup() {
        let region = TagRegion::new(vec![
            CommentLine::new(2, " * ", "{string |"),
            CommentLine::new(3, " *   ", "number}"),
        ]);
        assert_eq!(region.first_line(), Some(2));
        assert_eq!(region.last_line(), Some(3));
        assert_eq!(region.indent_at(3), Some(" *   "));
        assert_eq!(region.indent_at(4), None);
    }

    #[test]
    fn test_type_lines_strip_braces() {
        let region = TagRegion::new(vec![
            CommentLine::new(2, " * ", "{string |"),
            CommentLine::new(3, " * ", ""),
            CommentLine::new(4, " * ", "number}"),
        ]);
        let lines = region.type_lines();
        assert_eq!(lines.get_line(1), Some(" string |"));
        assert_eq!(lines.get_line(2), Some("number "));
        assert_eq!(lines.get_line(3), None);
    }
}
