//! Reassembly: mapping between node spans and comment text.
//!
//! Three operations close the loop with the formatting back end: recover the
//! exact source text a span covers, splice replacement text over spans, and
//! re-indent a formatted construct's continuation lines so it sits correctly
//! inside the comment again.

use crate::block::TagRegion;
use tydoc_core::{Location, Position, SpanError};
use tydoc_scanner::LineSource;

/// Recover the exact text a span covers, with line breaks normalized to
/// `\n`. Columns are character offsets into the logical line text.
pub fn slice_location(source: &dyn LineSource, loc: &Location) -> Result<String, SpanError> {
    let mut parts: Vec<String> = Vec::new();
    for line in loc.start.line..=loc.end.line {
        let text = line_chars(source, line)?;
        let from = if line == loc.start.line {
            loc.start.column as usize
        } else {
            0
        };
        let to = if line == loc.end.line {
            loc.end.column as usize
        } else {
            text.len()
        };
        if from > text.len() {
            return Err(SpanError::ColumnOutOfRange { line, column: from as u32 });
        }
        if to > text.len() {
            return Err(SpanError::ColumnOutOfRange { line, column: to as u32 });
        }
        parts.push(text[from..to].iter().collect());
    }
    Ok(parts.join("\n"))
}

/// Apply span replacements to the source text and return the rebuilt text,
/// trimmed. Replacements may not overlap; they are applied in span order.
pub fn splice(
    source: &dyn LineSource,
    replacements: &[(Location, String)],
) -> Result<String, SpanError> {
    let mut ordered: Vec<&(Location, String)> = replacements.iter().collect();
    ordered.sort_by_key(|(loc, _)| loc.start);

    let mut output = String::new();
    let mut cursor = Position::origin();
    for (loc, text) in ordered {
        // copy the untouched text between the cursor and this span
        copy_range(source, cursor, loc.start, &mut output)?;
        output.push_str(text);
        cursor = loc.end;
    }
    // copy the remainder
    let mut line = cursor.line;
    loop {
        match source.get_line(line) {
            Some(_) => {
                copy_range(
                    source,
                    cursor,
                    Position::new(line, line_chars(source, line)?.len() as u32),
                    &mut output,
                )?;
                line += 1;
                cursor = Position::new(line, 0);
                if source.get_line(line).is_some() {
                    output.push('\n');
                }
            }
            None => break,
        }
    }
    Ok(output.trim().to_string())
}

fn copy_range(
    source: &dyn LineSource,
    from: Position,
    to: Position,
    output: &mut String,
) -> Result<(), SpanError> {
    debug_assert!(from <= to);
    for line in from.line..=to.line {
        let text = line_chars(source, line)?;
        let start = if line == from.line {
            from.column as usize
        } else {
            0
        };
        let end = if line == to.line {
            to.column as usize
        } else {
            text.len()
        };
        if start > text.len() || end > text.len() {
            return Err(SpanError::ColumnOutOfRange {
                line,
                column: start.max(end) as u32,
            });
        }
        if line != from.line {
            output.push('\n');
        }
        output.extend(text[start..end].iter());
    }
    Ok(())
}

fn line_chars(source: &dyn LineSource, line: u32) -> Result<Vec<char>, SpanError> {
    source
        .get_line(line)
        .map(|text| text.chars().collect())
        .ok_or(SpanError::LineOutOfRange(line))
}

/// Prefix every continuation line of formatted text with `indent`.
pub fn reindent(formatted: &str, indent: &str) -> String {
    formatted
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The minimum-indentation heuristic: the smallest leading whitespace of the
/// continuation lines, followed by `* `. A single-line comment gets the
/// conventional ` * `.
pub fn min_indent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= 1 {
        return " * ".to_string();
    }
    let mut indent: Option<&str> = None;
    for line in &lines[1..] {
        let leading = &line[..line.len() - line.trim_start().len()];
        if indent.map_or(true, |current| current.len() > leading.len()) {
            indent = Some(leading);
        }
    }
    format!("{}* ", indent.unwrap_or(""))
}

/// The indentation to apply to a node's continuation lines: the delimiter
/// prefix at the node's start line, or the minimum-indentation heuristic when
/// the node starts on the comment's very first line (where there is no
/// delimiter prefix to copy).
pub fn indent_for(region: &TagRegion, node_start_line: u32, comment_text: &str) -> String {
    if node_start_line <= 1 {
        return min_indent(comment_text);
    }
    match region.indent_at(node_start_line) {
        Some(indent) => indent.to_string(),
        None => min_indent(comment_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tydoc_scanner::TextLines;

    #[test]
    fn test_slice_single_line() {
        let lines = TextLines::new("hello world");
        let loc = Location::on_line(1, 6, 11);
        assert_eq!(slice_location(&lines, &loc).unwrap(), "world");
    }

    #[test]
    fn test_slice_multi_line() {
        let lines = TextLines::new("abc\ndefg\nhij");
        let loc = Location::new(Position::new(1, 1), Position::new(3, 2));
        assert_eq!(slice_location(&lines, &loc).unwrap(), "bc\ndefg\nhi");
    }

    #[test]
    fn test_slice_out_of_range() {
        let lines = TextLines::new("abc");
        let loc = Location::new(Position::new(1, 0), Position::new(2, 0));
        assert_eq!(
            slice_location(&lines, &loc),
            Err(SpanError::LineOutOfRange(2))
        );
        let loc = Location::on_line(1, 0, 9);
        assert_eq!(
            slice_location(&lines, &loc),
            Err(SpanError::ColumnOutOfRange { line: 1, column: 9 })
        );
    }

    #[test]
    fn test_splice_replaces_spans() {
        let lines = TextLines::new("function(a) : b");
        let replacements = vec![
            (Location::on_line(1, 0, 8), String::new()),
            (Location::on_line(1, 12, 13), "=>".to_string()),
        ];
        assert_eq!(splice(&lines, &replacements).unwrap(), "(a) => b");
    }

    #[test]
    fn test_splice_across_lines() {
        let lines = TextLines::new("a |\n  b");
        let replacements = vec![(
            Location::new(Position::new(1, 2), Position::new(2, 2)),
            "| ".to_string(),
        )];
        assert_eq!(splice(&lines, &replacements).unwrap(), "a | b");
    }

    #[test]
    fn test_reindent() {
        assert_eq!(reindent("a", " * "), "a");
        assert_eq!(reindent("a |\n  b", " * "), "a |\n *   b");
    }

    #[test]
    fn test_min_indent() {
        assert_eq!(min_indent("single"), " * ");
        assert_eq!(min_indent("/**\n   * x\n  */"), "  * ");
    }
}
