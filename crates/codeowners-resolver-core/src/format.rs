//! Owner column alignment for CODEOWNERS documents.
//!
//! Rewrites rule lines so that every owner list starts at the same column.
//! Comments, blank lines and line order are left alone.

use crate::parse::{split_fields, strip_inline_comment};
use log::debug;

/// Default number of spaces between the longest pattern and its owners.
pub const DEFAULT_ALIGNMENT_OFFSET: usize = 4;

struct RuleLine<'a> {
    pattern: &'a str,
    owners: Vec<&'a str>,
    comment: Option<&'a str>,
}

enum FormatLine<'a> {
    Verbatim(&'a str),
    Rule(RuleLine<'a>),
}

fn classify_line(line: &str) -> FormatLine<'_> {
    let effective = strip_inline_comment(line);
    let fields = split_fields(effective);
    let Some((pattern, owners)) = fields.split_first() else {
        return FormatLine::Verbatim(line);
    };

    let comment = line[effective.len()..].trim_end();
    FormatLine::Rule(RuleLine {
        pattern: pattern.text,
        owners: owners.iter().map(|f| f.text).collect(),
        comment: (!comment.is_empty()).then_some(comment),
    })
}

/// Aligns the owners of every rule to a common column.
///
/// The column is the width of the longest pattern plus `offset` spaces.
/// Rules without owners keep only their pattern; inline comments follow the
/// owners after a single space. CRLF documents stay CRLF.
pub fn align_owners(text: &str, offset: usize) -> String {
    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let lines: Vec<FormatLine<'_>> = text.lines().map(classify_line).collect();

    let width = lines
        .iter()
        .filter_map(|line| match line {
            FormatLine::Rule(rule) => Some(rule.pattern.chars().count()),
            FormatLine::Verbatim(_) => None,
        })
        .max()
        .unwrap_or(0);
    debug!("Aligning owners at column {}", width + offset);

    let mut out = String::with_capacity(text.len());
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push_str(newline);
        }
        match line {
            FormatLine::Verbatim(raw) => out.push_str(raw.trim_end()),
            FormatLine::Rule(rule) => {
                let mut rendered = rule.pattern.to_string();
                if !rule.owners.is_empty() {
                    let padding = width - rule.pattern.chars().count() + offset;
                    rendered.push_str(&" ".repeat(padding));
                    rendered.push_str(&rule.owners.join(" "));
                }
                if let Some(comment) = rule.comment {
                    rendered.push(' ');
                    rendered.push_str(comment);
                }
                out.push_str(&rendered);
            }
        }
    }
    if text.ends_with('\n') {
        out.push_str(newline);
    }
    out
}

/// Returns true if the document is already aligned with the given offset.
pub fn is_aligned(text: &str, offset: usize) -> bool {
    align_owners(text, offset) == text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_owner_columns() {
        let input = "* @everyone\n/docs/ @docs @writers\n*.rs @rust\n";
        let expected = "*         @everyone\n/docs/    @docs @writers\n*.rs      @rust\n";
        assert_eq!(align_owners(input, 4), expected);
    }

    #[test]
    fn keeps_comments_blanks_and_unowned_rules() {
        let input = "# Owners\n\n*.js @frontend   # scripts\n/vendor/\n";
        let expected = "# Owners\n\n*.js        @frontend # scripts\n/vendor/\n";
        assert_eq!(align_owners(input, 4), expected);
    }

    #[test]
    fn respects_offset_and_missing_trailing_newline() {
        let input = "a @x\nlong/path @y";
        assert_eq!(align_owners(input, 1), "a         @x\nlong/path @y");
    }

    #[test]
    fn keeps_crlf_line_endings() {
        let aligned = "*       @a\r\n/docs/  @b\r\n";
        assert!(is_aligned(aligned, 2));

        let input = "* @a\r\n# note\r\n/docs/ @b";
        assert_eq!(align_owners(input, 2), "*       @a\r\n# note\r\n/docs/  @b");
    }

    #[test]
    fn formatting_is_stable() {
        let input = "* @a\n/some/dir/ @b @c # note\n";
        let once = align_owners(input, DEFAULT_ALIGNMENT_OFFSET);
        assert!(is_aligned(&once, DEFAULT_ALIGNMENT_OFFSET));
        assert!(!is_aligned(input, DEFAULT_ALIGNMENT_OFFSET));
    }

    #[test]
    fn empty_document() {
        assert_eq!(align_owners("", 4), "");
    }
}
