//! Line and file-level parsers for CODEOWNERS files.
//!
//! This module combines the lexer components to turn document text into an
//! ordered [`RuleSet`]. Parsing is lenient and never fails: lines that carry
//! no pattern are skipped, and owner tokens are accepted verbatim.

use super::ast::{Rule, RuleSet};
use super::lexer::{is_blank_line, parse_comment_line, split_fields, strip_inline_comment};
use super::span::Span;
use log::{debug, trace};

/// Parses a single line of a CODEOWNERS file.
///
/// Returns `None` for blank lines, comment lines, and lines whose content
/// before the first unescaped `#` is empty.
fn parse_line(line_text: &str, line_idx: usize, line_offset: usize) -> Option<Rule> {
    if is_blank_line(line_text) || parse_comment_line(line_text).is_ok() {
        return None;
    }

    let effective = strip_inline_comment(line_text);
    let mut fields = split_fields(effective).into_iter();
    let pattern = fields.next()?;

    let span_of = |offset: usize, text: &str| {
        Span::new(line_offset + offset, line_idx + 1, offset + 1, text.len())
    };

    let (owners, owner_spans) = fields
        .map(|field| (field.text.to_string(), span_of(field.offset, field.text)))
        .unzip();

    Some(Rule {
        line_number: line_idx,
        pattern: pattern.text.to_string(),
        owners,
        pattern_span: span_of(pattern.offset, pattern.text),
        owner_spans,
    })
}

/// Parses CODEOWNERS document text into an ordered rule set.
///
/// Line numbers on the returned rules are zero-based and refer to the
/// original document, so skipped comments and blanks never shift them.
pub fn parse_codeowners(input: &str) -> RuleSet {
    debug!("Parsing CODEOWNERS file ({} bytes)", input.len());
    let mut rules = Vec::new();
    let mut offset = 0;
    let mut remaining = input;

    for (line_idx, line_text) in input.lines().enumerate() {
        match parse_line(line_text, line_idx, offset) {
            Some(rule) => {
                trace!(
                    "Line {}: rule '{}' with {} owner(s)",
                    line_idx,
                    rule.pattern,
                    rule.owners.len()
                );
                rules.push(rule);
            }
            None => trace!("Line {}: no rule", line_idx),
        }

        // Step over the line ending actually present in the input so byte
        // offsets stay correct for both LF and CRLF documents.
        let after_content = &remaining[line_text.len()..];
        let line_with_ending_len = if after_content.starts_with("\r\n") {
            line_text.len() + 2
        } else if after_content.starts_with('\n') {
            line_text.len() + 1
        } else {
            line_text.len()
        };

        offset += line_with_ending_len;
        remaining = &remaining[line_with_ending_len..];
    }

    debug!("Parsing complete: {} rule(s)", rules.len());
    RuleSet::new(rules)
}
