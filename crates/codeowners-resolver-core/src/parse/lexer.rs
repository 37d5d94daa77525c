//! Lexer and token parsers for CODEOWNERS files.
//!
//! This module contains nom-based parsers for the pieces of a line:
//! comments, whitespace-delimited fields, and owner classification.

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, space0},
    combinator::rest,
};
use serde::Serialize;

/// Characters that can appear in a field (pattern or owner).
fn is_field_char(c: char) -> bool {
    !c.is_whitespace()
}

/// Parses a complete comment line (optional whitespace + # + content).
pub fn parse_comment_line(input: &str) -> IResult<&str, &str> {
    (space0, char('#'), rest)
        .map(|(_, _, content)| content)
        .parse(input)
}

/// Checks if a line is blank (empty or only whitespace).
pub fn is_blank_line(input: &str) -> bool {
    input.trim().is_empty()
}

/// Returns the part of a line before the first unescaped `#`.
///
/// A backslash escapes the character that follows it, so `foo\#bar` keeps
/// its hash while `foo #bar` is cut at the space.
pub fn strip_inline_comment(input: &str) -> &str {
    let mut escaped = false;
    for (idx, ch) in input.char_indices() {
        match ch {
            '\\' => escaped = !escaped,
            '#' if !escaped => return &input[..idx],
            _ => escaped = false,
        }
    }
    input
}

/// A whitespace-delimited field and its byte offset within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// The raw field text.
    pub text: &'a str,
    /// Byte offset of the field start within the scanned input.
    pub offset: usize,
}

/// Parses one field, skipping any whitespace before it.
///
/// Returns the number of whitespace bytes skipped together with the field.
pub fn parse_field(input: &str) -> IResult<&str, (usize, &str)> {
    let (after_ws, leading_ws) = take_while(char::is_whitespace)(input)?;
    let (remaining, field) = take_while1(is_field_char)(after_ws)?;
    Ok((remaining, (leading_ws.len(), field)))
}

/// Splits a line into whitespace-delimited fields with their offsets.
pub fn split_fields(input: &str) -> Vec<Field<'_>> {
    let mut fields = Vec::new();
    let mut current = input;
    let mut offset = 0;

    while let Ok((remaining, (skipped, text))) = parse_field(current) {
        offset += skipped;
        fields.push(Field { text, offset });
        offset += text.len();
        current = remaining;
    }

    fields
}

/// Classifies an owner string into its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OwnerKind<'a> {
    /// A GitHub user (@username).
    User { name: &'a str },
    /// A GitHub team (@org/team).
    Team { org: &'a str, team: &'a str },
    /// An email address.
    Email { email: &'a str },
    /// Unknown/invalid format.
    Unknown { raw: &'a str },
}

impl OwnerKind<'_> {
    /// Short lowercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            OwnerKind::User { .. } => "user",
            OwnerKind::Team { .. } => "team",
            OwnerKind::Email { .. } => "email",
            OwnerKind::Unknown { .. } => "unknown",
        }
    }
}

/// Classifies an owner text string into its type.
pub fn classify_owner(text: &str) -> OwnerKind<'_> {
    if let Some(stripped) = text.strip_prefix('@') {
        if let Some((org, team)) = stripped.split_once('/') {
            // Teams are exactly `@org/team`; deeper paths name nothing
            if !org.is_empty() && !team.is_empty() && !team.contains('/') {
                return OwnerKind::Team { org, team };
            }
            return OwnerKind::Unknown { raw: text };
        }
        if !stripped.is_empty() {
            return OwnerKind::User { name: stripped };
        }
        // Just "@" with nothing after
        return OwnerKind::Unknown { raw: text };
    } else if text.contains('@') {
        return OwnerKind::Email { email: text };
    }

    OwnerKind::Unknown { raw: text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_comment_line_with_leading_whitespace() {
        let (_rest, content) = parse_comment_line("   # comment").unwrap();
        assert_eq!(content, " comment");
    }

    #[test]
    fn parse_comment_line_rejects_rules() {
        assert!(parse_comment_line("*.rs @owner # trailing").is_err());
    }

    #[test]
    fn is_blank_line_empty() {
        assert!(is_blank_line(""));
        assert!(is_blank_line("   "));
        assert!(is_blank_line("\t  \t"));
        assert!(!is_blank_line("*.rs @owner"));
        assert!(!is_blank_line("# comment"));
    }

    #[test]
    fn strip_inline_comment_cuts_at_hash() {
        assert_eq!(strip_inline_comment("*.js @frontend # js"), "*.js @frontend ");
        assert_eq!(strip_inline_comment("# only comment"), "");
        assert_eq!(strip_inline_comment("no comment"), "no comment");
    }

    #[test]
    fn strip_inline_comment_honours_escapes() {
        assert_eq!(strip_inline_comment(r"foo\#bar @o # c"), r"foo\#bar @o ");
        // An escaped backslash does not escape the hash after it
        assert_eq!(strip_inline_comment(r"foo\\#bar"), r"foo\\");
    }

    #[test]
    fn split_fields_reports_offsets() {
        let fields = split_fields("  /src/ @dev\t@github/core ");
        assert_eq!(
            fields,
            vec![
                Field { text: "/src/", offset: 2 },
                Field { text: "@dev", offset: 8 },
                Field { text: "@github/core", offset: 13 },
            ]
        );
    }

    #[test]
    fn split_fields_empty_input() {
        assert!(split_fields("").is_empty());
        assert!(split_fields("   \t").is_empty());
    }

    #[test]
    fn classify_owner_user() {
        assert_eq!(classify_owner("@octocat"), OwnerKind::User { name: "octocat" });
        assert_eq!(classify_owner("@user_123").label(), "user");
    }

    #[test]
    fn classify_owner_team() {
        assert_eq!(
            classify_owner("@github/core"),
            OwnerKind::Team {
                org: "github",
                team: "core"
            }
        );
    }

    #[test]
    fn classify_owner_email() {
        assert_eq!(
            classify_owner("user.name@company.co.uk"),
            OwnerKind::Email {
                email: "user.name@company.co.uk"
            }
        );
    }

    #[test]
    fn classify_owner_unknown() {
        assert_eq!(classify_owner("noatsign").label(), "unknown");
        assert_eq!(classify_owner("@").label(), "unknown");
        assert_eq!(classify_owner("@/team").label(), "unknown");
        assert_eq!(classify_owner("@org/").label(), "unknown");
    }

    #[test]
    fn classify_owner_nested_team_path_is_unknown() {
        assert_eq!(
            classify_owner("@org/team/extra"),
            OwnerKind::Unknown {
                raw: "@org/team/extra"
            }
        );
    }
}
