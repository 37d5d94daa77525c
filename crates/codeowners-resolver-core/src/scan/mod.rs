//! Owner token scanning.
//!
//! Finds owner-like tokens (`@user`, `@org/team`, `user@example.com`) on
//! CODEOWNERS lines for link generation, hovers and autocompletion. The
//! scanner is purely lexical: a token is any whitespace-delimited run
//! containing `@`, found before the first unescaped `#`.

use crate::parse::{OwnerKind, classify_owner, strip_inline_comment};
use serde::Serialize;
use std::ops::Range;

/// One owner-like token found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OwnerToken<'a> {
    /// The raw token text, punctuation included.
    pub text: &'a str,
    /// Zero-based line number the token was found on.
    pub line_number: usize,
    /// Zero-based character column of the first character.
    pub start: usize,
    /// Zero-based character column just past the last character.
    pub end: usize,
    /// Byte offset of the token within the line.
    pub byte_offset: usize,
}

impl<'a> OwnerToken<'a> {
    /// Byte range of the token within its line.
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_offset..self.byte_offset + self.text.len()
    }

    /// The token without its leading `@`.
    pub fn normalized(&self) -> &'a str {
        self.text.strip_prefix('@').unwrap_or(self.text)
    }

    /// Classifies the token as user, team, email or unknown.
    pub fn kind(&self) -> OwnerKind<'a> {
        classify_owner(self.text)
    }

    /// Returns true for `@`-prefixed tokens, the only ones that link to a
    /// profile or team page. Emails are excluded.
    pub fn is_linkable(&self) -> bool {
        self.text.starts_with('@')
    }
}

/// Iterator over the owner tokens of one line, left to right.
#[derive(Debug, Clone)]
pub struct OwnerTokens<'a> {
    remaining: &'a str,
    line_number: usize,
    byte_pos: usize,
    char_pos: usize,
}

impl<'a> Iterator for OwnerTokens<'a> {
    type Item = OwnerToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let skipped = self.remaining.len() - self.remaining.trim_start().len();
            self.advance(skipped);
            if self.remaining.is_empty() {
                return None;
            }

            let len = self
                .remaining
                .find(char::is_whitespace)
                .unwrap_or(self.remaining.len());
            let text = &self.remaining[..len];
            let (byte_offset, start) = (self.byte_pos, self.char_pos);
            self.advance(len);

            if text.contains('@') {
                return Some(OwnerToken {
                    text,
                    line_number: self.line_number,
                    start,
                    end: self.char_pos,
                    byte_offset,
                });
            }
        }
    }
}

impl<'a> OwnerTokens<'a> {
    fn advance(&mut self, bytes: usize) {
        let (consumed, rest) = self.remaining.split_at(bytes);
        self.char_pos += consumed.chars().count();
        self.byte_pos += bytes;
        self.remaining = rest;
    }
}

/// Scans one line for owner tokens.
///
/// The returned iterator borrows the line and holds no other state, so
/// calling this again restarts the scan.
pub fn scan_line(line: &str, line_number: usize) -> OwnerTokens<'_> {
    OwnerTokens {
        remaining: strip_inline_comment(line),
        line_number,
        byte_pos: 0,
        char_pos: 0,
    }
}

/// Scans every line of a document for owner tokens.
pub fn scan_document(text: &str) -> impl Iterator<Item = OwnerToken<'_>> {
    text.lines()
        .enumerate()
        .flat_map(|(line_number, line)| scan_line(line, line_number))
}

/// Collects the distinct owner names used in a document, for completion.
///
/// A leading `@` is stripped. Teams (`org/team`) sort first, then everything
/// else; each group is sorted lexicographically.
pub fn collect_owner_names(text: &str) -> Vec<String> {
    let mut names: Vec<&str> = scan_document(text).map(|t| t.normalized()).collect();
    names.sort_by_key(|name| (!name.contains('/'), *name));
    names.dedup();
    names.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<&str> {
        scan_line(line, 0).map(|t| t.text).collect()
    }

    #[test]
    fn finds_users_and_emails_before_comment() {
        let line = "*.go @golang-team docs@example.com # trailing comment @ignored";
        let tokens: Vec<_> = scan_line(line, 7).collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "@golang-team");
        assert_eq!((tokens[0].start, tokens[0].end), (5, 17));
        assert_eq!(tokens[1].text, "docs@example.com");
        assert_eq!((tokens[1].start, tokens[1].end), (18, 34));
        assert!(tokens.iter().all(|t| t.line_number == 7));
        assert_eq!(&line[tokens[1].byte_range()], "docs@example.com");
    }

    #[test]
    fn reports_every_occurrence_in_order() {
        assert_eq!(
            texts("* @a @org/team @a a@b.c"),
            vec!["@a", "@org/team", "@a", "a@b.c"]
        );
        let tokens: Vec<_> = scan_line("* @a @a", 0).collect();
        assert_eq!(tokens[0].start, 2);
        assert_eq!(tokens[1].start, 5);
    }

    #[test]
    fn pattern_without_at_is_skipped() {
        assert_eq!(texts("/src/**/*.rs @owner"), vec!["@owner"]);
        assert!(texts("/src/ no owners here").is_empty());
    }

    #[test]
    fn comment_lines_have_no_tokens() {
        assert!(texts("# @someone wrote this").is_empty());
        assert!(texts("").is_empty());
    }

    #[test]
    fn escaped_hash_does_not_start_a_comment() {
        assert_eq!(texts(r"\#file @owner"), vec!["@owner"]);
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let line = "/dökümanlar/ @ekip";
        let token = scan_line(line, 0).next().unwrap();
        assert_eq!(token.start, 13);
        assert_eq!(token.byte_offset, 15);
        assert_eq!(&line[token.byte_range()], "@ekip");
    }

    #[test]
    fn scanning_is_restartable() {
        let line = "* @a @b";
        let first: Vec<_> = scan_line(line, 0).collect();
        let second: Vec<_> = scan_line(line, 0).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn token_normalization_and_kinds() {
        let tokens: Vec<_> = scan_line("* @alice @org/team bob@example.com", 0).collect();
        assert_eq!(tokens[0].normalized(), "alice");
        assert_eq!(tokens[0].kind().label(), "user");
        assert!(tokens[0].is_linkable());
        assert_eq!(tokens[1].normalized(), "org/team");
        assert_eq!(tokens[1].kind().label(), "team");
        assert_eq!(tokens[2].normalized(), "bob@example.com");
        assert_eq!(tokens[2].kind().label(), "email");
        assert!(!tokens[2].is_linkable());
    }

    #[test]
    fn document_scan_tracks_lines() {
        let doc = "# header @nobody\n* @a\n\n/docs/ @b c@d.e\n";
        let found: Vec<_> = scan_document(doc).map(|t| (t.line_number, t.text)).collect();
        assert_eq!(found, vec![(1, "@a"), (3, "@b"), (3, "c@d.e")]);
    }

    #[test]
    fn owner_names_put_teams_first() {
        let doc = "* @zed @acme/web\n*.md @amy docs@example.com @zed\n/api/ @acme/api\n";
        assert_eq!(
            collect_owner_names(doc),
            vec!["acme/api", "acme/web", "amy", "docs@example.com", "zed"]
        );
    }
}
