//! Rule data structures for CODEOWNERS files.
//!
//! A [`RuleSet`] is an immutable snapshot of one document: re-parse the text
//! whenever it changes instead of mutating a rule set in place.

use super::span::Span;
use serde::Serialize;
use std::fmt::{self, Display};

/// One pattern-to-owners binding from a CODEOWNERS document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Zero-based line number in the original document.
    pub line_number: usize,
    /// The raw pattern text (e.g., "*.rs", "/src/**", "docs/").
    pub pattern: String,
    /// Raw owner tokens in file order. Duplicates are kept; may be empty.
    pub owners: Vec<String>,
    /// Location of the pattern in the source document.
    pub pattern_span: Span,
    /// Location of each owner token, parallel to `owners`.
    pub owner_spans: Vec<Span>,
}

impl Rule {
    /// Creates a rule without source spans.
    ///
    /// Handy for building rule sets by hand; parsed rules always carry spans.
    pub fn new<I, S>(line_number: usize, pattern: impl Into<String>, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let owners: Vec<String> = owners.into_iter().map(Into::into).collect();
        Self {
            line_number,
            pattern: pattern.into(),
            owner_spans: vec![Span::default(); owners.len()],
            owners,
            pattern_span: Span::default(),
        }
    }

    /// Returns true if this rule explicitly assigns no owners.
    pub fn is_unowned(&self) -> bool {
        self.owners.is_empty()
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)?;
        for owner in &self.owners {
            write!(f, " {}", owner)?;
        }
        Ok(())
    }
}

/// All rules of one CODEOWNERS document, in file order.
///
/// Order is load-bearing: later rules override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule set from rules already in file order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in file order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns an iterator over the rules in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the document contained no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_creation() {
        let rule = Rule::new(3, "*.rs", ["@rustacean", "@org/team"]);
        assert_eq!(rule.line_number, 3);
        assert_eq!(rule.pattern, "*.rs");
        assert_eq!(rule.owners, vec!["@rustacean", "@org/team"]);
        assert_eq!(rule.owner_spans.len(), 2);
        assert!(!rule.is_unowned());
    }

    #[test]
    fn rule_without_owners() {
        let rule = Rule::new(0, "/vendor/", Vec::<String>::new());
        assert!(rule.is_unowned());
    }

    #[test]
    fn rule_display() {
        let rule = Rule::new(0, "*.rs", ["@alice", "@org/team"]);
        assert_eq!(rule.to_string(), "*.rs @alice @org/team");
    }

    #[test]
    fn rule_set_keeps_file_order() {
        let rules: RuleSet = [
            Rule::new(1, "*", ["@everyone"]),
            Rule::new(4, "*.md", ["@docs"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(rules.len(), 2);
        let lines: Vec<_> = rules.iter().map(|r| r.line_number).collect();
        assert_eq!(lines, vec![1, 4]);
    }

    #[test]
    fn rule_set_empty() {
        let rules = RuleSet::default();
        assert!(rules.is_empty());
        assert_eq!(rules.iter().count(), 0);
    }
}
