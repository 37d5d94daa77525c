//! Ownership resolution: which rule owns a path.
//!
//! CODEOWNERS precedence is "last matching rule wins". A rule with no owners
//! that matches last is a real answer ("owned by nobody") and must never fall
//! through to an earlier rule.
//!
//! [`resolve`] compiles patterns on the fly and scans forward. [`Resolver`]
//! compiles a rule set once and scans backwards, stopping at the first hit;
//! both always agree.

use crate::matching::CompiledPattern;
use crate::parse::{Rule, RuleSet};
use log::trace;
use serde::Serialize;
use thiserror::Error;

/// The outcome of resolving one path against a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum OwnershipResult {
    /// A rule matched. `owners` may be empty.
    Matched {
        /// Raw owner tokens of the winning rule, leading `@` preserved.
        owners: Vec<String>,
        /// Zero-based line of the winning rule.
        line_number: usize,
    },
    /// No rule matched the path.
    NoMatch,
}

impl OwnershipResult {
    fn from_rule(rule: &Rule) -> Self {
        OwnershipResult::Matched {
            owners: rule.owners.clone(),
            line_number: rule.line_number,
        }
    }

    /// Returns the owners of a match, or `None` when nothing matched.
    pub fn owners(&self) -> Option<&[String]> {
        match self {
            OwnershipResult::Matched { owners, .. } => Some(owners),
            OwnershipResult::NoMatch => None,
        }
    }

    /// Returns the zero-based line of the winning rule.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            OwnershipResult::Matched { line_number, .. } => Some(*line_number),
            OwnershipResult::NoMatch => None,
        }
    }

    /// Returns true if some rule matched.
    pub fn is_matched(&self) -> bool {
        matches!(self, OwnershipResult::Matched { .. })
    }
}

/// A query path that breaks the resolver's input contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The path was empty.
    #[error("path must not be empty")]
    EmptyPath,
    /// The path was absolute instead of relative to the rules root.
    #[error("path '{0}' must be relative to the repository root")]
    AbsolutePath(String),
}

fn check_path(path: &str) -> Result<(), ResolveError> {
    if path.is_empty() {
        return Err(ResolveError::EmptyPath);
    }
    if path.starts_with('/') {
        return Err(ResolveError::AbsolutePath(path.to_string()));
    }
    Ok(())
}

/// Resolves a path against a rule set, compiling patterns as it goes.
///
/// `path` must be relative to the rules root and use `/` separators.
///
/// # Panics
///
/// Panics if `path` is empty or absolute; see [`try_resolve`] for a
/// non-panicking variant.
pub fn resolve(rule_set: &RuleSet, path: &str, is_dir: bool) -> OwnershipResult {
    match try_resolve(rule_set, path, is_dir) {
        Ok(result) => result,
        Err(e) => panic!("invalid ownership query: {}", e),
    }
}

/// Resolves a path against a rule set, rejecting malformed query paths.
pub fn try_resolve(
    rule_set: &RuleSet,
    path: &str,
    is_dir: bool,
) -> Result<OwnershipResult, ResolveError> {
    check_path(path)?;

    let mut best = None;
    for rule in rule_set {
        if CompiledPattern::new(&rule.pattern).matches(path, is_dir) {
            trace!("'{}' matches line {}", path, rule.line_number);
            best = Some(rule);
        }
    }

    Ok(best.map_or(OwnershipResult::NoMatch, OwnershipResult::from_rule))
}

/// A rule set with every pattern compiled up front.
///
/// `Resolver` is immutable and `Send + Sync`; share it across threads and
/// build a new one when the document changes.
#[derive(Debug, Clone)]
pub struct Resolver {
    rule_set: RuleSet,
    patterns: Vec<CompiledPattern>,
}

impl Resolver {
    /// Compiles every pattern of the rule set.
    pub fn new(rule_set: RuleSet) -> Self {
        let patterns = rule_set
            .iter()
            .map(|rule| CompiledPattern::new(&rule.pattern))
            .collect();
        Self { rule_set, patterns }
    }

    /// Returns the underlying rule set.
    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Returns the compiled pattern of each rule, in file order.
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Resolves a path to the owners of the last matching rule.
    ///
    /// # Panics
    ///
    /// Panics if `path` is empty or absolute; see [`Resolver::try_resolve`].
    pub fn resolve(&self, path: &str, is_dir: bool) -> OwnershipResult {
        match self.try_resolve(path, is_dir) {
            Ok(result) => result,
            Err(e) => panic!("invalid ownership query: {}", e),
        }
    }

    /// Resolves a path, rejecting malformed query paths.
    pub fn try_resolve(&self, path: &str, is_dir: bool) -> Result<OwnershipResult, ResolveError> {
        check_path(path)?;
        Ok(self
            .winning_rule(path, is_dir)
            .map_or(OwnershipResult::NoMatch, OwnershipResult::from_rule))
    }

    /// Returns the last rule matching the path, if any.
    pub fn winning_rule(&self, path: &str, is_dir: bool) -> Option<&Rule> {
        self.rule_set
            .iter()
            .zip(&self.patterns)
            .rev()
            .find(|(_, pattern)| pattern.matches(path, is_dir))
            .map(|(rule, _)| rule)
    }

    /// Returns every rule matching the path, in file order.
    ///
    /// The last element, if any, is the winning rule.
    pub fn matching_rules(&self, path: &str, is_dir: bool) -> Vec<&Rule> {
        self.rule_set
            .iter()
            .zip(&self.patterns)
            .filter(|(_, pattern)| pattern.matches(path, is_dir))
            .map(|(rule, _)| rule)
            .collect()
    }
}

impl From<RuleSet> for Resolver {
    fn from(rule_set: RuleSet) -> Self {
        Self::new(rule_set)
    }
}
