//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for
//! ownership answers, rule explanations, owner tokens and reports.

use codeowners_resolver_core::{OwnershipResult, PatternScope, Rule};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

/// Summarizes an owner list the way a status bar would.
///
/// `@a`, `@a & 1 other`, `@a & N others`, or `None` for an empty list.
pub fn owners_summary(owners: &[String]) -> String {
    match owners {
        [] => "None".to_string(),
        [only] => only.clone(),
        [first, _] => format!("{} & 1 other", first),
        [first, rest @ ..] => format!("{} & {} others", first, rest.len()),
    }
}

/// Ownership of one queried path.
#[derive(Debug, Serialize)]
pub struct PathOwnership<'a> {
    /// Repository-relative path that was resolved.
    pub path: &'a str,
    /// Whether the path was resolved as a directory.
    pub is_directory: bool,
    /// The resolver's answer.
    #[serde(flatten)]
    pub result: &'a OwnershipResult,
    /// `file:line` of the winning rule, one-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl<'a> PathOwnership<'a> {
    /// Creates a report entry, pointing matched results at `codeowners_name`.
    pub fn new(
        path: &'a str,
        is_directory: bool,
        result: &'a OwnershipResult,
        codeowners_name: &str,
    ) -> Self {
        let source = result
            .line_number()
            .map(|line| format!("{}:{}", codeowners_name, line + 1));
        Self {
            path,
            is_directory,
            result,
            source,
        }
    }
}

/// One rule matching an explained path.
#[derive(Debug, Serialize)]
pub struct RuleMatch<'a> {
    /// One-based line of the rule.
    pub line: usize,
    /// The rule's pattern.
    pub pattern: &'a str,
    /// The rule's owners.
    pub owners: &'a [String],
    /// Whether this rule decides ownership.
    pub winner: bool,
}

/// All rules matching a path, in file order.
#[derive(Debug, Serialize)]
pub struct Explanation<'a> {
    /// Repository-relative path that was explained.
    pub path: &'a str,
    /// Whether the path was resolved as a directory.
    pub is_directory: bool,
    /// Matching rules; the last one wins.
    pub matches: Vec<RuleMatch<'a>>,
    /// What the winning pattern covers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl<'a> Explanation<'a> {
    /// Builds an explanation from the matching rules and the winner's scope.
    pub fn new(
        path: &'a str,
        is_directory: bool,
        rules: &[&'a Rule],
        scope: Option<PatternScope>,
    ) -> Self {
        let last = rules.len().saturating_sub(1);
        let matches = rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| RuleMatch {
                line: rule.line_number + 1,
                pattern: &rule.pattern,
                owners: &rule.owners,
                winner: idx == last,
            })
            .collect();
        Self {
            path,
            is_directory,
            matches,
            description: scope.map(|s| s.describe()),
        }
    }
}

/// An owner token with its position and profile link.
#[derive(Debug, Serialize)]
pub struct TokenEntry<'a> {
    /// One-based line.
    pub line: usize,
    /// One-based character column.
    pub column: usize,
    /// Raw token text.
    pub text: &'a str,
    /// `user`, `team`, `email` or `unknown`.
    pub kind: &'static str,
    /// Profile URL, for users and teams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Files no rule matches.
#[derive(Debug, Serialize)]
pub struct UnownedReport<'a> {
    /// Number of files checked.
    pub checked: usize,
    /// Paths without a matching rule.
    pub unowned: Vec<&'a str>,
}

/// Result of aligning the owner column.
#[derive(Debug, Serialize)]
pub struct FormatReport<'a> {
    /// Whether the file was already aligned.
    pub aligned: bool,
    /// The aligned document.
    pub formatted: &'a str,
}

/// Writes a value as pretty JSON followed by a newline.
pub fn write_json<W, T>(writer: &mut W, value: &T) -> std::io::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", json)
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    fn owner_list(&self, owners: &[String]) -> String {
        let joined = owners.join(" ");
        if self.use_colors {
            joined.cyan().to_string()
        } else {
            joined
        }
    }

    fn dimmed(&self, text: &str) -> String {
        if self.use_colors {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Writes the ownership of one path.
    pub fn write_ownership(&mut self, entry: &PathOwnership<'_>) -> std::io::Result<()> {
        let path = if entry.is_directory {
            format!("{}/", entry.path)
        } else {
            entry.path.to_string()
        };
        let path = if self.use_colors {
            path.bold().to_string()
        } else {
            path
        };

        match entry.result {
            OwnershipResult::NoMatch => {
                let message = self.dimmed("no owners");
                writeln!(self.writer, "{}: {}", path, message)?;
            }
            OwnershipResult::Matched { owners, .. } if owners.is_empty() => {
                let message = if self.use_colors {
                    "owned by nobody".yellow().to_string()
                } else {
                    "owned by nobody".to_string()
                };
                writeln!(self.writer, "{}: {}", path, message)?;
            }
            OwnershipResult::Matched { owners, .. } => {
                let list = self.owner_list(owners);
                writeln!(self.writer, "{}: {}", path, list)?;
                writeln!(self.writer, "  summary: {}", owners_summary(owners))?;
            }
        }

        if let Some(source) = &entry.source {
            let source = self.dimmed(source);
            writeln!(self.writer, "  rule: {}", source)?;
        }
        Ok(())
    }

    /// Writes every matching rule for a path, marking the winner.
    pub fn write_explanation(&mut self, explanation: &Explanation<'_>) -> std::io::Result<()> {
        writeln!(self.writer, "{}", explanation.path)?;

        if explanation.matches.is_empty() {
            let message = self.dimmed("no rule matches this path");
            writeln!(self.writer, "  {}", message)?;
            return Ok(());
        }

        let width = explanation
            .matches
            .iter()
            .map(|m| m.pattern.chars().count())
            .max()
            .unwrap_or(0);
        for rule in &explanation.matches {
            let owners = if rule.owners.is_empty() {
                self.dimmed("(no owners)")
            } else {
                self.owner_list(rule.owners)
            };
            let line = format!(
                "line {:>4}  {:<width$}  {}",
                rule.line,
                rule.pattern,
                owners,
                width = width
            );
            if rule.winner {
                let marker = if self.use_colors {
                    "=>".green().bold().to_string()
                } else {
                    "=>".to_string()
                };
                writeln!(self.writer, "{} {}", marker, line)?;
            } else {
                writeln!(self.writer, "   {}", line)?;
            }
        }

        if let Some(description) = explanation.description {
            writeln!(self.writer, "  {}", description)?;
        }
        Ok(())
    }

    /// Writes one owner token.
    pub fn write_token(&mut self, token: &TokenEntry<'_>) -> std::io::Result<()> {
        let url = token.url.as_deref().unwrap_or("-");
        let url = self.dimmed(url);
        writeln!(
            self.writer,
            "{}:{}\t{:<7}\t{}\t{}",
            token.line, token.column, token.kind, token.text, url
        )
    }

    /// Writes a plain line.
    pub fn write_line(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Writes a document without adding a trailing newline.
    pub fn write_document(&mut self, text: &str) -> std::io::Result<()> {
        write!(self.writer, "{}", text)
    }

    /// Writes the unowned files report with a summary line.
    pub fn write_unowned(&mut self, report: &UnownedReport<'_>) -> std::io::Result<()> {
        for path in &report.unowned {
            writeln!(self.writer, "  {}", path)?;
        }
        if report.unowned.is_empty() {
            self.write_success(&format!("All {} file(s) have owners", report.checked))
        } else {
            writeln!(self.writer)?;
            self.write_failure(&format!(
                "Found {} unowned file(s) out of {}",
                report.unowned.len(),
                report.checked
            ))
        }
    }

    /// Writes a success summary.
    pub fn write_success(&mut self, message: &str) -> std::io::Result<()> {
        let message = format!("✓ {}", message);
        if self.use_colors {
            writeln!(self.writer, "{}", message.green().bold())
        } else {
            writeln!(self.writer, "{}", message)
        }
    }

    /// Writes a failure summary.
    pub fn write_failure(&mut self, message: &str) -> std::io::Result<()> {
        let message = format!("✗ {}", message);
        if self.use_colors {
            writeln!(self.writer, "{}", message.red().bold())
        } else {
            writeln!(self.writer, "{}", message)
        }
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)
        } else {
            writeln!(self.writer, "Error: {}", message)
        }
    }
}
