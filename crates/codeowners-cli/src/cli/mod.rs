//! CLI module for the CODEOWNERS resolver.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support. Global options locate the repository and
//! its rules file; subcommands pick the question being asked.

pub mod config;
pub mod links;
pub mod output;

use clap::{Parser, Subcommand};
use codeowners_resolver_core::format::DEFAULT_ALIGNMENT_OFFSET;
use std::path::PathBuf;

/// CODEOWNERS resolver - answers "who owns this path?" for GitHub CODEOWNERS files.
///
/// Resolves ownership with GitHub's last-matching-rule-wins semantics and
/// reports the rule line that decided it. Supports both human-readable and
/// JSON output formats.
#[derive(Parser, Debug)]
#[command(name = "codeowners-resolver")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the repository root.
    #[arg(long, env = "REPOSITORY_PATH", default_value = ".", global = true)]
    pub repository_path: PathBuf,

    /// Explicit CODEOWNERS file, instead of searching the repository.
    #[arg(long, env = "CODEOWNERS_FILE", global = true)]
    pub codeowners_file: Option<PathBuf>,

    /// GitHub web URL used for owner links (for GitHub Enterprise).
    #[arg(long, env = "GITHUB_URL", default_value = "https://github.com", global = true)]
    pub github_url: String,

    /// Spaces between the longest pattern and the owner column for `fmt`.
    #[arg(
        long,
        env = "CODEOWNERS_ALIGNMENT_OFFSET",
        default_value_t = DEFAULT_ALIGNMENT_OFFSET,
        global = true
    )]
    pub alignment_offset: usize,

    /// Output results as JSON instead of human-readable format.
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Increase verbosity level (-v info, -vv debug, -vvv trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// What to ask about the CODEOWNERS file.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the owners of one or more paths.
    Owners {
        /// Paths to resolve, relative to the repository root or absolute.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List every rule matching a path and mark the one that wins.
    Explain {
        /// Path to explain.
        path: PathBuf,
    },
    /// List repository files no rule matches.
    Unowned {
        /// Also report files ignored by .gitignore.
        #[arg(long)]
        include_ignored: bool,
    },
    /// List every owner token in the CODEOWNERS file with its profile link.
    Tokens,
    /// List the distinct owner names in the CODEOWNERS file, teams first.
    Names,
    /// Align the owner column of every rule.
    Fmt {
        /// Don't print the result; exit with a failure if the file is not aligned.
        #[arg(long)]
        check: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owners_paths() {
        let args = Args::parse_from(["codeowners-resolver", "owners", "src/main.rs", "docs/"]);
        assert_eq!(
            args.command,
            Command::Owners {
                paths: vec![PathBuf::from("src/main.rs"), PathBuf::from("docs/")]
            }
        );
    }

    #[test]
    fn test_owners_requires_path() {
        assert!(Args::try_parse_from(["codeowners-resolver", "owners"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["codeowners-resolver"]).is_err());
    }

    #[test]
    fn test_fmt_check_flag() {
        let args = Args::parse_from(["codeowners-resolver", "fmt", "--check"]);
        assert_eq!(args.command, Command::Fmt { check: true });

        let args = Args::parse_from(["codeowners-resolver", "fmt"]);
        assert_eq!(args.command, Command::Fmt { check: false });
    }

    #[test]
    fn test_json_output_flag() {
        let args = Args::parse_from(["codeowners-resolver", "names", "--json"]);
        assert!(args.json);

        let args = Args::parse_from(["codeowners-resolver", "-j", "names"]);
        assert!(args.json);
    }

    #[test]
    fn test_verbose_flag() {
        let args = Args::parse_from(["codeowners-resolver", "tokens"]);
        assert_eq!(args.verbose, 0);

        let args = Args::parse_from(["codeowners-resolver", "-v", "tokens"]);
        assert_eq!(args.verbose, 1);

        let args = Args::parse_from(["codeowners-resolver", "tokens", "-vvv"]);
        assert_eq!(args.verbose, 3);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["codeowners-resolver", "names"]);
        assert_eq!(args.repository_path, PathBuf::from("."));
        assert_eq!(args.github_url, "https://github.com");
        assert_eq!(args.alignment_offset, DEFAULT_ALIGNMENT_OFFSET);
        assert!(args.codeowners_file.is_none());
    }

    #[test]
    fn test_alignment_offset() {
        let args = Args::parse_from(["codeowners-resolver", "fmt", "--alignment-offset", "2"]);
        assert_eq!(args.alignment_offset, 2);
    }

    #[test]
    fn test_unowned_flags() {
        let args = Args::parse_from(["codeowners-resolver", "unowned"]);
        assert_eq!(args.command, Command::Unowned { include_ignored: false });

        let args = Args::parse_from(["codeowners-resolver", "unowned", "--include-ignored"]);
        assert_eq!(args.command, Command::Unowned { include_ignored: true });
    }
}
