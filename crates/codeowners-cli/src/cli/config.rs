//! Configuration handling for the CLI.
//!
//! This module turns CLI arguments into a validated configuration: a
//! canonical repository root, the CODEOWNERS file to read, and the
//! presentation settings. It also converts user-supplied paths into the
//! repository-relative form the resolver expects.

use crate::cli::Args;
use crate::cli::links::OwnerLinks;
use codeowners_resolver_core::find_codeowners_file;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// No CODEOWNERS file could be found.
    #[error("CODEOWNERS file not found: {0}")]
    CodeownersNotFound(String),

    /// Failed to read CODEOWNERS file.
    #[error("failed to read CODEOWNERS file '{path}': {source}")]
    ReadCodeowners {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A query path points outside the repository.
    #[error("path '{0}' is not inside the repository")]
    OutsideRepository(String),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The command ran successfully.
    Success = 0,
    /// Application startup failed (wrong configuration or internal error).
    StartupFailure = 1,
    /// A check failed: unowned files were found, or the file is not aligned.
    ValidationFailed = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// A path ready to hand to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPath {
    /// Repository-relative path with `/` separators.
    pub path: String,
    /// Whether the path names a directory.
    pub is_dir: bool,
}

/// Validated and processed configuration for running a command.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Canonical path to the repository root.
    pub repo_path: PathBuf,
    /// Canonical path to the CODEOWNERS file.
    pub codeowners_path: PathBuf,
    /// Link builder for owner profiles.
    pub links: OwnerLinks,
    /// Spaces between the longest pattern and the owners for `fmt`.
    pub alignment_offset: usize,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let repo_path = args.repository_path.canonicalize().map_err(|e| {
            ConfigError::Invalid(format!(
                "repository path '{}' is invalid: {}",
                args.repository_path.display(),
                e
            ))
        })?;
        if !repo_path.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "repository path '{}' is not a directory",
                args.repository_path.display()
            )));
        }

        let codeowners_path = match &args.codeowners_file {
            Some(path) if path.is_file() => path.canonicalize().map_err(|e| {
                ConfigError::CodeownersNotFound(format!("'{}': {}", path.display(), e))
            })?,
            Some(path) => {
                return Err(ConfigError::CodeownersNotFound(format!(
                    "'{}' is not a file",
                    path.display()
                )));
            }
            None => find_codeowners_file(&repo_path).ok_or_else(|| {
                ConfigError::CodeownersNotFound(format!(
                    "searched '{}' in: .github/CODEOWNERS, CODEOWNERS, docs/CODEOWNERS",
                    repo_path.display()
                ))
            })?,
        };

        let github_url = args.github_url.trim();
        if github_url.is_empty() {
            return Err(ConfigError::Invalid("GitHub URL must not be empty".to_string()));
        }

        Ok(Self {
            repo_path,
            codeowners_path,
            links: OwnerLinks::new(github_url),
            alignment_offset: args.alignment_offset,
            json_output: args.json,
        })
    }

    /// Reads the CODEOWNERS file.
    pub fn read_codeowners(&self) -> Result<String, ConfigError> {
        std::fs::read_to_string(&self.codeowners_path).map_err(|source| {
            ConfigError::ReadCodeowners {
                path: self.codeowners_path.display().to_string(),
                source,
            }
        })
    }

    /// Name of the CODEOWNERS file relative to the repository, for `file:line`
    /// locations. Files outside the repository keep their full path.
    pub fn codeowners_name(&self) -> String {
        self.codeowners_path
            .strip_prefix(&self.repo_path)
            .unwrap_or(&self.codeowners_path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Converts a user-supplied path into a resolver query.
    ///
    /// Relative paths are taken relative to the repository root; absolute
    /// paths must lie inside it. Whether the path is a directory comes from
    /// the filesystem, or from a trailing `/` when it does not exist.
    pub fn query_path(&self, raw: &Path) -> Result<QueryPath, ConfigError> {
        let outside = || ConfigError::OutsideRepository(raw.display().to_string());

        let joined = if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            self.repo_path.join(raw)
        };
        let absolute = joined.canonicalize().unwrap_or(joined);

        let trailing_slash = raw
            .to_str()
            .is_some_and(|s| s.ends_with('/') || s.ends_with('\\'));
        let is_dir = absolute.is_dir() || trailing_slash;

        let relative = absolute.strip_prefix(&self.repo_path).map_err(|_| outside())?;
        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str().ok_or_else(outside)?),
                Component::CurDir => {}
                _ => return Err(outside()),
            }
        }
        if parts.is_empty() {
            return Err(outside());
        }

        Ok(QueryPath {
            path: parts.join("/"),
            is_dir,
        })
    }
}
