//! Pattern matching for CODEOWNERS files.
//!
//! This module implements the gitignore-style pattern matching used by GitHub CODEOWNERS files.
//! Patterns follow these rules:
//!
//! - `*` matches any sequence of non-slash characters, `?` exactly one
//! - `**` matches any sequence including slashes (any path)
//! - `{` and `}` are literal characters, not alternation
//! - `/` at the start anchors to the repository root
//! - `/` at the end matches only directories (and everything beneath them)
//! - Patterns without a leading `/` match at any depth
//! - A pattern matching a directory also matches everything inside it, except
//!   when its last segment is a single `*` (`docs/*` does not match `docs/a/b.md`)
//!
//! Compilation never fails: degenerate patterns become matchers that match nothing.

use globset::{GlobBuilder, GlobMatcher};
use log::debug;
use serde::Serialize;

/// What part of the repository a pattern can cover, for hover-style descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternScope {
    /// The pattern is degenerate and matches nothing.
    Nothing,
    /// Unanchored: matches entries with the same name at any depth.
    AnyDepth,
    /// Anchored to the root and covering a whole directory tree.
    DirectoryTree,
    /// Anchored to the root and naming a specific path (possibly with wildcards).
    AnchoredPath,
}

impl PatternScope {
    /// One-line human description of the scope.
    pub fn describe(&self) -> &'static str {
        match self {
            PatternScope::Nothing => "Matches nothing",
            PatternScope::AnyDepth => "Matches all files with same name",
            PatternScope::DirectoryTree => "Matches all files in directory and subdirectories",
            PatternScope::AnchoredPath => "Matches path exactly",
        }
    }
}

#[derive(Debug, Clone)]
struct Globs {
    /// Matches the named entry itself.
    entry: GlobMatcher,
    /// Matches everything beneath the named entry, when recursion applies.
    contents: Option<GlobMatcher>,
}

/// A compiled CODEOWNERS pattern that can match repository paths.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The original pattern string.
    original: String,
    /// Whether this pattern is anchored to the root.
    anchored: bool,
    /// Whether the pattern entry itself only matches directories.
    directory_only: bool,
    /// Whether the pattern ends in a `/**` segment.
    globstar_suffix: bool,
    /// `None` for degenerate patterns, which never match.
    globs: Option<Globs>,
}

/// Compiles a CODEOWNERS pattern for matching.
pub fn compile(pattern: &str) -> CompiledPattern {
    CompiledPattern::new(pattern)
}

impl CompiledPattern {
    /// Compiles a CODEOWNERS pattern for matching.
    ///
    /// Empty patterns, a lone `/`, and patterns the glob engine rejects
    /// produce a matcher that never matches.
    pub fn new(pattern: &str) -> Self {
        let original = pattern.to_string();

        let Some(normalized) = normalize_pattern(pattern) else {
            debug!("Pattern '{}' is empty; it will never match", pattern);
            return Self::never(original);
        };

        let globs = build_glob(&normalized.entry).and_then(|entry| {
            let contents = normalized
                .contents
                .as_deref()
                .map(build_glob)
                .transpose()?;
            Ok(Globs { entry, contents })
        });

        match globs {
            Ok(globs) => Self {
                original,
                anchored: normalized.anchored,
                directory_only: normalized.directory_only,
                globstar_suffix: normalized.ends_with_globstar,
                globs: Some(globs),
            },
            Err(e) => {
                debug!("Pattern '{}' is not a valid glob ({}); it will never match", pattern, e);
                Self::never(original)
            }
        }
    }

    fn never(original: String) -> Self {
        Self {
            original,
            anchored: false,
            directory_only: false,
            globstar_suffix: false,
            globs: None,
        }
    }

    /// Returns the original pattern string.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns true if this pattern is anchored to the repository root.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Returns true if this pattern matches only directories.
    pub fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    /// Returns true if this pattern can never match anything.
    pub fn is_never(&self) -> bool {
        self.globs.is_none()
    }

    /// Classifies the pattern for descriptive output.
    pub fn scope(&self) -> PatternScope {
        if self.globs.is_none() {
            PatternScope::Nothing
        } else if !self.anchored {
            PatternScope::AnyDepth
        } else if self.directory_only || self.globstar_suffix {
            PatternScope::DirectoryTree
        } else {
            PatternScope::AnchoredPath
        }
    }

    /// Checks if this pattern matches the given path.
    ///
    /// The path should be relative to the repository root and use forward
    /// slashes. A trailing slash marks the path as a directory.
    pub fn matches(&self, path: &str, is_dir: bool) -> bool {
        let Some(globs) = &self.globs else {
            return false;
        };

        let path = path.strip_prefix('/').unwrap_or(path);
        let (path, is_dir) = match path.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (path, is_dir),
        };

        if globs.entry.is_match(path) && (is_dir || !self.directory_only) {
            return true;
        }
        globs
            .contents
            .as_ref()
            .is_some_and(|contents| contents.is_match(path))
    }
}

/// A CODEOWNERS pattern rewritten into globs.
#[derive(Debug, PartialEq, Eq)]
struct NormalizedPattern {
    entry: String,
    contents: Option<String>,
    anchored: bool,
    directory_only: bool,
    ends_with_globstar: bool,
}

/// Normalizes a CODEOWNERS pattern to glob patterns.
///
/// Returns `None` for degenerate patterns.
fn normalize_pattern(pattern: &str) -> Option<NormalizedPattern> {
    let pattern = pattern.trim();

    let (body, anchored) = match pattern.strip_prefix('/') {
        Some(body) => (body, true),
        None => (pattern, false),
    };

    let trimmed = body.trim_end_matches('/');
    let directory_only = trimmed.len() != body.len();
    if trimmed.is_empty() {
        return None;
    }

    let body = trimmed
        .split('/')
        .map(|segment| escape_braces(&collapse_stars(segment)))
        .collect::<Vec<_>>()
        .join("/");

    // Unanchored patterns match at any depth
    let entry = if anchored || body == "**" || body.starts_with("**/") {
        body
    } else {
        format!("**/{}", body)
    };

    let last_segment = entry.rsplit('/').next().unwrap_or(entry.as_str());
    let ends_with_globstar = last_segment == "**";
    let contents = match last_segment {
        "**" => None,
        "*" if !directory_only => None,
        _ => Some(format!("{}/**", entry)),
    };

    Some(NormalizedPattern {
        entry,
        contents,
        anchored,
        directory_only,
        ends_with_globstar,
    })
}

/// Gitignore treats `**` that is not a whole segment as a plain `*`.
fn collapse_stars(segment: &str) -> String {
    if segment == "**" || !segment.contains("**") {
        return segment.to_string();
    }
    let mut out = String::with_capacity(segment.len());
    for ch in segment.chars() {
        if ch == '*' && out.ends_with('*') {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Braces are literal in CODEOWNERS but alternation in globset.
fn escape_braces(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut escaped = false;
    for ch in segment.chars() {
        if matches!(ch, '{' | '}') && !escaped {
            out.push('\\');
        }
        escaped = ch == '\\' && !escaped;
        out.push(ch);
    }
    out
}

fn build_glob(glob: &str) -> Result<GlobMatcher, globset::Error> {
    // literal_separator keeps * and ? from crossing /
    let glob = GlobBuilder::new(glob)
        .literal_separator(true)
        .backslash_escape(true)
        .build()?;
    Ok(glob.compile_matcher())
}
