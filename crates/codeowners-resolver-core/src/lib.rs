//! CODEOWNERS Resolver Core
//!
//! A library for working out who owns a path according to a GitHub
//! CODEOWNERS file.
//!
//! # Features
//!
//! - **Parser**: Parse CODEOWNERS text into an ordered rule set with source spans
//! - **Matching**: gitignore-style pattern compilation
//! - **Resolution**: Last-matching-rule-wins ownership lookup, with the source line
//! - **Scanning**: Find `@user`, `@org/team` and email tokens for links and completion
//!
//! The engine is pure: it never reads files and holds no global state. Only
//! [`walk`] touches the filesystem.
//!
//! # Quick Start
//!
//! ```rust
//! use codeowners_resolver_core::{OwnershipResult, Resolver, parse_codeowners};
//!
//! let input = r#"
//! # CODEOWNERS file
//! * @org/everyone
//! *.rs @rustacean
//! /docs/ @github/docs-team
//! "#;
//!
//! let resolver = Resolver::new(parse_codeowners(input));
//!
//! match resolver.resolve("src/main.rs", false) {
//!     OwnershipResult::Matched { owners, line_number } => {
//!         println!("owned by {:?} (line {})", owners, line_number + 1);
//!     }
//!     OwnershipResult::NoMatch => println!("no owners"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`parse`]: Parser for CODEOWNERS files
//! - [`matching`]: Pattern matching for CODEOWNERS files
//! - [`resolve`]: Ownership resolution
//! - [`scan`]: Owner token scanning
//! - [`format`]: Owner column alignment
//! - [`walk`]: Repository walking

use std::path::{Path, PathBuf};

pub mod format;
pub mod matching;
pub mod parse;
pub mod resolve;
pub mod scan;
pub mod walk;

// Re-export commonly used types at the crate root
pub use matching::{CompiledPattern, PatternScope, compile};
pub use parse::{Rule, RuleSet, Span, parse_codeowners};
pub use resolve::{OwnershipResult, ResolveError, Resolver, resolve, try_resolve};
pub use scan::{OwnerToken, collect_owner_names, scan_document, scan_line};

/// Finds the CODEOWNERS file in a repository.
///
/// Searches in the following locations (in order):
/// 1. `.github/CODEOWNERS`
/// 2. `CODEOWNERS`
/// 3. `docs/CODEOWNERS`
///
/// Returns `Some(path)` if found, `None` otherwise.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use codeowners_resolver_core::find_codeowners_file;
///
/// let repo_path = Path::new("/path/to/repo");
/// if let Some(codeowners_path) = find_codeowners_file(repo_path) {
///     println!("Found CODEOWNERS at: {}", codeowners_path.display());
/// } else {
///     eprintln!("CODEOWNERS file not found");
/// }
/// ```
pub fn find_codeowners_file(repo_path: &Path) -> Option<PathBuf> {
    let locations = [
        repo_path.join(".github/CODEOWNERS"),
        repo_path.join("CODEOWNERS"),
        repo_path.join("docs/CODEOWNERS"),
    ];
    locations.into_iter().find(|p| p.is_file())
}
