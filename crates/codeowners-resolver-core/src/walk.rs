//! Repository walking for ownership reports.
//!
//! Produces repository-relative, forward-slash paths ready to hand to the
//! resolver. This is the only part of the crate that touches the filesystem.

use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::Path;

/// Configuration for file walking behavior.
#[derive(Debug, Clone, Default)]
pub struct FileWalkerConfig {
    /// Whether to include hidden files and directories (starting with `.`).
    /// Default: false
    pub include_hidden: bool,
    /// Whether to respect `.gitignore` rules (only works in git repos).
    /// Default: false
    pub respect_gitignore: bool,
    /// Whether to include directories in the output.
    /// Default: false (files only)
    pub include_directories: bool,
}

impl FileWalkerConfig {
    /// Sets whether to respect .gitignore rules.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Configuration for an unowned-files report: hidden files included,
    /// gitignored files skipped, files only.
    pub fn for_ownership_report() -> Self {
        Self {
            include_hidden: true,
            respect_gitignore: true,
            include_directories: false,
        }
    }
}

/// A path found while walking a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Path relative to the repository root, with `/` separators.
    pub path: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Converts a filesystem path under `repo_path` into a resolver path.
///
/// Returns `None` when `path` is not inside `repo_path`, is the root itself,
/// or is not valid UTF-8.
pub fn relative_path(repo_path: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(repo_path).ok()?;
    let relative = relative.to_str()?.replace('\\', "/");
    let relative = relative.trim_matches('/');
    (!relative.is_empty()).then(|| relative.to_string())
}

/// Lists files (and optionally directories) in a repository.
///
/// Returns paths relative to `repo_path` with forward slashes, sorted.
pub fn list_files(repo_path: &Path, config: &FileWalkerConfig) -> Vec<RepoEntry> {
    debug!(
        "Listing files in {:?} (hidden={}, gitignore={}, dirs={})",
        repo_path, config.include_hidden, config.respect_gitignore, config.include_directories
    );

    let walker = WalkBuilder::new(repo_path)
        .hidden(!config.include_hidden)
        .ignore(false)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .follow_links(false)
        // The .git directory is never part of the tracked tree
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut entries = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());

        if !is_file && !(config.include_directories && is_dir) {
            continue;
        }

        if let Some(path) = relative_path(repo_path, entry.path()) {
            entries.push(RepoEntry { path, is_dir });
        }
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));

    debug!("Found {} entries", entries.len());
    trace!("Entries: {:?}", entries);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn setup_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::create_dir_all(dir.path().join("src")).unwrap();
        File::create(dir.path().join("src/main.rs")).unwrap();
        File::create(dir.path().join("visible.txt")).unwrap();

        fs::create_dir_all(dir.path().join(".hidden_dir")).unwrap();
        File::create(dir.path().join(".hidden_dir/config")).unwrap();
        File::create(dir.path().join(".hidden_file")).unwrap();

        dir
    }

    fn paths(entries: &[RepoEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn default_excludes_hidden() {
        let dir = setup_test_dir();
        let entries = list_files(dir.path(), &FileWalkerConfig::default());
        assert_eq!(paths(&entries), vec!["src/main.rs", "visible.txt"]);
    }

    #[test]
    fn include_hidden_files() {
        let dir = setup_test_dir();
        let config = FileWalkerConfig {
            include_hidden: true,
            ..Default::default()
        };
        let entries = list_files(dir.path(), &config);
        let paths = paths(&entries);
        assert!(paths.contains(&".hidden_file"));
        assert!(paths.contains(&".hidden_dir/config"));
    }

    #[test]
    fn include_directories() {
        let dir = setup_test_dir();
        let config = FileWalkerConfig {
            include_directories: true,
            ..Default::default()
        };
        let entries = list_files(dir.path(), &config);
        assert!(entries.contains(&RepoEntry {
            path: "src".to_string(),
            is_dir: true
        }));
        assert!(entries.contains(&RepoEntry {
            path: "src/main.rs".to_string(),
            is_dir: false
        }));
    }

    #[test]
    fn git_directory_is_skipped() {
        let dir = setup_test_dir();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        File::create(dir.path().join(".git/HEAD")).unwrap();
        let entries = list_files(dir.path(), &FileWalkerConfig::for_ownership_report());
        assert!(!paths(&entries).iter().any(|p| p.starts_with(".git/")));
    }

    #[test]
    fn relative_path_normalizes() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_path(root, Path::new("/repo/src/main.rs")),
            Some("src/main.rs".to_string())
        );
        assert_eq!(relative_path(root, Path::new("/repo")), None);
        assert_eq!(relative_path(root, Path::new("/elsewhere/x")), None);
    }

    #[test]
    fn ownership_report_config() {
        let config = FileWalkerConfig::for_ownership_report();
        assert!(config.include_hidden);
        assert!(config.respect_gitignore);
        assert!(!config.include_directories);
        assert!(!config.with_gitignore(false).respect_gitignore);
    }
}
