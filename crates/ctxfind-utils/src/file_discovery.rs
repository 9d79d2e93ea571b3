use anyhow::{Context, Result};
use ctxfind_core::Language;
use std::path::{Path, PathBuf};

/// Names skipped during a recursive walk unless the caller replaces the list.
pub const DEFAULT_IGNORE: &[&str] = &[".git", "__pycache__"];

/// A path that will not be searched, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

/// Files to search, in order, plus the inputs that were rejected.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<SkippedPath>,
}

/// Expands command-line paths into the list of files to search.
///
/// Explicit files are always kept. Directories are only entered in recursive mode, where
/// files are kept when their extension maps to a supported language.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    recursive: bool,
    ignore: Vec<String>,
    any_extension: bool,
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDiscovery {
    pub fn new() -> Self {
        Self {
            recursive: false,
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            any_extension: false,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replace the ignore list. Entries match a path component or the path itself.
    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    /// Keep every file found by a recursive walk, not just known extensions. Used when the
    /// language is forced on the command line.
    pub fn any_extension(mut self, any: bool) -> Self {
        self.any_extension = any;
        self
    }

    /// Check if an extension is supported
    pub fn is_supported_extension(&self, ext: &str) -> bool {
        Language::from_extension(ext).is_some()
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignore.iter().filter(|entry| !entry.is_empty()).any(|entry| {
            path == Path::new(entry)
                || path.ends_with(entry)
                || path.components().any(|c| c.as_os_str() == entry.as_str())
        })
    }

    pub fn discover(&self, paths: &[PathBuf]) -> Discovery {
        let mut discovery = Discovery::default();

        for path in paths {
            if self.is_ignored(path) {
                log::debug!("Ignoring {}", path.display());
                continue;
            }

            if path.is_file() {
                discovery.files.push(path.clone());
            } else if path.is_dir() {
                if !self.recursive {
                    discovery.skipped.push(SkippedPath {
                        path: path.clone(),
                        reason: "is a directory (use --recursive)".to_string(),
                    });
                    continue;
                }
                if let Err(e) = self.visit_dirs(path, &mut discovery) {
                    discovery.skipped.push(SkippedPath {
                        path: path.clone(),
                        reason: format!("{e:#}"),
                    });
                }
            } else {
                discovery.skipped.push(SkippedPath {
                    path: path.clone(),
                    reason: "no such file or directory".to_string(),
                });
            }
        }

        log::debug!(
            "Discovered {} file(s), skipped {}",
            discovery.files.len(),
            discovery.skipped.len()
        );
        discovery
    }

    fn wants_file(&self, path: &Path) -> bool {
        if self.any_extension {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.is_supported_extension(ext))
    }

    /// Recursively visit `dir` in name order, collecting wanted files.
    fn visit_dirs(&self, dir: &Path, discovery: &mut Discovery) -> Result<()> {
        let mut entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read directory {}", dir.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("failed to list directory {}", dir.display()))?;
        entries.sort();

        for path in entries {
            if self.is_ignored(&path) {
                log::debug!("Ignoring {}", path.display());
                continue;
            }
            if path.is_dir() {
                // An unreadable subdirectory only loses its own files.
                if let Err(e) = self.visit_dirs(&path, discovery) {
                    discovery.skipped.push(SkippedPath {
                        path: path.clone(),
                        reason: format!("{e:#}"),
                    });
                }
            } else if self.wants_file(&path) {
                discovery.files.push(path);
            }
        }
        Ok(())
    }
}
