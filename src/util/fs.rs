//! Filesystem utilities.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use walkdir::WalkDir;

/// Directories never descended into when searching native sources.
const SKIPPED_DIRS: &[&str] = &["node_modules", "Pods", "build", ".git", ".gradle"];

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Copy a single file, creating the destination directory if needed.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(src, dst).with_context(|| {
        format!("failed to copy {} to {}", src.display(), dst.display())
    })?;
    Ok(())
}

/// Remove a file if it exists.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove file: {}", path.display()))?;
    }
    Ok(())
}

/// Files under `base` matching any of `patterns`, sorted and deduplicated.
///
/// Unreadable entries are skipped with a warning; a malformed pattern is an
/// error.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        let full = base.join(pattern);
        let paths = glob(&full.to_string_lossy())
            .with_context(|| format!("invalid glob pattern: {}", pattern))?;
        for path in paths {
            match path {
                Ok(path) if path.is_file() => {
                    files.insert(path);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("skipping {}: {}", e.path().display(), e.error()),
            }
        }
    }
    Ok(files.into_iter().collect())
}

/// Walk `root` and return every file for which `pred` holds.
///
/// Dependency and build output directories are skipped. Results are sorted so
/// that lookups like "first package class" are stable across platforms.
pub fn find_files(root: &Path, pred: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e
                    .file_name()
                    .to_str()
                    .map(|n| e.file_type().is_dir() && SKIPPED_DIRS.contains(&n))
                    .unwrap_or(false)
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && pred(e.path()))
        .map(|e| e.into_path())
        .collect();
    found.sort();
    found
}

/// Find the first `*.xcodeproj` bundle directly inside `dir`.
pub fn find_xcodeproj(dir: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && p.extension().is_some_and(|ext| ext == "xcodeproj"))
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Render a path with forward slashes, as native project files expect.
pub fn to_unix_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
