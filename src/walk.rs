//! Repository tree traversal.
//!
//! Produces the repo-relative list of regular files a scan will analyze.
//! Hidden directories and well-known noise directories are pruned before
//! descent; configured exclusion globs are applied to the relative path.
//! Traversal order is sorted, so the output is deterministic for a given
//! tree.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use walkdir::WalkDir;

/// Directories never worth descending into.
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    "vendor",
    "dist",
    "build",
    "target",
];

/// Collect the repo-relative paths of all regular files under `root`.
///
/// Symlinks are not followed. Hidden entries (name starting with `.`) are
/// skipped, as are [`SKIP_DIRS`] subtrees and anything matching `excludes`.
pub fn collect_files(root: &Path, excludes: &GlobSet) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // The root itself is always kept, whatever it is named.
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if name.starts_with('.') {
                return false;
            }
            !(e.file_type().is_dir() && SKIP_DIRS.contains(&name.as_ref()))
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        if excludes.is_match(&rel_path) {
            continue;
        }

        files.push(rel_path);
    }

    Ok(files)
}
