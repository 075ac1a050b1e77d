//! Per-file analysis records.
//!
//! [`analyze_file`] composes the classifier, extractor and scorer into one
//! record. It never fails: an unreadable or binary file degrades to a record
//! with empty symbols and a zero line count, and the warning is left in the
//! log.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::complexity;
use crate::extract::{self, Extraction};
use crate::language;
use crate::purpose::{classify_purpose, Purpose};

/// The structured analysis result for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Repository-relative path, forward-slash separated.
    pub path: String,
    pub language: String,
    pub purpose: Purpose,
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub imports: Vec<String>,
    pub line_count: usize,
    pub complexity_score: u8,
    /// One-line synopsis; empty for non-code files.
    #[serde(default)]
    pub summary: String,
}

impl FileRecord {
    /// The immediate parent directory key this record groups under.
    /// Top-level files use the `"root"` sentinel.
    pub fn module_key(&self) -> String {
        match self.path.rsplit_once('/') {
            Some((dir, _)) => dir.to_string(),
            None => "root".to_string(),
        }
    }

    /// The file name component of `path`.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Analyze one file under `repo_root`, addressed by its relative path.
pub fn analyze_file(repo_root: &Path, rel_path: &Path) -> FileRecord {
    let path = normalize_path(rel_path);
    let label = language::classify(rel_path);

    let content = match fs::read_to_string(repo_root.join(rel_path)) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(file = %path, error = %err, "unreadable file, recording degraded entry");
            String::new()
        }
    };
    let line_count = content.lines().count();

    // Non-code files keep their line count but are never extracted.
    if !language::is_code(label) {
        return FileRecord {
            path,
            language: label.to_string(),
            purpose: Purpose::DocsConfig,
            functions: Vec::new(),
            classes: Vec::new(),
            imports: Vec::new(),
            line_count,
            complexity_score: 0,
            summary: String::new(),
        };
    }

    let extraction = extract::extract(&content, label);
    let complexity_score =
        complexity::score(extraction.functions.len(), extraction.classes.len(), line_count);
    let purpose = classify_purpose(rel_path, label, &extraction);
    let summary = compose_summary(purpose, label, line_count, complexity_score, &extraction);

    let Extraction {
        functions,
        classes,
        imports,
    } = extraction;

    FileRecord {
        path,
        language: label.to_string(),
        purpose,
        functions,
        classes,
        imports,
        line_count,
        complexity_score,
        summary,
    }
}

/// Pipe-separated synopsis of a code file's analysis.
fn compose_summary(
    purpose: Purpose,
    language: &str,
    line_count: usize,
    complexity_score: u8,
    extraction: &Extraction,
) -> String {
    let mut summary = format!(
        "Purpose: {} | Language: {} | Lines: {} | Complexity: {}",
        purpose, language, line_count, complexity_score
    );
    if !extraction.functions.is_empty() {
        summary.push_str(&format!(" | Functions: {}", extraction.functions.len()));
    }
    if !extraction.classes.is_empty() {
        summary.push_str(&format!(" | Classes: {}", extraction.classes.len()));
    }
    summary
}

fn normalize_path(rel_path: &Path) -> String {
    let raw = rel_path.to_string_lossy();
    if raw.contains('\\') {
        raw.replace('\\', "/")
    } else {
        raw.into_owned()
    }
}
