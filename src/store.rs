//! Persisted analysis documents.
//!
//! One `<sanitized-id>.json` per repository under the store root. Writes
//! go to a temporary file in the same directory and are renamed into
//! place, so a reader never observes a partial document.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::profile::ProjectProfile;
use crate::record::FileRecord;

/// Errors raised by the analysis store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no stored analysis for repository '{0}'")]
    NotFound(String),
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed analysis document: {0}")]
    Format(#[from] serde_json::Error),
}

/// The unit of record for one repository scan.
///
/// The flat `files` map duplicates the records grouped in
/// `profile.modules` so consumers can look a file up by path without
/// walking the module map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub repo_id: String,
    /// Unix timestamp (seconds) of the scan that produced this document.
    pub generated_at: u64,
    pub profile: ProjectProfile,
    pub files: BTreeMap<String, FileRecord>,
}

impl StoredAnalysis {
    pub fn new(repo_id: impl Into<String>, profile: ProjectProfile) -> Self {
        let files = profile
            .records()
            .map(|record| (record.path.clone(), record.clone()))
            .collect();
        Self {
            repo_id: repo_id.into(),
            generated_at: current_timestamp(),
            profile,
            files,
        }
    }
}

/// On-disk analysis store.
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the store, creating its directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Sanitize an id for use as a filename (path separators and `:`
    /// become `_`), so an id can never escape the store directory.
    fn sanitize(id: &str) -> String {
        id.replace(['/', '\\', ':'], "_")
    }

    /// Where the document for `id` lives. Also consulted by the staleness
    /// gate, which compares this file's mtime against the repository's.
    pub fn analysis_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", Self::sanitize(id)))
    }

    pub fn save(&self, analysis: &StoredAnalysis) -> Result<(), StoreError> {
        let path = self.analysis_path(&analysis.repo_id);
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), analysis)?;
        tmp.persist(&path).map_err(|err| StoreError::Io(err.error))?;
        tracing::debug!(id = %analysis.repo_id, path = %path.display(), "saved analysis");
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<StoredAnalysis, StoreError> {
        let path = self.analysis_path(id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Sorted ids of every stored analysis.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Current Unix timestamp in seconds.
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}
