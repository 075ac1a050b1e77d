//! Scan orchestration.
//!
//! The engine owns the configuration and the analysis store, decides
//! whether a stored analysis can be reused, and otherwise walks the
//! repository, analyzes files in parallel and persists the aggregated
//! result. Concurrent scans of the same repository are serialized by a
//! per-id lock; distinct repositories scan fully in parallel.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use globset::GlobSet;
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::freshness;
use crate::profile;
use crate::record::{self, FileRecord};
use crate::store::{Store, StoreError, StoredAnalysis};
use crate::walk;

/// Errors surfaced by engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("repository not found: {}", .0.display())]
    RepositoryNotFound(PathBuf),
    #[error("no analysis found for repository '{0}'")]
    AnalysisNotFound(String),
    #[error(transparent)]
    Store(StoreError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => EngineError::AnalysisNotFound(id),
            other => EngineError::Store(other),
        }
    }
}

pub struct Engine {
    config: EngineConfig,
    store: Store,
    /// Exclusion globs, compiled on first use and shared by every scan.
    exclude_globs: OnceCell<GlobSet>,
    /// One lock per repository id; held for the duration of a scan.
    scan_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let store = Store::open(config.store_dir.clone())?;
        Ok(Self {
            config,
            store,
            exclude_globs: OnceCell::new(),
            scan_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze the repository at `path`. The repository id is the
    /// directory's name. A fresh stored analysis is reused unless `force`
    /// is set.
    pub fn scan_path(&self, path: &Path, force: bool) -> Result<StoredAnalysis, EngineError> {
        let canonical = fs::canonicalize(path)
            .map_err(|_| EngineError::RepositoryNotFound(path.to_path_buf()))?;
        let id = canonical
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| EngineError::RepositoryNotFound(path.to_path_buf()))?;
        self.scan(&id, &canonical, force)
    }

    /// Analyze the repository stored under `id` in the configured
    /// repositories directory.
    pub fn scan_id(&self, id: &str, force: bool) -> Result<StoredAnalysis, EngineError> {
        let repo_dir = self.config.repos_dir.join(id);
        self.scan(id, &repo_dir, force)
    }

    fn scan(&self, id: &str, repo_dir: &Path, force: bool) -> Result<StoredAnalysis, EngineError> {
        let lock = self.scan_lock(id);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if !repo_dir.is_dir() {
            return Err(EngineError::RepositoryNotFound(repo_dir.to_path_buf()));
        }

        if !force {
            let state = freshness::check(&self.store.analysis_path(id), repo_dir);
            if !state.requires_rescan() {
                tracing::info!(id, "stored analysis is fresh, skipping scan");
                return Ok(self.store.load(id)?);
            }
        }

        tracing::info!(id, path = %repo_dir.display(), "scanning repository");
        let excludes = self
            .exclude_globs
            .get_or_try_init(|| self.config.exclude_globs())?;
        let files = walk::collect_files(repo_dir, excludes)?;
        let records: Vec<FileRecord> = files
            .par_iter()
            .map(|rel_path| record::analyze_file(repo_dir, rel_path))
            .collect();

        let profile = profile::aggregate(repo_dir, records);
        let analysis = StoredAnalysis::new(id, profile);
        self.store.save(&analysis)?;

        tracing::info!(
            id,
            files = analysis.profile.total_files,
            main_language = analysis.profile.main_language.as_deref().unwrap_or("none"),
            "scan complete"
        );
        Ok(analysis)
    }

    /// Retrieve a stored analysis without scanning.
    pub fn load(&self, id: &str) -> Result<StoredAnalysis, EngineError> {
        Ok(self.store.load(id)?)
    }

    /// Ids of every stored analysis.
    pub fn list(&self) -> Result<Vec<String>, EngineError> {
        Ok(self.store.list()?)
    }

    fn scan_lock(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .scan_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(id.to_string()).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ArchitecturePattern;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn engine_in(temp: &TempDir) -> Engine {
        let config = EngineConfig {
            repos_dir: temp.path().join("repos"),
            store_dir: temp.path().join("analyses"),
            excluded_paths: Vec::new(),
        };
        Engine::new(config).unwrap()
    }

    fn write_layered_repo(root: &Path) {
        fs::create_dir_all(root.join("controllers")).unwrap();
        fs::create_dir_all(root.join("models")).unwrap();
        fs::create_dir_all(root.join("services")).unwrap();
        fs::write(
            root.join("controllers/user_controller.py"),
            "def getUsers():\n    pass\n",
        )
        .unwrap();
        fs::write(root.join("models/user.py"), "class User:\n    pass\n").unwrap();
        fs::write(
            root.join("services/auth_service.py"),
            "def login():\n    pass\n",
        )
        .unwrap();
        fs::write(root.join("main.py"), "print('hi')\n").unwrap();
    }

    #[test]
    fn test_scan_path_builds_and_persists() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("webshop");
        write_layered_repo(&repo);
        let engine = engine_in(&temp);

        let analysis = engine.scan_path(&repo, false).unwrap();
        assert_eq!(analysis.repo_id, "webshop");
        assert_eq!(analysis.profile.total_files, 4);
        assert_eq!(
            analysis.profile.architecture_pattern,
            ArchitecturePattern::Layered
        );
        assert_eq!(analysis.profile.entry_points, vec!["main.py"]);

        let loaded = engine.load("webshop").unwrap();
        assert_eq!(loaded.profile.total_files, 4);
        assert_eq!(engine.list().unwrap(), vec!["webshop"]);
    }

    #[test]
    fn test_fresh_analysis_is_reused() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("webshop");
        write_layered_repo(&repo);
        let engine = engine_in(&temp);

        engine.scan_path(&repo, false).unwrap();

        // Doctor the stored document; a fresh scan must hand it back as-is.
        let mut doctored = engine.load("webshop").unwrap();
        doctored.profile.total_files = 999;
        Store::open(temp.path().join("analyses"))
            .unwrap()
            .save(&doctored)
            .unwrap();

        let cached = engine.scan_path(&repo, false).unwrap();
        assert_eq!(cached.profile.total_files, 999);

        let rescanned = engine.scan_path(&repo, true).unwrap();
        assert_eq!(rescanned.profile.total_files, 4);
    }

    #[test]
    fn test_modified_repository_is_rescanned() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("webshop");
        write_layered_repo(&repo);
        let engine = engine_in(&temp);

        engine.scan_path(&repo, false).unwrap();

        // Age the analysis, then grow the repository.
        let analysis_path = temp.path().join("analyses/webshop.json");
        let file = fs::File::options()
            .write(true)
            .open(&analysis_path)
            .unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(60))
            .unwrap();
        fs::write(repo.join("helpers.py"), "def helper():\n    pass\n").unwrap();

        let analysis = engine.scan_path(&repo, false).unwrap();
        assert_eq!(analysis.profile.total_files, 5);
    }

    #[test]
    fn test_missing_repository() {
        let temp = TempDir::new().unwrap();
        let engine = engine_in(&temp);

        let err = engine.scan_path(&temp.path().join("ghost"), false).unwrap_err();
        assert!(matches!(err, EngineError::RepositoryNotFound(_)));
    }

    #[test]
    fn test_scan_id_resolves_in_repos_dir() {
        let temp = TempDir::new().unwrap();
        let engine = engine_in(&temp);
        let repo = temp.path().join("repos/billing");
        fs::create_dir_all(&repo).unwrap();
        fs::write(repo.join("main.go"), "package main\n\nfunc main() {}\n").unwrap();

        let analysis = engine.scan_id("billing", false).unwrap();
        assert_eq!(analysis.repo_id, "billing");
        assert_eq!(analysis.profile.main_language.as_deref(), Some("Go"));

        let err = engine.scan_id("ghost", false).unwrap_err();
        assert!(matches!(err, EngineError::RepositoryNotFound(_)));
    }

    #[test]
    fn test_load_without_analysis() {
        let temp = TempDir::new().unwrap();
        let engine = engine_in(&temp);

        let err = engine.load("ghost").unwrap_err();
        match err {
            EngineError::AnalysisNotFound(id) => assert_eq!(id, "ghost"),
            other => panic!("expected AnalysisNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_excluded_paths_are_skipped() {
        let temp = TempDir::new().unwrap();
        let config = EngineConfig {
            repos_dir: temp.path().join("repos"),
            store_dir: temp.path().join("analyses"),
            excluded_paths: vec!["**/generated/**".to_string()],
        };
        let engine = Engine::new(config).unwrap();

        let repo = temp.path().join("webshop");
        fs::create_dir_all(repo.join("generated")).unwrap();
        fs::write(repo.join("generated/schema.py"), "class Schema:\n    pass\n").unwrap();
        fs::write(repo.join("app.py"), "print('hi')\n").unwrap();

        let analysis = engine.scan_path(&repo, false).unwrap();
        assert_eq!(analysis.profile.total_files, 1);
        assert!(analysis.files.contains_key("app.py"));
    }
}
