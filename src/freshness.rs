//! Staleness gate for persisted analyses.
//!
//! Compares the repository root directory's mtime against the stored
//! analysis document's mtime. Per-file timestamps are never consulted;
//! any filesystem error fails toward recomputation.

use std::fs;
use std::path::Path;

/// Why a repository does or does not need rescanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No analysis document exists for this repository.
    NoPriorAnalysis,
    /// An analysis exists but the repository directory is gone.
    RepositoryMissing,
    /// The repository was modified after the analysis was written.
    RepositoryNewer,
    /// The stored analysis is at least as new as the repository.
    Fresh,
}

impl Freshness {
    pub fn requires_rescan(&self) -> bool {
        !matches!(self, Freshness::Fresh)
    }
}

/// Decide whether `analysis_path` is still good for `repo_dir`.
pub fn check(analysis_path: &Path, repo_dir: &Path) -> Freshness {
    let analysis_meta = match fs::metadata(analysis_path) {
        Ok(meta) => meta,
        Err(_) => return Freshness::NoPriorAnalysis,
    };
    let repo_meta = match fs::metadata(repo_dir) {
        Ok(meta) => meta,
        Err(_) => return Freshness::RepositoryMissing,
    };

    let state = match (repo_meta.modified(), analysis_meta.modified()) {
        (Ok(repo_time), Ok(analysis_time)) if repo_time <= analysis_time => Freshness::Fresh,
        _ => Freshness::RepositoryNewer,
    };
    tracing::debug!(
        analysis = %analysis_path.display(),
        repository = %repo_dir.display(),
        state = ?state,
        "staleness check"
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_no_prior_analysis() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir(&repo).unwrap();

        let state = check(&temp.path().join("repo.json"), &repo);
        assert_eq!(state, Freshness::NoPriorAnalysis);
        assert!(state.requires_rescan());
    }

    #[test]
    fn test_repository_missing() {
        let temp = TempDir::new().unwrap();
        let analysis = temp.path().join("repo.json");
        fs::write(&analysis, "{}").unwrap();

        let state = check(&analysis, &temp.path().join("gone"));
        assert_eq!(state, Freshness::RepositoryMissing);
        assert!(state.requires_rescan());
    }

    #[test]
    fn test_analysis_written_after_repository_is_fresh() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir(&repo).unwrap();
        fs::write(repo.join("main.py"), "print('hi')\n").unwrap();

        let analysis = temp.path().join("repo.json");
        fs::write(&analysis, "{}").unwrap();

        let state = check(&analysis, &repo);
        assert_eq!(state, Freshness::Fresh);
        assert!(!state.requires_rescan());
    }

    #[test]
    fn test_repository_modified_after_analysis() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir(&repo).unwrap();

        let analysis = temp.path().join("repo.json");
        fs::write(&analysis, "{}").unwrap();
        let file = fs::File::options().write(true).open(&analysis).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(60))
            .unwrap();

        let state = check(&analysis, &repo);
        assert_eq!(state, Freshness::RepositoryNewer);
        assert!(state.requires_rescan());
    }
}
