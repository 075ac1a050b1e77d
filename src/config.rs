//! Engine configuration.
//!
//! Loaded from `repolens.yaml` (or `.repolens.yaml`) in the working
//! directory when present, with environment overrides for the two
//! directories. Everything has a usable default.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Directory holding the cloned repositories, keyed by id.
    #[serde(default = "default_repos_dir")]
    pub repos_dir: PathBuf,
    /// Directory analysis documents are persisted to.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Glob patterns for repo-relative paths to exclude from every scan
    /// (e.g. "**/generated/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            repos_dir: default_repos_dir(),
            store_dir: default_store_dir(),
            excluded_paths: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Configuration from an explicit file, or discovery when none is
    /// given. Environment overrides apply either way.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let mut config = Self::parse_file(path)?;
                config.apply_env();
                Ok(config)
            }
            None => Self::discover(),
        }
    }

    /// Locate configuration in the working directory, falling back to
    /// defaults. `REPOLENS_REPOS_DIR` and `REPOLENS_STORE_DIR` override
    /// whatever was loaded.
    pub fn discover() -> anyhow::Result<Self> {
        let mut config = EngineConfig::default();
        for candidate in ["repolens.yaml", ".repolens.yaml"] {
            if Path::new(candidate).exists() {
                config = Self::parse_file(candidate)?;
                tracing::debug!(file = candidate, "loaded configuration");
                break;
            }
        }
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("REPOLENS_REPOS_DIR") {
            self.repos_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("REPOLENS_STORE_DIR") {
            self.store_dir = PathBuf::from(dir);
        }
    }

    /// Compile the exclusion globs, once per scan.
    pub fn exclude_globs(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }
}

fn default_repos_dir() -> PathBuf {
    project_data_dir().join("repos")
}

fn default_store_dir() -> PathBuf {
    project_data_dir().join("analyses")
}

fn project_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "repolens")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".repolens"))
}
