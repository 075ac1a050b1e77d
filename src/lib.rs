//! Repolens - repository intelligence engine.
//!
//! Repolens builds structured profiles of cloned repositories for
//! documentation pipelines. A scan walks the tree, classifies every file
//! by language and purpose, extracts functions, classes and imports with
//! lightweight lexical rules, scores complexity, and aggregates the
//! records into a project-wide profile (main language, architecture
//! pattern, module layout, entry points, build tooling, declared
//! dependencies). Profiles are persisted atomically and reused until the
//! repository changes on disk.
//!
//! # Architecture
//!
//! - `language`: extension/filename based language classification
//! - `extract`: line-oriented lexical symbol extraction per language family
//! - `purpose`: ordered rule chain assigning a purpose category per file
//! - `complexity`: bounded heuristic complexity score
//! - `record`: per-file analysis (one [`record::FileRecord`] per file)
//! - `walk`: repository traversal with noise pruning and exclusion globs
//! - `manifest`: build markers and declared-dependency extraction
//! - `profile`: aggregation into a [`profile::ProjectProfile`]
//! - `freshness`: mtime-based staleness gate for stored analyses
//! - `store`: atomic JSON persistence, one document per repository
//! - `engine`: scan orchestration tying the above together
//! - `report`: output formatting (pretty, JSON)

pub mod cli;
pub mod complexity;
pub mod config;
pub mod engine;
pub mod extract;
pub mod freshness;
pub mod language;
pub mod manifest;
pub mod profile;
pub mod purpose;
pub mod record;
pub mod report;
pub mod store;
pub mod walk;

pub use config::EngineConfig;
pub use engine::{Engine, EngineError};
pub use extract::Extraction;
pub use freshness::Freshness;
pub use profile::{ArchitecturePattern, ProjectProfile};
pub use purpose::Purpose;
pub use record::FileRecord;
pub use store::{Store, StoreError, StoredAnalysis};
