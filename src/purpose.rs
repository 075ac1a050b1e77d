//! File purpose classification.
//!
//! Assigns each file one architectural role from a fixed category set. The
//! decision is an ordered rule chain over the filename, with a content-based
//! fallback using extracted symbol counts. First match wins; the order of
//! `NAME_RULES` is the precedence contract.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::extract::Extraction;
use crate::language;

/// The architectural role inferred for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    #[serde(rename = "Entry Point")]
    EntryPoint,
    #[serde(rename = "Data Model")]
    DataModel,
    #[serde(rename = "Business Logic")]
    BusinessLogic,
    #[serde(rename = "API Controller")]
    ApiController,
    #[serde(rename = "Utility")]
    Utility,
    #[serde(rename = "Testing")]
    Testing,
    #[serde(rename = "Documentation/Configuration")]
    DocsConfig,
    #[serde(rename = "General Code")]
    GeneralCode,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::EntryPoint => "Entry Point",
            Purpose::DataModel => "Data Model",
            Purpose::BusinessLogic => "Business Logic",
            Purpose::ApiController => "API Controller",
            Purpose::Utility => "Utility",
            Purpose::Testing => "Testing",
            Purpose::DocsConfig => "Documentation/Configuration",
            Purpose::GeneralCode => "General Code",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Entry Point" => Some(Purpose::EntryPoint),
            "Data Model" => Some(Purpose::DataModel),
            "Business Logic" => Some(Purpose::BusinessLogic),
            "API Controller" => Some(Purpose::ApiController),
            "Utility" => Some(Purpose::Utility),
            "Testing" => Some(Purpose::Testing),
            "Documentation/Configuration" => Some(Purpose::DocsConfig),
            "General Code" => Some(Purpose::GeneralCode),
            _ => None,
        }
    }
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conventional entry-point filenames across ecosystems. Shared with the
/// aggregator's entry-point collection.
pub const ENTRY_POINT_NAMES: &[&str] = &[
    "main.py",
    "app.py",
    "manage.py",
    "run.py",
    "index.js",
    "app.js",
    "server.js",
    "main.js",
    "main.cpp",
    "main.c",
    "app.cpp",
    "server.cpp",
    "main.java",
    "Application.java",
    "App.java",
    "main.go",
    "main.rs",
    "Program.cs",
];

/// Whether a file name is one of the conventional entry points.
pub fn is_entry_point_name(name: &str) -> bool {
    ENTRY_POINT_NAMES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// A filename predicate in the classification chain.
enum NameRule {
    /// Unanchored, case-insensitive substring match against any listed needle.
    Contains(&'static [&'static str]),
    /// Exact (case-insensitive) membership in [`ENTRY_POINT_NAMES`].
    EntryPoint,
}

impl NameRule {
    /// `filename` must already be lowercased.
    fn matches(&self, filename: &str) -> bool {
        match self {
            NameRule::Contains(needles) => needles.iter().any(|n| filename.contains(n)),
            NameRule::EntryPoint => is_entry_point_name(filename),
        }
    }
}

/// The ordered rule chain. Precedence is positional: a filename satisfying
/// several rules gets the first one listed here.
static NAME_RULES: &[(NameRule, Purpose)] = &[
    (NameRule::Contains(&["test", "spec"]), Purpose::Testing),
    (NameRule::EntryPoint, Purpose::EntryPoint),
    (NameRule::Contains(&["model", "entity"]), Purpose::DataModel),
    (NameRule::Contains(&["service"]), Purpose::BusinessLogic),
    (
        NameRule::Contains(&["controller", "route"]),
        Purpose::ApiController,
    ),
    (NameRule::Contains(&["util", "helper"]), Purpose::Utility),
];

/// Classify a file's purpose from its path, language and extracted symbols.
pub fn classify_purpose(path: &Path, language: &str, extraction: &Extraction) -> Purpose {
    if !language::is_code(language) {
        return Purpose::DocsConfig;
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    for (rule, purpose) in NAME_RULES {
        if rule.matches(&filename) {
            return *purpose;
        }
    }

    // No filename signal; fall back to what the extractor found.
    if !extraction.functions.is_empty() {
        if extraction.functions.len() > 5 {
            return Purpose::BusinessLogic;
        }
        return Purpose::Utility;
    }
    if !extraction.classes.is_empty() {
        return Purpose::DataModel;
    }
    Purpose::GeneralCode
}
