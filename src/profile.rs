//! Repository-wide aggregation.
//!
//! Folds per-file records into a [`ProjectProfile`]: module grouping by
//! parent directory, plurality main language, entry points, build tooling,
//! declared dependencies and the inferred architecture pattern. Derived
//! views (statistics, endpoint guesses) are computed on demand and never
//! persisted.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::manifest;
use crate::purpose::{self, Purpose};
use crate::record::FileRecord;

/// High-level structural shape inferred from the module layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchitecturePattern {
    #[serde(rename = "Layered Architecture (MVC/MVCS)")]
    Layered,
    #[serde(rename = "Monolithic Architecture")]
    Monolithic,
    #[serde(rename = "Modular Architecture")]
    Modular,
    #[serde(rename = "Unknown Architecture Pattern")]
    Unknown,
}

impl ArchitecturePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchitecturePattern::Layered => "Layered Architecture (MVC/MVCS)",
            ArchitecturePattern::Monolithic => "Monolithic Architecture",
            ArchitecturePattern::Modular => "Modular Architecture",
            ArchitecturePattern::Unknown => "Unknown Architecture Pattern",
        }
    }
}

impl fmt::Display for ArchitecturePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate analysis of one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectProfile {
    /// Label carried by the most files; absent when nothing was analyzed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_language: Option<String>,
    pub entry_points: Vec<String>,
    pub build_tools: Vec<String>,
    pub dependencies: Vec<String>,
    pub architecture_pattern: ArchitecturePattern,
    /// Records grouped by parent directory; top-level files live under "root".
    pub modules: BTreeMap<String, Vec<FileRecord>>,
    pub total_files: usize,
    pub total_lines: usize,
}

/// Breakdown view over a profile, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStats {
    pub language_breakdown: BTreeMap<String, usize>,
    pub purpose_breakdown: BTreeMap<String, usize>,
    pub total_functions: usize,
    pub total_classes: usize,
}

/// One guessed HTTP endpoint, derived from controller function names.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointGuess {
    pub path: String,
    pub method: &'static str,
    pub description: String,
    pub file_location: String,
}

/// Fold analyzed records into a profile. `repo_root` is consulted only for
/// the root manifests (declared dependencies).
pub fn aggregate(repo_root: &Path, records: Vec<FileRecord>) -> ProjectProfile {
    let mut modules: BTreeMap<String, Vec<FileRecord>> = BTreeMap::new();
    let mut entry_points = Vec::new();
    let mut build_tools = Vec::new();
    let mut language_counts: BTreeMap<String, usize> = BTreeMap::new();
    let total_files = records.len();
    let mut total_lines = 0usize;

    for record in records {
        let file_name = record.file_name().to_string();
        if purpose::ENTRY_POINT_NAMES.contains(&file_name.as_str()) {
            entry_points.push(record.path.clone());
        }
        if manifest::is_build_marker(&file_name) {
            build_tools.push(file_name);
        }
        *language_counts.entry(record.language.clone()).or_insert(0) += 1;
        total_lines += record.line_count;
        modules.entry(record.module_key()).or_default().push(record);
    }

    let main_language = plurality_language(&language_counts);
    let architecture_pattern = infer_architecture(&modules, &entry_points);
    let dependencies = manifest::extract_dependencies(repo_root);

    tracing::debug!(
        files = total_files,
        modules = modules.len(),
        architecture = %architecture_pattern,
        "aggregated project profile"
    );

    ProjectProfile {
        main_language,
        entry_points,
        build_tools,
        dependencies,
        architecture_pattern,
        modules,
        total_files,
        total_lines,
    }
}

/// Label with the highest count. The strict comparison keeps the first
/// maximum in key order, so ties resolve to the smallest label.
fn plurality_language(counts: &BTreeMap<String, usize>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for (label, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label.to_string())
}

fn infer_architecture(
    modules: &BTreeMap<String, Vec<FileRecord>>,
    entry_points: &[String],
) -> ArchitecturePattern {
    if modules.contains_key("controllers")
        && modules.contains_key("models")
        && modules.contains_key("services")
    {
        ArchitecturePattern::Layered
    } else if entry_points.len() == 1 {
        ArchitecturePattern::Monolithic
    } else if modules.len() > 5 && !entry_points.is_empty() {
        ArchitecturePattern::Modular
    } else {
        ArchitecturePattern::Unknown
    }
}

impl ProjectProfile {
    /// All records, in module order.
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.modules.values().flatten()
    }

    pub fn stats(&self) -> ProfileStats {
        let mut language_breakdown: BTreeMap<String, usize> = BTreeMap::new();
        let mut purpose_breakdown: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_functions = 0usize;
        let mut total_classes = 0usize;

        for record in self.records() {
            *language_breakdown.entry(record.language.clone()).or_insert(0) += 1;
            *purpose_breakdown
                .entry(record.purpose.as_str().to_string())
                .or_insert(0) += 1;
            total_functions += record.functions.len();
            total_classes += record.classes.len();
        }

        ProfileStats {
            language_breakdown,
            purpose_breakdown,
            total_functions,
            total_classes,
        }
    }

    /// Best-effort endpoint guesses from controller-looking files.
    pub fn endpoints(&self) -> Vec<EndpointGuess> {
        let mut endpoints = Vec::new();
        for record in self.records() {
            let looks_like_api = record.purpose == Purpose::ApiController
                || record.path.contains("controller")
                || record.path.contains("route");
            if !looks_like_api {
                continue;
            }
            for function in &record.functions {
                endpoints.push(EndpointGuess {
                    path: format!("/api/{}", function),
                    method: infer_method(function),
                    description: format!("Auto-detected from function: {}", function),
                    file_location: record.path.clone(),
                });
            }
        }
        endpoints
    }
}

/// HTTP method from the function name prefix; GET when nothing matches.
fn infer_method(function: &str) -> &'static str {
    let lowered = function.to_ascii_lowercase();
    if lowered.starts_with("get") {
        "GET"
    } else if lowered.starts_with("post") {
        "POST"
    } else if lowered.starts_with("put") {
        "PUT"
    } else if lowered.starts_with("delete") {
        "DELETE"
    } else {
        "GET"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(path: &str, language: &str, purpose: Purpose) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            language: language.to_string(),
            purpose,
            functions: Vec::new(),
            classes: Vec::new(),
            imports: Vec::new(),
            line_count: 10,
            complexity_score: 1,
            summary: String::new(),
        }
    }

    #[test]
    fn test_layered_architecture() {
        let temp = TempDir::new().unwrap();
        let records = vec![
            record("controllers/user_controller.py", "Python", Purpose::ApiController),
            record("models/user.py", "Python", Purpose::DataModel),
            record("services/auth_service.py", "Python", Purpose::BusinessLogic),
        ];

        let profile = aggregate(temp.path(), records);
        assert_eq!(profile.architecture_pattern, ArchitecturePattern::Layered);
        assert_eq!(
            profile.modules.keys().collect::<Vec<_>>(),
            vec!["controllers", "models", "services"]
        );
        assert_eq!(profile.total_files, 3);
        assert_eq!(profile.total_lines, 30);
    }

    #[test]
    fn test_nested_layers_do_not_count() {
        let temp = TempDir::new().unwrap();
        let records = vec![
            record("src/controllers/user_controller.py", "Python", Purpose::ApiController),
            record("src/models/user.py", "Python", Purpose::DataModel),
            record("src/services/auth_service.py", "Python", Purpose::BusinessLogic),
        ];

        let profile = aggregate(temp.path(), records);
        assert_ne!(profile.architecture_pattern, ArchitecturePattern::Layered);
    }

    #[test]
    fn test_monolithic_architecture() {
        let temp = TempDir::new().unwrap();
        let records = vec![
            record("main.py", "Python", Purpose::EntryPoint),
            record("helpers.py", "Python", Purpose::Utility),
        ];

        let profile = aggregate(temp.path(), records);
        assert_eq!(profile.entry_points, vec!["main.py"]);
        assert_eq!(profile.architecture_pattern, ArchitecturePattern::Monolithic);
    }

    #[test]
    fn test_modular_architecture() {
        let temp = TempDir::new().unwrap();
        let mut records = vec![
            record("main.py", "Python", Purpose::EntryPoint),
            record("app.py", "Python", Purpose::EntryPoint),
        ];
        for module in ["auth", "billing", "cart", "orders", "search", "shipping"] {
            records.push(record(&format!("{}/logic.py", module), "Python", Purpose::Utility));
        }

        let profile = aggregate(temp.path(), records);
        assert_eq!(profile.entry_points.len(), 2);
        assert!(profile.modules.len() > 5);
        assert_eq!(profile.architecture_pattern, ArchitecturePattern::Modular);
    }

    #[test]
    fn test_unknown_architecture() {
        let temp = TempDir::new().unwrap();
        let records = vec![record("lib.py", "Python", Purpose::Utility)];

        let profile = aggregate(temp.path(), records);
        assert!(profile.entry_points.is_empty());
        assert_eq!(profile.architecture_pattern, ArchitecturePattern::Unknown);
    }

    #[test]
    fn test_main_language_plurality() {
        let temp = TempDir::new().unwrap();
        let records = vec![
            record("a.py", "Python", Purpose::GeneralCode),
            record("b.py", "Python", Purpose::GeneralCode),
            record("c.js", "JavaScript", Purpose::GeneralCode),
        ];

        let profile = aggregate(temp.path(), records);
        assert_eq!(profile.main_language.as_deref(), Some("Python"));
    }

    #[test]
    fn test_main_language_tie_breaks_lexicographically() {
        let temp = TempDir::new().unwrap();
        let records = vec![
            record("a.py", "Python", Purpose::GeneralCode),
            record("b.py", "Python", Purpose::GeneralCode),
            record("c.js", "JavaScript", Purpose::GeneralCode),
            record("d.js", "JavaScript", Purpose::GeneralCode),
            record("e.go", "Go", Purpose::GeneralCode),
        ];

        let profile = aggregate(temp.path(), records);
        assert_eq!(profile.main_language.as_deref(), Some("JavaScript"));
    }

    #[test]
    fn test_empty_repository() {
        let temp = TempDir::new().unwrap();
        let profile = aggregate(temp.path(), Vec::new());
        assert_eq!(profile.main_language, None);
        assert_eq!(profile.total_files, 0);
        assert_eq!(profile.total_lines, 0);
        assert!(profile.modules.is_empty());
        assert_eq!(profile.architecture_pattern, ArchitecturePattern::Unknown);
    }

    #[test]
    fn test_build_tool_collection_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        let records = vec![
            record("package.json", "JSON", Purpose::DocsConfig),
            record("Makefile", "Text", Purpose::DocsConfig),
            record("MAKEFILE.bak", "Unknown", Purpose::DocsConfig),
        ];

        let profile = aggregate(temp.path(), records);
        assert_eq!(profile.build_tools, vec!["package.json", "Makefile"]);
    }

    #[test]
    fn test_stats_view() {
        let temp = TempDir::new().unwrap();
        let mut service = record("services/cart_service.py", "Python", Purpose::BusinessLogic);
        service.functions = vec!["add_item".into(), "remove_item".into()];
        service.classes = vec!["Cart".into()];
        let records = vec![
            service,
            record("docs/README.md", "Markdown", Purpose::DocsConfig),
        ];

        let stats = aggregate(temp.path(), records).stats();
        assert_eq!(stats.language_breakdown["Python"], 1);
        assert_eq!(stats.language_breakdown["Markdown"], 1);
        assert_eq!(stats.purpose_breakdown["Business Logic"], 1);
        assert_eq!(stats.purpose_breakdown["Documentation/Configuration"], 1);
        assert_eq!(stats.total_functions, 2);
        assert_eq!(stats.total_classes, 1);
    }

    #[test]
    fn test_endpoint_guesses() {
        let temp = TempDir::new().unwrap();
        let mut controller = record("controllers/user_controller.py", "Python", Purpose::ApiController);
        controller.functions = vec![
            "getUsers".into(),
            "postLogin".into(),
            "deleteUser".into(),
            "renderPage".into(),
        ];
        let records = vec![
            controller,
            record("models/user.py", "Python", Purpose::DataModel),
        ];

        let endpoints = aggregate(temp.path(), records).endpoints();
        assert_eq!(endpoints.len(), 4);
        assert_eq!(endpoints[0].path, "/api/getUsers");
        assert_eq!(endpoints[0].method, "GET");
        assert_eq!(
            endpoints[0].description,
            "Auto-detected from function: getUsers"
        );
        assert_eq!(endpoints[0].file_location, "controllers/user_controller.py");
        assert_eq!(endpoints[1].method, "POST");
        assert_eq!(endpoints[2].method, "DELETE");
        assert_eq!(endpoints[3].method, "GET");
    }

    #[test]
    fn test_route_path_without_controller_purpose_still_guessed() {
        let temp = TempDir::new().unwrap();
        let mut routes = record("api/routes.py", "Python", Purpose::GeneralCode);
        routes.functions = vec!["putProfile".into()];

        let endpoints = aggregate(temp.path(), vec![routes]).endpoints();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].method, "PUT");
    }
}
