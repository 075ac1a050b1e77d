//! Build-system markers and declared-dependency extraction.
//!
//! Dependencies are read from well-known manifests at the repository root
//! only, never inferred from source scanning, and are reported as
//! ecosystem-prefixed strings (`npm:`, `npm-dev:`, `pypi:`, `go:`).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Filenames that mark a build system or packaging tool.
pub const BUILD_MARKER_NAMES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "pom.xml",
    "build.gradle",
    "CMakeLists.txt",
    "Makefile",
    "Dockerfile",
    "docker-compose.yml",
    "Cargo.toml",
    "go.mod",
    "composer.json",
    "webpack.config.js",
    "tsconfig.json",
    "Jenkinsfile",
];

/// Whether a file name marks a build tool.
pub fn is_build_marker(name: &str) -> bool {
    BUILD_MARKER_NAMES.contains(&name)
}

/// The slice of package.json this crate reads. Maps are ordered so the
/// emitted dependency list is deterministic.
#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, String>,
}

/// Read declared dependencies from the repository root's manifests.
///
/// Order: npm runtime, npm dev, pypi, go. A missing manifest contributes
/// nothing; an unparseable one is skipped with a warning.
pub fn extract_dependencies(repo_root: &Path) -> Vec<String> {
    let mut dependencies = Vec::new();

    let package_json = repo_root.join("package.json");
    if package_json.exists() {
        match read_package_json(&package_json) {
            Ok(pkg) => {
                for (name, version) in &pkg.dependencies {
                    dependencies.push(format!("npm:{}@{}", name, version));
                }
                for (name, version) in &pkg.dev_dependencies {
                    dependencies.push(format!("npm-dev:{}@{}", name, version));
                }
            }
            Err(err) => {
                tracing::warn!(manifest = "package.json", error = %err, "skipping unreadable manifest");
            }
        }
    }

    let requirements = repo_root.join("requirements.txt");
    if requirements.exists() {
        match fs::read_to_string(&requirements) {
            Ok(content) => {
                for line in content.lines() {
                    let line = line.trim();
                    if !line.is_empty() && !line.starts_with('#') {
                        dependencies.push(format!("pypi:{}", line));
                    }
                }
            }
            Err(err) => {
                tracing::warn!(manifest = "requirements.txt", error = %err, "skipping unreadable manifest");
            }
        }
    }

    let go_mod = repo_root.join("go.mod");
    if go_mod.exists() {
        match fs::read_to_string(&go_mod) {
            Ok(content) => {
                for (module, version) in parse_go_requires(&content) {
                    if version.is_empty() {
                        dependencies.push(format!("go:{}", module));
                    } else {
                        dependencies.push(format!("go:{}@{}", module, version));
                    }
                }
            }
            Err(err) => {
                tracing::warn!(manifest = "go.mod", error = %err, "skipping unreadable manifest");
            }
        }
    }

    dependencies
}

fn read_package_json(path: &Path) -> anyhow::Result<PackageJson> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Pull `require` entries out of go.mod content, block or single-line form.
fn parse_go_requires(content: &str) -> Vec<(String, String)> {
    let mut requires = Vec::new();
    let mut in_require_block = false;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        if line == "require (" {
            in_require_block = true;
            continue;
        }
        if line == ")" {
            in_require_block = false;
            continue;
        }
        if let Some(rest) = line.strip_prefix("require ") {
            if !rest.trim_start().starts_with('(') {
                if let Some(pair) = parse_require_line(rest) {
                    requires.push(pair);
                }
            }
            continue;
        }
        if in_require_block {
            if let Some(pair) = parse_require_line(line) {
                requires.push(pair);
            }
        }
    }

    requires
}

/// Parse one require entry: "google.golang.org/grpc v1.78.0 // indirect"
fn parse_require_line(line: &str) -> Option<(String, String)> {
    let line = line.split("//").next().unwrap_or("").trim();
    let mut parts = line.split_whitespace();
    let module = parts.next()?.to_string();
    let version = parts.next().unwrap_or("").to_string();
    Some((module, version))
}
