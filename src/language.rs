//! Language classification from file paths.
//!
//! Maps a file's extension (or, failing that, its full name) to a language
//! label. Lookups are against process-wide static tables; unmatched paths get
//! the `"Unknown"` sentinel rather than an error.

use std::path::Path;

use phf::{phf_map, phf_set};

/// Sentinel label for files no table entry matches.
pub const UNKNOWN: &str = "Unknown";

/// Extension → language label. Keys are lowercase, without the leading dot.
static EXTENSION_LANGUAGES: phf::Map<&'static str, &'static str> = phf_map! {
    "py" => "Python",
    "js" => "JavaScript",
    "jsx" => "JavaScript React",
    "ts" => "TypeScript",
    "tsx" => "TypeScript React",
    "java" => "Java",
    "cpp" => "C++",
    "cc" => "C++",
    "cxx" => "C++",
    "c" => "C",
    "h" => "C/C++ Header",
    "hpp" => "C++ Header",
    "cs" => "C#",
    "go" => "Go",
    "rs" => "Rust",
    "php" => "PHP",
    "rb" => "Ruby",
    "swift" => "Swift",
    "kt" => "Kotlin",
    "scala" => "Scala",
    "m" => "Objective-C",
    "mm" => "Objective-C++",
    "r" => "R",
    "pl" => "Perl",
    "pm" => "Perl",
    "lua" => "Lua",
    "sql" => "SQL",
    "html" => "HTML",
    "htm" => "HTML",
    "css" => "CSS",
    "scss" => "SCSS",
    "sass" => "SASS",
    "less" => "LESS",
    "xml" => "XML",
    "json" => "JSON",
    "yaml" => "YAML",
    "yml" => "YAML",
    "toml" => "TOML",
    "ini" => "INI",
    "cfg" => "Configuration",
    "conf" => "Configuration",
    "sh" => "Shell Script",
    "bash" => "Bash Script",
    "zsh" => "Zsh Script",
    "fish" => "Fish Script",
    "ps1" => "PowerShell",
    "bat" => "Batch File",
    "cmd" => "Command File",
    "dockerfile" => "Dockerfile",
    "md" => "Markdown",
    "txt" => "Text",
    "log" => "Log File",
};

/// Full filename → language label, for files whose extension is absent or
/// unrecognized. Keys are lowercase.
static FILENAME_LANGUAGES: phf::Map<&'static str, &'static str> = phf_map! {
    "dockerfile" => "Dockerfile",
    "makefile" => "Makefile",
    "cmakelists.txt" => "CMake",
    "package.json" => "Node.js Configuration",
    "requirements.txt" => "Python Dependencies",
    "pom.xml" => "Maven Configuration",
    "build.gradle" => "Gradle Configuration",
    "cargo.toml" => "Rust Configuration",
    "go.mod" => "Go Modules",
};

/// Labels that mark a file as non-code: symbol extraction is skipped and the
/// purpose is forced to Documentation/Configuration.
static NON_CODE_LABELS: phf::Set<&'static str> = phf_set! {
    "Unknown",
    "Markdown",
    "Text",
    "Log File",
    "Configuration",
};

/// Classify a file path into a language label.
///
/// Extension lookup wins over the filename lookup, so `package.json` is JSON
/// and the filename table only covers extensionless or oddball names like
/// `Makefile` or `go.mod`. Both lookups are case-insensitive. Never fails;
/// unmatched paths yield [`UNKNOWN`].
pub fn classify(path: &Path) -> &'static str {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if let Some(label) = EXTENSION_LANGUAGES.get(ext.to_lowercase().as_str()) {
            return label;
        }
    }

    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if let Some(label) = FILENAME_LANGUAGES.get(name.to_lowercase().as_str()) {
            return label;
        }
    }

    UNKNOWN
}

/// Whether a label names something worth lexical extraction.
pub fn is_code(label: &str) -> bool {
    !NON_CODE_LABELS.contains(label)
}

/// Language families the extractor has dedicated rule sets for.
///
/// Everything else falls into `Generic`, which carries a lowest-common-
/// denominator pattern set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    Python,
    JavaScript,
    Java,
    CFamily,
    Go,
    Rust,
    Generic,
}

impl PatternFamily {
    /// Map a language label onto its extraction family.
    pub fn for_language(label: &str) -> Self {
        match label {
            "Python" => PatternFamily::Python,
            "JavaScript" | "TypeScript" | "JavaScript React" | "TypeScript React" => {
                PatternFamily::JavaScript
            }
            "Java" => PatternFamily::Java,
            "C" | "C++" | "C/C++ Header" | "C++ Header" => PatternFamily::CFamily,
            "Go" => PatternFamily::Go,
            "Rust" => PatternFamily::Rust,
            _ => PatternFamily::Generic,
        }
    }
}
