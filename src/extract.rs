//! Line-oriented lexical extraction of functions, classes and imports.
//!
//! This is a heuristic signal, not a parser: each rule set is applied per
//! physical line with no state carried between lines, so matches inside
//! comments or strings are accepted as noise. Multi-line declarations are
//! missed. That trade-off keeps the extractor cheap and language coverage
//! wide.

use lazy_static::lazy_static;
use regex::Regex;

use crate::language::PatternFamily;

/// Symbols pulled out of one file's content, in order of first appearance.
/// Sequences are append-only; duplicates are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub imports: Vec<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty() && self.imports.is_empty()
    }
}

/// Extraction rules for one language family. `imports` is absent for families
/// with no import syntax worth matching.
struct RuleSet {
    functions: Regex,
    classes: Regex,
    imports: Option<Regex>,
}

lazy_static! {
    static ref PYTHON_RULES: RuleSet = RuleSet {
        functions: Regex::new(r"def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap(),
        classes: Regex::new(r"class\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
        imports: Some(Regex::new(r"(?:import|from)\s+([A-Za-z_][A-Za-z0-9_.]*)").unwrap()),
    };
    static ref JAVASCRIPT_RULES: RuleSet = RuleSet {
        functions: Regex::new(
            r"function\s+([A-Za-z_$][A-Za-z0-9_$]*)|(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(?:async\s*)?(?:\([^)]*\)|[A-Za-z_$][A-Za-z0-9_$]*)\s*=>"
        )
        .unwrap(),
        classes: Regex::new(r"class\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap(),
        imports: Some(
            Regex::new(
                r#"import\s+.*?from\s+['"]([^'"]+)['"]|require\s*\(\s*['"]([^'"]+)['"]|import\s+['"]([^'"]+)['"]"#
            )
            .unwrap()
        ),
    };
    static ref JAVA_RULES: RuleSet = RuleSet {
        functions: Regex::new(
            r"(?:public|private|protected)\s+(?:static\s+)?(?:[\w<>\[\]]+\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*\("
        )
        .unwrap(),
        classes: Regex::new(r"(?:class|interface|enum)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
        imports: Some(Regex::new(r"import\s+([A-Za-z_][A-Za-z0-9_.]*);").unwrap()),
    };
    static ref C_FAMILY_RULES: RuleSet = RuleSet {
        functions: Regex::new(r"(?:[A-Za-z_][A-Za-z0-9_]*\s+)+([A-Za-z_][A-Za-z0-9_]*)\s*\(")
            .unwrap(),
        classes: Regex::new(r"(?:class|struct)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
        imports: Some(Regex::new(r#"#include\s*(?:<([^>]+)>|"([^"]+)")"#).unwrap()),
    };
    static ref GO_RULES: RuleSet = RuleSet {
        functions: Regex::new(r"func\s+(?:\([^)]+\)\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap(),
        classes: Regex::new(r"type\s+([A-Za-z_][A-Za-z0-9_]*)\s+(?:struct|interface)").unwrap(),
        // Single-line import, or a bare quoted path as it appears inside an
        // import block. No block state is kept.
        imports: Some(
            Regex::new(r#"import\s+"([^"]+)"|^\s*(?:[A-Za-z_][A-Za-z0-9_]*\s+)?"([A-Za-z0-9_./-]+)"\s*$"#)
                .unwrap()
        ),
    };
    static ref RUST_RULES: RuleSet = RuleSet {
        functions: Regex::new(r"fn\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
        classes: Regex::new(r"(?:struct|enum|trait)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
        imports: Some(Regex::new(r"use\s+([A-Za-z_][A-Za-z0-9_:]*)").unwrap()),
    };
    static ref GENERIC_RULES: RuleSet = RuleSet {
        functions: Regex::new(
            r"function\s+([A-Za-z_][A-Za-z0-9_]*)|def\s+([A-Za-z_][A-Za-z0-9_]*)|fn\s+([A-Za-z_][A-Za-z0-9_]*)"
        )
        .unwrap(),
        classes: Regex::new(r"class\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
        imports: None,
    };
}

fn rules_for(family: PatternFamily) -> &'static RuleSet {
    match family {
        PatternFamily::Python => &PYTHON_RULES,
        PatternFamily::JavaScript => &JAVASCRIPT_RULES,
        PatternFamily::Java => &JAVA_RULES,
        PatternFamily::CFamily => &C_FAMILY_RULES,
        PatternFamily::Go => &GO_RULES,
        PatternFamily::Rust => &RUST_RULES,
        PatternFamily::Generic => &GENERIC_RULES,
    }
}

/// First non-empty capture group of `re` against `line`, if any.
fn first_capture<'l>(re: &Regex, line: &'l str) -> Option<&'l str> {
    let caps = re.captures(line)?;
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .find(|s| !s.is_empty())
}

/// Extract candidate symbols from `content` using the rule set for
/// `language`.
///
/// One function and one class at most per line (first capture wins); imports
/// take every non-empty capture group of the line's first match, which for
/// the alternation patterns used here is at most one. Deterministic for
/// identical input.
pub fn extract(content: &str, language: &str) -> Extraction {
    let rules = rules_for(PatternFamily::for_language(language));
    let mut result = Extraction::default();

    for line in content.lines() {
        if let Some(name) = first_capture(&rules.functions, line) {
            result.functions.push(name.to_string());
        }
        if let Some(name) = first_capture(&rules.classes, line) {
            result.classes.push(name.to_string());
        }
        if let Some(import_re) = &rules.imports {
            if let Some(caps) = import_re.captures(line) {
                for group in caps.iter().skip(1).flatten() {
                    if !group.as_str().is_empty() {
                        result.imports.push(group.as_str().to_string());
                    }
                }
            }
        }
    }

    result
}
