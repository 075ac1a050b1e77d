//! Output formatting for analysis results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the stored document, optionally extended with the derived
//!   statistics and endpoint views

use colored::*;

use crate::profile::{EndpointGuess, ProfileStats, ProjectProfile};
use crate::store::StoredAnalysis;

/// Write an analysis in JSON. The optional views are spliced into the
/// document under `stats` and `endpoints`.
pub fn write_json(
    analysis: &StoredAnalysis,
    show_stats: bool,
    show_endpoints: bool,
) -> anyhow::Result<()> {
    let mut doc = serde_json::to_value(analysis)?;
    if show_stats {
        doc["stats"] = serde_json::to_value(analysis.profile.stats())?;
    }
    if show_endpoints {
        doc["endpoints"] = serde_json::to_value(analysis.profile.endpoints())?;
    }
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// Write an analysis in pretty (human-readable) format.
pub fn write_pretty(analysis: &StoredAnalysis, show_stats: bool, show_endpoints: bool) {
    // Header
    println!();
    print!("  ");
    print!("{}", "repolens".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Repository: ".dimmed());
    println!("{}", analysis.repo_id);
    print!("  {}", "Generated:  ".dimmed());
    println!("{} (unix)", analysis.generated_at);
    println!();

    write_overview(&analysis.profile);
    println!();

    if !analysis.profile.modules.is_empty() {
        write_modules(&analysis.profile);
        println!();
    }

    if show_stats {
        write_stats(&analysis.profile.stats());
        println!();
    }

    if show_endpoints {
        write_endpoints(&analysis.profile.endpoints());
        println!();
    }
}

fn write_overview(profile: &ProjectProfile) {
    println!("  {}", "Overview:".bold());
    println!(
        "    {:<16} {}",
        "Main language",
        profile.main_language.as_deref().unwrap_or("none")
    );
    println!("    {:<16} {}", "Architecture", profile.architecture_pattern);
    println!("    {:<16} {}", "Files", profile.total_files);
    println!("    {:<16} {}", "Lines", profile.total_lines);

    if !profile.entry_points.is_empty() {
        println!(
            "    {:<16} {}",
            "Entry points",
            profile.entry_points.join(", ")
        );
    }
    if !profile.build_tools.is_empty() {
        println!("    {:<16} {}", "Build tools", profile.build_tools.join(", "));
    }
    if !profile.dependencies.is_empty() {
        println!(
            "    {:<16} {} declared",
            "Dependencies",
            profile.dependencies.len()
        );
    }
}

fn write_modules(profile: &ProjectProfile) {
    println!("  {} ({}):", "Modules".bold(), profile.modules.len());
    for (module, records) in &profile.modules {
        let plural = if records.len() != 1 { "s" } else { "" };
        println!("    {:<28} {:>4} file{}", module, records.len(), plural);
    }
}

fn write_stats(stats: &ProfileStats) {
    println!("  {}", "Languages:".bold());
    for (language, count) in &stats.language_breakdown {
        let plural = if *count != 1 { "s" } else { "" };
        println!("    {:<28} {:>4} file{}", language, count, plural);
    }
    println!();
    println!("  {}", "Purposes:".bold());
    for (purpose, count) in &stats.purpose_breakdown {
        let plural = if *count != 1 { "s" } else { "" };
        println!("    {:<28} {:>4} file{}", purpose, count, plural);
    }
    println!();
    println!(
        "  {} {} functions, {} classes",
        "Symbols:".bold(),
        stats.total_functions,
        stats.total_classes
    );
}

fn write_endpoints(endpoints: &[EndpointGuess]) {
    println!("  {} ({}):", "Endpoints".bold(), endpoints.len());
    if endpoints.is_empty() {
        println!("    {}", "(no controller-looking files)".dimmed());
        return;
    }
    println!();
    for endpoint in endpoints {
        write_method_tag(endpoint.method);
        print!("{:<32}", endpoint.path);
        println!("{}", endpoint.file_location.blue());
    }
}

fn write_method_tag(method: &str) {
    let tag = format!("{:<7}", method);
    match method {
        "GET" => print!("    {} ", tag.blue()),
        "POST" => print!("    {} ", tag.green()),
        "PUT" => print!("    {} ", tag.yellow()),
        "DELETE" => print!("    {} ", tag.red()),
        _ => print!("    {} ", tag.normal()),
    }
}

/// Write the stored ids, one per line.
pub fn write_list(ids: &[String]) {
    if ids.is_empty() {
        println!("{}", "no stored analyses".dimmed());
        return;
    }
    for id in ids {
        println!("{}", id);
    }
}
