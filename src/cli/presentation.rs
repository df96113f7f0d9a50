//! CLI presentation: text and JSON rendering of plans and scanned trees.

use crate::diff::{display_relative, ChangePlan, OperationKind};
use crate::error::ApiError;
use crate::tree::node::DirectoryEntry;
use chrono::{DateTime, SecondsFormat, Utc};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

fn format_kind(kind: OperationKind, color: bool) -> String {
    let label = format!("{:<6}", kind.label());
    if !color {
        return label;
    }
    match kind {
        OperationKind::AddFile | OperationKind::CreateDirectory => label.green().to_string(),
        OperationKind::MoveFile => label.yellow().to_string(),
        OperationKind::DeleteFile | OperationKind::DeleteDirectory => label.red().to_string(),
    }
}

/// Format a change plan as one line per operation followed by a summary table.
pub fn format_plan_text(
    source: &Path,
    destination: &Path,
    plan: &ChangePlan,
    color: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format_section_heading("Change plan", color)
    ));
    out.push_str(&format!("  Source:      {}\n", source.display()));
    out.push_str(&format!("  Destination: {}\n\n", destination.display()));

    if plan.is_empty() {
        out.push_str("No operations required.\n");
    }
    for op in plan {
        let kind = format_kind(op.kind, color);
        match &op.destination {
            Some(dest) => out.push_str(&format!(
                "{} {} -> {}\n",
                kind,
                op.source.display(),
                display_relative(dest)
            )),
            None => out.push_str(&format!("{} {}\n", kind, op.source.display())),
        }
    }

    let stats = &plan.stats;
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Operation", "Count"]);
    table.add_row(vec!["Add".to_string(), stats.adds.to_string()]);
    table.add_row(vec![
        "Move".to_string(),
        format!("{} ({} in place)", stats.moves, stats.in_place_moves),
    ]);
    table.add_row(vec!["Delete".to_string(), stats.deletes.to_string()]);
    out.push_str(&format!("\n{}\n", table));

    let hidden = stats.source_collisions + stats.destination_collisions;
    if hidden > 0 {
        out.push_str(&format!(
            "\nWarning: {} file(s) share a fingerprint with another file in the same tree \
             (source: {}, destination: {}); only the last one seen was matched.\n",
            hidden, stats.source_collisions, stats.destination_collisions
        ));
    }
    out
}

/// Format a change plan as pretty JSON.
pub fn format_plan_json(
    source: &Path,
    destination: &Path,
    plan: &ChangePlan,
) -> Result<String, ApiError> {
    let out = json!({
        "source": source,
        "destination": destination,
        "operations": plan.operations,
        "summary": plan.stats,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

/// Format a scanned tree as an indented listing.
pub fn format_tree_text(tree: &DirectoryEntry, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format_section_heading(&tree.path.display().to_string(), color)
    ));
    push_directory(&mut out, tree, 1);
    out.push_str(&format!(
        "\n{} files, {} directories, {} bytes\n",
        tree.file_count(),
        tree.directory_count(),
        tree.total_size()
    ));
    out
}

fn push_directory(out: &mut String, directory: &DirectoryEntry, depth: usize) {
    let indent = "  ".repeat(depth);
    for file in &directory.files {
        let modified: DateTime<Utc> = file.modified.into();
        out.push_str(&format!(
            "{}{}  {} B  {}  {}\n",
            indent,
            file.name,
            file.size,
            &hex::encode(file.content_hash)[..12],
            modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    for subdirectory in &directory.subdirectories {
        out.push_str(&format!("{}{}/\n", indent, subdirectory.name));
        push_directory(out, subdirectory, depth + 1);
    }
}

/// Format a scanned tree as pretty JSON.
pub fn format_tree_json(tree: &DirectoryEntry) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(tree)?)
}
