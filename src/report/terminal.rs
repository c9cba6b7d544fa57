use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;

use crate::importer::ConversionOutcome;
use crate::inspect::Inspection;
use crate::listing::{CountEntry, FilterOptions, ListingStats, Property};

fn banner(action: &str, path: &Path) {
    println!(
        "\n {} v{}",
        "listing-importer".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" {}: {}\n", action, path.display());
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(names: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(names));
    table
}

/// Summary of a `convert` run.
pub fn render_conversion(
    outcome: &ConversionOutcome,
    input: &Path,
    output: &Path,
    verbose: bool,
    quiet: bool,
) {
    let converted = outcome.records.len();
    let skipped = outcome.skipped.len();

    if quiet {
        println!(
            "Converted: {}  Skipped: {}  Fallbacks: {}",
            converted.to_string().green(),
            skipped.to_string().red(),
            outcome.fallback_count.to_string().yellow(),
        );
        return;
    }

    banner("Converting", input);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Output             : {}", output.display()));
    println!(
        " │  {:<48} │",
        format!("{}  Converted       : {:>4}", "✓".green(), converted)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Numbers as 0    : {:>4}", "⚠".yellow(), outcome.fallback_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Skipped rows    : {:>4}", "✗".red(), skipped)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if skipped > 0 {
        println!(" {} Rows that could not be read:\n", "[SKIPPED]".red().bold());
        let mut table = new_table(&["Row", "Reason"]);
        for row in &outcome.skipped {
            table.add_row(vec![
                Cell::new(row.row).set_alignment(CellAlignment::Right),
                Cell::new(&row.reason).fg(Color::Red),
            ]);
        }
        println!("{}\n", table);
    }

    if verbose && converted > 0 {
        println!(" {} Converted properties:\n", "[OK]".green().bold());
        let mut table = new_table(&["ID", "Title", "Operation", "Type", "Price", "Photos"]);
        for record in &outcome.records {
            let field = |name: &str| record.get(name).map(|v| v.to_string()).unwrap_or_default();
            let photos = match record.get("photos") {
                Some(crate::models::FieldValue::List(items)) => items.len(),
                _ => 0,
            };
            table.add_row(vec![
                Cell::new(field("id")),
                Cell::new(field("title")),
                Cell::new(field("operation")),
                Cell::new(field("property_type")),
                Cell::new(field("price")).set_alignment(CellAlignment::Right),
                Cell::new(photos).set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{}\n", table);
    }
}

/// Structure report produced by `inspect`.
pub fn render_inspection(inspection: &Inspection, path: &Path) {
    banner("Inspecting", path);

    println!(
        " Rows: {}   Unreadable rows: {}   Columns: {}\n",
        inspection.rows,
        inspection.row_errors,
        inspection.columns.len()
    );

    let mut table = new_table(&["Field", "Source columns"]);
    for m in &inspection.matched {
        table.add_row(vec![
            Cell::new(&m.field),
            Cell::new(m.columns.join(", ")).fg(Color::Green),
        ]);
    }
    println!("{}\n", table);

    for field in &inspection.missing_critical {
        println!(" {} '{}': no matching column", "⚠".yellow(), field);
    }
    if !inspection.unrecognized.is_empty() {
        println!(
            " {} ignored columns: {}",
            "ℹ".cyan(),
            inspection.unrecognized.join(", ")
        );
    }
    println!();
}

/// Properties returned by `search`.
pub fn render_properties(properties: &[&Property]) {
    println!("\n {} {} properties found\n", "→".cyan(), properties.len());
    if properties.is_empty() {
        return;
    }

    let mut table = new_table(&[
        "ID",
        "Title",
        "Operation",
        "Type",
        "Neighborhood",
        "Price",
        "Rooms",
    ]);
    for p in properties {
        let field = |name: &str| match p.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        table.add_row(vec![
            Cell::new(field("id")),
            Cell::new(field("title")),
            Cell::new(field("operation")),
            Cell::new(field("property_type")),
            Cell::new(field("neighborhood")),
            Cell::new(field("price")).set_alignment(CellAlignment::Right),
            Cell::new(field("rooms")).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}\n", table);
}

pub fn render_filter_options(options: &FilterOptions) {
    println!("\n {} {} properties\n", "→".cyan(), options.total);
    println!(" {} {}", "Neighborhoods:".bold(), options.neighborhoods.join(", "));
    println!(" {} {}\n", "Types:".bold(), options.property_types.join(", "));
}

pub fn render_stats(stats: &ListingStats) {
    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "LISTING".bold());
    println!(" │  {:<48} │", format!("Total properties   : {}", stats.total));
    println!(" │  {:<48} │", format!("Photos             : {}", stats.photos));
    println!(
        " │  {:<48} │",
        format!(
            "Documents          : {} in {} properties",
            stats.documents, stats.with_documents
        )
    );
    if let (Some(min), Some(max)) = (stats.min_price, stats.max_price) {
        println!(
            " │  {:<48} │",
            format!("Price range        : {} - {}", min, max)
        );
    }
    println!(" └────────────────────────────────────────────────────┘\n");

    render_counts("Operations", &stats.operations);
    render_counts("Property types", &stats.property_types);
    render_counts("Neighborhoods", &stats.neighborhoods);
}

fn render_counts(title: &str, counts: &[CountEntry]) {
    if counts.is_empty() {
        return;
    }
    let mut table = new_table(&[title, "Count"]);
    for entry in counts {
        table.add_row(vec![
            Cell::new(&entry.value),
            Cell::new(entry.count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}\n", table);
}
