//! `listing-importer` command line.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Initialize logging ([`listing_importer::logging`]).
//! 3. Load config ([`listing_importer::config::load_config`]).
//! 4. Run the subcommand: `convert` / `inspect` read a sheet, the query
//!    commands load a listing.
//! 5. Render the terminal or JSON report.

mod cli;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use cli::{Cli, Command, ListingArgs, ReportFormat};
use listing_importer::config::{load_config, Config};
use listing_importer::detector::{detect_format, reader_for};
use listing_importer::importer::{convert_sheet, write_listing};
use listing_importer::inspect::inspect;
use listing_importer::listing::{filter_options, load_listing, search, stats, SearchFilters};
use listing_importer::logging::init_logging;
use listing_importer::reader::Sheet;
use listing_importer::report::terminal;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let work_dir = std::env::current_dir()?;
    let config = load_config(&work_dir, cli.config.as_deref())?;

    match cli.command {
        Command::Convert {
            input,
            output,
            delimiter,
        } => run_convert(&config, &input, &output, delimiter, cli.verbose, cli.quiet),
        Command::Inspect {
            input,
            delimiter,
            report,
        } => {
            let sheet = read_sheet(&input, delimiter)?;
            let inspection = inspect(&sheet, &config.catalog()?);
            match report {
                ReportFormat::Terminal => terminal::render_inspection(&inspection, &input),
                ReportFormat::Json => print_json(&inspection)?,
            }
            Ok(())
        }
        Command::Search { listing, filters } => {
            let properties = load_listing(&listing.listing)?;
            let filters: SearchFilters = filters.into();
            let found = search(&properties, &filters);
            info!(filters = ?filters, found = found.len(), "search");
            match listing.report {
                ReportFormat::Terminal => terminal::render_properties(&found),
                ReportFormat::Json => print_json(&SearchResponse {
                    total: found.len(),
                    properties: &found,
                    filters: &filters,
                })?,
            }
            Ok(())
        }
        Command::FilterOptions { listing } => {
            let options = filter_options(&load_listing(&listing.listing)?);
            render(&listing, &options, terminal::render_filter_options)
        }
        Command::Stats { listing } => {
            let stats = stats(&load_listing(&listing.listing)?);
            render(&listing, &stats, terminal::render_stats)
        }
    }
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    total: usize,
    properties: &'a [&'a listing_importer::listing::Property],
    filters: &'a SearchFilters,
}

fn run_convert(
    config: &Config,
    input: &Path,
    output: &Path,
    delimiter: Option<char>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let assembler = config.assembler()?;
    let sheet = read_sheet(input, delimiter)?;

    if !quiet {
        eprintln!(
            "  {} {} rows, {} columns",
            "→".cyan(),
            sheet.row_count(),
            sheet.columns.len()
        );
    }

    let pb = if !quiet {
        let pb = ProgressBar::new(sheet.row_count() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let outcome = convert_sheet(&sheet, &assembler, pb.as_ref());

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    write_listing(output, &outcome.records)?;
    terminal::render_conversion(&outcome, input, output, verbose, quiet);

    Ok(())
}

fn read_sheet(input: &Path, delimiter: Option<char>) -> Result<Sheet> {
    let Some(format) = detect_format(input) else {
        bail!(
            "cannot tell the format of {} (expected xlsx, xls, ods, csv, tsv or json)",
            input.display()
        );
    };
    let delimiter = delimiter
        .map(u8::try_from)
        .transpose()
        .context("delimiter must be a single ASCII character")?;

    info!(path = %input.display(), %format, "reading sheet");
    let sheet = reader_for(format, delimiter).read(input)?;
    Ok(sheet)
}

fn render<T: Serialize>(listing: &ListingArgs, value: &T, terminal: fn(&T)) -> Result<()> {
    match listing.report {
        ReportFormat::Terminal => terminal(value),
        ReportFormat::Json => print_json(value)?,
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
