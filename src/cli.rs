use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use listing_importer::listing::SearchFilters;

#[derive(Parser, Debug)]
#[command(
    name = "listing-importer",
    about = "Normalize property spreadsheets into a JSON listing and query it",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file [default: ./.listing-importer/config.toml, fallback ~/.config/listing-importer/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show every converted property and info-level logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a spreadsheet (xlsx, xls, ods, csv, tsv, json rows) into a JSON listing
    Convert {
        /// Input spreadsheet
        #[arg(default_value = "propiedades.xlsx")]
        input: PathBuf,

        /// Output listing file
        #[arg(short, long, default_value = "propiedades.json")]
        output: PathBuf,

        /// Field separator for CSV / TSV input
        #[arg(long, value_name = "CHAR")]
        delimiter: Option<char>,
    },

    /// Check which columns of a spreadsheet map to listing fields
    Inspect {
        /// Input spreadsheet
        #[arg(default_value = "propiedades.xlsx")]
        input: PathBuf,

        /// Field separator for CSV / TSV input
        #[arg(long, value_name = "CHAR")]
        delimiter: Option<char>,

        /// Report format
        #[arg(long, default_value = "terminal", value_name = "FORMAT")]
        report: ReportFormat,
    },

    /// Search a listing
    Search {
        #[command(flatten)]
        listing: ListingArgs,

        #[command(flatten)]
        filters: SearchArgs,
    },

    /// Distinct neighborhoods and property types of a listing
    FilterOptions {
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Counts and ranges over a listing
    Stats {
        #[command(flatten)]
        listing: ListingArgs,
    },
}

#[derive(Args, Debug)]
pub struct ListingArgs {
    /// Listing file produced by `convert`
    #[arg(long, default_value = "propiedades.json")]
    pub listing: PathBuf,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Operation, exact match (e.g. Venta, Alquiler)
    #[arg(long)]
    pub operation: Option<String>,

    /// Property type, exact match
    #[arg(long = "type", value_name = "TYPE")]
    pub property_type: Option<String>,

    /// Neighborhood, case-insensitive
    #[arg(long)]
    pub neighborhood: Option<String>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum number of rooms
    #[arg(long)]
    pub min_rooms: Option<i64>,
}

impl From<SearchArgs> for SearchFilters {
    fn from(args: SearchArgs) -> Self {
        SearchFilters {
            operation: args.operation,
            property_type: args.property_type,
            neighborhood: args.neighborhood,
            max_price: args.max_price,
            min_rooms: args.min_rooms,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from([
            "listing-importer",
            "search",
            "--listing",
            "props.json",
            "--operation",
            "Venta",
            "--type",
            "Casa",
            "--max-price",
            "150000",
            "--report",
            "json",
        ]);
        let Command::Search { listing, filters } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(listing.listing, PathBuf::from("props.json"));
        assert!(matches!(listing.report, ReportFormat::Json));

        let filters: SearchFilters = filters.into();
        assert_eq!(filters.operation.as_deref(), Some("Venta"));
        assert_eq!(filters.property_type.as_deref(), Some("Casa"));
        assert_eq!(filters.max_price, Some(150000.0));
        assert_eq!(filters.min_rooms, None);
    }

    #[test]
    fn test_parse_convert_defaults() {
        let cli = Cli::parse_from(["listing-importer", "-q", "convert"]);
        assert!(cli.quiet);
        let Command::Convert { input, output, delimiter } = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(input, PathBuf::from("propiedades.xlsx"));
        assert_eq!(output, PathBuf::from("propiedades.json"));
        assert_eq!(delimiter, None);
    }
}
