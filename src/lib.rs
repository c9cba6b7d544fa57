//! Library behind `listing-importer`. Turns loosely structured property
//! spreadsheets into a normalized JSON listing, and queries that listing.
//!
//! # Flow
//! 1. Read a sheet and clean its column names ([`reader`], [`detector`]).
//! 2. For every row, resolve each catalog field from its synonym columns
//!    ([`normalize::column`]), coerce the cell ([`normalize::value`],
//!    [`normalize::list`]) and assemble the record ([`assembler`]).
//! 3. Write the listing ([`importer`]) or check the sheet first ([`inspect`]).
//! 4. Search, list filter options and compute statistics over a listing ([`listing`]).

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod detector;
pub mod error;
pub mod importer;
pub mod inspect;
pub mod listing;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod reader;
pub mod report;

pub use assembler::{Assembly, RecordAssembler};
pub use catalog::{Defaults, FieldCatalog, FieldSpec};
pub use models::{CellValue, FieldCategory, FieldValue, NormalizedRecord, RawRow};
