//! Report renderers.
//!
//! - [`terminal`]: colored boxes and tables for conversions, inspections and
//!   listing queries; respects `--verbose` / `--quiet`.
//!
//! JSON output is written directly by the commands with `serde_json`.

pub mod terminal;
