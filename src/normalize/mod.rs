//! Row normalization: from loosely named spreadsheet cells to canonical field values.
//!
//! - [`column`]: header cleanup and first-match-wins synonym resolution.
//! - [`value`]: numeric / boolean / text coercion of a single cell.
//! - [`list`]: comma-separated or list-shaped multi-value cells.

pub mod column;
pub mod list;
pub mod value;
