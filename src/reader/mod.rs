//! Sheet readers: turn a spreadsheet-like file into [`RawRow`]s with cleaned column names.
//!
//! - [`workbook`]: XLSX / XLS / ODS through `calamine` (first worksheet).
//! - [`delimited`]: CSV / TSV through `csv`.
//! - [`json_rows`]: a JSON array of row objects; arrays become list cells.

use std::path::Path;

use crate::error::{ReadError, RowError};
use crate::models::{CellValue, RawRow};
use crate::normalize::column::clean_column_name;

pub mod delimited;
pub mod json_rows;
pub mod workbook;

/// A decoded sheet. Rows keep their position so failures can be reported by
/// row number; a failed row never hides the rows after it.
#[derive(Debug, Default)]
pub struct Sheet {
    pub columns: Vec<String>,
    pub rows: Vec<Result<RawRow, RowError>>,
}

impl Sheet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

pub trait SheetReader {
    fn read(&self, path: &Path) -> Result<Sheet, ReadError>;
}

/// Assemble a [`Sheet`] from a header row and positional data rows.
///
/// Headers are cleaned; cells beyond the header get the placeholder column
/// name; rows where every cell is missing are dropped.
fn build_sheet<I>(headers: &[Option<String>], rows: I) -> Sheet
where
    I: IntoIterator<Item = Result<Vec<CellValue>, RowError>>,
{
    let columns: Vec<String> = headers
        .iter()
        .map(|h| clean_column_name(h.as_deref()))
        .collect();

    let rows = rows
        .into_iter()
        .filter_map(|row| match row {
            Ok(cells) => {
                let raw: RawRow = cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let column = columns
                            .get(i)
                            .cloned()
                            .unwrap_or_else(|| clean_column_name(None));
                        (column, cell)
                    })
                    .collect();
                (!raw.is_blank()).then_some(Ok(raw))
            }
            Err(e) => Some(Err(e)),
        })
        .collect();

    Sheet { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sheet_cleans_headers_and_drops_blank_rows() {
        let headers = vec![Some("Precio USD".to_string()), None, Some("Barrio".to_string())];
        let rows = vec![
            Ok(vec![CellValue::Int(100), CellValue::Empty, CellValue::from("Centro")]),
            Ok(vec![CellValue::Empty, CellValue::from(" "), CellValue::Empty]),
            Err(RowError::Malformed("bad".into())),
            Ok(vec![
                CellValue::Int(200),
                CellValue::from("x"),
                CellValue::from("Norte"),
                CellValue::from("extra"),
            ]),
        ];

        let sheet = build_sheet(&headers, rows);
        assert_eq!(sheet.columns, vec!["precio_usd", "unknown_column", "barrio"]);
        assert_eq!(sheet.row_count(), 3);
        assert!(sheet.rows[1].is_err());

        let last = sheet.rows[2].as_ref().unwrap();
        assert_eq!(last.get("precio_usd"), Some(&CellValue::Int(200)));
        assert_eq!(last.len(), 4);
        assert_eq!(
            last.columns().collect::<Vec<_>>(),
            vec!["precio_usd", "unknown_column", "barrio", "unknown_column"]
        );
    }
}
