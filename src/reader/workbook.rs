use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::ReadError;
use crate::models::CellValue;

use super::{build_sheet, Sheet, SheetReader};

/// Reads the first worksheet of an XLSX / XLSM / XLS / XLSB / ODS workbook.
/// The first row is the header.
pub struct WorkbookReader;

impl WorkbookReader {
    pub fn new() -> Self {
        Self
    }
}

impl SheetReader for WorkbookReader {
    fn read(&self, path: &Path) -> Result<Sheet, ReadError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| ReadError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ReadError::NoWorksheet(path.to_path_buf()))?
            .map_err(|e| ReadError::Workbook {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut rows = range.rows();
        let headers: Vec<Option<String>> = match rows.next() {
            Some(header) => header.iter().map(header_name).collect(),
            None => return Ok(Sheet::default()),
        };

        let data = rows.map(|row| Ok(row.iter().map(cell_value).collect()));
        Ok(build_sheet(&headers, data))
    }
}

fn header_name(cell: &Data) -> Option<String> {
    match cell_value(cell) {
        CellValue::Empty => None,
        other => Some(other.to_string()),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        // dates and durations keep their display form
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_value(&Data::Float(3.0)), CellValue::Float(3.0));
        assert_eq!(cell_value(&Data::Int(12)), CellValue::Int(12));
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(
            cell_value(&Data::String("Palermo".into())),
            CellValue::from("Palermo")
        );
    }

    #[test]
    fn test_header_names() {
        assert_eq!(header_name(&Data::Empty), None);
        assert_eq!(header_name(&Data::String("Precio".into())), Some("Precio".into()));
        assert_eq!(header_name(&Data::Float(2024.0)), Some("2024".into()));
    }

    #[test]
    fn test_missing_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let result = WorkbookReader::new().read(&dir.path().join("missing.xlsx"));
        assert!(matches!(result, Err(ReadError::Workbook { .. })));
    }
}
