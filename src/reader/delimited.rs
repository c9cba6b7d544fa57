use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{ReadError, RowError};
use crate::models::CellValue;

use super::{build_sheet, Sheet, SheetReader};

/// Reads CSV-style text. Every cell is text; numeric interpretation happens later.
pub struct DelimitedReader {
    delimiter: u8,
}

impl DelimitedReader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for DelimitedReader {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl SheetReader for DelimitedReader {
    fn read(&self, path: &Path) -> Result<Sheet, ReadError> {
        let csv_err = |source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(path)
            .map_err(csv_err)?;

        let headers: Vec<Option<String>> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| Some(h.to_string()))
            .collect();

        let rows: Vec<Result<Vec<CellValue>, RowError>> = reader
            .records()
            .map(|record| {
                record
                    .map(|r| cells(&r))
                    .map_err(|e| RowError::Malformed(e.to_string()))
            })
            .collect();

        Ok(build_sheet(&headers, rows))
    }
}

fn cells(record: &StringRecord) -> Vec<CellValue> {
    record
        .iter()
        .map(|field| {
            if field.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(field.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_csv() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "ID Temporal,Precio,Fotos,Cochera").unwrap();
        writeln!(f, "P-1,\"1.500,00\",\"a.jpg, b.jpg\",Sí").unwrap();
        writeln!(f, ",,,").unwrap();
        writeln!(f, "P-2,90000,,no").unwrap();

        let sheet = DelimitedReader::default().read(f.path()).unwrap();
        assert_eq!(sheet.columns, vec!["id_temporal", "precio", "fotos", "cochera"]);
        assert_eq!(sheet.row_count(), 2);

        let first = sheet.rows[0].as_ref().unwrap();
        assert_eq!(first.get("precio"), Some(&CellValue::from("1.500,00")));
        assert_eq!(first.get("fotos"), Some(&CellValue::from("a.jpg, b.jpg")));

        let second = sheet.rows[1].as_ref().unwrap();
        assert_eq!(second.get("fotos"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "barrio;precio").unwrap();
        writeln!(f, "Centro;1234,56").unwrap();

        let sheet = DelimitedReader::new(b';').read(f.path()).unwrap();
        let row = sheet.rows[0].as_ref().unwrap();
        assert_eq!(row.get("precio"), Some(&CellValue::from("1234,56")));
    }

    #[test]
    fn test_bad_row_does_not_stop_the_sheet() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"titulo,precio\n").unwrap();
        f.write_all(b"Casa,100\n").unwrap();
        f.write_all(b"Dto \xff\xfe,200\n").unwrap();
        f.write_all(b"PH,300\n").unwrap();

        let sheet = DelimitedReader::default().read(f.path()).unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert!(sheet.rows[0].is_ok());
        assert!(matches!(sheet.rows[1], Err(RowError::Malformed(_))));
        assert_eq!(
            sheet.rows[2].as_ref().unwrap().get("titulo"),
            Some(&CellValue::from("PH"))
        );
    }
}
