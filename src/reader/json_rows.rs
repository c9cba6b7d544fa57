use std::path::Path;

use serde_json::Value;

use crate::error::{ReadError, RowError};
use crate::models::{CellValue, RawRow};
use crate::normalize::column::clean_column_name;

use super::{Sheet, SheetReader};

/// Reads a JSON array whose elements are row objects. Array-valued cells are
/// kept as lists; elements that are not objects become row errors.
pub struct JsonRowsReader;

impl JsonRowsReader {
    pub fn new() -> Self {
        Self
    }
}

impl SheetReader for JsonRowsReader {
    fn read(&self, path: &Path) -> Result<Sheet, ReadError> {
        let content = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let json: Value = serde_json::from_str(&content).map_err(|source| ReadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Array(elements) = json else {
            return Err(ReadError::NotAnArray(path.to_path_buf()));
        };

        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(elements.len());

        for element in elements {
            let object = match element {
                Value::Object(object) => object,
                other => {
                    rows.push(Err(RowError::NotAnObject(kind(&other))));
                    continue;
                }
            };

            let mut row = RawRow::new();
            for (key, value) in object {
                let column = clean_column_name(Some(&key));
                if !columns.contains(&column) {
                    columns.push(column.clone());
                }
                row.push(column, cell_value(value));
            }
            if !row.is_blank() {
                rows.push(Ok(row));
            }
        }

        Ok(Sheet { columns, rows })
    }
}

fn cell_value(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Int(i),
            None => n.as_f64().map_or(CellValue::Empty, CellValue::Float),
        },
        Value::String(s) => CellValue::Text(s),
        Value::Array(items) => CellValue::List(items.into_iter().map(cell_value).collect()),
        other @ Value::Object(_) => CellValue::Text(other.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_json_rows() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"[
                {{"Precio": 120000, "Fotos": ["a.jpg", "", "b.jpg"], "Barrio": null}},
                "not a row",
                {{"Precio": "", "Barrio": null}},
                {{"Ambientes": 2.5, "Cochera": true}}
            ]"#
        )
        .unwrap();

        let sheet = JsonRowsReader::new().read(f.path()).unwrap();
        assert_eq!(sheet.row_count(), 3);

        let first = sheet.rows[0].as_ref().unwrap();
        assert_eq!(first.get("precio"), Some(&CellValue::Int(120000)));
        assert_eq!(
            first.get("fotos"),
            Some(&CellValue::List(vec![
                CellValue::from("a.jpg"),
                CellValue::from(""),
                CellValue::from("b.jpg"),
            ]))
        );

        assert!(matches!(sheet.rows[1], Err(RowError::NotAnObject("a string"))));

        let last = sheet.rows[2].as_ref().unwrap();
        assert_eq!(last.get("ambientes"), Some(&CellValue::Float(2.5)));
        assert_eq!(last.get("cochera"), Some(&CellValue::Bool(true)));
    }

    #[test]
    fn test_not_an_array() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{"precio": 1}}"#).unwrap();
        let result = JsonRowsReader::new().read(f.path());
        assert!(matches!(result, Err(ReadError::NotAnArray(_))));
    }
}
