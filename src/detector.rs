use std::path::Path;

use crate::reader::delimited::DelimitedReader;
use crate::reader::json_rows::JsonRowsReader;
use crate::reader::workbook::WorkbookReader;
use crate::reader::SheetReader;

/// Input formats a sheet can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
    Tsv,
    JsonRows,
}

impl std::fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetFormat::Workbook => write!(f, "workbook"),
            SheetFormat::Csv => write!(f, "CSV"),
            SheetFormat::Tsv => write!(f, "TSV"),
            SheetFormat::JsonRows => write!(f, "JSON rows"),
        }
    }
}

/// Detect the input format from the file extension.
pub fn detect_format(path: &Path) -> Option<SheetFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SheetFormat::Workbook),
        "csv" | "txt" => Some(SheetFormat::Csv),
        "tsv" => Some(SheetFormat::Tsv),
        "json" => Some(SheetFormat::JsonRows),
        _ => None,
    }
}

/// Reader for `format`. `delimiter` overrides the CSV separator.
pub fn reader_for(format: SheetFormat, delimiter: Option<u8>) -> Box<dyn SheetReader> {
    match format {
        SheetFormat::Workbook => Box::new(WorkbookReader::new()),
        SheetFormat::Csv => Box::new(DelimitedReader::new(delimiter.unwrap_or(b','))),
        SheetFormat::Tsv => Box::new(DelimitedReader::new(delimiter.unwrap_or(b'\t'))),
        SheetFormat::JsonRows => Box::new(JsonRowsReader::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("propiedades.xlsx")), Some(SheetFormat::Workbook));
        assert_eq!(detect_format(Path::new("data/PROPS.XLS")), Some(SheetFormat::Workbook));
        assert_eq!(detect_format(Path::new("props.ods")), Some(SheetFormat::Workbook));
        assert_eq!(detect_format(Path::new("props.csv")), Some(SheetFormat::Csv));
        assert_eq!(detect_format(Path::new("props.tsv")), Some(SheetFormat::Tsv));
        assert_eq!(detect_format(Path::new("rows.json")), Some(SheetFormat::JsonRows));
        assert_eq!(detect_format(Path::new("props.pdf")), None);
        assert_eq!(detect_format(Path::new("props")), None);
    }
}
