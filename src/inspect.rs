use serde::Serialize;

use crate::catalog::{FieldCatalog, CRITICAL_FIELDS};
use crate::reader::Sheet;

/// Which source columns would feed one catalog field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: String,
    /// Present synonyms, in priority order. The first one is tried first.
    pub columns: Vec<String>,
}

/// Structure report for a sheet, produced before converting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub rows: usize,
    pub row_errors: usize,
    pub columns: Vec<String>,
    pub matched: Vec<FieldMatch>,
    /// Critical fields with no matching column.
    pub missing_critical: Vec<String>,
    /// Source columns no catalog field will read.
    pub unrecognized: Vec<String>,
}

pub fn inspect(sheet: &Sheet, catalog: &FieldCatalog) -> Inspection {
    let matched: Vec<FieldMatch> = catalog
        .fields()
        .iter()
        .filter_map(|field| {
            let columns: Vec<String> = field
                .synonyms
                .iter()
                .filter(|s| sheet.columns.contains(s))
                .cloned()
                .collect();
            (!columns.is_empty()).then(|| FieldMatch {
                field: field.name.clone(),
                columns,
            })
        })
        .collect();

    let missing_critical = CRITICAL_FIELDS
        .iter()
        .filter(|name| !matched.iter().any(|m| m.field == **name))
        .map(|name| name.to_string())
        .collect();

    let mut unrecognized: Vec<String> = Vec::new();
    for column in &sheet.columns {
        if !catalog.recognizes(column) && !unrecognized.contains(column) {
            unrecognized.push(column.clone());
        }
    }

    Inspection {
        rows: sheet.rows.iter().filter(|r| r.is_ok()).count(),
        row_errors: sheet.rows.iter().filter(|r| r.is_err()).count(),
        columns: sheet.columns.clone(),
        matched,
        missing_critical,
        unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowError;
    use crate::models::RawRow;

    #[test]
    fn test_inspect_sheet() {
        let sheet = Sheet {
            columns: vec![
                "titulo".into(),
                "valor".into(),
                "precio".into(),
                "tipo".into(),
                "color".into(),
                "multimedia".into(),
            ],
            rows: vec![Ok(RawRow::new()), Err(RowError::Malformed("x".into()))],
        };

        let report = inspect(&sheet, &FieldCatalog::builtin());
        assert_eq!(report.rows, 1);
        assert_eq!(report.row_errors, 1);
        assert_eq!(report.missing_critical, vec!["operation"]);
        assert_eq!(report.unrecognized, vec!["color"]);

        let price = report.matched.iter().find(|m| m.field == "price").unwrap();
        assert_eq!(price.columns, vec!["precio", "valor"]);

        let fields: Vec<&str> = report.matched.iter().map(|m| m.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["title", "price", "property_type", "media_info", "photos"]
        );
    }
}
