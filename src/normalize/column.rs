use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{CellValue, RawRow};

/// Name given to columns whose header cell is empty.
pub const UNNAMED_COLUMN: &str = "unknown_column";

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Clean a source header so it can be matched against catalog synonyms.
///
/// Lower-cases and trims, turns every character that is neither a word
/// character nor whitespace into `_`, then collapses whitespace runs into a
/// single `_`. `"Precio USD"` becomes `precio_usd`, `"M2 (cub.)"` becomes `m2__cub__`.
pub fn clean_column_name(header: Option<&str>) -> String {
    let Some(header) = header.map(str::trim).filter(|h| !h.is_empty()) else {
        return UNNAMED_COLUMN.to_string();
    };

    let lower = header.to_lowercase();
    let replaced = NON_WORD.replace_all(&lower, "_");
    WHITESPACE_RUN.replace_all(&replaced, "_").into_owned()
}

/// Return the value of the first synonym present in `row` that was filled in.
///
/// Synonyms are tried in the order given; missing columns, empty cells, the
/// empty string and `nan` markers are skipped. A whitespace-only cell still
/// wins and is left to the normalizer.
pub fn resolve<'a, S: AsRef<str>>(row: &'a RawRow, synonyms: &[S]) -> Option<&'a CellValue> {
    synonyms
        .iter()
        .filter_map(|name| row.get(name.as_ref()))
        .find(|value| !value.is_unset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_column_name() {
        assert_eq!(clean_column_name(Some("Precio")), "precio");
        assert_eq!(clean_column_name(Some("  Precio USD ")), "precio_usd");
        assert_eq!(clean_column_name(Some("Tipo  de\tOperación")), "tipo_de_operación");
        assert_eq!(clean_column_name(Some("M2 (cub.)")), "m2__cub__");
        assert_eq!(clean_column_name(Some("acepta-mascotas")), "acepta_mascotas");
    }

    #[test]
    fn test_unnamed_column() {
        assert_eq!(clean_column_name(None), UNNAMED_COLUMN);
        assert_eq!(clean_column_name(Some("   ")), UNNAMED_COLUMN);
    }

    #[test]
    fn test_resolve_priority_order() {
        let row: RawRow = vec![("valor", "300"), ("precio", "100")].into_iter().collect();
        assert_eq!(
            resolve(&row, &["precio", "precio_usd", "valor"]),
            Some(&CellValue::from("100"))
        );
        assert_eq!(
            resolve(&row, &["valor", "precio"]),
            Some(&CellValue::from("300"))
        );
    }

    #[test]
    fn test_resolve_skips_missing_values() {
        let mut row = RawRow::new();
        row.push("precio", "");
        row.push("precio_usd", CellValue::Float(f64::NAN));
        row.push("valor", "nan");
        row.push("price", "250");
        assert_eq!(
            resolve(&row, &["precio", "precio_usd", "valor", "price"]),
            Some(&CellValue::from("250"))
        );
    }

    #[test]
    fn test_resolve_whitespace_cell_wins() {
        let row: RawRow = vec![("titulo", "   "), ("nombre", "Casa")].into_iter().collect();
        assert_eq!(
            resolve(&row, &["titulo", "nombre"]),
            Some(&CellValue::from("   "))
        );
    }

    #[test]
    fn test_resolve_absent() {
        let row: RawRow = vec![("barrio", "Palermo")].into_iter().collect();
        assert_eq!(resolve(&row, &["precio", "valor"]), None);
        assert_eq!(resolve(&RawRow::new(), &["precio"]), None);
    }
}
