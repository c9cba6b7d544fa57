use crate::models::{CellValue, RawRow};
use crate::normalize::column::resolve;

/// Collect a multi-value field (photo URLs, document links) from the first
/// matching candidate column.
///
/// A list cell keeps its non-blank elements; a text cell is split on commas.
/// Pieces are trimmed and empty ones dropped. No match, or a blank match,
/// gives an empty vector.
pub fn parse_list<S: AsRef<str>>(row: &RawRow, candidates: &[S]) -> Vec<String> {
    match resolve(row, candidates) {
        Some(value) => split_cell(value),
        None => Vec::new(),
    }
}

fn split_cell(value: &CellValue) -> Vec<String> {
    match value {
        CellValue::List(items) => items
            .iter()
            .filter(|item| !item.is_missing())
            .map(|item| item.to_string().trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        CellValue::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect(),
        CellValue::Empty => Vec::new(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHOTO_COLUMNS: &[&str] = &["fotos", "imagenes", "fotos_url", "multimedia"];

    #[test]
    fn test_comma_separated() {
        let row: RawRow = vec![("fotos", "a.jpg, b.jpg,,c.jpg")].into_iter().collect();
        assert_eq!(parse_list(&row, PHOTO_COLUMNS), vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_list_cell() {
        let mut row = RawRow::new();
        row.push(
            "imagenes",
            CellValue::List(vec!["x".into(), "".into(), " y ".into()]),
        );
        assert_eq!(parse_list(&row, PHOTO_COLUMNS), vec!["x", "y"]);
    }

    #[test]
    fn test_first_filled_candidate_wins() {
        let row: RawRow = vec![("fotos", ""), ("imagenes", "i.png"), ("multimedia", "m.png")]
            .into_iter()
            .collect();
        assert_eq!(parse_list(&row, PHOTO_COLUMNS), vec!["i.png"]);
    }

    #[test]
    fn test_blank_match_is_empty() {
        let row: RawRow = vec![("fotos", "  "), ("imagenes", "i.png")].into_iter().collect();
        assert!(parse_list(&row, PHOTO_COLUMNS).is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let row: RawRow = vec![("barrio", "Centro")].into_iter().collect();
        assert!(parse_list(&row, PHOTO_COLUMNS).is_empty());

        let row: RawRow = vec![("fotos", " , ,")].into_iter().collect();
        assert!(parse_list(&row, PHOTO_COLUMNS).is_empty());
    }
}
