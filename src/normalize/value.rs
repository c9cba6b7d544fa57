use serde::Deserialize;

use crate::models::{CellValue, FieldCategory, FieldValue};

/// Canonical boolean outputs.
pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Tokens that make a boolean cell affirmative.
const AFFIRMATIVE: &[&str] = &["si", "sí", "yes", "true", "verdadero", "1", "con", "x"];

/// How boolean cells are checked against [`AFFIRMATIVE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanMatching {
    /// Affirmative if any token occurs anywhere in the text
    /// (`"no existe"` is affirmative because it contains `x`).
    #[default]
    Substring,
    /// Affirmative only if a whole word equals a token.
    Token,
}

/// A normalized cell. `fell_back` marks a numeric cell that could not be parsed
/// and was replaced with `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub value: FieldValue,
    pub fell_back: bool,
}

impl Normalized {
    fn parsed(value: FieldValue) -> Self {
        Self {
            value,
            fell_back: false,
        }
    }
}

/// Coerces single cells according to their field category.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueNormalizer {
    pub boolean_matching: BooleanMatching,
}

impl ValueNormalizer {
    pub fn new(boolean_matching: BooleanMatching) -> Self {
        Self { boolean_matching }
    }

    /// Normalize `raw` for a field of `category`. Unset input is always `None`;
    /// whitespace-only text is a number fallback, `No`, or `None` for text.
    ///
    /// List-category fields are handled by [`parse_list`](super::list::parse_list);
    /// here they get the text treatment.
    pub fn normalize(&self, raw: Option<&CellValue>, category: FieldCategory) -> Option<Normalized> {
        let raw = raw.filter(|v| !v.is_unset())?;
        match category {
            FieldCategory::Numeric => Some(match parse_number(raw) {
                Some(value) => Normalized::parsed(value),
                None => Normalized {
                    value: FieldValue::Int(0),
                    fell_back: true,
                },
            }),
            FieldCategory::Boolean => Some(Normalized::parsed(FieldValue::Text(
                yes_no(raw, self.boolean_matching).to_string(),
            ))),
            FieldCategory::Text | FieldCategory::List => {
                to_text(raw).map(|s| Normalized::parsed(FieldValue::Text(s)))
            }
        }
    }
}

/// Parse a numeric cell. `None` means the cell could not be read as a number.
///
/// Numbers pass through. Text keeps only digits, `,` and `.`; when both
/// separators appear `.` is a thousands separator and `,` the decimal point
/// (`"1.234,56"` → `1234.56`), a lone `,` is a decimal point. The result is a
/// float if a decimal point remains, otherwise an integer (a float past `i64`).
pub fn parse_number(raw: &CellValue) -> Option<FieldValue> {
    match raw {
        CellValue::Int(i) => Some(FieldValue::Int(*i)),
        CellValue::Float(x) if x.is_finite() => Some(FieldValue::Float(*x)),
        CellValue::Bool(b) => Some(FieldValue::Int(i64::from(*b))),
        CellValue::Text(s) => parse_numeric_text(s),
        CellValue::Float(_) | CellValue::Empty | CellValue::List(_) => None,
    }
}

fn parse_numeric_text(s: &str) -> Option<FieldValue> {
    let mut cleaned: String = s
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    if cleaned.contains('.') && cleaned.contains(',') {
        cleaned = cleaned.replace('.', "").replace(',', ".");
    } else if cleaned.contains(',') {
        cleaned = cleaned.replace(',', ".");
    }

    if cleaned.contains('.') {
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(FieldValue::Float)
    } else {
        // integers past i64 keep their magnitude as a float
        cleaned.parse::<i64>().map(FieldValue::Int).ok().or_else(|| {
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(FieldValue::Float)
        })
    }
}

/// Map a cell to [`YES`] or [`NO`]. Anything not recognized as affirmative is `No`.
pub fn yes_no(raw: &CellValue, matching: BooleanMatching) -> &'static str {
    let text = raw.to_string().trim().to_lowercase();
    if text.is_empty() {
        return NO;
    }

    let affirmative = match matching {
        BooleanMatching::Substring => AFFIRMATIVE.iter().any(|t| text.contains(t)),
        BooleanMatching::Token => text
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| AFFIRMATIVE.contains(&word)),
    };

    if affirmative {
        YES
    } else {
        NO
    }
}

/// String form of a cell, trimmed. Blank results are `None`.
pub fn to_text(raw: &CellValue) -> Option<String> {
    let text = raw.to_string();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
