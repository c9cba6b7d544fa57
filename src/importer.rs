use std::path::Path;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::assembler::RecordAssembler;
use crate::models::NormalizedRecord;
use crate::reader::Sheet;

/// A row that produced no record, by 1-based data row number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ConversionOutcome {
    pub records: Vec<NormalizedRecord>,
    pub skipped: Vec<SkippedRow>,
    /// Numeric cells that could not be parsed and were stored as `0`.
    pub fallback_count: usize,
}

/// Normalize every row of `sheet`. Rows the reader could not decode are logged
/// and skipped; they never stop the rows after them.
pub fn convert_sheet(
    sheet: &Sheet,
    assembler: &RecordAssembler,
    progress: Option<&ProgressBar>,
) -> ConversionOutcome {
    let mut outcome = ConversionOutcome::default();

    for (index, row) in sheet.rows.iter().enumerate() {
        let row_number = index + 1;
        match row {
            Ok(raw) => {
                let assembly = assembler.assemble_detailed(raw);
                if !assembly.fallbacks.is_empty() {
                    warn!(
                        row = row_number,
                        fields = ?assembly.fallbacks,
                        "unparseable numbers stored as 0"
                    );
                }
                outcome.fallback_count += assembly.fallbacks.len();
                debug!(
                    row = row_number,
                    id = assembly.record.get("id").map(|v| v.to_string()).unwrap_or_default(),
                    "row converted"
                );
                outcome.records.push(assembly.record);
            }
            Err(e) => {
                warn!(row = row_number, error = %e, "skipping row");
                outcome.skipped.push(SkippedRow {
                    row: row_number,
                    reason: e.to_string(),
                });
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    info!(
        converted = outcome.records.len(),
        skipped = outcome.skipped.len(),
        fallbacks = outcome.fallback_count,
        "conversion finished"
    );
    outcome
}

/// Write records as a pretty-printed JSON array (UTF-8, non-ASCII kept as is).
pub fn write_listing(path: &Path, records: &[NormalizedRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
