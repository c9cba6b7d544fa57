use chrono::{DateTime, Local, SecondsFormat};
use tracing::debug;

use crate::catalog::{Defaults, FieldCatalog};
use crate::models::{FieldCategory, FieldValue, NormalizedRecord, RawRow};
use crate::normalize::column::resolve;
use crate::normalize::list::parse_list;
use crate::normalize::value::ValueNormalizer;

/// Source of the processing timestamp.
pub type Clock = fn() -> DateTime<Local>;

/// A record plus the numeric fields that could not be parsed and were set to `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub record: NormalizedRecord,
    pub fallbacks: Vec<String>,
}

/// Builds one [`NormalizedRecord`] per [`RawRow`] from a catalog and a set of defaults.
///
/// Assembly never fails: missing columns are omitted, unparseable numbers become
/// `0`, unrecognized booleans become `"No"`.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    catalog: FieldCatalog,
    defaults: Defaults,
    normalizer: ValueNormalizer,
    clock: Clock,
}

impl RecordAssembler {
    pub fn new(catalog: FieldCatalog, defaults: Defaults) -> Self {
        Self {
            catalog,
            defaults,
            normalizer: ValueNormalizer::default(),
            clock: Local::now,
        }
    }

    pub fn with_normalizer(mut self, normalizer: ValueNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn assemble(&self, row: &RawRow) -> NormalizedRecord {
        self.assemble_detailed(row).record
    }

    pub fn assemble_detailed(&self, row: &RawRow) -> Assembly {
        let mut record = NormalizedRecord::default();
        let mut fallbacks = Vec::new();

        for field in self.catalog.fields() {
            if field.category == FieldCategory::List {
                let items = parse_list(row, &field.synonyms);
                if !items.is_empty() {
                    record.insert(field.name.clone(), FieldValue::List(items));
                }
                continue;
            }

            let raw = resolve(row, &field.synonyms);
            if let Some(normalized) = self.normalizer.normalize(raw, field.category) {
                if normalized.fell_back {
                    debug!(field = %field.name, "unparseable number replaced with 0");
                    fallbacks.push(field.name.clone());
                }
                record.insert(field.name.clone(), normalized.value);
            }
        }

        for (name, value) in &self.defaults.constants {
            record.insert(name.clone(), FieldValue::Text(value.clone()));
        }
        let now = (self.clock)().to_rfc3339_opts(SecondsFormat::Secs, false);
        record.insert(self.defaults.timestamp_field.clone(), FieldValue::Text(now));

        record.retain_non_empty();

        Assembly { record, fallbacks }
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(FieldCatalog::builtin(), Defaults::default())
    }
}
