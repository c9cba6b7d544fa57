//! Queries over a normalized property listing: search, filter options, statistics.
//!
//! The listing is held as plain JSON objects so that files written by other
//! tools (or edited by hand) still load; malformed entries are skipped.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ListingError;

pub type Property = Map<String, Value>;

/// Label used for properties that lack the counted field.
pub const UNSPECIFIED: &str = "unspecified";

const TOP_N: usize = 10;

/// Load a listing file. Array elements that are not objects are skipped.
pub fn load_listing(path: &Path) -> Result<Vec<Property>, ListingError> {
    let content = std::fs::read_to_string(path).map_err(|source| ListingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json: Value = serde_json::from_str(&content).map_err(|source| ListingError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(elements) = json else {
        return Err(ListingError::NotAnArray(path.to_path_buf()));
    };

    let mut properties = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        match element {
            Value::Object(object) => properties.push(object),
            other => warn!(index, value = %other, "listing entry is not an object, skipping"),
        }
    }
    Ok(properties)
}

/// Search criteria. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFilters {
    pub operation: Option<String>,
    pub property_type: Option<String>,
    /// Compared case-insensitively.
    pub neighborhood: Option<String>,
    pub max_price: Option<f64>,
    pub min_rooms: Option<i64>,
}

pub fn search<'a>(listing: &'a [Property], filters: &SearchFilters) -> Vec<&'a Property> {
    listing.iter().filter(|p| matches(p, filters)).collect()
}

fn matches(property: &Property, filters: &SearchFilters) -> bool {
    if let Some(operation) = &filters.operation {
        if text(property, "operation") != Some(operation.as_str()) {
            return false;
        }
    }

    if let Some(property_type) = &filters.property_type {
        if text(property, "property_type") != Some(property_type.as_str()) {
            return false;
        }
    }

    if let Some(neighborhood) = &filters.neighborhood {
        let own = text(property, "neighborhood").unwrap_or_default();
        if own.to_lowercase() != neighborhood.to_lowercase() {
            return false;
        }
    }

    // zero bounds mean "no filter"
    if let Some(max_price) = filters.max_price.filter(|p| *p != 0.0) {
        // a missing price counts as 0; a non-numeric one never matches
        match number(property, "price") {
            Some(price) if price <= max_price => {}
            _ => return false,
        }
    }

    if let Some(min_rooms) = filters.min_rooms.filter(|r| *r != 0) {
        match whole_number(property, "rooms") {
            Some(rooms) if rooms >= min_rooms => {}
            _ => return false,
        }
    }

    true
}

fn text<'a>(property: &'a Property, field: &str) -> Option<&'a str> {
    property.get(field).and_then(Value::as_str)
}

fn number(property: &Property, field: &str) -> Option<f64> {
    match property.get(field) {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    }
}

fn whole_number(property: &Property, field: &str) -> Option<i64> {
    match property.get(field) {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|x| x.trunc() as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    }
}

/// Distinct values offered as search filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub neighborhoods: Vec<String>,
    pub property_types: Vec<String>,
    pub total: usize,
}

pub fn filter_options(listing: &[Property]) -> FilterOptions {
    let mut neighborhoods = BTreeSet::new();
    let mut property_types = BTreeSet::new();

    for property in listing {
        if let Some(n) = text(property, "neighborhood").filter(|s| !s.is_empty()) {
            neighborhoods.insert(n.to_string());
        }
        if let Some(t) = text(property, "property_type").filter(|s| !s.is_empty()) {
            property_types.insert(t.to_string());
        }
    }

    FilterOptions {
        neighborhoods: neighborhoods.into_iter().collect(),
        property_types: property_types.into_iter().collect(),
        total: listing.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingStats {
    pub total: usize,
    /// Ten most common property types, most frequent first.
    pub property_types: Vec<CountEntry>,
    /// Ten most common neighborhoods, most frequent first.
    pub neighborhoods: Vec<CountEntry>,
    pub operations: Vec<CountEntry>,
    pub photos: usize,
    pub documents: usize,
    pub with_documents: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

pub fn stats(listing: &[Property]) -> ListingStats {
    let mut property_types = count_by(listing, "property_type");
    property_types.truncate(TOP_N);
    let mut neighborhoods = count_by(listing, "neighborhood");
    neighborhoods.truncate(TOP_N);

    let list_len = |p: &Property, field: &str| p.get(field).and_then(Value::as_array).map_or(0, Vec::len);

    let prices: Vec<f64> = listing
        .iter()
        .filter_map(|p| p.get("price").and_then(Value::as_f64))
        .filter(|price| *price > 0.0)
        .collect();

    ListingStats {
        total: listing.len(),
        property_types,
        neighborhoods,
        operations: count_by(listing, "operation"),
        photos: listing.iter().map(|p| list_len(p, "photos")).sum(),
        documents: listing.iter().map(|p| list_len(p, "documents")).sum(),
        with_documents: listing.iter().filter(|p| list_len(p, "documents") > 0).count(),
        min_price: prices.iter().copied().reduce(f64::min),
        max_price: prices.iter().copied().reduce(f64::max),
    }
}

/// Occurrences of each value of `field`, most frequent first, ties by name.
fn count_by(listing: &[Property], field: &str) -> Vec<CountEntry> {
    let mut counts: Vec<CountEntry> = Vec::new();
    for property in listing {
        let value = match property.get(field) {
            None | Some(Value::Null) => UNSPECIFIED.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        match counts.iter_mut().find(|e| e.value == value) {
            Some(entry) => entry.count += 1,
            None => counts.push(CountEntry { value, count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    counts
}
