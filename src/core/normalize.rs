//! # Record Normalizer
//!
//! Shapes the provider's loosely-typed JSON into [`CountryRecord`]s.
//!
//! One bad entry never aborts the batch: it becomes a [`MalformedRecord`],
//! gets logged, and the rest of the payload is still returned. Only a payload
//! that is not an array at all fails the whole call.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::core::country::{CountryRecord, Currency, by_common_name};
use crate::source::DataFetchError;

// ============================================================================
// Provider Wire Types (REST Countries v3.1)
// ============================================================================

#[derive(Deserialize, Debug, Default)]
struct RawName {
    #[serde(default, deserialize_with = "lenient")]
    common: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    official: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct RawFlags {
    #[serde(default, deserialize_with = "lenient")]
    svg: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    png: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawDemonym {
    #[serde(default, deserialize_with = "lenient")]
    m: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawCurrency {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    symbol: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawMaps {
    #[serde(rename = "googleMaps", default, deserialize_with = "lenient")]
    google_maps: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawCountry {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<RawName>,
    #[serde(default, deserialize_with = "lenient")]
    cca2: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    flags: Option<RawFlags>,
    #[serde(default, deserialize_with = "lenient")]
    population: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    continents: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    subregion: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    capital: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    demonyms: Option<HashMap<String, RawDemonym>>,
    #[serde(default, deserialize_with = "lenient")]
    languages: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "lenient")]
    currencies: Option<BTreeMap<String, RawCurrency>>,
    #[serde(default, deserialize_with = "lenient")]
    maps: Option<RawMaps>,
    #[serde(default, deserialize_with = "lenient")]
    independent: Option<bool>,
}

/// Decodes an optional field; a value of the wrong type counts as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            debug!("Ignoring mistyped field: {}", e);
            Ok(None)
        }
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// A single payload entry that could not become a record.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRecord {
    /// Position in the provider's array.
    pub index: usize,
    pub reason: String,
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed record at index {}: {}", self.index, self.reason)
    }
}

impl std::error::Error for MalformedRecord {}

/// Result of normalizing one payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    /// Sorted ascending by common name, unique common names.
    pub records: Vec<CountryRecord>,
    pub rejected: Vec<MalformedRecord>,
    /// Common names dropped because an earlier entry already used them.
    pub duplicates: Vec<String>,
}

// ============================================================================
// Normalization
// ============================================================================

/// Normalizes a full provider payload.
///
/// Duplicate common names keep the first occurrence in payload order.
pub fn normalize_payload(payload: serde_json::Value) -> Result<NormalizedBatch, DataFetchError> {
    let serde_json::Value::Array(entries) = payload else {
        return Err(DataFetchError::Parse(format!(
            "expected an array of countries, got {}",
            json_kind(&payload)
        )));
    };

    let total = entries.len();
    let mut batch = NormalizedBatch::default();
    let mut seen = HashSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        match normalize_entry(index, entry) {
            Ok(record) => {
                if seen.insert(record.common_name.clone()) {
                    batch.records.push(record);
                } else {
                    warn!(
                        "Duplicate common name '{}' at index {}, keeping first occurrence",
                        record.common_name, index
                    );
                    batch.duplicates.push(record.common_name);
                }
            }
            Err(rejected) => {
                warn!("Skipping {}", rejected);
                batch.rejected.push(rejected);
            }
        }
    }

    batch.records.sort_by(by_common_name);

    info!(
        "Normalized {} of {} entries ({} rejected, {} duplicates)",
        batch.records.len(),
        total,
        batch.rejected.len(),
        batch.duplicates.len()
    );
    Ok(batch)
}

fn normalize_entry(index: usize, entry: serde_json::Value) -> Result<CountryRecord, MalformedRecord> {
    let malformed = |reason: String| MalformedRecord { index, reason };

    if !entry.is_object() {
        return Err(malformed(format!("expected an object, got {}", json_kind(&entry))));
    }

    let raw: RawCountry =
        serde_json::from_value(entry).map_err(|e| malformed(e.to_string()))?;

    let name = raw.name.unwrap_or_default();
    let common_name = name
        .common
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("missing name.common".to_string()))?;

    let flags = raw.flags.unwrap_or_default();
    let demonym = raw
        .demonyms
        .and_then(|mut d| d.remove("eng"))
        .and_then(|d| d.m)
        .filter(|m| !m.is_empty());

    let currencies = raw
        .currencies
        .unwrap_or_default()
        .into_iter()
        .map(|(code, c)| {
            let currency = Currency {
                name: c.name.unwrap_or_else(|| code.clone()),
                symbol: c.symbol,
            };
            (code, currency)
        })
        .collect();

    debug!("Normalized record {}: {}", index, common_name);

    Ok(CountryRecord {
        common_name,
        official_name: name.official.unwrap_or_default(),
        iso_code2: raw.cca2.unwrap_or_default(),
        flag_image_url: flags.svg.or(flags.png).unwrap_or_default(),
        population: raw.population.unwrap_or(0),
        continents: raw.continents.unwrap_or_default(),
        subregion: raw.subregion.filter(|s| !s.is_empty()),
        capitals: raw.capital.unwrap_or_default(),
        demonym_masculine_english: demonym,
        languages: raw.languages.unwrap_or_default(),
        currencies,
        maps_link: raw.maps.and_then(|m| m.google_maps),
        is_sovereign: raw.independent.unwrap_or(false),
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
