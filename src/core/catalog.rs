//! # Catalog
//!
//! The working "all countries" list, always sorted by common name.
//! Like [`FavoritesStore`](crate::core::favorites::FavoritesStore), every
//! operation builds a new store instead of editing in place.

use std::sync::Arc;

use crate::core::country::{CountryRecord, by_common_name};

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<Arc<CountryRecord>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding exactly `records`, sorted.
    pub fn initialize(records: impl IntoIterator<Item = Arc<CountryRecord>>) -> Self {
        let mut records: Vec<_> = records.into_iter().collect();
        records.sort_by(|a, b| by_common_name(a, b));
        Self { records }
    }

    /// Removes the first record with the same common name. Order of the rest is kept.
    #[must_use]
    pub fn remove(&self, country: &CountryRecord) -> Self {
        let mut records = self.records.clone();
        if let Some(pos) = records.iter().position(|r| r.same_country(country)) {
            records.remove(pos);
        }
        Self { records }
    }

    /// Inserts `country` and re-sorts the whole list.
    #[must_use]
    pub fn insert(&self, country: Arc<CountryRecord>) -> Self {
        let mut records = self.records.clone();
        records.push(country);
        // Stable: an equal name already present stays ahead of the new one
        records.sort_by(|a, b| by_common_name(a, b));
        Self { records }
    }

    pub fn records(&self) -> &[Arc<CountryRecord>] {
        &self.records
    }

    pub fn find(&self, common_name: &str) -> Option<&Arc<CountryRecord>> {
        self.records.iter().find(|r| r.common_name == common_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
