//! # Filtering
//!
//! Two independent predicates, ANDed:
//!
//! 1. **Continent**: passes if no continent is selected, or the record shares
//!    at least one continent with the selection.
//! 2. **Sovereignty**: passes if sovereign records are shown and the record is
//!    sovereign, or dependent records are shown and it is not.
//!
//! Turning both sovereignty flags off is a valid state with an empty result.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::country::CountryRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Empty means "match all".
    pub selected_continents: BTreeSet<String>,
    pub show_sovereign: bool,
    pub show_non_sovereign: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_continents: BTreeSet::new(),
            show_sovereign: true,
            show_non_sovereign: true,
        }
    }
}

impl FilterState {
    /// Selects `continent` if it is not selected, deselects it otherwise.
    pub fn toggle_continent(&mut self, continent: &str) {
        if !self.selected_continents.remove(continent) {
            self.selected_continents.insert(continent.to_string());
        }
    }

    pub fn clear_continents(&mut self) {
        self.selected_continents.clear();
    }

    pub fn set_show_sovereign(&mut self, show: bool) {
        self.show_sovereign = show;
    }

    pub fn set_show_non_sovereign(&mut self, show: bool) {
        self.show_non_sovereign = show;
    }

    pub fn is_continent_selected(&self, continent: &str) -> bool {
        self.selected_continents.contains(continent)
    }
}

pub fn continent_matches(record: &CountryRecord, state: &FilterState) -> bool {
    state.selected_continents.is_empty()
        || record
            .continents
            .iter()
            .any(|c| state.selected_continents.contains(c))
}

pub fn sovereignty_matches(record: &CountryRecord, state: &FilterState) -> bool {
    (state.show_sovereign && record.is_sovereign)
        || (state.show_non_sovereign && !record.is_sovereign)
}

pub fn matches(record: &CountryRecord, state: &FilterState) -> bool {
    continent_matches(record, state) && sovereignty_matches(record, state)
}

/// The visible subsequence of `records`, relative order preserved.
pub fn apply(records: &[Arc<CountryRecord>], state: &FilterState) -> Vec<Arc<CountryRecord>> {
    records
        .iter()
        .filter(|r| matches(r, state))
        .cloned()
        .collect()
}
