//! # Favorites
//!
//! The user's shortlist. Membership is by common name, never by instance,
//! since the same country can arrive as different record objects.
//!
//! Operations return a new store and leave `self` untouched, so a list
//! already handed to the view is never changed underneath it.

use std::sync::Arc;

use crate::core::country::{CountryRecord, by_common_name};

#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    members: Vec<Arc<CountryRecord>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `country` unless a member with the same common name exists.
    #[must_use]
    pub fn add(&self, country: Arc<CountryRecord>) -> Self {
        if self.contains(&country.common_name) {
            return self.clone();
        }
        let mut members = self.members.clone();
        members.push(country);
        Self { members }
    }

    /// Removes the member with the same common name. Absent is a no-op.
    #[must_use]
    pub fn remove(&self, country: &CountryRecord) -> Self {
        let members = self
            .members
            .iter()
            .filter(|m| !m.same_country(country))
            .cloned()
            .collect();
        Self { members }
    }

    /// Current members, sorted by common name on every call.
    pub fn list(&self) -> Vec<Arc<CountryRecord>> {
        let mut sorted = self.members.clone();
        sorted.sort_by(|a, b| by_common_name(a, b));
        sorted
    }

    pub fn contains(&self, common_name: &str) -> bool {
        self.members.iter().any(|m| m.common_name == common_name)
    }

    /// The stored record object for `common_name`, if it is a favorite.
    pub fn get(&self, common_name: &str) -> Option<&Arc<CountryRecord>> {
        self.members.iter().find(|m| m.common_name == common_name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
