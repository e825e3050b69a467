//! # Application State
//!
//! Core business state for Globetrotter. This module contains domain logic
//! only, no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: CatalogStore       // "all countries", sorted
//! ├── favorites: FavoritesStore   // the user's shortlist
//! ├── filter: FilterState         // continent + sovereignty toggles
//! ├── hover: HoverSelection       // record under the pointer/cursor
//! ├── load: LoadState             // loading / ready / failed
//! ├── rejected_count: usize       // malformed entries skipped on load
//! ├── source_name: String         // where the catalog comes from
//! └── status_message: String      // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! One `App` is built per session and lent to whoever needs it.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::core::catalog::CatalogStore;
use crate::core::country::CountryRecord;
use crate::core::favorites::FavoritesStore;
use crate::core::filter::{self, FilterState};
use crate::core::hover::HoverSelection;

/// Progress of the one-shot catalog fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready { loaded_at: DateTime<Local> },
    /// The catalog stayed empty because the fetch failed.
    Failed(String),
}

pub struct App {
    pub catalog: CatalogStore,
    pub favorites: FavoritesStore,
    pub filter: FilterState,
    pub hover: HoverSelection,
    pub load: LoadState,
    pub rejected_count: usize,
    pub source_name: String,
    pub status_message: String,
}

impl App {
    pub fn new(source_name: String, filter: FilterState) -> Self {
        Self {
            catalog: CatalogStore::new(),
            favorites: FavoritesStore::new(),
            filter,
            hover: HoverSelection::new(),
            load: LoadState::Loading,
            rejected_count: 0,
            source_name,
            status_message: String::from("Loading countries..."),
        }
    }

    /// The "all countries" list after filtering.
    pub fn visible_countries(&self) -> Vec<Arc<CountryRecord>> {
        filter::apply(self.catalog.records(), &self.filter)
    }

    /// Favorites in display order.
    pub fn favorite_countries(&self) -> Vec<Arc<CountryRecord>> {
        self.favorites.list()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    /// True when the fetch failed, as opposed to a filter hiding everything.
    pub fn load_failed(&self) -> bool {
        matches!(self.load, LoadState::Failed(_))
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
