//! # Actions
//!
//! Everything that can happen in Globetrotter becomes an `Action`.
//! User clicks a flag? That's `Action::ToggleFavorite(country)`.
//! The fetch finishes? That's `Action::CatalogLoaded(batch)`.
//!
//! The `update()` function takes the current state and an action, applies
//! it, and returns an `Effect` for the adapter to carry out. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```
//!
//! ## Favorites and the catalog
//!
//! A country lives in exactly one of the two lists. Favoriting moves it out
//! of the catalog; unfavoriting moves it back in, re-sorted.

use std::sync::Arc;

use chrono::Local;
use log::{debug, info, warn};

use crate::core::catalog::CatalogStore;
use crate::core::country::CountryRecord;
use crate::core::normalize::NormalizedBatch;
use crate::core::state::{App, LoadState};

#[derive(Debug, Clone)]
pub enum Action {
    CatalogLoaded(NormalizedBatch),
    CatalogFailed(String),
    ToggleFavorite(Arc<CountryRecord>),
    ToggleContinentFilter(String),
    ClearContinentFilter,
    SetShowSovereign(bool),
    SetShowNonSovereign(bool),
    HoverEnter(Arc<CountryRecord>),
    HoverLeave,
    OpenMapsLink(Arc<CountryRecord>),
    Quit,
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    OpenLink(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::CatalogLoaded(batch) => {
            if !app.is_loading() {
                warn!("Ignoring catalog response: catalog already settled ({:?})", app.load);
                return Effect::None;
            }
            let count = batch.records.len();
            app.catalog = CatalogStore::initialize(batch.records.into_iter().map(Arc::new));
            app.rejected_count = batch.rejected.len();
            let favorites = app.favorites.list();
            app.hover
                .retain_if_present(&[app.catalog.records(), favorites.as_slice()]);
            app.load = LoadState::Ready {
                loaded_at: Local::now(),
            };
            app.status_message = if app.rejected_count > 0 {
                format!("Loaded {} countries ({} skipped)", count, app.rejected_count)
            } else {
                format!("Loaded {} countries", count)
            };
            info!("Catalog ready: {} records", count);
            Effect::None
        }
        Action::CatalogFailed(reason) => {
            if !app.is_loading() {
                warn!("Ignoring late fetch failure: {}", reason);
                return Effect::None;
            }
            warn!("Catalog failed to load: {}", reason);
            app.status_message = String::from("Could not load countries");
            app.load = LoadState::Failed(reason);
            Effect::None
        }
        Action::ToggleFavorite(country) => {
            if app.favorites.contains(&country.common_name) {
                app.favorites = app.favorites.remove(&country);
                app.catalog = app.catalog.insert(country.clone());
                app.status_message = format!("Removed {} from favorites", country.common_name);
            } else {
                app.favorites = app.favorites.add(country.clone());
                app.catalog = app.catalog.remove(&country);
                app.status_message = format!("Added {} to favorites", country.common_name);
            }
            debug!(
                "Favorites: {}, catalog: {}",
                app.favorites.len(),
                app.catalog.len()
            );
            Effect::None
        }
        Action::ToggleContinentFilter(continent) => {
            app.filter.toggle_continent(&continent);
            debug!("Continent filter: {:?}", app.filter.selected_continents);
            Effect::None
        }
        Action::ClearContinentFilter => {
            app.filter.clear_continents();
            Effect::None
        }
        Action::SetShowSovereign(show) => {
            app.filter.set_show_sovereign(show);
            Effect::None
        }
        Action::SetShowNonSovereign(show) => {
            app.filter.set_show_non_sovereign(show);
            Effect::None
        }
        Action::HoverEnter(country) => {
            app.hover.set_hovered(country);
            Effect::None
        }
        Action::HoverLeave => {
            app.hover.clear();
            Effect::None
        }
        Action::OpenMapsLink(country) => match &country.maps_link {
            Some(link) => {
                info!("Opening maps link for {}: {}", country.common_name, link);
                Effect::OpenLink(link.clone())
            }
            None => {
                app.status_message = format!("No map link for {}", country.common_name);
                Effect::None
            }
        },
        Action::Quit => Effect::Quit,
    }
}
