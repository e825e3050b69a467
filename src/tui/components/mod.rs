//! # TUI Components
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing source, status and counts
//! - `FilterBar`: Continent and sovereignty toggles plus the color legend
//! - `DetailPanel`: Facts for the hovered country
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state across frames and emit events:
//! - `CountryList`: Scrollable flag list with cursor and mouse hit testing
//!
//! Each component file holds its state types, event types, rendering and
//! tests together.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── filter_bar.rs    (Filter toggles and legend)
//! ├── country_list.rs  (Favorites and all-countries lists)
//! └── detail_panel.rs  (Hovered country details)
//! ```

pub mod country_list;
pub mod detail_panel;
pub mod filter_bar;
mod title_bar;

pub use country_list::{CountryList, CountryListState, ListEvent};
pub use detail_panel::{DetailPanel, DetailPanelLayout};
pub use filter_bar::{FILTER_BAR_HEIGHT, FilterBar, filter_action};
pub use title_bar::{ListCounts, TitleBar};
