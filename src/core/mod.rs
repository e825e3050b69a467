//! # Core Application Logic
//!
//! This module contains Globetrotter's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (stores)       │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   Source   │
//!     │  Adapter   │                          │  (fetch)   │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`normalize`]: raw provider JSON → [`country::CountryRecord`]
//! - [`catalog`], [`favorites`], [`filter`], [`hover`]: the stores
//! - [`continent`]: continent list → border tag
//! - [`config`]: settings and their override order

pub mod action;
pub mod catalog;
pub mod config;
pub mod continent;
pub mod country;
pub mod favorites;
pub mod filter;
pub mod hover;
pub mod normalize;
pub mod state;
