//! Single-slot "currently highlighted" country. Last write wins.

use std::sync::Arc;

use crate::core::country::CountryRecord;

#[derive(Debug, Clone, Default)]
pub struct HoverSelection {
    current: Option<Arc<CountryRecord>>,
}

impl HoverSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hovered(&mut self, country: Arc<CountryRecord>) {
        self.current = Some(country);
    }

    /// Clears unconditionally, whichever record was hovered.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Arc<CountryRecord>> {
        self.current.as_ref()
    }

    /// True only for the very record object that is hovered.
    pub fn is_hovered(&self, country: &Arc<CountryRecord>) -> bool {
        self.current
            .as_ref()
            .is_some_and(|hovered| Arc::ptr_eq(hovered, country))
    }

    /// Drops the hover unless its record object is still in one of `lists`.
    pub fn retain_if_present(&mut self, lists: &[&[Arc<CountryRecord>]]) {
        let present = self.current.as_ref().is_some_and(|hovered| {
            lists
                .iter()
                .any(|list| list.iter().any(|r| Arc::ptr_eq(r, hovered)))
        });
        if !present {
            self.current = None;
        }
    }
}
