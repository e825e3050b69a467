//! # TitleBar Component
//!
//! Top status bar: app name, data source, status message and list counts.
//!
//! Stateless: it receives all data as props. The text degrades in priority
//! order so the most important parts survive narrow terminals:
//!
//! 1. **Counts**: `"Globetrotter (source: file) | Loaded 250 countries | 3 ★ · 120/247 shown · loaded 09:05"`
//! 2. **Status message**: `"Globetrotter (source: file) | Loading countries..."`
//! 3. **Default**: `"Globetrotter (source: file)"`

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

/// Counts shown once the catalog is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCounts {
    pub favorites: usize,
    pub visible: usize,
    pub catalog: usize,
    pub loaded_at: DateTime<Local>,
}

pub struct TitleBar {
    pub source_name: String,
    pub status_message: String,
    pub counts: Option<ListCounts>,
}

impl TitleBar {
    pub fn new(source_name: String, status_message: String, counts: Option<ListCounts>) -> Self {
        Self {
            source_name,
            status_message,
            counts,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Globetrotter (source: {})", self.source_name);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if let Some(counts) = self.counts {
            text.push_str(&format!(
                " | {} ★ · {}/{} shown · loaded {}",
                counts.favorites,
                counts.visible,
                counts.catalog,
                counts.loaded_at.format("%H:%M")
            ));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_counts() {
        let mut title_bar = TitleBar::new(
            "restcountries".to_string(),
            "Loaded 250 countries".to_string(),
            Some(ListCounts {
                favorites: 3,
                visible: 120,
                catalog: 247,
                loaded_at: Local.with_ymd_and_hms(2026, 10, 14, 9, 5, 0).single().unwrap(),
            }),
        );
        let text = rendered(&mut title_bar);
        assert!(text.contains("Globetrotter (source: restcountries)"));
        assert!(text.contains("Loaded 250 countries"));
        assert!(text.contains("3 ★ · 120/247 shown"));
        assert!(text.contains("loaded 09:05"));
    }

    #[test]
    fn test_title_bar_while_loading() {
        let mut title_bar = TitleBar::new(
            "file".to_string(),
            "Loading countries...".to_string(),
            None,
        );
        let text = rendered(&mut title_bar);
        assert!(text.contains("Loading countries..."));
        assert!(!text.contains("shown"));
        assert!(!text.contains("loaded"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("file".to_string(), String::new(), None);
        assert_eq!(title_bar.text(), "Globetrotter (source: file)");
        assert!(!rendered(&mut title_bar).contains('|'));
    }
}
