//! # CountryList Component
//!
//! One scrollable flag list: either the favorites shortlist or the filtered
//! "all countries" view.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountryListState` lives in `TuiState` (cursor, scroll offset, length)
//! - `CountryList` is created each frame with the records as props
//!
//! Each row shows a continent-colored border marker, the flag, and the name
//! colored by sovereignty. The hovered record gets a highlighted background.

use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::continent::ContinentTag;
use crate::core::country::CountryRecord;
use crate::core::hover::HoverSelection;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::ui::{continent_color, sovereignty_color, truncate_to_width};

/// Rows moved by PageUp/PageDown when the viewport height is not yet known.
const DEFAULT_PAGE: usize = 10;

/// High-level events emitted by a country list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// The cursor moved onto this row.
    Moved(usize),
    /// The row under the cursor was activated (Enter/Space).
    Activate(usize),
}

/// Persistent cursor and scroll state for one list.
#[derive(Debug, Default)]
pub struct CountryListState {
    pub list_state: ListState,
    /// Number of rows currently displayed. Synced from `App` every loop.
    len: usize,
    /// Rows visible inside the border at the last render.
    viewport_height: u16,
    /// Area of the whole bordered list at the last render.
    pub area: Rect,
}

impl CountryListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the row count, clamping the cursor into range.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn select(&mut self, index: usize) {
        if self.len > 0 {
            self.list_state.select(Some(index.min(self.len - 1)));
        }
    }

    fn page(&self) -> usize {
        match self.viewport_height {
            0 => DEFAULT_PAGE,
            h => usize::from(h),
        }
    }

    fn move_to(&mut self, index: usize) -> Option<ListEvent> {
        if self.len == 0 {
            return None;
        }
        let index = index.min(self.len - 1);
        self.list_state.select(Some(index));
        Some(ListEvent::Moved(index))
    }

    /// Hit test: which row index (if any) is at this screen position.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        let inner = Block::bordered().inner(self.area);
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.list_state.offset() + usize::from(row - inner.y);
        (index < self.len).then_some(index)
    }
}

impl EventHandler for CountryListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        let current = self.list_state.selected();
        match event {
            TuiEvent::CursorUp => self.move_to(current.map_or(0, |i| i.saturating_sub(1))),
            TuiEvent::CursorDown => self.move_to(current.map_or(0, |i| i + 1)),
            TuiEvent::PageUp => {
                let page = self.page();
                self.move_to(current.map_or(0, |i| i.saturating_sub(page)))
            }
            TuiEvent::PageDown => {
                let page = self.page();
                self.move_to(current.map_or(0, |i| i + page))
            }
            TuiEvent::Home => self.move_to(0),
            TuiEvent::End => self.move_to(self.len.saturating_sub(1)),
            TuiEvent::Activate => current.filter(|i| *i < self.len).map(ListEvent::Activate),
            _ => None,
        }
    }
}

/// Transient render wrapper for a country list.
pub struct CountryList<'a> {
    pub title: &'a str,
    pub records: &'a [Arc<CountryRecord>],
    pub hover: &'a HoverSelection,
    pub focused: bool,
    /// Shown instead of the list when `records` is empty.
    pub empty_message: &'a str,
    pub state: &'a mut CountryListState,
}

impl<'a> CountryList<'a> {
    fn row(&self, record: &Arc<CountryRecord>, width: u16) -> ListItem<'a> {
        let tag = ContinentTag::resolve(&record.continents);
        let flag = record.flag_emoji().unwrap_or_else(|| "  ".to_string());

        // "▌ " + flag + " " take up the start of the row
        let name_width = usize::from(width).saturating_sub(3 + flag.width());
        let name = truncate_to_width(&record.common_name, name_width);

        let mut name_style = Style::default().fg(sovereignty_color(record.is_sovereign));
        if self.hover.is_hovered(record) {
            name_style = name_style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }

        ListItem::new(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(continent_color(tag))),
            Span::raw(flag),
            Span::raw(" "),
            Span::styled(name, name_style),
        ]))
    }
}

impl Component for CountryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.area = area;
        self.state.set_len(self.records.len());

        let border_style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = format!(" {} ({}) ", self.title, self.records.len());
        let block = Block::bordered()
            .title(title)
            .border_style(border_style)
            .title_style(border_style.add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        self.state.viewport_height = inner.height;

        if self.records.is_empty() {
            let empty = Paragraph::new(self.empty_message)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .records
            .iter()
            .map(|record| self.row(record, inner.width))
            .collect();

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items).block(block).highlight_style(highlight);

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
