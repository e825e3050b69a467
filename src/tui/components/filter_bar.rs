//! # FilterBar Component
//!
//! Shows the continent toggles (keys `1`-`7`, `0` clears), the sovereignty
//! toggles (`s`, `n`) and the border color legend.
//!
//! The filter state itself lives in the core; this component only renders
//! it and turns filter keys into core actions.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::action::Action;
use crate::core::continent::{CONTINENTS, ContinentTag};
use crate::core::filter::FilterState;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::ui::{continent_color, sovereignty_color};

/// Height including borders.
pub const FILTER_BAR_HEIGHT: u16 = 5;

/// Maps a filter key to the core action it stands for.
pub fn filter_action(event: &TuiEvent, filter: &FilterState) -> Option<Action> {
    match event {
        TuiEvent::ContinentKey(n) => CONTINENTS
            .get(usize::from(*n).checked_sub(1)?)
            .map(|c| Action::ToggleContinentFilter(c.to_string())),
        TuiEvent::ClearContinents => Some(Action::ClearContinentFilter),
        TuiEvent::ToggleSovereign => Some(Action::SetShowSovereign(!filter.show_sovereign)),
        TuiEvent::ToggleDependent => Some(Action::SetShowNonSovereign(!filter.show_non_sovereign)),
        _ => None,
    }
}

pub struct FilterBar<'a> {
    pub filter: &'a FilterState,
}

fn toggle_span(key: &str, label: &str, on: bool, color: Color) -> Span<'static> {
    let mark = if on { "●" } else { "○" };
    let mut style = Style::default().fg(color);
    if on {
        style = style.add_modifier(Modifier::BOLD);
    } else {
        style = style.add_modifier(Modifier::DIM);
    }
    Span::styled(format!("[{key}] {mark} {label}  "), style)
}

impl FilterBar<'_> {
    fn continent_line(&self) -> Line<'static> {
        let mut spans: Vec<Span> = CONTINENTS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                toggle_span(
                    &(i + 1).to_string(),
                    name,
                    self.filter.is_continent_selected(name),
                    continent_color(ContinentTag::from_name(name)),
                )
            })
            .collect();
        spans.push(toggle_span(
            "0",
            "all",
            self.filter.selected_continents.is_empty(),
            Color::White,
        ));
        Line::from(spans)
    }

    fn sovereignty_line(&self) -> Line<'static> {
        Line::from(vec![
            toggle_span(
                "s",
                "independent",
                self.filter.show_sovereign,
                sovereignty_color(true),
            ),
            toggle_span(
                "n",
                "non-independent",
                self.filter.show_non_sovereign,
                sovereignty_color(false),
            ),
        ])
    }

    fn legend_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled("Border colors: ", Style::default().fg(Color::DarkGray))];
        for tag in ContinentTag::STYLED {
            spans.push(Span::styled("▌", Style::default().fg(continent_color(tag))));
            spans.push(Span::raw(format!("{}  ", tag.label())));
        }
        Line::from(spans)
    }
}

impl Component for FilterBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Filters ")
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(vec![
            self.continent_line(),
            self.sovereignty_line(),
            self.legend_line(),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
    }
}
