//! # DetailPanel Component
//!
//! Expanded facts for the hovered country: official name and population,
//! continents, capitals, demonym, languages, currencies, and a maps link.
//!
//! Lines are pre-wrapped with `textwrap` instead of `Paragraph::wrap` so the
//! screen row of the link line is known exactly. The parent uses that row to
//! route clicks to the link instead of the list underneath.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Padding, Paragraph};

use crate::core::continent::ContinentTag;
use crate::core::country::{CountryRecord, format_population};
use crate::tui::component::Component;
use crate::tui::ui::continent_color;

const LINK_TEXT: &str = "Location on Google Maps";
const NONE_TEXT: &str = "none";

/// Where the panel and its link landed at the last render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetailPanelLayout {
    pub area: Rect,
    pub link_row: Option<Rect>,
}

impl DetailPanelLayout {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }

    pub fn is_link(&self, column: u16, row: u16) -> bool {
        self.link_row
            .is_some_and(|r| r.contains(Position::new(column, row)))
    }
}

pub struct DetailPanel<'a> {
    pub country: &'a CountryRecord,
    pub layout: &'a mut DetailPanelLayout,
}

/// Section heading plus its entries, `none` when there are no entries.
fn section(title: &str, entries: Vec<String>) -> (String, Vec<String>) {
    let entries = if entries.is_empty() {
        vec![NONE_TEXT.to_string()]
    } else {
        entries
    };
    (title.to_string(), entries)
}

/// The panel's sections in display order.
fn sections(country: &CountryRecord) -> Vec<(String, Vec<String>)> {
    let official = if country.official_name.is_empty() {
        &country.common_name
    } else {
        &country.official_name
    };

    let continents = country
        .continents
        .iter()
        .map(|continent| match &country.subregion {
            Some(sub) if sub != continent => format!("{continent} ({sub})"),
            _ => continent.clone(),
        })
        .collect();

    let currencies = country
        .currencies
        .values()
        .map(|c| match &c.symbol {
            Some(symbol) => format!("{}, {}", c.name, symbol),
            None => c.name.clone(),
        })
        .collect();

    vec![
        section(
            "Official name:",
            vec![format!(
                "{} (Pop.: {})",
                official,
                format_population(country.population)
            )],
        ),
        section("Continent/s:", continents),
        section("Capital:", country.capitals.clone()),
        section(
            "Demonym:",
            country.demonym_masculine_english.iter().cloned().collect(),
        ),
        section("Language/s:", country.languages.values().cloned().collect()),
        section("Currency/currencies:", currencies),
    ]
}

impl DetailPanel<'_> {
    /// Builds the wrapped lines and returns them with the link line's index.
    fn lines(&self, width: u16) -> (Vec<Line<'static>>, Option<usize>) {
        let width = usize::from(width.max(1));
        let entry_width = width.saturating_sub(2).max(1);
        let heading = Style::default().add_modifier(Modifier::BOLD);
        let tag = ContinentTag::resolve(&self.country.continents);

        let mut lines = vec![
            Line::from(Span::styled(
                self.country.common_name.clone(),
                heading.fg(continent_color(tag)),
            )),
            Line::from(""),
        ];

        for (title, entries) in sections(self.country) {
            lines.push(Line::from(Span::styled(title, heading)));
            for entry in entries {
                for wrapped in textwrap::wrap(&entry, entry_width) {
                    lines.push(Line::from(format!("  {wrapped}")));
                }
            }
        }

        if self.country.maps_link.is_none() {
            return (lines, None);
        }

        lines.push(Line::from(""));
        let link_index = lines.len();
        lines.push(Line::from(Span::styled(
            LINK_TEXT,
            heading.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        )));
        lines.push(Line::from(Span::styled(
            "(m or click to open in a browser)",
            Style::default().fg(Color::DarkGray),
        )));
        (lines, Some(link_index))
    }
}

impl Component for DetailPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::bordered()
            .title(" Details ")
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);

        let (lines, link_index) = self.lines(inner.width);

        self.layout.area = area;
        self.layout.link_row = link_index
            .and_then(|i| u16::try_from(i).ok())
            .filter(|i| *i < inner.height)
            .map(|i| Rect::new(inner.x, inner.y + i, inner.width, 1));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
