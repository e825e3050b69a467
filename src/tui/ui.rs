use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::core::continent::ContinentTag;
use crate::core::country::CountryRecord;
use crate::core::state::{App, LoadState};
use crate::tui::component::Component;
use crate::tui::components::{
    CountryList, DetailPanel, DetailPanelLayout, FILTER_BAR_HEIGHT, FilterBar, ListCounts,
    TitleBar,
};
use crate::tui::{Pane, TuiState};

/// Preferred width of the detail panel column.
const DETAIL_WIDTH: u16 = 46;
/// Tallest the favorites list gets, as a fraction (1/n) of the list area.
const FAVORITES_MAX_FRACTION: u16 = 3;

const HELP_TEXT: &str = " ↑↓ move  Enter favorite  Tab switch list  1-7 continent  0 all  s/n sovereignty  m map  Esc hide details  q quit ";

/// Border color per continent tag.
pub fn continent_color(tag: ContinentTag) -> Color {
    match tag {
        ContinentTag::Africa => Color::Yellow,
        ContinentTag::Antarctica => Color::White,
        ContinentTag::Asia => Color::Red,
        ContinentTag::Europe => Color::Blue,
        ContinentTag::NorthAmerica => Color::Green,
        ContinentTag::Oceania => Color::Magenta,
        ContinentTag::SouthAmerica => Color::LightGreen,
        ContinentTag::Eurasia => Color::LightMagenta,
        ContinentTag::None => Color::DarkGray,
    }
}

/// Name color: turquoise for sovereign countries, orange for dependent territories.
pub fn sovereignty_color(is_sovereign: bool) -> Color {
    if is_sovereign {
        Color::Cyan
    } else {
        Color::Indexed(208)
    }
}

/// Truncate to `max_width` display columns, ending in "…" when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

pub fn draw_ui(
    frame: &mut Frame,
    app: &App,
    tui: &mut TuiState,
    favorites: &[Arc<CountryRecord>],
    visible: &[Arc<CountryRecord>],
) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(FILTER_BAR_HEIGHT), Min(0), Length(1)]);
    let [title_area, filter_area, main_area, help_area] = layout.areas(frame.area());

    let counts = match app.load {
        LoadState::Ready { loaded_at } => Some(ListCounts {
            favorites: favorites.len(),
            visible: visible.len(),
            catalog: app.catalog.len(),
            loaded_at,
        }),
        _ => None,
    };
    TitleBar::new(app.source_name.clone(), app.status_message.clone(), counts)
        .render(frame, title_area);

    FilterBar {
        filter: &app.filter,
    }
    .render(frame, filter_area);

    tui.reset_hit_areas();
    match &app.load {
        LoadState::Failed(error_msg) => draw_error_view(frame, main_area, error_msg),
        LoadState::Loading => draw_loading_view(frame, main_area),
        LoadState::Ready { .. } => draw_lists(frame, main_area, app, tui, favorites, visible),
    }

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let text = format!("Could not load countries.\n\n{error_msg}");
    let error_paragraph = Paragraph::new(text)
        .block(Block::bordered().title("ERROR"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

fn draw_loading_view(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading countries...")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::bordered())
        .alignment(Alignment::Center);
    frame.render_widget(loading, area);
}

fn draw_lists(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    favorites: &[Arc<CountryRecord>],
    visible: &[Arc<CountryRecord>],
) {
    use Constraint::{Length, Min};

    let hovered = app.hover.current();
    let (lists_area, detail_area) = match hovered {
        Some(_) => {
            let detail_width = DETAIL_WIDTH.min(area.width / 2);
            let [lists, detail] = Layout::horizontal([Min(0), Length(detail_width)]).areas(area);
            (lists, Some(detail))
        }
        None => (area, None),
    };

    let all_area = if favorites.is_empty() {
        lists_area
    } else {
        let wanted = u16::try_from(favorites.len()).unwrap_or(u16::MAX).saturating_add(2);
        let height = wanted
            .min(lists_area.height / FAVORITES_MAX_FRACTION)
            .max(3);
        let [fav_area, all_area] = Layout::vertical([Length(height), Min(0)]).areas(lists_area);
        CountryList {
            title: "Favorite countries",
            records: favorites,
            hover: &app.hover,
            focused: tui.focus == Pane::Favorites,
            empty_message: "",
            state: &mut tui.favorites_list,
        }
        .render(frame, fav_area);
        all_area
    };

    CountryList {
        title: "All countries",
        records: visible,
        hover: &app.hover,
        focused: tui.focus == Pane::All,
        empty_message: if app.catalog.is_empty() {
            "The catalog is empty."
        } else {
            "No countries match the current filters."
        },
        state: &mut tui.all_list,
    }
    .render(frame, all_area);

    if let (Some(country), Some(detail_area)) = (hovered, detail_area) {
        let mut layout = DetailPanelLayout::default();
        DetailPanel {
            country,
            layout: &mut layout,
        }
        .render(frame, detail_area);
        tui.detail = Some(layout);
    }
}
