//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  Rendering only reads the latest
//! [`livescroll_news::FeedState`] snapshot held by the app.
//!
//! ## For contributors
//!
//! * The layout is a two-row split: a scrollable list on top and a one-line
//!   status bar at the bottom.
//! * Colours and styles are defined inline — feel free to extract them into
//!   constants or a theme struct if the palette grows.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

/// Draw the complete UI for one frame.
///
/// Called once per tick from the main loop.  Delegates to helper functions
/// for each screen region.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_feed_list(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

/// Render the scrollable feed item list.
fn draw_feed_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .feed
        .items
        .iter()
        .map(|item| {
            let date_str = item
                .published
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string();

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<18}", date_str),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(&item.title, Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", item.source_name),
                    Style::default().fg(Color::Cyan),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(" News Feed ")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let feed = &app.feed;

    // Refresh state: in flight, failed, or when it last succeeded.
    let refresh = if feed.loading {
        Span::styled("Refreshing…", Style::default().fg(Color::Yellow))
    } else if let Some(error) = &feed.error {
        Span::styled(error.as_str(), Style::default().fg(Color::Red))
    } else {
        let text = match feed.last_update {
            Some(at) => format!("Updated {}", at.with_timezone(&Local).format("%H:%M:%S")),
            None => "Not updated yet".to_string(),
        };
        Span::styled(text, Style::default().fg(Color::Yellow))
    };

    let mut spans = vec![Span::raw(" "), refresh, Span::raw("  ")];
    if feed.discovering {
        spans.push(Span::styled("Discovering…", Style::default().fg(Color::Magenta)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        format!("{} items · {} sources", feed.items.len(), feed.sources.len()),
        Style::default().fg(Color::Green),
    ));
    spans.push(Span::raw("  q: quit  ↑/↓: scroll  Home/End: jump  d: discover  r: refresh"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
