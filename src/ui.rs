//! Terminal UI using ratatui

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::alert::AlertKind;
use crate::app::{App, Focus};
use crate::query::{LIMIT_CHOICES, SortBy};
use crate::render::Card;
use unicode_width::UnicodeWidthStr;

/// Terminal rows taken by one card in the results list
const CARD_HEIGHT: usize = 6;

/// Draw the main UI
pub fn draw_ui(f: &mut Frame, app: &App) {
    let alert_rows = app.alerts.len().min(3) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(alert_rows), // Alerts, inserted above the form
            Constraint::Length(3),          // Search input
            Constraint::Length(3),          // Sort + limit
            Constraint::Min(8),             // Results
            Constraint::Length(3),          // Help bar
        ])
        .split(f.area());

    draw_alerts(f, app, chunks[0]);
    draw_search_input(f, app, chunks[1]);
    draw_options(f, app, chunks[2]);
    draw_results(f, app, chunks[3]);
    draw_help_bar(f, app, chunks[4]);
}

/// Draw transient alerts, newest at the bottom
fn draw_alerts(f: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }

    let skip = app.alerts.len().saturating_sub(area.height as usize);
    let lines: Vec<Line> = app
        .alerts
        .iter()
        .skip(skip)
        .map(|alert| {
            let style = match alert.kind {
                AlertKind::Danger => Style::default().fg(Color::White).bg(Color::Red),
                AlertKind::Info => Style::default().fg(Color::Black).bg(Color::Cyan),
            };
            Line::from(Span::styled(format!(" {} ", alert.message), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Draw search input field
fn draw_search_input(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.form.focus == Focus::Term;

    let input = Paragraph::new(app.form.term.as_str())
        .style(focus_style(is_focused).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " Search Reddit ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
                .border_style(focus_style(is_focused)),
        );

    f.render_widget(input, area);

    if is_focused {
        let column = cursor_column(&app.form.term, area.width);
        f.set_cursor_position((area.x + column + 1, area.y + 1));
    }
}

/// Display column of the cursor after `term`, kept inside the bordered box
fn cursor_column(term: &str, area_width: u16) -> u16 {
    let inner = area_width.saturating_sub(2);
    let width = u16::try_from(term.width()).unwrap_or(u16::MAX);
    width.min(inner.saturating_sub(1))
}

/// Collapse multi-paragraph text onto one row; list rows do not wrap
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draw the sort radio group and the limit selector side by side
fn draw_options(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let current_sort = app.form.sort_by();
    let mut radios = Vec::new();
    for sort in SortBy::ALL {
        let marker = if sort == current_sort { "(•) " } else { "( ) " };
        let style = if sort == current_sort {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        radios.push(Span::styled(format!("{marker}{}  ", sort.label()), style));
    }

    let sort_focused = app.form.focus == Focus::Sort;
    let sort_widget = Paragraph::new(Line::from(radios)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Sort By ")
            .border_style(focus_style(sort_focused)),
    );
    f.render_widget(sort_widget, columns[0]);

    let limit_focused = app.form.focus == Focus::Limit;
    let limit_text = format!("◀ {} ▶", app.form.limit());
    let limit_widget = Paragraph::new(limit_text)
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Limit ({}) ", LIMIT_CHOICES.len()))
                .border_style(focus_style(limit_focused)),
        );
    f.render_widget(limit_widget, columns[1]);
}

/// Build the list rows for one card
fn card_lines(card: &Card) -> Vec<Line<'_>> {
    let badge = Style::default().fg(Color::Black).bg(Color::DarkGray);

    vec![
        Line::from(Span::styled(
            single_line(&card.title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.image_url.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            single_line(&card.body),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled("Read More.. ", Style::default().fg(Color::Cyan)),
            Span::styled(card.url.as_str(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled(format!(" Subreddit: {} ", card.subreddit), badge),
            Span::raw(" "),
            Span::styled(format!(" Score: {} ", card.score), badge),
        ]),
        Line::raw(""),
    ]
}

/// Draw result cards
fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    if app.results.cards.is_empty() {
        let message = if app.searching {
            "Searching..."
        } else if app.status_message.is_empty() {
            "Enter a search term above and press Enter"
        } else {
            app.status_message.as_str()
        };

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results ")
                    .border_style(Style::default().fg(Color::Gray)),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
        return;
    }

    let per_screen = (area.height.saturating_sub(2) as usize / CARD_HEIGHT).max(1);
    let scroll_offset = app.get_scroll_offset(per_screen);

    let items: Vec<ListItem> = app
        .results
        .cards
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(per_screen + 1)
        .map(|(i, card)| {
            let style = if i == app.selected_index {
                Style::default().bg(Color::Rgb(35, 35, 45))
            } else {
                Style::default()
            };
            ListItem::new(card_lines(card)).style(style)
        })
        .collect();

    let mut title = format!(" Results ({}) ", app.results.cards.len());
    if app.searching {
        title.push_str("· searching ");
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                title,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(list, area);
}

/// Draw help bar
fn draw_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.form.focus {
        Focus::Term => "Enter: Search │ Tab: Sort/Limit │ ↑/↓: Cards │ Ctrl+B: Open │ Ctrl+S: Export │ Esc: Clear │ Ctrl+Q: Quit",
        Focus::Sort | Focus::Limit => "←/→: Change │ Tab: Next control │ Enter: Search │ Ctrl+Q: Quit",
    };

    let text = if app.status_message.is_empty() {
        help_text.to_string()
    } else {
        format!("{} │ {}", app.status_message, help_text)
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
