mod detail;
mod dialog;
mod overview;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, Screen, ToastKind};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.screen {
        Screen::Overview => overview::render(frame, app, chunks[1]),
        Screen::Detail => detail::render(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);

    if let Some(d) = &app.dialog {
        dialog::render(frame, d);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.screen {
        Screen::Overview => "tudu - Lists".to_string(),
        Screen::Detail => match &app.detail {
            Some(list) => format!("tudu - {}", list.title),
            None => "tudu - List".to_string(),
        },
    };

    let header = Paragraph::new(Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(toast) = &app.toast {
        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Warning => Color::Yellow,
            ToastKind::Error => Color::Red,
        };
        Line::from(vec![Span::styled(
            toast.message.clone(),
            Style::default().fg(color),
        )])
    } else if app.write_in_flight {
        Line::from(vec![Span::styled(
            "Saving...",
            Style::default().fg(Color::Yellow),
        )])
    } else if app.loading() {
        Line::from(vec![Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )])
    } else {
        let help = if app.dialog.is_some() {
            "type to edit | Tab: field | Enter: save | Esc: cancel"
        } else {
            match app.screen {
                Screen::Overview => {
                    "j/k: nav | h/l: page | Enter: open | n: new | e: edit | d: delete | r: refresh | q: quit"
                }
                Screen::Detail => {
                    "j/k: nav | h/l: page | a: add | e: edit | Space: toggle | d: delete | p: print | r: refresh | q: back"
                }
            }
        };
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

/// One-line pagination footer shared by both screens: arrows gray out when
/// the corresponding direction is disabled.
fn page_footer(page: usize, total_items: usize, page_size: usize) -> Line<'static> {
    use crate::page::{has_next, has_prev, page_count};

    let pages = page_count(total_items, page_size);
    let arrow = |enabled: bool| {
        if enabled {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    Line::from(vec![
        Span::styled("←", arrow(has_prev(page))),
        Span::styled(
            format!(" Page {} of {} ", page, pages),
            Style::default().fg(Color::Gray),
        ),
        Span::styled("→", arrow(has_next(page, total_items, page_size))),
    ])
}
