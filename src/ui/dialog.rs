use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{Dialog, DialogField};

pub fn render(frame: &mut Frame, dialog: &Dialog) {
    let (title, lines) = match dialog {
        Dialog::CreateList {
            title, description, field
        } => (
            "Create a New List",
            form_lines(&[
                text_field("Title", title, *field == DialogField::Title),
                text_field("Description", description, *field == DialogField::Description),
            ]),
        ),
        Dialog::EditList {
            title, description, field, ..
        } => (
            "Edit List",
            form_lines(&[
                text_field("Title", title, *field == DialogField::Title),
                text_field("Description", description, *field == DialogField::Description),
            ]),
        ),
        Dialog::AddTodo {
            title, completed, field
        } => (
            "Add Todo",
            form_lines(&[
                text_field("Title", title, *field == DialogField::Title),
                checkbox_field("Completed", *completed, *field == DialogField::Completed),
            ]),
        ),
        Dialog::EditTodo {
            title, completed, field, ..
        } => (
            "Edit Todo",
            form_lines(&[
                text_field("Title", title, *field == DialogField::Title),
                checkbox_field("Completed", *completed, *field == DialogField::Completed),
            ]),
        ),
    };

    let area = centered_rect(54, (lines.len() + 2) as u16, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(lines).block(
        Block::default().borders(Borders::ALL).title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    );

    frame.render_widget(popup, area);
}

fn form_lines(fields: &[Line<'static>]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];
    for field in fields {
        lines.push(field.clone());
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " Enter: save   Tab: field   Esc: cancel",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn text_field(label: &'static str, value: &str, active: bool) -> Line<'static> {
    let label_style = if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(format!(" {:<12}", format!("{}:", label)), label_style),
        Span::raw(value.to_string()),
    ];
    if active {
        // Block cursor at the insertion point.
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn checkbox_field(label: &'static str, checked: bool, active: bool) -> Line<'static> {
    let label_style = if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mark = if checked { "[x]" } else { "[ ]" };

    Line::from(vec![
        Span::styled(format!(" {:<12}", format!("{}:", label)), label_style),
        Span::styled(
            mark,
            if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            },
        ),
        Span::styled(
            if active { "  (Space to toggle)" } else { "" },
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Create a centered rect within the outer rect
fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let popup_width = width.min(outer.width);
    let popup_height = height.min(outer.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((outer.height.saturating_sub(popup_height)) / 2),
            Constraint::Length(popup_height),
            Constraint::Min(0),
        ])
        .split(outer);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((outer.width.saturating_sub(popup_width)) / 2),
            Constraint::Length(popup_width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
