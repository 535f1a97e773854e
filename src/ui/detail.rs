use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::{App, LoadState};
use crate::page::TODO_PAGE_SIZE;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    // Anything short of a successful response renders as not-found once
    // loading has finished.
    if app.detail_load == LoadState::Failed {
        let not_found = Paragraph::new("List not found")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Red));
        frame.render_widget(not_found, area);
        return;
    }

    let Some(list) = &app.detail else {
        let loading = Paragraph::new("Loading...")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(loading, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_todos(frame, app, chunks[0]);

    let footer = super::page_footer(app.detail_page, list.todos.len(), TODO_PAGE_SIZE);
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[1]);
}

fn render_todos(frame: &mut Frame, app: &App, area: Rect) {
    let Some(list) = &app.detail else {
        return;
    };

    let title = if list.description.is_empty() {
        format!(" {} ({}) ", list.title, list.todos.len())
    } else {
        format!(" {} - {} ({}) ", list.title, list.description, list.todos.len())
    };
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(Color::Cyan),
    ));

    let visible = app.visible_todos();
    if visible.is_empty() {
        let empty = Paragraph::new("No todos are available, please add new ones.")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            let selected = i == app.detail_cursor;

            let mark = if todo.completed { "[x]" } else { "[ ]" };
            let mark_color = if todo.completed {
                Color::Green
            } else {
                Color::Gray
            };

            let mut title_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if todo.completed {
                title_style = title_style
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT);
            }

            let line = Line::from(vec![
                Span::styled(mark, Style::default().fg(mark_color)),
                Span::raw(" "),
                Span::styled(todo.title.clone(), title_style),
            ]);

            ListItem::new(line)
        })
        .collect();

    let todos = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.detail_cursor));

    frame.render_stateful_widget(todos, area, &mut state);
}
