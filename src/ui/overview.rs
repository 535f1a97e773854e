use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::{App, LoadState};
use crate::page::LIST_PAGE_SIZE;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_lists(frame, app, chunks[0]);

    let footer = super::page_footer(app.overview_page, app.lists.len(), LIST_PAGE_SIZE);
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[1]);
}

fn render_lists(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Lists ({}) ", app.lists.len()));

    if app.overview_load == LoadState::Failed {
        let failed = Paragraph::new("Could not load lists - press r to retry")
            .block(block)
            .style(Style::default().fg(Color::Red));
        frame.render_widget(failed, area);
        return;
    }

    let visible = app.visible_lists();
    if visible.is_empty() && !app.loading() {
        let empty = Paragraph::new("No lists available. Create a new one!")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 42; // title(30) + space(1) + count(9) + spaces(2)
    let flex = w.saturating_sub(fixed).max(10);

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, list)| {
            let style = if i == app.overview_cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let title = truncate(&list.title, 30);
            let description = truncate(&list.description, flex);

            let line = Line::from(vec![
                Span::styled(format!("{:<30}", title), style),
                Span::raw(" "),
                Span::styled(
                    format!("{:>3} todos", list.todos.len()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:<flex$}", description),
                    Style::default().fg(Color::Gray),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.overview_cursor));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Shorten to at most `max` characters, marking the cut with "...".
/// Counts chars rather than bytes so multibyte titles never split a
/// UTF-8 boundary.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("Groceries", 30), "Groceries");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        let long = "a".repeat(40);
        let cut = truncate(&long, 30);
        assert_eq!(cut.chars().count(), 30);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn multibyte_text_never_splits_a_char() {
        let title = "étagère à épices très jolie, rangée dans la cuisine";
        let cut = truncate(title, 30);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 30);
    }
}
