use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::session::FETCH_FAILURE_MESSAGE;
use crate::config::ColorConfig;
use crate::tui::app::{Focus, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search form
            Constraint::Length(1), // Error / link line
            Constraint::Min(3),    // Stories
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], colors);
    render_search_form(frame, app, chunks[1], colors);
    render_message_line(frame, app, chunks[2], colors);
    render_stories(frame, app, chunks[3], colors);
    render_status_bar(frame, app, chunks[4], colors);
}

fn border_style(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_header(frame: &mut Frame, area: Rect, colors: &ColorConfig) {
    let header = Paragraph::new(Span::styled(
        "My Hacker Stories",
        Style::default()
            .fg(colors.header)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(header, area);
}

fn render_search_form(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let session = &app.session;
    let is_active = app.focus == Focus::Input;

    let (input_area, submit_area) = if session.policy().has_submit() {
        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(12)])
            .split(area);
        (parts[0], Some(parts[1]))
    } else {
        (area, None)
    };

    let block = Block::default()
        .title(" Search: ")
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));
    let input = Paragraph::new(session.term()).block(block);
    frame.render_widget(input, input_area);

    if is_active {
        let width = u16::try_from(session.term().chars().count()).unwrap_or(u16::MAX);
        let max_x = input_area
            .x
            .saturating_add(input_area.width.saturating_sub(2));
        let x = input_area.x.saturating_add(1).saturating_add(width).min(max_x);
        frame.set_cursor_position((x, input_area.y + 1));
    }

    if let Some(submit_area) = submit_area {
        let style = if session.can_submit() {
            Style::default()
                .fg(colors.submit_enabled)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.submit_disabled)
        };
        let button = Paragraph::new(Span::styled("Submit", style)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style),
        );
        frame.render_widget(button, submit_area);
    }
}

fn render_message_line(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let state = app.session.state();
    // The table is hidden while loading, so is the selected story's link.
    let line = if state.is_loading {
        Line::from("")
    } else if state.is_error {
        Line::from(Span::styled(
            FETCH_FAILURE_MESSAGE,
            Style::default().fg(colors.error),
        ))
    } else if let Some(story) = app.selected_story() {
        let mut spans = vec![Span::styled(
            story.display_url().to_string(),
            Style::default().fg(colors.link),
        )];
        if !story.author.is_empty() {
            spans.push(Span::raw("  by "));
            spans.push(Span::styled(
                story.author.clone(),
                Style::default().fg(colors.author),
            ));
        }
        Line::from(spans)
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_stories(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.focus == Focus::List;
    let session = &app.session;
    let stories = session.visible_stories();

    let title = format!(
        " Stories for \"{}\" ({}) ",
        session.active_query(),
        stories.len()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    // Loading replaces the list until the fetch settles.
    if session.state().is_loading {
        let loading = Paragraph::new(Span::styled(
            "Loading ...",
            Style::default().fg(colors.loading),
        ))
        .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let rows: Vec<Row> = stories
        .iter()
        .map(|story| {
            Row::new(vec![
                Cell::from(story.display_title()),
                Cell::from(Span::styled(
                    story.author.as_str(),
                    Style::default().fg(colors.author),
                )),
                Cell::from(story.num_comments.to_string()),
                Cell::from(story.points.to_string()),
            ])
        })
        .collect();

    let header = Row::new(vec!["Title", "Author", "Comments", "Points"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let highlight = if is_active {
        Style::default()
            .bg(colors.selection_bg)
            .fg(colors.selection_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(colors.inactive_border)
    };

    let table = Table::new(
        rows,
        [
            Constraint::Fill(1),
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(highlight);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        match (app.focus, app.session.policy().has_submit()) {
            (Focus::Input, true) => "Type to edit  Enter:Search  Tab:Stories  Ctrl+c:Quit",
            (Focus::Input, false) => "Type to search  Tab:Stories  Ctrl+c:Quit",
            (Focus::List, _) => "j/k:Navigate  d:Dismiss  o:Open  Tab:Search  q:Quit",
        }
        .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
