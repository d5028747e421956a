use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::domain::images::ImageHandle;
use crate::domain::search::{NOT_FOUND_MESSAGE, ResultView, SearchState};
use crate::presentation::tui::app::App;

pub fn draw(frame: &mut Frame, app: &App, state: &SearchState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Result
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_search_bar(frame, app, state, chunks[0]);
    draw_result(frame, state, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    let cursor_x = cursor_column(chunks[0], app.input.before_cursor());
    frame.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));
}

/// Terminal column for the cursor inside the bordered search bar, clamped to its inner edge.
fn cursor_column(area: Rect, before_cursor: &str) -> u16 {
    let inner_width = area.width.saturating_sub(2);
    let offset = u16::try_from(before_cursor.width()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(offset.min(inner_width.saturating_sub(1)))
}

/// Ghost text that continues the typed input, if the prediction extends it.
fn ghost_suffix<'a>(input: &str, prediction: &'a str) -> Option<&'a str> {
    prediction
        .strip_prefix(input)
        .filter(|rest| !rest.is_empty())
}

fn draw_search_bar(frame: &mut Frame, app: &App, state: &SearchState, area: Rect) {
    let title = if state.loading {
        " Start searching for a cat (searching...) "
    } else {
        " Start searching for a cat "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    let mut spans = vec![Span::styled(
        app.input.text.as_str(),
        Style::default().fg(Color::White),
    )];
    let prediction = state.prediction();
    if let Some(rest) = prediction
        .as_deref()
        .and_then(|p| ghost_suffix(&app.input.text, p))
    {
        spans.push(Span::styled(rest, Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_result(frame: &mut Frame, state: &SearchState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = match state.view() {
        ResultView::Idle => vec![Line::styled(
            "Type to search. Try \"grumpy cat says hello\".",
            Style::default().fg(Color::DarkGray),
        )],
        ResultView::Loading => vec![Line::styled(
            "Searching...",
            Style::default().fg(Color::Yellow),
        )],
        ResultView::Error(message) => vec![Line::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )],
        ResultView::NotFound => vec![Line::from(NOT_FOUND_MESSAGE).centered()],
        ResultView::Image(image) => image_lines(&state.query, image),
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn image_lines(query: &str, image: &ImageHandle) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Cyan);

    let mut lines = vec![
        Line::styled(
            format!("Found a cat for \"{query}\""),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::from(vec![
            Span::styled("Type        ", label),
            Span::raw(image.content_type().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Size        ", label),
            Span::raw(format_size(image.len())),
        ]),
    ];
    if let Some((width, height)) = image.dimensions() {
        lines.push(Line::from(vec![
            Span::styled("Dimensions  ", label),
            Span::raw(format!("{width} x {height}")),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Source      ", label),
        Span::raw(image.source().to_string()),
    ]));
    lines.push(Line::default());
    lines.push(Line::styled(
        "Press Ctrl-O to open it",
        Style::default().fg(Color::DarkGray),
    ));
    lines
}

fn format_size(len: usize) -> String {
    const KIB: f64 = 1024.0;
    let len = len as f64;
    if len < KIB {
        format!("{len} B")
    } else if len < KIB * KIB {
        format!("{:.1} KB", len / KIB)
    } else {
        format!("{:.1} MB", len / (KIB * KIB))
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = " Tab accept | Enter search | Ctrl-O open | Esc clear/quit ";
    let text = if app.status_message.is_empty() {
        hints.to_string()
    } else {
        format!(" {} |{hints}", app.status_message)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Gray)),
        area,
    );
}
