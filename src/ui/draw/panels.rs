//! Request panel rendering
//!
//! The left half of the screen: URL, method, query params, headers,
//! body (write methods only) and the send control.

use super::styling::{CURSOR, border_style, editing_style, get_method_color, hint_style};
use crate::state::AppState;
use crate::types::{Focus, HttpMethod, InputMode, KeyValuePair, PairField, PairList};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the request composer
pub fn render_request_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let show_body = state.request.method.supports_body();

    let mut constraints = vec![
        Constraint::Length(3), // URL
        Constraint::Length(3), // Method
        Constraint::Min(4),    // Query params
        Constraint::Min(4),    // Headers
    ];
    if show_body {
        constraints.push(Constraint::Min(6));
    }
    constraints.push(Constraint::Length(3)); // Send

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_url(frame, chunks[0], state);
    render_method(frame, chunks[1], state);
    render_pairs(frame, chunks[2], state, PairList::QueryParams);
    render_pairs(frame, chunks[3], state, PairList::Headers);
    if show_body {
        render_body(frame, chunks[4], state);
    }
    render_send(frame, chunks[chunks.len() - 1], state);
}

fn is_editing(state: &AppState, focus: Focus) -> bool {
    state.ui.focus == focus && state.ui.input_mode == InputMode::Editing
}

fn section_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(focused))
}

fn render_url(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == Focus::Url;
    let editing = is_editing(state, Focus::Url);

    let line = if editing {
        Line::from(Span::styled(
            format!("{}{CURSOR}", state.request.url),
            editing_style(),
        ))
    } else if state.request.url.is_empty() {
        Line::from(Span::styled("https://api.example.com/resource?q=1", hint_style()))
    } else {
        Line::from(state.request.url.as_str())
    };

    let url = Paragraph::new(line).block(section_block(" URL ", focused));
    frame.render_widget(url, area);
}

fn render_method(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == Focus::Method;
    let current = state.request.method;

    // Tab-style selector, current method highlighted in its own color
    let mut spans = Vec::new();
    for (idx, method) in HttpMethod::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        if *method == current {
            spans.push(Span::styled(
                format!("[ {} ]", method.as_str()),
                Style::default()
                    .fg(get_method_color(*method))
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!("  {}  ", method.as_str()),
                Style::default().fg(Color::Gray),
            ));
        }
    }

    let method = Paragraph::new(Line::from(spans)).block(section_block(" Method ", focused));
    frame.render_widget(method, area);
}

fn render_pairs(frame: &mut Frame, area: Rect, state: &AppState, list: PairList) {
    let (title, focus, empty_hint) = match list {
        PairList::QueryParams => (" Query Params ", Focus::QueryParams, "No query params. Press a to add"),
        PairList::Headers => (" Headers ", Focus::Headers, "No headers. Press a to add"),
    };
    let focused = state.ui.focus == focus;
    let editing = is_editing(state, focus);
    let selected = state.selected_row(list);
    let pairs = state.request.pairs(list);

    let mut lines: Vec<Line> = Vec::new();
    if pairs.is_empty() {
        lines.push(Line::from(Span::styled(empty_hint, hint_style())));
    }
    for (idx, pair) in pairs.iter().enumerate() {
        let is_selected = focused && idx == selected;
        let editing_field = (is_selected && editing).then_some(state.ui.editing_field);
        lines.push(build_pair_line(pair, is_selected, editing_field));
    }

    // Keep the selected row visible
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = if focused && visible > 0 && selected >= visible {
        selected + 1 - visible
    } else {
        0
    };

    let content = Paragraph::new(lines)
        .block(section_block(title, focused))
        .scroll((scroll as u16, 0));
    frame.render_widget(content, area);
}

/// One key/value row: `→ [key] = [value]`
fn build_pair_line(
    pair: &KeyValuePair,
    is_selected: bool,
    editing_field: Option<PairField>,
) -> Line<'static> {
    let indicator = if is_selected { "→ " } else { "  " };
    let indicator_style = if is_selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cell = |field: PairField, placeholder: &str| -> Span<'static> {
        let text = pair.get(field);
        if editing_field == Some(field) {
            Span::styled(format!("[{text}{CURSOR}]"), editing_style())
        } else if text.is_empty() {
            Span::styled(format!("[{placeholder}]"), hint_style())
        } else if is_selected {
            Span::styled(format!("[{text}]"), Style::default().fg(Color::Green))
        } else {
            Span::styled(format!("[{text}]"), Style::default().fg(Color::Gray))
        }
    };

    Line::from(vec![
        Span::styled(indicator, indicator_style),
        cell(PairField::Key, "key"),
        Span::styled(" = ", Style::default().fg(Color::DarkGray)),
        cell(PairField::Value, "value"),
    ])
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == Focus::Body;
    let editing = is_editing(state, Focus::Body);
    let editor = &state.request.body;

    let title = if editing {
        let (line, col) = editor.cursor_line_col();
        format!(" Body (JSON) - Ln {}, Col {} ", line + 1, col + 1)
    } else {
        " Body (JSON) ".to_string()
    };

    let mut lines: Vec<Line> = Vec::new();
    if editor.content().is_empty() && !editing {
        lines.push(Line::from(Span::styled(
            "Empty body is sent as {}",
            hint_style(),
        )));
    } else if editing {
        // Draw the cursor inline
        let content = editor.content();
        let cursor = editor.cursor();
        let with_cursor = format!("{}{CURSOR}{}", &content[..cursor], &content[cursor..]);
        for line in with_cursor.split('\n') {
            lines.push(Line::from(Span::raw(line.to_string())));
        }
    } else {
        for line in editor.content().split('\n') {
            lines.push(Line::from(Span::raw(line.to_string())));
        }
    }

    if let Some(err) = &state.ui.body_error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    // Keep the cursor line in view
    let visible = area.height.saturating_sub(2) as usize;
    let (cursor_line, _) = editor.cursor_line_col();
    let scroll = if visible > 0 && cursor_line >= visible {
        cursor_line + 1 - visible
    } else {
        0
    };

    let body = Paragraph::new(lines)
        .block(section_block(&title, focused))
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(body, area);
}

fn render_send(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == Focus::Send;
    let enabled = state.can_send();

    let label = if state.response.loading {
        "Sending..."
    } else {
        "Send Request"
    };

    let style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };

    let send = Paragraph::new(Span::styled(label, style))
        .alignment(Alignment::Center)
        .block(section_block("", focused));
    frame.render_widget(send, area);
}
