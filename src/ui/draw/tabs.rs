//! Response panel rendering
//!
//! The right half of the screen: a JSON / Table tab bar over the status
//! line and the response body.

use super::styling::{border_style, hint_style};
use crate::response::{FlatTable, ResponseView, flatten_tables, pretty_json, status_line};
use crate::state::AppState;
use crate::types::{Focus, ResponseTab};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
};
use serde_json::Value;

/// Rows taken by one rendered table: borders, header and the data row
const TABLE_HEIGHT: u16 = 4;

/// Render the response inspector
pub fn render_response_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == Focus::Response;

    let block = Block::default()
        .title(" Response ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status line
            Constraint::Min(0),    // Content
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(build_tab_bar(state.ui.response_tab)), chunks[0]);

    if let Some(status) = status_line(&state.response) {
        let color = match state.response.status {
            Some(code) if (200..300).contains(&code) => Color::Green,
            _ => Color::Yellow,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(status, Style::default().fg(color))),
            chunks[1],
        );
    }

    match ResponseView::from_state(&state.response) {
        ResponseView::Error(message) => render_error(frame, chunks[2], message),
        ResponseView::Body(body) => match state.ui.response_tab {
            ResponseTab::Json => render_json(frame, chunks[2], body, state),
            ResponseTab::Table => render_tables(frame, chunks[2], body, state.ui.response_scroll),
        },
        ResponseView::Loading => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "⏳ Sending...",
                    Style::default().fg(Color::Cyan),
                )),
                chunks[2],
            );
        }
        ResponseView::Empty => {
            frame.render_widget(
                Paragraph::new(Span::styled("No response yet.", hint_style())),
                chunks[2],
            );
        }
    }
}

/// `[ JSON ]  [ Table ]` with the active tab highlighted
fn build_tab_bar(active: ResponseTab) -> Line<'static> {
    let tab = |label: &'static str, tab: ResponseTab| -> Vec<Span<'static>> {
        let style = if tab == active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        vec![
            Span::styled("[ ", style),
            Span::styled(label, style),
            Span::styled(" ]", style),
        ]
    };

    let mut spans = tab("1 JSON", ResponseTab::Json);
    spans.push(Span::raw("  "));
    spans.extend(tab("2 Table", ResponseTab::Table));
    Line::from(spans)
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let mut lines = vec![
        Line::from(Span::styled(
            "❌ Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for line in message.lines() {
        lines.push(Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_json(frame: &mut Frame, area: Rect, body: &Value, state: &AppState) {
    // Flash green if yank just happened
    let style = if state.ui.yank_flash {
        Style::default()
            .bg(Color::Green)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let lines: Vec<Line> = pretty_json(body)
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), style)))
        .collect();
    let scroll = clamp_scroll(state.ui.response_scroll, lines.len());

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(content, area);
}

/// Keep at least the last line on screen and stay within `u16`
fn clamp_scroll(scroll: usize, line_count: usize) -> u16 {
    let last = line_count.saturating_sub(1);
    u16::try_from(scroll.min(last)).unwrap_or(u16::MAX)
}

/// Stack one bordered table per nested object, starting at table `scroll`
fn render_tables(frame: &mut Frame, area: Rect, body: &Value, scroll: usize) {
    let tables = flatten_tables(body);
    if tables.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No nested objects to show as tables", hint_style())),
            area,
        );
        return;
    }

    let start = scroll.min(tables.len() - 1);
    let mut y = area.y;
    for table in &tables[start..] {
        if y + TABLE_HEIGHT > area.y + area.height {
            break;
        }
        let table_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: TABLE_HEIGHT,
        };
        frame.render_widget(build_table(table), table_area);
        y += TABLE_HEIGHT;
    }
}

fn build_table(table: &FlatTable) -> Table<'static> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let header = Row::new(table.columns.clone()).style(header_style);
    let row = Row::new(table.row.clone());

    let count = table.columns.len().max(1) as u32;
    let widths = vec![Constraint::Ratio(1, count); table.columns.len()];

    Table::new(vec![row], widths).header(header).block(
        Block::default()
            .title(format!(" Table for: {} ", table.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_bar_marks_active_tab() {
        let line = build_tab_bar(ResponseTab::Table);
        let active: Vec<&str> = line
            .spans
            .iter()
            .filter(|s| s.style.add_modifier.contains(Modifier::BOLD))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(active, vec!["[ ", "2 Table", " ]"]);
    }

    #[test]
    fn test_json_scroll_is_clamped_to_last_line() {
        assert_eq!(clamp_scroll(3, 10), 3);
        assert_eq!(clamp_scroll(50, 10), 9);
        assert_eq!(clamp_scroll(5, 0), 0);
        assert_eq!(clamp_scroll(usize::MAX, 100_000), u16::MAX);
    }
}
