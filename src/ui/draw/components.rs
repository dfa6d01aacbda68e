//! Reusable UI components
//!
//! - Header (title, dispatch status)
//! - Footer (command help for the focused section)

use crate::state::AppState;
use crate::types::{Focus, InputMode};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Render the application header with dispatch status
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let status_text = if state.response.loading {
        format!("{} Sending...", SPINNER[spinner_index % SPINNER.len()])
    } else if state.response.error.is_some() {
        "Error".to_string()
    } else if let Some(status) = state.response.status {
        format!("{status}")
    } else {
        "Idle".to_string()
    };

    let header_text = format!("lazy request tui - API Testing [{status_text}]");

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the footer with command help
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer_text = footer_help(state);

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

fn footer_help(state: &AppState) -> &'static str {
    if state.ui.input_mode == InputMode::Editing {
        return match state.ui.focus {
            Focus::Body => "Type to edit  Enter:Newline  Ctrl+F:Format  Ctrl+L:Clear  Esc:Done",
            Focus::QueryParams | Focus::Headers => {
                "Type to edit  Tab:Key/Value  Ctrl+W:Delete word  Ctrl+L:Clear  Enter/Esc:Done"
            }
            _ => "Type to edit  Ctrl+W:Delete word  Ctrl+L:Clear  Enter/Esc:Done",
        };
    }

    match state.ui.focus {
        Focus::Url => "Tab:Next  Enter/e:Edit URL  s:Send | y:Yank q:Quit",
        Focus::Method => "Tab:Next  h/l/Enter:Change method  s:Send | q:Quit",
        Focus::QueryParams | Focus::Headers => {
            "Tab:Next  j/k:Row  Enter/e:Edit  a:Add  d:Remove  s:Send | q:Quit"
        }
        Focus::Body => "Tab:Next  Enter/e:Edit body  Ctrl+F:Format  s:Send | q:Quit",
        Focus::Send => "Tab:Next  Enter/s:Send | q:Quit",
        Focus::Response => {
            "Tab:Next  j/k:Scroll  Ctrl+U/D:Page  1:JSON 2:Table t:Toggle  y:Yank | q:Quit"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_follows_mode() {
        let mut state = AppState::default();
        assert!(footer_help(&state).contains("Edit URL"));

        state.ui.focus = Focus::Body;
        state.ui.input_mode = InputMode::Editing;
        assert!(footer_help(&state).contains("Newline"));
    }
}
