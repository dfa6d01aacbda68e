//! Event handling system for lazy-request-tui
//!
//! This module processes user input and translates it into state-changing actions.
//! It handles two input modes:
//! - Normal: Focus movement, row selection, method cycling and commands
//! - Editing: Text entry into the URL, a key/value cell, or the body editor
//!
//! # Architecture
//!
//! Key presses are first mapped to a `Command` by pure functions, which keeps
//! the key bindings testable without a terminal. Commands that only mutate
//! state become AppActions applied through `apply_action` in actions.rs.
//!
//! # Lock Management
//!
//! Locks on Arc<RwLock<AppState>> are held only while reading the current
//! mode or applying actions, never across a terminal read.

mod execution;
mod helpers;
mod yank;

use helpers::{apply, apply_many};

use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::{Focus, InputMode, ResponseTab};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Lines moved by Ctrl+U / Ctrl+D and PageUp / PageDown
const PAGE_SCROLL: usize = 5;

/// What a key press asks the application to do
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Quit,
    Send,
    Yank,
    /// Text typed into the edited field; more characters may follow in a paste
    Type(char),
    Apply(Vec<AppAction>),
}

impl Command {
    fn action(action: AppAction) -> Self {
        Command::Apply(vec![action])
    }
}

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one input event and act on it
    pub fn handle_events(
        &mut self,
        state: Arc<RwLock<AppState>>,
        client: &reqwest::Client,
    ) -> Result<()> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(());
        }

        let Event::Key(key) = event::read()? else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let command = match state.read() {
            Ok(s) => match s.ui.input_mode {
                InputMode::Normal => normal_mode_command(key, &s),
                InputMode::Editing => editing_mode_command(key, &s),
            },
            Err(_) => return Ok(()),
        };

        let Some(command) = command else {
            return Ok(());
        };

        match command {
            Command::Quit => self.should_quit = true,
            Command::Send => execution::handle_send(state, client),
            Command::Yank => yank::handle_yank_response(state),
            Command::Type(c) => {
                let focus = state.read().map(|s| s.ui.focus).unwrap_or_default();
                let text = helpers::collect_paste_batch(c, focus == Focus::Body);
                apply(&state, typed_text_action(focus, text));
            }
            Command::Apply(actions) => apply_many(&state, actions),
        }

        Ok(())
    }
}

/// Route typed or pasted text to the field being edited
fn typed_text_action(focus: Focus, text: String) -> AppAction {
    match focus {
        Focus::Body => AppAction::PasteIntoBody(text),
        Focus::Url => AppAction::AppendToUrl(text),
        _ => AppAction::AppendToPair(text),
    }
}

fn is_ctrl(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Key bindings outside of text entry
fn normal_mode_command(key: KeyEvent, state: &AppState) -> Option<Command> {
    let focus = state.ui.focus;

    let command = match key.code {
        KeyCode::Char('c') if is_ctrl(&key) => Command::Quit,
        KeyCode::Char('q') => Command::Quit,

        KeyCode::Tab => Command::action(AppAction::FocusNext),
        KeyCode::BackTab => Command::action(AppAction::FocusPrevious),
        KeyCode::Char('r') => Command::action(AppAction::FocusTo(Focus::Response)),
        KeyCode::Char('u') if !is_ctrl(&key) => Command::action(AppAction::FocusTo(Focus::Url)),

        KeyCode::Char('s') => Command::Send,
        KeyCode::Char('y') => Command::Yank,

        // Response tabs and scrolling work from any section
        KeyCode::Char('1') => Command::action(AppAction::SetResponseTab(ResponseTab::Json)),
        KeyCode::Char('2') => Command::action(AppAction::SetResponseTab(ResponseTab::Table)),
        KeyCode::Char('t') => Command::action(AppAction::ToggleResponseTab),
        KeyCode::Char('d') if is_ctrl(&key) => Command::action(AppAction::ScrollDown(PAGE_SCROLL)),
        KeyCode::Char('u') if is_ctrl(&key) => Command::action(AppAction::ScrollUp(PAGE_SCROLL)),
        KeyCode::PageDown => Command::action(AppAction::ScrollDown(PAGE_SCROLL)),
        KeyCode::PageUp => Command::action(AppAction::ScrollUp(PAGE_SCROLL)),

        KeyCode::Char('f') if is_ctrl(&key) && focus == Focus::Body => {
            Command::action(AppAction::FormatBody)
        }

        _ => return focused_section_command(key, focus),
    };

    Some(command)
}

/// Keys whose meaning depends on the focused section
fn focused_section_command(key: KeyEvent, focus: Focus) -> Option<Command> {
    let down = matches!(key.code, KeyCode::Char('j') | KeyCode::Down);
    let up = matches!(key.code, KeyCode::Char('k') | KeyCode::Up);
    let edit = matches!(
        key.code,
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('i')
    );

    let action = match focus {
        Focus::Url | Focus::Body if edit => AppAction::StartEditing,

        Focus::Method => match key.code {
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => AppAction::NextMethod,
            KeyCode::Char('h') | KeyCode::Left => AppAction::PreviousMethod,
            _ if down => AppAction::NextMethod,
            _ if up => AppAction::PreviousMethod,
            _ => return None,
        },

        Focus::QueryParams | Focus::Headers => match key.code {
            KeyCode::Char('a') => AppAction::AddRow,
            KeyCode::Char('d') | KeyCode::Delete => AppAction::RemoveRow,
            _ if down => AppAction::SelectRowDown,
            _ if up => AppAction::SelectRowUp,
            _ if edit => AppAction::StartEditing,
            _ => return None,
        },

        Focus::Send if key.code == KeyCode::Enter => return Some(Command::Send),

        Focus::Response if down => AppAction::ScrollDown(1),
        Focus::Response if up => AppAction::ScrollUp(1),

        _ => return None,
    };

    Some(Command::action(action))
}

/// Key bindings while a text field has the cursor
fn editing_mode_command(key: KeyEvent, state: &AppState) -> Option<Command> {
    let focus = state.ui.focus;

    if key.code == KeyCode::Esc {
        return Some(Command::action(AppAction::StopEditing));
    }

    if focus == Focus::Body {
        let command = match key.code {
            KeyCode::Char('f') if is_ctrl(&key) => Command::action(AppAction::FormatBody),
            KeyCode::Char(c) if !is_ctrl(&key) => Command::Type(c),
            _ => Command::action(AppAction::EditBody(key)),
        };
        return Some(command);
    }

    let on_url = focus == Focus::Url;
    let command = match key.code {
        KeyCode::Enter => Command::action(AppAction::StopEditing),
        KeyCode::Tab if !on_url => Command::action(AppAction::ToggleEditingField),
        KeyCode::Backspace if on_url => Command::action(AppAction::BackspaceUrl),
        KeyCode::Backspace => Command::action(AppAction::BackspacePair),
        KeyCode::Char('w') if is_ctrl(&key) && on_url => Command::action(AppAction::DeleteWordUrl),
        KeyCode::Char('w') if is_ctrl(&key) => Command::action(AppAction::DeleteWordPair),
        KeyCode::Char('l') if is_ctrl(&key) && on_url => Command::action(AppAction::ClearUrl),
        KeyCode::Char('l') if is_ctrl(&key) => Command::action(AppAction::ClearPair),
        KeyCode::Char(c) if !is_ctrl(&key) => Command::Type(c),
        _ => return None,
    };

    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HttpMethod;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn state_with_focus(focus: Focus) -> AppState {
        let mut state = AppState::with_initial_url("http://x.test/?a=1");
        state.ui.focus = focus;
        state
    }

    #[test]
    fn test_quit_and_send() {
        let state = state_with_focus(Focus::Url);
        assert_eq!(normal_mode_command(key(KeyCode::Char('q')), &state), Some(Command::Quit));
        assert_eq!(normal_mode_command(ctrl('c'), &state), Some(Command::Quit));
        assert_eq!(normal_mode_command(key(KeyCode::Char('s')), &state), Some(Command::Send));

        let state = state_with_focus(Focus::Send);
        assert_eq!(normal_mode_command(key(KeyCode::Enter), &state), Some(Command::Send));
    }

    #[test]
    fn test_list_bindings() {
        let state = state_with_focus(Focus::QueryParams);
        assert_eq!(
            normal_mode_command(key(KeyCode::Char('a')), &state),
            Some(Command::action(AppAction::AddRow))
        );
        assert_eq!(
            normal_mode_command(key(KeyCode::Char('j')), &state),
            Some(Command::action(AppAction::SelectRowDown))
        );
        assert_eq!(
            normal_mode_command(key(KeyCode::Enter), &state),
            Some(Command::action(AppAction::StartEditing))
        );
    }

    #[test]
    fn test_ctrl_d_scrolls_instead_of_removing_row() {
        let state = state_with_focus(Focus::Headers);
        assert_eq!(
            normal_mode_command(ctrl('d'), &state),
            Some(Command::action(AppAction::ScrollDown(PAGE_SCROLL)))
        );
        assert_eq!(
            normal_mode_command(key(KeyCode::Char('d')), &state),
            Some(Command::action(AppAction::RemoveRow))
        );
    }

    #[test]
    fn test_method_cycling_keys() {
        let state = state_with_focus(Focus::Method);
        assert_eq!(
            normal_mode_command(key(KeyCode::Char('l')), &state),
            Some(Command::action(AppAction::NextMethod))
        );
        assert_eq!(
            normal_mode_command(key(KeyCode::Left), &state),
            Some(Command::action(AppAction::PreviousMethod))
        );
    }

    #[test]
    fn test_response_scrolling() {
        let state = state_with_focus(Focus::Response);
        assert_eq!(
            normal_mode_command(key(KeyCode::Down), &state),
            Some(Command::action(AppAction::ScrollDown(1)))
        );
        assert_eq!(
            normal_mode_command(key(KeyCode::Char('2')), &state),
            Some(Command::action(AppAction::SetResponseTab(ResponseTab::Table)))
        );
    }

    #[test]
    fn test_editing_url() {
        let mut state = state_with_focus(Focus::Url);
        state.ui.input_mode = InputMode::Editing;

        // Letters that are commands in normal mode are just text here
        assert_eq!(editing_mode_command(key(KeyCode::Char('q')), &state), Some(Command::Type('q')));
        assert_eq!(
            editing_mode_command(key(KeyCode::Backspace), &state),
            Some(Command::action(AppAction::BackspaceUrl))
        );
        assert_eq!(
            editing_mode_command(ctrl('w'), &state),
            Some(Command::action(AppAction::DeleteWordUrl))
        );
        assert_eq!(
            editing_mode_command(key(KeyCode::Enter), &state),
            Some(Command::action(AppAction::StopEditing))
        );
    }

    #[test]
    fn test_editing_pair_toggles_column() {
        let mut state = state_with_focus(Focus::QueryParams);
        state.ui.input_mode = InputMode::Editing;
        assert_eq!(
            editing_mode_command(key(KeyCode::Tab), &state),
            Some(Command::action(AppAction::ToggleEditingField))
        );
        assert_eq!(
            editing_mode_command(ctrl('l'), &state),
            Some(Command::action(AppAction::ClearPair))
        );
    }

    #[test]
    fn test_typed_text_routing() {
        assert_eq!(
            typed_text_action(Focus::Url, "abc".to_string()),
            AppAction::AppendToUrl("abc".to_string())
        );
        assert_eq!(
            typed_text_action(Focus::Headers, "abc".to_string()),
            AppAction::AppendToPair("abc".to_string())
        );
        assert_eq!(
            typed_text_action(Focus::Body, "{}".to_string()),
            AppAction::PasteIntoBody("{}".to_string())
        );
    }

    #[test]
    fn test_editing_body_keeps_enter() {
        let mut state = state_with_focus(Focus::Body);
        state.request.method = HttpMethod::Post;
        state.ui.input_mode = InputMode::Editing;

        let enter = key(KeyCode::Enter);
        assert_eq!(
            editing_mode_command(enter, &state),
            Some(Command::action(AppAction::EditBody(enter)))
        );
        assert_eq!(
            editing_mode_command(ctrl('f'), &state),
            Some(Command::action(AppAction::FormatBody))
        );
        assert_eq!(
            editing_mode_command(key(KeyCode::Esc), &state),
            Some(Command::action(AppAction::StopEditing))
        );
    }
}
