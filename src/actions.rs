use crate::state::AppState;
use crate::types::{Focus, InputMode, PairField, PairList, ResponseTab};
use crossterm::event::KeyEvent;

/// Represents all possible state-changing actions in the application
/// This pattern separates input handling from state mutations, making the code
/// more testable
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Focus
    FocusNext,
    FocusPrevious,
    FocusTo(Focus),

    // Editing mode
    StartEditing,
    StopEditing,
    ToggleEditingField,

    // Row selection in the key/value lists
    SelectRowUp,
    SelectRowDown,

    // Method selector
    NextMethod,
    PreviousMethod,

    // URL field
    AppendToUrl(String),
    BackspaceUrl,
    DeleteWordUrl,
    ClearUrl,

    // Key/value rows (the focused list, selected row, editing field)
    AppendToPair(String),
    BackspacePair,
    DeleteWordPair,
    ClearPair,
    AddRow,
    RemoveRow,

    // Body editor
    EditBody(KeyEvent),
    PasteIntoBody(String),
    FormatBody,

    // Response panel
    SetResponseTab(ResponseTab),
    ToggleResponseTab,
    ScrollUp(usize),
    ScrollDown(usize),
    SetYankFlash(bool),
}

/// Apply an action to the application state
/// All form mutations go through here so URL/query sync always happens
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        AppAction::FocusNext => cycle_focus(state, true),
        AppAction::FocusPrevious => cycle_focus(state, false),
        AppAction::FocusTo(focus) => {
            state.ui.focus = focus;
            state.ui.input_mode = InputMode::Normal;
        }

        AppAction::StartEditing => {
            let focus = state.ui.focus;
            let has_row = focus
                .pair_list()
                .map(|list| state.selected_row(list) < state.request.pairs(list).len())
                .unwrap_or(true);

            if focus.is_editable() && has_row {
                state.ui.input_mode = InputMode::Editing;
                state.ui.body_error = None;
            }
        }
        AppAction::StopEditing => {
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::ToggleEditingField => {
            state.ui.editing_field = state.ui.editing_field.toggle();
        }

        AppAction::SelectRowUp => {
            if let Some(list) = state.ui.focus.pair_list() {
                let row = state.selected_row_mut(list);
                *row = row.saturating_sub(1);
            }
        }
        AppAction::SelectRowDown => {
            if let Some(list) = state.ui.focus.pair_list() {
                let last = state.request.pairs(list).len().saturating_sub(1);
                let row = state.selected_row_mut(list);
                *row = (*row + 1).min(last);
            }
        }

        AppAction::NextMethod => {
            state.request.method = state.request.method.next();
        }
        AppAction::PreviousMethod => {
            state.request.method = state.request.method.previous();
        }

        AppAction::AppendToUrl(text) => {
            let mut url = state.request.url.clone();
            url.push_str(&text);
            state.request.set_url(url);
        }
        AppAction::BackspaceUrl => {
            let mut url = state.request.url.clone();
            if url.pop().is_some() {
                state.request.set_url(url);
            }
        }
        AppAction::DeleteWordUrl => {
            let mut url = state.request.url.clone();
            delete_word(&mut url);
            state.request.set_url(url);
        }
        AppAction::ClearUrl => {
            state.request.set_url(String::new());
        }

        AppAction::AppendToPair(text) => {
            edit_pair(state, |current| current.push_str(&text));
        }
        AppAction::BackspacePair => {
            edit_pair(state, |current| {
                current.pop();
            });
        }
        AppAction::DeleteWordPair => {
            edit_pair(state, delete_word);
        }
        AppAction::ClearPair => {
            edit_pair(state, String::clear);
        }
        AppAction::AddRow => {
            if let Some(list) = state.ui.focus.pair_list() {
                match list {
                    PairList::QueryParams => state.request.add_query_param(),
                    PairList::Headers => state.request.add_header(),
                }
                let last = state.request.pairs(list).len() - 1;
                *state.selected_row_mut(list) = last;
                state.ui.editing_field = PairField::Key;
            }
        }
        AppAction::RemoveRow => {
            if let Some(list) = state.ui.focus.pair_list() {
                let row = state.selected_row(list);
                match list {
                    PairList::QueryParams => state.request.remove_query_param(row),
                    PairList::Headers => state.request.remove_header(row),
                }
                let last = state.request.pairs(list).len().saturating_sub(1);
                let row = state.selected_row_mut(list);
                *row = (*row).min(last);
            }
        }

        AppAction::EditBody(key) => {
            state.request.body.handle_key_event(key);
        }
        AppAction::PasteIntoBody(text) => {
            state.request.body.insert_str_normalized(&text);
        }
        AppAction::FormatBody => {
            state.ui.body_error = state.request.body.format_json().err();
        }

        AppAction::SetResponseTab(tab) => {
            state.ui.response_tab = tab;
            state.ui.response_scroll = 0;
        }
        AppAction::ToggleResponseTab => {
            state.ui.response_tab = state.ui.response_tab.toggle();
            state.ui.response_scroll = 0;
        }
        AppAction::ScrollUp(lines) => {
            state.ui.response_scroll = state.ui.response_scroll.saturating_sub(lines);
        }
        AppAction::ScrollDown(lines) => {
            state.ui.response_scroll = state.ui.response_scroll.saturating_add(lines);
        }
        AppAction::SetYankFlash(flash) => {
            state.ui.yank_flash = flash;
        }
    }
}

fn cycle_focus(state: &mut AppState, forward: bool) {
    let order = state.focus_order();
    let idx = order.iter().position(|f| *f == state.ui.focus).unwrap_or(0);
    let next = if forward {
        (idx + 1) % order.len()
    } else {
        (idx + order.len() - 1) % order.len()
    };
    state.ui.focus = order[next];
    state.ui.input_mode = InputMode::Normal;
}

/// Apply `edit` to the field under the cursor of the focused list
fn edit_pair(state: &mut AppState, edit: impl FnOnce(&mut String)) {
    let Some(list) = state.ui.focus.pair_list() else {
        return;
    };
    let row = state.selected_row(list);
    let field = state.ui.editing_field;
    let Some(pair) = state.request.pairs(list).get(row) else {
        return;
    };

    let mut value = pair.get(field).to_string();
    edit(&mut value);
    state.request.set_pair_field(list, row, field, value);
}

/// Helper function to delete the last word from a string (Ctrl+W behavior)
fn delete_word(s: &mut String) {
    // Trim trailing whitespace first
    *s = s.trim_end().to_string();

    // Find last whitespace and truncate there
    if let Some(pos) = s.rfind(char::is_whitespace) {
        s.truncate(pos);
    } else {
        s.clear();
    }
}
