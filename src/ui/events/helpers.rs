//! Helper functions for event handling
//!
//! - State locking helpers (apply actions)
//! - Paste batching

use crate::actions::{AppAction, apply_action};
use crate::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Apply a single action to state
pub fn apply(state: &Arc<RwLock<AppState>>, action: AppAction) {
    if let Ok(mut s) = state.write() {
        apply_action(action, &mut s);
    }
}

/// Apply multiple actions to state under one lock
pub fn apply_many(state: &Arc<RwLock<AppState>>, actions: Vec<AppAction>) {
    if let Ok(mut s) = state.write() {
        for action in actions {
            apply_action(action, &mut s);
        }
    }
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, this function checks for any immediately available
/// character events and batches them together. This enables fast paste operations
/// in terminals. Newlines inside the paste are kept only when `keep_newlines` is set.
pub fn collect_paste_batch(initial_char: char, keep_newlines: bool) -> String {
    let mut batch = String::from(initial_char);

    // Drain any immediately available character events
    while let Ok(true) = event::poll(Duration::from_millis(0)) {
        match event::read() {
            Ok(Event::Key(next_key)) => match next_key.code {
                KeyCode::Char(c) if !next_key.modifiers.contains(KeyModifiers::CONTROL) => {
                    batch.push(c);
                }
                KeyCode::Enter if keep_newlines => batch.push('\n'),
                _ => break,
            },
            _ => break,
        }
    }

    batch
}
