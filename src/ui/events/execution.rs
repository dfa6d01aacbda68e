//! Request execution handler

use crate::request::execute_request_background;
use crate::state::AppState;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Send the composed request if the send control is enabled
pub fn handle_send(state: Arc<RwLock<AppState>>, client: &reqwest::Client) {
    let can_send = state.read().map(|s| s.can_send()).unwrap_or(false);
    if !can_send {
        debug!("Send ignored: empty URL or a request is in flight");
        return;
    }

    execute_request_background(state, client.clone());
}
