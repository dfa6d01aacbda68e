//! Yank (copy) handlers
//!
//! Copies the response body, pretty-printed, to the system clipboard.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::response::pretty_json;
use crate::state::AppState;
use arboard::Clipboard;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

/// How long the response stays highlighted after a yank
const FLASH_DURATION: Duration = Duration::from_millis(200);

pub fn handle_yank_response(state: Arc<RwLock<AppState>>) {
    let text = match state.read() {
        Ok(s) => s.response.body.as_ref().map(pretty_json),
        Err(_) => return,
    };

    let Some(text) = text else {
        debug!("No response body to yank");
        return;
    };

    let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match copied {
        Ok(()) => {
            debug!("Yanked response body to clipboard");
            apply(&state, AppAction::SetYankFlash(true));

            // Clear the flash after a short delay
            tokio::spawn(async move {
                tokio::time::sleep(FLASH_DURATION).await;
                apply(&state, AppAction::SetYankFlash(false));
            });
        }
        Err(e) => warn!("Failed to copy to clipboard: {e}"),
    }
}
