use crate::editor::BodyEditor;
use crate::sync::{parse_query_params, rebuild_url};
use crate::types::{
    Focus, HttpMethod, InputMode, KeyValuePair, PairField, PairList, ResponseTab,
};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub request: RequestState,
    pub response: ResponseState,
    pub ui: UiState,
}

impl AppState {
    /// Start from a pre-filled URL (query params are derived from it)
    pub fn with_initial_url(url: &str) -> Self {
        let mut state = Self::default();
        state.request.set_url(url.to_string());
        state
    }

    /// Focus order for Tab / Shift+Tab. The body editor only takes part
    /// when the selected method sends a body.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Url, Focus::Method, Focus::QueryParams, Focus::Headers];
        if self.request.method.supports_body() {
            order.push(Focus::Body);
        }
        order.push(Focus::Send);
        order.push(Focus::Response);
        order
    }

    /// The row cursor for a pair list
    pub fn selected_row(&self, list: PairList) -> usize {
        match list {
            PairList::QueryParams => self.ui.selected_param_index,
            PairList::Headers => self.ui.selected_header_index,
        }
    }

    pub fn selected_row_mut(&mut self, list: PairList) -> &mut usize {
        match list {
            PairList::QueryParams => &mut self.ui.selected_param_index,
            PairList::Headers => &mut self.ui.selected_header_index,
        }
    }

    /// Whether the send control is enabled
    pub fn can_send(&self) -> bool {
        !self.request.url.is_empty() && !self.response.loading
    }
}

/// Everything the user composes. Never persisted.
#[derive(Debug, Clone)]
pub struct RequestState {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<KeyValuePair>,
    pub query_params: Vec<KeyValuePair>,
    pub body: BodyEditor,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: HttpMethod::Get,
            headers: vec![KeyValuePair::default()],
            query_params: Vec::new(),
            body: BodyEditor::new(),
        }
    }
}

impl RequestState {
    /// Replace the URL and re-derive the query parameter list from it
    pub fn set_url(&mut self, url: String) {
        self.query_params = parse_query_params(&url);
        self.url = url;
    }

    /// Update one field of a query parameter row, then rewrite the URL.
    /// Out of range indexes are ignored.
    pub fn set_query_param_field(&mut self, index: usize, field: PairField, value: String) {
        let Some(param) = self.query_params.get_mut(index) else {
            return;
        };
        *param.get_mut(field) = value;
        self.sync_url_from_params();
    }

    /// Append an empty row. The URL is untouched until a key is typed.
    pub fn add_query_param(&mut self) {
        self.query_params.push(KeyValuePair::default());
    }

    pub fn remove_query_param(&mut self, index: usize) {
        if index < self.query_params.len() {
            self.query_params.remove(index);
            self.sync_url_from_params();
        }
    }

    pub fn set_header_field(&mut self, index: usize, field: PairField, value: String) {
        if let Some(header) = self.headers.get_mut(index) {
            *header.get_mut(field) = value;
        }
    }

    pub fn add_header(&mut self) {
        self.headers.push(KeyValuePair::default());
    }

    pub fn remove_header(&mut self, index: usize) {
        if index < self.headers.len() {
            self.headers.remove(index);
        }
    }

    pub fn pairs(&self, list: PairList) -> &[KeyValuePair] {
        match list {
            PairList::QueryParams => &self.query_params,
            PairList::Headers => &self.headers,
        }
    }

    /// Route a field edit to the right list, keeping the URL in sync for params
    pub fn set_pair_field(&mut self, list: PairList, index: usize, field: PairField, value: String) {
        match list {
            PairList::QueryParams => self.set_query_param_field(index, field, value),
            PairList::Headers => self.set_header_field(index, field, value),
        }
    }

    fn sync_url_from_params(&mut self) {
        if let Some(url) = rebuild_url(&self.url, &self.query_params) {
            self.url = url;
        }
    }
}

/// Outcome of the most recent dispatch
#[derive(Debug, Clone, Default)]
pub struct ResponseState {
    pub loading: bool,
    pub status: Option<u16>,
    pub response_time_ms: Option<f64>,
    pub body: Option<Value>,
    pub error: Option<String>,
}

impl ResponseState {
    /// Mark a dispatch as started, clearing the previous outcome
    pub fn begin(&mut self) {
        self.loading = true;
        self.status = None;
        self.response_time_ms = None;
        self.body = None;
        self.error = None;
    }

    pub fn succeed(&mut self, status: u16, response_time_ms: f64, body: Value) {
        self.loading = false;
        self.status = Some(status);
        self.response_time_ms = Some(response_time_ms);
        self.body = Some(body);
        self.error = None;
    }

    /// Record a failure. Status, body and time are left unset.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.status = None;
        self.response_time_ms = None;
        self.body = None;
        self.error = Some(if message.is_empty() {
            "Request failed".to_string()
        } else {
            message
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: Focus,
    pub input_mode: InputMode,

    /// Row cursor in the query params list
    pub selected_param_index: usize,
    /// Row cursor in the headers list
    pub selected_header_index: usize,
    /// Column being edited in a key/value row
    pub editing_field: PairField,

    pub response_tab: ResponseTab,
    /// Scroll offset for the response panel (lines in JSON view, tables in table view)
    pub response_scroll: usize,

    /// Briefly highlight the response after a yank
    pub yank_flash: bool,
    /// Last body formatting error, shown under the body editor
    pub body_error: Option<String>,
}
