use std::fmt;

/// HTTP methods offered by the method selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Selector order
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Check if this method sends a JSON body (POST/PUT/PATCH)
    pub fn supports_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// One row of the headers or query parameters list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn get(&self, field: PairField) -> &str {
        match field {
            PairField::Key => &self.key,
            PairField::Value => &self.value,
        }
    }

    pub fn get_mut(&mut self, field: PairField) -> &mut String {
        match field {
            PairField::Key => &mut self.key,
            PairField::Value => &mut self.value,
        }
    }
}

/// Which half of a key/value row is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairField {
    #[default]
    Key,
    Value,
}

impl PairField {
    pub fn toggle(&self) -> Self {
        match self {
            PairField::Key => PairField::Value,
            PairField::Value => PairField::Key,
        }
    }
}

/// Project a pair list onto a key -> value mapping.
///
/// Rows with an empty key are dropped. A repeated key keeps the position of
/// its first occurrence and takes the value of its last one.
pub fn collapse_pairs(pairs: &[KeyValuePair]) -> Vec<(String, String)> {
    let mut collapsed: Vec<(String, String)> = Vec::with_capacity(pairs.len());

    for pair in pairs.iter().filter(|p| !p.key.is_empty()) {
        match collapsed.iter_mut().find(|(key, _)| key == &pair.key) {
            Some(existing) => existing.1 = pair.value.clone(),
            None => collapsed.push((pair.key.clone(), pair.value.clone())),
        }
    }

    collapsed
}

/// Which list editor a pair action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairList {
    QueryParams,
    Headers,
}

/// Tracks which section of the screen has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Url,
    Method,
    QueryParams,
    Headers,
    Body,
    Send,
    Response,
}

impl Focus {
    /// The list editor behind this focus, if any
    pub fn pair_list(&self) -> Option<PairList> {
        match self {
            Focus::QueryParams => Some(PairList::QueryParams),
            Focus::Headers => Some(PairList::Headers),
            _ => None,
        }
    }

    /// Whether pressing Enter on this section starts text editing
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            Focus::Url | Focus::QueryParams | Focus::Headers | Focus::Body
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Tabs of the response panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseTab {
    #[default]
    Json,
    Table,
}

impl ResponseTab {
    pub fn toggle(&self) -> Self {
        match self {
            ResponseTab::Json => ResponseTab::Table,
            ResponseTab::Table => ResponseTab::Json,
        }
    }
}
