//! URL <-> query parameter synchronization
//!
//! Neither the URL field nor the query parameter list is authoritative. Editing
//! the URL re-derives the list, editing a list row re-derives the URL. Both
//! directions fail silently: an unparseable URL empties the list, and a list
//! edit against an unparseable URL leaves the URL alone.

use crate::types::{collapse_pairs, KeyValuePair};
use url::Url;

/// Parse the query string of `url` into an ordered pair list.
///
/// Repeated keys are kept as separate rows. Returns an empty list when the
/// URL cannot be parsed or has no query string.
pub fn parse_query_params(url: &str) -> Vec<KeyValuePair> {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .query_pairs()
            .map(|(key, value)| KeyValuePair::new(key, value))
            .collect(),
        Err(e) => {
            tracing::debug!("URL not parseable, clearing query params: {e}");
            Vec::new()
        }
    }
}

/// Rebuild `url` so its query string reflects `params`.
///
/// Everything after the first `?` is replaced. Rows with an empty key are
/// skipped and a repeated key is written once with its last value. Returns
/// `None` when the part before `?` is not a valid URL.
pub fn rebuild_url(url: &str, params: &[KeyValuePair]) -> Option<String> {
    let base = url.split('?').next().unwrap_or_default();

    let mut parsed = match Url::parse(base) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Cannot rebuild URL from '{base}': {e}");
            return None;
        }
    };

    let pairs = collapse_pairs(params);
    if pairs.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().extend_pairs(pairs);
    }

    Some(parsed.to_string())
}
