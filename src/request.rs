use crate::state::{AppState, RequestState};
use crate::types::{collapse_pairs, HttpMethod};
use anyhow::{bail, Context};
use serde_json::Value;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tokio::task::JoinHandle;

/// A request ready to go on the wire, snapshotted from the form
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    /// Sent exactly as typed; the query param list is not consulted
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON payload, only for POST/PUT/PATCH
    pub payload: Option<Value>,
}

impl PreparedRequest {
    /// Build the outbound request. Fails only when a write method carries a
    /// body that is not valid JSON.
    pub fn from_state(request: &RequestState) -> anyhow::Result<Self> {
        let payload = if request.method.supports_body() {
            Some(parse_body(request.body.content())?)
        } else {
            None
        };

        Ok(Self {
            method: request.method,
            url: request.url.clone(),
            headers: collapse_pairs(&request.headers),
            payload,
        })
    }
}

/// Parse the user's body text; empty text sends an empty object.
/// Whitespace is not empty and must parse like any other body.
fn parse_body(body: &str) -> anyhow::Result<Value> {
    if body.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(body).context("Invalid JSON body")
}

/// A settled, successful exchange
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchSuccess {
    pub status: u16,
    pub elapsed_ms: f64,
    pub body: Value,
}

/// Perform exactly one HTTP call. Non-2xx statuses are failures.
pub async fn dispatch(
    client: &reqwest::Client,
    request: PreparedRequest,
) -> anyhow::Result<DispatchSuccess> {
    let mut builder = client.request(request.method.into(), &request.url);

    for (key, value) in &request.headers {
        builder = builder.header(key, value);
    }

    if let Some(payload) = &request.payload {
        builder = builder.json(payload);
    }

    let start = Instant::now();
    let response = builder.send().await?;
    let status = response.status();
    let text = response
        .text()
        .await
        .context("Failed to read response body")?;
    let elapsed = start.elapsed();

    if !status.is_success() {
        bail!("Request failed with status code {}", status.as_u16());
    }

    Ok(DispatchSuccess {
        status: status.as_u16(),
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        body: decode_body(text),
    })
}

/// JSON bodies are decoded, anything else is kept as a JSON string
fn decode_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// Executes the composed request in the background
///
/// The response state is reset and `loading` raised before anything else.
/// Returns the task handle, or `None` if the request never left (invalid
/// body), in which case the error is already recorded.
pub fn execute_request_background(
    state: Arc<RwLock<AppState>>,
    client: reqwest::Client,
) -> Option<JoinHandle<()>> {
    let prepared = {
        let Ok(mut s) = state.write() else {
            return None;
        };
        s.response.begin();
        s.ui.response_scroll = 0;
        PreparedRequest::from_state(&s.request)
    };

    let prepared = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::warn!("Request not sent: {e:#}");
            if let Ok(mut s) = state.write() {
                s.response.fail(format!("{e:#}"));
            }
            return None;
        }
    };

    tracing::info!("Dispatching {} {}", prepared.method, prepared.url);

    Some(tokio::spawn(async move {
        let outcome = dispatch(&client, prepared).await;

        // Last request to settle wins; there is no request identity check
        if let Ok(mut s) = state.write() {
            match outcome {
                Ok(success) => {
                    tracing::info!(
                        "Request completed: {} in {:.2}ms",
                        success.status,
                        success.elapsed_ms
                    );
                    s.response
                        .succeed(success.status, success.elapsed_ms, success.body);
                }
                Err(e) => {
                    tracing::warn!("Request failed: {e:#}");
                    s.response.fail(format!("{e:#}"));
                }
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::BodyEditor;
    use crate::types::{KeyValuePair, PairField};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Read one HTTP/1.1 request (headers + content-length body) off the socket
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).to_string()
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serve a single canned response, optionally holding it until released.
    /// The join handle yields the raw request that was received.
    async fn serve_once(
        response: String,
        release: Option<oneshot::Receiver<()>>,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            if let Some(release) = release {
                let _ = release.await;
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{addr}"), handle)
    }

    fn shared_state(url: &str, method: HttpMethod, body: &str) -> Arc<RwLock<AppState>> {
        let mut state = AppState::default();
        state.request.set_url(url.to_string());
        state.request.method = method;
        state.request.body = BodyEditor::with_content(body);
        Arc::new(RwLock::new(state))
    }

    #[test]
    fn test_prepare_get_has_no_payload() {
        let mut request = RequestState::default();
        request.set_url("http://x.test/".to_string());
        request.body = BodyEditor::with_content("{invalid"); // ignored for GET

        let prepared = PreparedRequest::from_state(&request).unwrap();
        assert_eq!(prepared.method, HttpMethod::Get);
        assert!(prepared.payload.is_none());
    }

    #[test]
    fn test_prepare_empty_body_sends_empty_object() {
        let mut request = RequestState::default();
        request.method = HttpMethod::Post;

        let prepared = PreparedRequest::from_state(&request).unwrap();
        assert_eq!(prepared.payload, Some(json!({})));
    }

    #[test]
    fn test_prepare_invalid_body_fails() {
        let mut request = RequestState::default();
        request.method = HttpMethod::Put;
        request.body = BodyEditor::with_content("{invalid");

        let err = PreparedRequest::from_state(&request).unwrap_err();
        assert!(format!("{err:#}").starts_with("Invalid JSON body"));
    }

    #[test]
    fn test_prepare_whitespace_body_fails() {
        let mut request = RequestState::default();
        request.method = HttpMethod::Post;
        request.body = BodyEditor::with_content("  \n ");

        let err = PreparedRequest::from_state(&request).unwrap_err();
        assert!(format!("{err:#}").starts_with("Invalid JSON body"));
    }

    #[test]
    fn test_prepare_headers_collapse() {
        let mut request = RequestState::default();
        request.set_header_field(0, PairField::Key, "X-Token".to_string());
        request.set_header_field(0, PairField::Value, "a".to_string());
        request.headers.push(KeyValuePair::new("", "dropped"));
        request.headers.push(KeyValuePair::new("X-Token", "b"));

        let prepared = PreparedRequest::from_state(&request).unwrap();
        assert_eq!(
            prepared.headers,
            vec![("X-Token".to_string(), "b".to_string())]
        );
    }

    #[test]
    fn test_prepare_uses_url_as_typed() {
        let mut request = RequestState::default();
        request.set_url("http://x.test/?a=1".to_string());
        request.add_query_param();

        let prepared = PreparedRequest::from_state(&request).unwrap();
        assert_eq!(prepared.url, "http://x.test/?a=1");
    }

    #[test]
    fn test_decode_body_falls_back_to_string() {
        assert_eq!(decode_body(r#"{"a":1}"#.to_string()), json!({"a": 1}));
        assert_eq!(decode_body("plain text".to_string()), json!("plain text"));
        assert_eq!(decode_body(String::new()), json!(""));
    }

    #[tokio::test]
    async fn test_post_empty_body_sends_empty_object() {
        let (url, server) = serve_once(http_response("201 Created", r#"{"id":7}"#), None).await;
        let state = shared_state(&url, HttpMethod::Post, "");

        let handle = execute_request_background(state.clone(), reqwest::Client::new()).unwrap();
        handle.await.unwrap();

        let raw_request = server.await.unwrap();
        assert!(raw_request.starts_with("POST / HTTP/1.1"));
        assert!(raw_request
            .to_lowercase()
            .contains("content-type: application/json"));
        assert!(raw_request.ends_with("\r\n\r\n{}"));

        let s = state.read().unwrap();
        assert_eq!(s.response.status, Some(201));
        assert_eq!(s.response.body, Some(json!({"id": 7})));
        assert!(s.response.response_time_ms.is_some());
        assert!(s.response.error.is_none());
    }

    #[tokio::test]
    async fn test_invalid_body_reports_error_without_sending() {
        let state = shared_state("http://127.0.0.1:9/", HttpMethod::Post, "{invalid");

        let handle = execute_request_background(state.clone(), reqwest::Client::new());
        assert!(handle.is_none());

        let s = state.read().unwrap();
        assert!(!s.response.loading);
        assert!(s.response.error.as_deref().unwrap().contains("Invalid JSON body"));
        assert!(s.response.status.is_none());
        assert!(s.response.body.is_none());
    }

    #[tokio::test]
    async fn test_loading_raised_until_settled() {
        let (release_tx, release_rx) = oneshot::channel();
        let (url, server) =
            serve_once(http_response("200 OK", r#"{"ok":true}"#), Some(release_rx)).await;
        let state = shared_state(&url, HttpMethod::Get, "");

        let handle = execute_request_background(state.clone(), reqwest::Client::new()).unwrap();
        assert!(state.read().unwrap().response.loading);

        release_tx.send(()).unwrap();
        handle.await.unwrap();
        server.await.unwrap();

        let s = state.read().unwrap();
        assert!(!s.response.loading);
        assert_eq!(s.response.status, Some(200));
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let (url, server) =
            serve_once(http_response("404 Not Found", r#"{"error":"nope"}"#), None).await;
        let state = shared_state(&url, HttpMethod::Delete, "");

        let handle = execute_request_background(state.clone(), reqwest::Client::new()).unwrap();
        handle.await.unwrap();
        server.await.unwrap();

        let s = state.read().unwrap();
        assert_eq!(
            s.response.error.as_deref(),
            Some("Request failed with status code 404")
        );
        assert!(s.response.status.is_none());
        assert!(s.response.body.is_none());
        assert!(s.response.response_time_ms.is_none());
    }

    #[tokio::test]
    async fn test_query_and_headers_reach_server() {
        let (url, server) = serve_once(http_response("200 OK", "[]"), None).await;
        let state = shared_state(&format!("{url}/items?page=2"), HttpMethod::Get, "");
        {
            let mut s = state.write().unwrap();
            s.request.set_header_field(0, PairField::Key, "X-Trace".to_string());
            s.request.set_header_field(0, PairField::Value, "abc".to_string());
        }

        let handle = execute_request_background(state.clone(), reqwest::Client::new()).unwrap();
        handle.await.unwrap();

        let raw_request = server.await.unwrap();
        assert!(raw_request.starts_with("GET /items?page=2 HTTP/1.1"));
        assert!(raw_request.to_lowercase().contains("x-trace: abc"));
        assert_eq!(state.read().unwrap().response.body, Some(json!([])));
    }

    #[tokio::test]
    async fn test_overlapping_dispatches_last_to_settle_wins() {
        let (release_a, gate_a) = oneshot::channel();
        let (release_b, gate_b) = oneshot::channel();
        let (url_a, server_a) =
            serve_once(http_response("200 OK", r#"{"from":"a"}"#), Some(gate_a)).await;
        let (url_b, server_b) =
            serve_once(http_response("201 Created", r#"{"from":"b"}"#), Some(gate_b)).await;

        let state = shared_state(&url_a, HttpMethod::Get, "");
        let handle_a = execute_request_background(state.clone(), reqwest::Client::new()).unwrap();

        state.write().unwrap().request.set_url(url_b);
        let handle_b = execute_request_background(state.clone(), reqwest::Client::new()).unwrap();

        // B settles first
        release_b.send(()).unwrap();
        handle_b.await.unwrap();
        server_b.await.unwrap();
        assert_eq!(state.read().unwrap().response.status, Some(201));

        // A settles last and overwrites B
        release_a.send(()).unwrap();
        handle_a.await.unwrap();
        server_a.await.unwrap();

        let s = state.read().unwrap();
        assert!(!s.response.loading);
        assert_eq!(s.response.status, Some(200));
        assert_eq!(s.response.body, Some(json!({"from": "a"})));
        assert!(s.response.error.is_none());
    }

    #[tokio::test]
    async fn test_network_error_is_reported() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let state = shared_state(&format!("http://{addr}/"), HttpMethod::Get, "");
        let handle = execute_request_background(state.clone(), reqwest::Client::new()).unwrap();
        handle.await.unwrap();

        let s = state.read().unwrap();
        assert!(!s.response.loading);
        assert!(s.response.error.is_some());
        assert!(s.response.status.is_none());
    }
}
