//! In-process HTTP doubles for the release API and the chat webhook.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorder {
    fn push(&self, uri: &Uri, headers: &HeaderMap, body: &[u8]) {
        let req = RecordedRequest {
            path: uri.path().to_string(),
            authorization: headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: serde_json::from_slice(body).unwrap_or(Value::Null),
        };
        self.0.lock().unwrap().push(req);
    }

    pub fn take(&self) -> Vec<RecordedRequest> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
}

#[derive(Clone)]
struct GithubState {
    releases: Arc<HashMap<String, Value>>,
    recorder: Recorder,
}

async fn release_by_tag(
    State(st): State<GithubState>,
    Path((_owner, _repo, tag)): Path<(String, String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    st.recorder.push(&uri, &headers, b"");
    match st.releases.get(&tag) {
        Some(release) => (StatusCode::OK, Json(release.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))),
    }
}

/// Release API double serving `(tag, body, html_url)` entries. Returns its base URL.
pub async fn github(releases: &[(&str, Option<&str>, &str)]) -> (String, Recorder) {
    let releases: HashMap<String, Value> = releases
        .iter()
        .map(|(tag, body, html_url)| {
            (tag.to_string(), json!({"tag_name": tag, "body": body, "html_url": html_url}))
        })
        .collect();
    let recorder = Recorder::default();
    let state = GithubState {
        releases: Arc::new(releases),
        recorder: recorder.clone(),
    };
    let router = Router::new()
        .route("/repos/{owner}/{repo}/releases/tags/{tag}", get(release_by_tag))
        .with_state(state);
    (serve(router).await, recorder)
}

#[derive(Clone)]
struct HookState {
    status: StatusCode,
    recorder: Recorder,
}

async fn hook(State(st): State<HookState>, uri: Uri, headers: HeaderMap, body: Bytes) -> StatusCode {
    st.recorder.push(&uri, &headers, &body);
    st.status
}

/// Webhook double answering every POST with `status`. Returns the full webhook URL.
pub async fn webhook(status: StatusCode) -> (String, Recorder) {
    let recorder = Recorder::default();
    let state = HookState {
        status,
        recorder: recorder.clone(),
    };
    let router = Router::new().route("/hook", post(hook)).with_state(state);
    (format!("{}/hook", serve(router).await), recorder)
}
