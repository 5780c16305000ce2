//! Test helpers: an in-process stand-in for the model serving endpoint

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use parking_lot::Mutex;

use crate::models::PredictRequest;

/// How the fake model answers every request
#[derive(Debug, Clone)]
pub enum ModelReply {
    Probability(f64),
    Delayed(Duration, f64),
    Raw(String),
    Status(u16),
}

#[derive(Clone)]
struct FakeState {
    reply: ModelReply,
    hits: Arc<AtomicUsize>,
    last_inputs: Arc<Mutex<Option<Vec<Vec<f64>>>>>,
    last_content_type: Arc<Mutex<Option<String>>>,
}

pub struct FakeModel {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    last_inputs: Arc<Mutex<Option<Vec<Vec<f64>>>>>,
    last_content_type: Arc<Mutex<Option<String>>>,
    task: tokio::task::JoinHandle<()>,
}

impl FakeModel {
    pub async fn start(reply: ModelReply) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let last_inputs = Arc::new(Mutex::new(None));
        let last_content_type = Arc::new(Mutex::new(None));
        let state = FakeState {
            reply,
            hits: hits.clone(),
            last_inputs: last_inputs.clone(),
            last_content_type: last_content_type.clone(),
        };

        let app = Router::new().fallback(answer).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, hits, last_inputs, last_content_type, task }
    }

    pub fn url(&self) -> String {
        format!("http://{}/v1/models/fraud:predict", self.addr)
    }

    /// Requests received so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// `inputs` of the most recent well-formed request
    pub fn last_inputs(&self) -> Option<Vec<Vec<f64>>> {
        self.last_inputs.lock().clone()
    }

    /// `Content-Type` header of the most recent request
    pub fn last_content_type(&self) -> Option<String> {
        self.last_content_type.lock().clone()
    }
}

impl Drop for FakeModel {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn answer(State(state): State<FakeState>, headers: HeaderMap, body: Bytes) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_content_type.lock() = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if let Ok(request) = serde_json::from_slice::<PredictRequest>(&body) {
        *state.last_inputs.lock() = Some(request.inputs);
    }

    match state.reply {
        ModelReply::Probability(p) => probability(p),
        ModelReply::Delayed(delay, p) => {
            tokio::time::sleep(delay).await;
            probability(p)
        }
        ModelReply::Raw(text) => (StatusCode::OK, text).into_response(),
        ModelReply::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
    }
}

fn probability(p: f64) -> Response {
    axum::Json(serde_json::json!({ "outputs": [[p]] })).into_response()
}
