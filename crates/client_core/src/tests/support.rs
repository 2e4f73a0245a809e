//! Fakes and an in-process stand-in for the external services.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use shared::{
    error::SubmissionError,
    protocol::{SignupRequest, TrackVisitRequest, VisitorResponse},
};
use tokio::{
    net::TcpListener,
    sync::{Mutex, Notify},
};

use crate::{
    error::TrackingError,
    transport::{SignupTransport, TrackingTransport},
};

pub(crate) fn visitor_response(counted: bool, is_new_visitor: bool) -> VisitorResponse {
    VisitorResponse {
        success: true,
        counted,
        is_new_visitor,
        is_new_session: is_new_visitor,
        total_visitors: 42,
        session_visitors: 1,
        message: "Visitor counted".to_string(),
    }
}

pub(crate) struct FakeTracking {
    url: String,
    result: Result<VisitorResponse, TrackingError>,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<TrackVisitRequest>>,
}

impl FakeTracking {
    pub fn new(url: &str, result: Result<VisitorResponse, TrackingError>) -> Arc<Self> {
        Arc::new(Self {
            url: url.to_string(),
            result,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackingTransport for FakeTracking {
    fn tracking_url(&self) -> &str {
        &self.url
    }

    async fn track_visit(
        &self,
        request: &TrackVisitRequest,
    ) -> Result<VisitorResponse, TrackingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request.clone());
        self.result.clone()
    }
}

pub(crate) struct FakeSignup {
    outcome: Result<(), SubmissionError>,
    hold: Option<Arc<Notify>>,
    pub requests: Mutex<Vec<SignupRequest>>,
}

impl FakeSignup {
    pub fn answering(outcome: Result<(), SubmissionError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            hold: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Blocks every request until `release` is notified.
    pub fn held(outcome: Result<(), SubmissionError>, release: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            hold: Some(release),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl SignupTransport for FakeSignup {
    async fn sign_up(&self, request: &SignupRequest) -> Result<(), SubmissionError> {
        self.requests.lock().await.push(request.clone());
        if let Some(release) = &self.hold {
            release.notified().await;
        }
        self.outcome.clone()
    }
}

#[derive(Clone)]
pub(crate) struct MockReply {
    status: StatusCode,
    body: MockBody,
}

#[derive(Clone)]
enum MockBody {
    Json(Value),
    Raw(&'static str),
}

impl MockReply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: MockBody::Json(body),
        }
    }

    pub fn raw(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body: MockBody::Raw(body),
        }
    }
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        match self.body {
            MockBody::Json(value) => (self.status, Json(value)).into_response(),
            MockBody::Raw(text) => (self.status, text).into_response(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedVisit {
    pub body: TrackVisitRequest,
    pub cookie: Option<String>,
}

#[derive(Clone)]
pub(crate) struct MockService {
    track_reply: MockReply,
    signup_reply: MockReply,
    pub visits: Arc<Mutex<Vec<RecordedVisit>>>,
    pub signups: Arc<Mutex<Vec<Value>>>,
}

pub(crate) const SESSION_COOKIE: &str = "visitor_session=abc123";

impl MockService {
    pub fn new(track_reply: MockReply, signup_reply: MockReply) -> Self {
        Self {
            track_reply,
            signup_reply,
            visits: Arc::new(Mutex::new(Vec::new())),
            signups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serves on an ephemeral local port and returns its base URL.
    pub async fn spawn(self) -> String {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let app = Router::new()
            .route("/visitors/track", post(handle_track))
            .route("/email/signup", post(handle_signup))
            .with_state(self);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }
}

async fn handle_track(
    State(service): State<MockService>,
    headers: HeaderMap,
    Json(body): Json<TrackVisitRequest>,
) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    service
        .visits
        .lock()
        .await
        .push(RecordedVisit { body, cookie });

    let mut response = service.track_reply.into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_static("visitor_session=abc123; Path=/"),
    );
    response
}

async fn handle_signup(State(service): State<MockService>, Json(body): Json<Value>) -> Response {
    service.signups.lock().await.push(body);
    service.signup_reply.into_response()
}
