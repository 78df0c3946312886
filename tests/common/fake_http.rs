//! Fake document server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Every path is served from a table of canned responses:
//! - a registered path returns its status and body
//! - a path registered as stalled accepts the request and never answers
//! - anything else is `404 Not Found`
//!
//! # Example
//!
//! ```rust,no_run
//! use common::fake_http::FakeDocServer;
//!
//! #[tokio::test]
//! async fn serves_a_document() {
//!     let server = FakeDocServer::start().await.unwrap();
//!     server.serve("/app.yaml", "name: app").await;
//!
//!     let url = server.url("/app.yaml");
//! }
//! ```

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
#[derive(Default)]
struct ServerState {
    documents: HashMap<String, (StatusCode, String)>,
    stalled: HashSet<String>,
    /// Request log: `(path, host header, user-agent header)`.
    requests: Vec<(String, Option<String>, Option<String>)>,
}

/// Handle to the running fake document server.
pub struct FakeDocServer {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl FakeDocServer {
    /// Start the server on a random port. Returns once the server is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ServerState::default()));

        let app = Router::new()
            .fallback(serve_document)
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full URL for `path` on this server (e.g. `http://127.0.0.1:PORT/a.yaml`).
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// `host:port` the server listens on.
    pub fn authority(&self) -> String {
        self.addr.to_string()
    }

    /// Serve `body` with `200 OK` at `path`.
    pub async fn serve(&self, path: &str, body: &str) {
        self.respond(path, StatusCode::OK, body).await;
    }

    /// Serve `body` with an arbitrary status at `path`.
    pub async fn respond(&self, path: &str, status: StatusCode, body: &str) {
        let mut state = self.state.lock().await;
        state
            .documents
            .insert(path.to_string(), (status, body.to_string()));
    }

    /// Accept requests at `path` but never send a response.
    pub async fn stall(&self, path: &str) {
        self.state.lock().await.stalled.insert(path.to_string());
    }

    /// Every request received so far as `(path, host, user_agent)`.
    pub async fn requests(&self) -> Vec<(String, Option<String>, Option<String>)> {
        self.state.lock().await.requests.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handler
// ---------------------------------------------------------------------------

async fn serve_document(
    State(state): State<Arc<Mutex<ServerState>>>,
    headers: HeaderMap,
    uri: Uri,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let (stalled, response) = {
        let mut state = state.lock().await;
        state
            .requests
            .push((path.clone(), header("host"), header("user-agent")));
        (
            state.stalled.contains(&path),
            state.documents.get(&path).cloned(),
        )
    };

    if stalled {
        std::future::pending::<()>().await;
    }

    response.unwrap_or((StatusCode::NOT_FOUND, String::new()))
}
