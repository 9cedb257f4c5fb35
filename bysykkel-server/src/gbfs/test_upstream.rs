//! Local stand-in for the GBFS API, for tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{HeaderMap, StatusCode};

/// `Client-Identifier` values seen by the upstream, one per request.
pub type SeenIdentifiers = Arc<Mutex<Vec<String>>>;

/// Start an upstream on an ephemeral port that answers every request
/// with `status` and records the `client-identifier` header.
///
/// Returns the base URL to use as `api_host`.
pub async fn spawn_upstream(status: StatusCode) -> (String, SeenIdentifiers) {
    let seen = SeenIdentifiers::default();
    let recorder = seen.clone();

    let app = Router::new().fallback(move |headers: HeaderMap| {
        let recorder = recorder.clone();
        async move {
            let identifier = headers
                .get("client-identifier")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            recorder.lock().unwrap().push(identifier);
            status
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}
