//! Async placeholder endpoint
//!
//! Carries no business logic; kept as a wiring check for the async stack.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// GET /ping
async fn ping() -> Json<Value> {
    Json(json!({ "pong": true }))
}

/// Ping routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/ping", get(ping))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ping_pongs() {
        let Json(body) = ping().await;
        assert_eq!(body["pong"], true);
    }
}
