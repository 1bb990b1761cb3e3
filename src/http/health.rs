//! Liveness probe. Answers the bare body `{"ok": true}` rather than the
//! response envelope so infra checks stay trivial to parse. Backing-store
//! pings slot in here once the process gains any.

use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
