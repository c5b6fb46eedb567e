//! Well-known endpoints
//!
//! - /.well-known/nodeinfo
//! - /.well-known/host-meta
//! - /.well-known/webfinger

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::federation::{self, LocalActor, WebFingerResponse};

/// Create well-known router
///
/// Routes:
/// - GET /.well-known/nodeinfo
/// - GET /.well-known/host-meta
/// - GET /.well-known/webfinger
pub fn wellknown_router() -> Router<AppState> {
    Router::new()
        .route("/.well-known/nodeinfo", get(nodeinfo))
        .route("/.well-known/host-meta", get(host_meta))
        .route("/.well-known/webfinger", get(webfinger))
}

/// GET /.well-known/nodeinfo
///
/// Static capability document. Remote servers use it to learn which
/// federation protocols this node speaks.
async fn nodeinfo() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": "2.1",
        "software": {
            "name": "driftpub",
            "version": env!("CARGO_PKG_VERSION")
        },
        "protocols": ["activitypub"],
        "usage": {
            "users": {
                "total": 1
            }
        }
    }))
}

/// GET /.well-known/host-meta
///
/// Returns host-meta XML pointing at the WebFinger endpoint.
async fn host_meta(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let base_url = state.config.server.base_url();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<XRD xmlns="http://docs.oasis-open.org/ns/xri/xrd-1.0">
  <Link rel="lrdd" type="application/xrd+xml" template="{}/.well-known/webfinger?resource={{uri}}"/>
</XRD>"#,
        base_url
    );

    ([("Content-Type", "application/xrd+xml")], xml)
}

/// WebFinger query parameters
#[derive(Debug, Deserialize)]
struct WebFingerQuery {
    resource: String,
}

/// GET /.well-known/webfinger
///
/// Resolves a local handle to the actor's profile links. No user store
/// is consulted: every local handle is addressable.
///
/// Query: ?resource=acct:user@domain
async fn webfinger(
    State(state): State<AppState>,
    Query(query): Query<WebFingerQuery>,
) -> Result<Json<WebFingerResponse>, AppError> {
    let username = federation::parse_resource(&query.resource, &state.config.server.domain)?;
    let actor = LocalActor::new(&state.config.server.domain, username);

    Ok(Json(federation::generate_response(&actor)))
}
