//! ActivityPub endpoints
//!
//! - Actor document / HTML profile (content negotiated)
//! - Shared avatar
//! - Inbox (activity receiving)
//! - Outbox
//! - Followers/Following collections

use axum::body::Bytes;
use axum::response::{Html, IntoResponse, Response};
use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
};
use http::HeaderMap;
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::federation::{
    Activity, ActivityDelivery, InboxDispatcher, LocalActor, OrderedCollection,
    OrderedCollectionPage, page_uri,
};

const PUBLIC_AUDIENCE: &str = "https://www.w3.org/ns/activitystreams#Public";

/// Fixed sample post served from every outbox; lets remote servers
/// exercise their Create/Note ingestion against this node.
const SAMPLE_POST_PUBLISHED: &str = "2023-08-13T11:32:00Z";

/// Synthetic peer listed on every followers/following page
const SAMPLE_PEER: &str = "https://fedi.example.net/users/ada";

/// Placeholder follower count; the node keeps no follower state
const FOLLOWERS_TOTAL: u64 = 314_159_265;

/// Create ActivityPub router
///
/// Routes:
/// - GET /@{username} - Actor document or HTML profile
/// - GET /@{username}/icon.png - Shared avatar
/// - POST /@{username}/inbox - Inbox
/// - GET /@{username}/outbox - Outbox collection
/// - GET /@{username}/followers - Followers collection
/// - GET /@{username}/following - Following collection
pub fn activitypub_router() -> Router<AppState> {
    Router::new()
        .route("/:handle", get(profile))
        .route("/:handle/icon.png", get(icon))
        .route("/:handle/inbox", post(inbox))
        .route("/:handle/outbox", get(outbox))
        .route("/:handle/followers", get(followers))
        .route("/:handle/following", get(following))
}

/// Extract the username from an `@{username}` path segment.
///
/// Axum cannot mix a literal prefix with a capture in one segment, so
/// the routes capture the whole segment and the sigil is checked here.
fn parse_handle(handle: &str) -> Result<&str, AppError> {
    handle
        .strip_prefix('@')
        .filter(|username| !username.is_empty())
        .ok_or(AppError::NotFound)
}

/// True when any comma-separated `Accept` value is exactly
/// `application/activity+json` (surrounding whitespace tolerated)
fn wants_activity_json(headers: &HeaderMap) -> bool {
    headers
        .get(http::header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| {
            accept
                .split(',')
                .any(|value| value.trim() == "application/activity+json")
        })
}

/// GET /@{username}
///
/// Content negotiated: federation peers asking for
/// `application/activity+json` get the actor document, everyone else
/// gets a minimal profile page.
async fn profile(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let username = parse_handle(&handle)?;
    let actor = LocalActor::new(&state.config.server.domain, username);

    if wants_activity_json(&headers) {
        Ok(Json(actor.document(&state.config.actor)).into_response())
    } else {
        Ok(Html(format!(
            "<h1>@{}</h1>not implemented yet.",
            actor.username()
        ))
        .into_response())
    }
}

/// GET /@{username}/icon.png
///
/// Serves the shared avatar. The username is accepted but unused:
/// every actor currently shares one icon.
async fn icon(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Response, AppError> {
    parse_handle(&handle)?;

    let bytes = tokio::fs::read(&state.config.actor.icon_path)
        .await
        .map_err(|_| AppError::NotFound)?;

    Ok(([("Content-Type", "image/png")], bytes).into_response())
}

/// POST /@{username}/inbox
///
/// Receives incoming federation activities.
///
/// # Steps
/// 1. Decode the body (malformed JSON is rejected with 400)
/// 2. Record the request in the debug log (best effort)
/// 3. Classify and dispatch; a Follow blocks on the Accept handshake
async fn inbox(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let username = parse_handle(&handle)?;
    let path = format!("/@{username}/inbox");

    let document: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(document) => document,
        Err(error) => {
            tracing::debug!(%error, "failed to decode inbox payload");
            state
                .request_log
                .record_raw("POST", &path, &headers, &body)
                .await;
            return Err(AppError::InvalidRequest);
        }
    };

    state
        .request_log
        .record("POST", &path, &headers, &document)
        .await;

    let activity = Activity::classify(document)?;

    let actor = LocalActor::new(&state.config.server.domain, username);
    let delivery = ActivityDelivery::new(state.http_client.clone());
    let dispatcher = InboxDispatcher::new(actor, &delivery);
    dispatcher.dispatch(activity).await?;

    Ok(Json(serde_json::json!({"status": "accepted"})))
}

/// Collection query parameters
///
/// The page value is deliberately not parsed: any value yields page 0.
#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
}

/// GET /@{username}/outbox
///
/// Outbox collection or page. Pages embed full Create activities so
/// they are self-contained for remote consumers.
async fn outbox(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let username = parse_handle(&handle)?;
    let actor = LocalActor::new(&state.config.server.domain, username);
    let outbox_url = actor.outbox();

    if query.page.is_none() {
        let last = page_uri(&outbox_url, 0);
        let collection = OrderedCollection::new(outbox_url, 1).with_last(last);
        Ok(Json(collection).into_response())
    } else {
        let page = OrderedCollectionPage::new(&outbox_url, vec![sample_create_activity(&actor)]);
        Ok(Json(page).into_response())
    }
}

/// GET /@{username}/followers
///
/// Followers collection or page. Page items are bare actor URIs;
/// peers dereference them separately.
async fn followers(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let username = parse_handle(&handle)?;
    let actor = LocalActor::new(&state.config.server.domain, username);

    Ok(actor_uri_collection(actor.followers(), FOLLOWERS_TOTAL, query))
}

/// GET /@{username}/following
///
/// Following collection or page, same shape as followers.
async fn following(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let username = parse_handle(&handle)?;
    let actor = LocalActor::new(&state.config.server.domain, username);

    Ok(actor_uri_collection(actor.following(), 1, query))
}

/// Shared followers/following contract: a root collection without a
/// `last`, and pages that always advertise a `next` to model an
/// open-ended, lazily generated sequence.
fn actor_uri_collection(collection_url: String, total_items: u64, query: PageQuery) -> Response {
    if query.page.is_none() {
        let collection = OrderedCollection::new(collection_url, total_items);
        Json(collection).into_response()
    } else {
        let next = page_uri(&collection_url, 1);
        let page = OrderedCollectionPage::new(&collection_url, vec![SAMPLE_PEER.to_string()])
            .with_next(next);
        Json(page).into_response()
    }
}

/// The one sample post every outbox page serves: a Create wrapping a
/// public Note, both attributed to the requested actor.
fn sample_create_activity(actor: &LocalActor) -> serde_json::Value {
    let post_id = format!("{}/posts/12345", actor.id());

    serde_json::json!({
        "id": post_id.clone(),
        "type": "Create",
        "published": SAMPLE_POST_PUBLISHED,
        "actor": actor.id(),
        "to": [PUBLIC_AUDIENCE],
        "cc": [actor.followers()],
        "object": {
            "id": post_id,
            "type": "Note",
            "published": SAMPLE_POST_PUBLISHED,
            "attributedTo": actor.id(),
            "to": [PUBLIC_AUDIENCE],
            "cc": [actor.followers()],
            "content": "Hello, world!"
        }
    })
}
