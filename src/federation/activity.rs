//! Activity classification and inbox processing
//!
//! Inbound activities are classified by their `type` field while the
//! raw JSON document is retained, so a Follow can be echoed back
//! verbatim inside the Accept handshake.

use serde_json::Value;

use crate::error::AppError;
use crate::federation::{ActivityDelivery, LocalActor};

/// An inbound federation activity, classified by `type`
///
/// Only the variants the inbox reacts to are distinguished; every
/// other type is rejected at classification time.
#[derive(Debug, Clone)]
pub enum Activity {
    /// A remote actor requests to follow a local actor
    Follow(ActivityDocument),
    /// A remote actor retracts a previous activity
    Undo(ActivityDocument),
}

/// The raw JSON document of a classified activity
///
/// Keeps unknown fields intact for verbatim round-tripping.
#[derive(Debug, Clone)]
pub struct ActivityDocument(Value);

impl ActivityDocument {
    /// The `actor` field, when present and a string
    pub fn actor(&self) -> Option<&str> {
        self.0.get("actor").and_then(Value::as_str)
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Activity {
    /// Classify a decoded JSON document by its `type` field.
    ///
    /// # Errors
    /// `UnsupportedType` for unknown types, and for a missing or
    /// non-string `type` field. The offending type is carried in the
    /// error so the sender can see what was rejected.
    pub fn classify(document: Value) -> Result<Self, AppError> {
        let kind = match document.get("type").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => return Err(AppError::UnsupportedType("(none)".to_string())),
        };

        match kind.as_str() {
            "Follow" => Ok(Activity::Follow(ActivityDocument(document))),
            "Undo" => Ok(Activity::Undo(ActivityDocument(document))),
            _ => Err(AppError::UnsupportedType(kind)),
        }
    }
}

/// Inbox state machine
///
/// Classifies inbound activities and drives the correct reaction.
/// Every request terminates in exactly one of: accepted response,
/// invalid request, unsupported type, or delivery failure.
pub struct InboxDispatcher<'a> {
    actor: LocalActor,
    delivery: &'a ActivityDelivery,
}

impl<'a> InboxDispatcher<'a> {
    /// Create a dispatcher for the targeted local actor
    pub fn new(actor: LocalActor, delivery: &'a ActivityDelivery) -> Self {
        Self { actor, delivery }
    }

    /// Process one inbound activity to completion.
    ///
    /// A `Follow` triggers the Accept handshake: the reply is delivered
    /// synchronously to the requester before this returns. An `Undo` is
    /// acknowledged without effect, since no follower state is kept.
    pub async fn dispatch(&self, activity: Activity) -> Result<(), AppError> {
        match activity {
            Activity::Follow(follow) => self.accept_follow(follow).await,
            Activity::Undo(_) => {
                tracing::debug!(actor = %self.actor.id(), "acknowledged Undo without effect");
                Ok(())
            }
        }
    }

    /// Accept handshake: reply to an inbound Follow.
    ///
    /// The Accept embeds the original Follow unchanged as its `object`
    /// and is POSTed to the URI in the Follow's `actor` field.
    async fn accept_follow(&self, follow: ActivityDocument) -> Result<(), AppError> {
        let target = follow
            .actor()
            .ok_or_else(|| AppError::Delivery("Follow actor missing or not a string".to_string()))?
            .to_string();

        let accept = serde_json::json!({
            "@context": "https://www.w3.org/ns/activitystreams",
            "id": format!("{}#follow", self.actor.id()),
            "type": "Accept",
            "actor": self.actor.id(),
            "object": follow.into_value(),
        });

        self.delivery.deliver(&target, &accept).await?;

        tracing::info!(
            actor = %self.actor.id(),
            follower = %target,
            "accepted follow request"
        );

        Ok(())
    }
}
