//! API layer
//!
//! HTTP handlers for:
//! - Discovery (.well-known)
//! - ActivityPub (actors, inbox, collections)

mod activitypub;
mod wellknown;

pub use activitypub::activitypub_router;
pub use wellknown::wellknown_router;
