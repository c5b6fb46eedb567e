//! ActivityPub federation module
//!
//! Handles:
//! - Local actor identity and document generation
//! - Activity classification and inbox processing
//! - Activity delivery (Accept handshake)
//! - Collection paging
//! - WebFinger

mod activity;
mod actor;
mod collection;
mod delivery;
mod webfinger;

pub use activity::{Activity, ActivityDocument, InboxDispatcher};
pub use actor::LocalActor;
pub use collection::{OrderedCollection, OrderedCollectionPage, page_uri};
pub use delivery::ActivityDelivery;
pub use webfinger::{WebFingerLink, WebFingerResponse, generate_response, parse_resource};
