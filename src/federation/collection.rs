//! ActivityStreams collection paging
//!
//! One paging contract is shared by the outbox, followers, and
//! following endpoints: a root `OrderedCollection` that points at its
//! first page, and `OrderedCollectionPage` documents linked back to
//! the root via `partOf`.

use serde::Serialize;

const ACTIVITYSTREAMS_CONTEXT: &str = "https://www.w3.org/ns/activitystreams";

/// Root collection document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedCollection {
    #[serde(rename = "@context")]
    pub context: &'static str,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub total_items: u64,
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

/// One page of a collection
///
/// `T` is the item representation: embedded activity objects for the
/// outbox, bare actor URI strings for followers/following.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedCollectionPage<T: Serialize> {
    #[serde(rename = "@context")]
    pub context: &'static str,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub part_of: String,
    pub ordered_items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// URI of page `index` within `collection_id`
pub fn page_uri(collection_id: &str, index: u32) -> String {
    format!("{collection_id}?page={index}")
}

impl OrderedCollection {
    /// Root collection advertising its first page
    pub fn new(id: String, total_items: u64) -> Self {
        let first = page_uri(&id, 0);
        Self {
            context: ACTIVITYSTREAMS_CONTEXT,
            id,
            kind: "OrderedCollection",
            total_items,
            first,
            last: None,
        }
    }

    /// Also advertise a `last` page (the outbox exposes exactly one
    /// page, so first and last coincide)
    pub fn with_last(mut self, last: String) -> Self {
        self.last = Some(last);
        self
    }
}

impl<T: Serialize> OrderedCollectionPage<T> {
    /// Page 0 of `collection_id` holding `ordered_items`
    pub fn new(collection_id: &str, ordered_items: Vec<T>) -> Self {
        Self {
            context: ACTIVITYSTREAMS_CONTEXT,
            id: page_uri(collection_id, 0),
            kind: "OrderedCollectionPage",
            part_of: collection_id.to_string(),
            ordered_items,
            next: None,
        }
    }

    /// Advertise a further page, modeling an open-ended sequence
    pub fn with_next(mut self, next: String) -> Self {
        self.next = Some(next);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_collection_points_at_page_zero() {
        let collection = OrderedCollection::new(
            "https://social.example.com/@alice/followers".to_string(),
            42,
        );

        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "OrderedCollection");
        assert_eq!(value["totalItems"], 42);
        assert_eq!(
            value["first"],
            "https://social.example.com/@alice/followers?page=0"
        );
        assert!(value.get("last").is_none());
    }

    #[test]
    fn page_links_back_to_its_collection() {
        let page = OrderedCollectionPage::new(
            "https://social.example.com/@alice/followers",
            vec!["https://remote.example/users/bob".to_string()],
        )
        .with_next(page_uri(
            "https://social.example.com/@alice/followers",
            1,
        ));

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["type"], "OrderedCollectionPage");
        assert_eq!(
            value["partOf"],
            "https://social.example.com/@alice/followers"
        );
        assert_eq!(
            value["id"],
            "https://social.example.com/@alice/followers?page=0"
        );
        assert_eq!(
            value["next"],
            "https://social.example.com/@alice/followers?page=1"
        );
        assert_eq!(value["orderedItems"][0], "https://remote.example/users/bob");
    }

    #[test]
    fn context_is_activitystreams() {
        let collection =
            OrderedCollection::new("https://social.example.com/@alice/outbox".to_string(), 1);
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["@context"], "https://www.w3.org/ns/activitystreams");
    }
}
