//! Local actor identity
//!
//! Every username on this node resolves to a synthetic actor whose
//! URIs are derived deterministically from the configured domain and
//! the username. Nothing about an actor is stored.

use crate::config::ActorConfig;

/// Fixed `published` timestamp advertised in every actor document.
///
/// The node has no account creation time to report; remote servers
/// only require the field to be a valid date.
const ACTOR_PUBLISHED: &str = "2023-08-14T20:38:00+09:00";

/// A local actor, addressed as `@{username}` on this node's domain
///
/// Constructed per request from the path parameter; all URI accessors
/// derive from `(domain, username)` alone.
#[derive(Debug, Clone)]
pub struct LocalActor {
    domain: String,
    username: String,
}

impl LocalActor {
    /// Create an actor handle for `username` on `domain`
    pub fn new(domain: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Canonical actor URI, also used as the profile URL
    pub fn id(&self) -> String {
        format!("https://{}/@{}", self.domain, self.username)
    }

    pub fn inbox(&self) -> String {
        format!("{}/inbox", self.id())
    }

    pub fn outbox(&self) -> String {
        format!("{}/outbox", self.id())
    }

    pub fn followers(&self) -> String {
        format!("{}/followers", self.id())
    }

    pub fn following(&self) -> String {
        format!("{}/following", self.id())
    }

    pub fn icon_url(&self) -> String {
        format!("{}/icon.png", self.id())
    }

    /// Key identifier referenced by remote servers verifying signatures
    pub fn key_id(&self) -> String {
        format!("{}#main-key", self.id())
    }

    /// WebFinger subject for this actor (`acct:user@domain`)
    pub fn handle(&self) -> String {
        format!("acct:{}@{}", self.username, self.domain)
    }

    /// Build the full ActivityPub actor document
    ///
    /// Presentation fields (name, summary, key material) come from the
    /// actor configuration; everything else is derived.
    pub fn document(&self, actor_config: &ActorConfig) -> serde_json::Value {
        let id = self.id();

        serde_json::json!({
            "@context": [
                "https://www.w3.org/ns/activitystreams",
                "https://w3id.org/security/v1"
            ],
            "id": id.clone(),
            "type": "Person",
            "preferredUsername": self.username,
            "name": actor_config.display_name,
            "summary": actor_config.summary,
            "published": ACTOR_PUBLISHED,
            "icon": {
                "type": "Image",
                "mediaType": "image/png",
                "url": self.icon_url(),
            },
            "url": id.clone(),
            "inbox": self.inbox(),
            "outbox": self.outbox(),
            "followers": self.followers(),
            "following": self.following(),
            "publicKey": {
                "id": self.key_id(),
                "owner": id,
                "publicKeyPem": actor_config.public_key_pem,
            },
        })
    }
}
