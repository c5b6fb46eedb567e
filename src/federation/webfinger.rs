//! WebFinger protocol implementation
//!
//! Maps a handle query (`user@domain`) to the local actor's profile
//! links. This node only resolves its own domain; any handle on a
//! foreign host is not found here.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::federation::LocalActor;

/// WebFinger JRD response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebFingerResponse {
    pub subject: String,
    pub aliases: Vec<String>,
    pub links: Vec<WebFingerLink>,
}

/// WebFinger link
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebFingerLink {
    pub rel: String,
    #[serde(rename = "type")]
    pub link_type: String,
    pub href: String,
}

/// Parse a WebFinger `resource` query into a local username.
///
/// Accepted forms: `user`, `user@domain`, `acct:user@domain`, `@user`.
///
/// # Errors
/// `NotFound` when the resource names a foreign host, or when the
/// username is empty after stripping the `acct:` scheme and `@` sigil.
pub fn parse_resource(resource: &str, domain: &str) -> Result<String, AppError> {
    let rest = resource.strip_prefix("acct:").unwrap_or(resource);
    let rest = rest.strip_prefix('@').unwrap_or(rest);

    let (username, host) = match rest.split_once('@') {
        Some((username, host)) => (username, Some(host)),
        None => (rest, None),
    };

    if let Some(host) = host {
        if host != domain {
            return Err(AppError::NotFound);
        }
    }

    if username.is_empty() {
        return Err(AppError::NotFound);
    }

    Ok(username.to_string())
}

/// Generate the JRD response for a local actor.
///
/// The `self` link must equal the actor URI served by the actor
/// endpoint, or remote servers will fail their discovery cross-check.
pub fn generate_response(actor: &LocalActor) -> WebFingerResponse {
    let actor_url = actor.id();

    WebFingerResponse {
        subject: actor.handle(),
        aliases: vec![actor_url.clone()],
        links: vec![
            WebFingerLink {
                rel: "http://webfinger.net/rel/profile-page".to_string(),
                link_type: "text/html".to_string(),
                href: actor_url.clone(),
            },
            WebFingerLink {
                rel: "self".to_string(),
                link_type: "application/activity+json".to_string(),
                href: actor_url,
            },
        ],
    }
}
