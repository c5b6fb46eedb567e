//! E2E tests for the actor profile endpoints

mod common;

use common::TestServer;
use serde_json::Value;

#[tokio::test]
async fn actor_document_served_for_activity_json_accept() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/@alice"))
        .header("Accept", "application/activity+json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();

    let actor_uri = server.actor_uri("alice");
    assert_eq!(json["type"], "Person");
    assert_eq!(json["id"], actor_uri);
    assert_eq!(json["preferredUsername"], "alice");
    assert_eq!(json["url"], actor_uri);

    // Every sub-URI hangs off the actor id.
    for key in ["inbox", "outbox", "followers", "following"] {
        let uri = json[key].as_str().unwrap();
        assert_eq!(uri, format!("{actor_uri}/{key}"));
    }

    assert_eq!(json["publicKey"]["id"], format!("{actor_uri}#main-key"));
    assert_eq!(json["publicKey"]["owner"], actor_uri);
    assert_eq!(json["publicKey"]["publicKeyPem"], "");
    assert_eq!(json["icon"]["url"], format!("{actor_uri}/icon.png"));
}

#[tokio::test]
async fn actor_document_served_when_listed_among_other_accept_values() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/@alice"))
        .header("Accept", "text/html, application/activity+json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json["type"], "Person");
}

#[tokio::test]
async fn html_profile_served_without_activity_json_accept() {
    let server = TestServer::new().await;

    for accept in [None, Some("text/html")] {
        let mut request = server.client.get(server.url("/@alice"));
        if let Some(accept) = accept {
            request = request.header("Accept", accept);
        }

        let response = request.send().await.unwrap();
        assert_eq!(response.status(), 200);

        let body = response.text().await.unwrap();
        assert!(body.contains("@alice"), "accept {accept:?}");
        assert!(!body.contains("\"type\""));
    }
}

#[tokio::test]
async fn handle_without_sigil_is_not_found() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/alice"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn icon_serves_shared_avatar() {
    let server = TestServer::new().await;
    server.write_icon(b"\x89PNG fake image bytes").await;

    let response = server
        .client
        .get(server.url("/@alice/icon.png"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap(),
        "image/png"
    );
    assert_eq!(
        response.bytes().await.unwrap().as_ref(),
        b"\x89PNG fake image bytes"
    );
}

#[tokio::test]
async fn missing_icon_file_is_not_found() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/@alice/icon.png"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}
