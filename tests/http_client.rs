//! Integration tests for the blocking HTTP client against a local mock server.
//!
//! The client is blocking, so every call runs on a `spawn_blocking` thread
//! and the client is created and dropped there.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use music_finder::api::{ApiClient, Transport};
use music_finder::auth::Gateway;
use music_finder::providers::sendgrid::{Mail, SendGrid};
use music_finder::providers::spotify::{Seeds, Spotify};
use music_finder::providers::yelp::{BusinessQuery, Yelp};
use music_finder::providers::youtube::YouTube;
use music_finder::Error;
use serde_json::json;
use std::error::Error as StdError;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MASTER_TOKEN: &str = "API.integration";

async fn mount_token(server: &MockServer, provider: &str, token: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{provider}/key")))
        .and(query_param("auth_manager_token", MASTER_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .mount(server)
        .await;
}

fn gateway(uri: &str) -> Gateway<ApiClient> {
    Gateway::new(
        ApiClient::new().unwrap(),
        Some(MASTER_TOKEN.to_string()),
        uri,
        "config.toml",
    )
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_json_sends_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/ping", server.uri());
    let value = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new().unwrap();
        client.get_json(&url, Some("abc"))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(value["ok"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/businesses/XXX/reviews"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let url = format!("{}/businesses/XXX/reviews", server.uri());
    let err = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new().unwrap();
        client.get_json(&url, None)
    })
    .await
    .unwrap()
    .unwrap_err();

    match err {
        Error::Status { status, body, url } => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
            assert!(url.ends_with("/businesses/XXX/reviews"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_spotify_recommendations_end_to_end() {
    let server = MockServer::start().await;
    mount_token(&server, "spotify", "sp-token").await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations"))
        .and(query_param("seed_artists", "a1"))
        .and(query_param("seed_genres", "jazz,soul"))
        .and(header("Authorization", "Bearer sp-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [{
                "id": "t1",
                "name": "So What",
                "preview_url": null,
                "album": {
                    "id": "al1",
                    "name": "Kind of Blue",
                    "images": [{"url": "big"}, {"url": "mid"}, {"url": "small"}],
                    "artists": [{"id": "a1", "name": "Miles Davis"}]
                }
            }]
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let tracks = tokio::task::spawn_blocking(move || {
        let gw = gateway(&uri);
        let seeds = Seeds {
            artist_ids: vec!["a1".into()],
            track_ids: vec![],
            genres: vec!["jazz".into(), "soul".into()],
        };
        Spotify::with_base_url(&gw, format!("{uri}/v1")).similar_tracks(&seeds)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "So What");
    assert_eq!(tracks[0].artist.as_ref().unwrap().name, "Miles Davis");
    assert_eq!(tracks[0].album.as_ref().unwrap().image_url_small, "small");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_yelp_search_end_to_end() {
    let server = MockServer::start().await;
    mount_token(&server, "yelp", "yelp-token").await;
    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .and(query_param("location", "Evanston, IL"))
        .and(query_param("price", "1,2"))
        .and(header("Authorization", "Bearer yelp-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "businesses": [{
                "id": "b1",
                "name": "Kabul House",
                "rating": 4.0,
                "image_url": "https://img/o.jpg",
                "location": {"display_address": ["3320 Dempster St", "Skokie, IL 60076"]},
                "coordinates": {"latitude": 42.04, "longitude": -87.72},
                "review_count": 641,
                "url": "https://www.yelp.com/biz/kabul-house-skokie?adjust_creative=x",
                "categories": [{"alias": "afghani", "title": "Afghan"}],
                "price": "$$"
            }]
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let businesses = tokio::task::spawn_blocking(move || {
        let gw = gateway(&uri);
        let query = BusinessQuery {
            price: Some("2, 1".into()),
            ..BusinessQuery::default()
        };
        Yelp::with_base_url(&gw, uri.as_str()).businesses(&query)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(businesses.len(), 1);
    assert_eq!(businesses[0].display_address, "3320 Dempster St., Skokie, IL 60076");
    assert_eq!(businesses[0].share_url, "https://www.yelp.com/biz/kabul-house-skokie");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sendgrid_accepts_202() {
    let server = MockServer::start().await;
    mount_token(&server, "sendgrid", "sg-token").await;
    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .and(header("Authorization", "Bearer sg-token"))
        .and(body_partial_json(json!({
            "from": {"email": "me@example.com"},
            "subject": "Spotify recommendation list"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let gw = gateway(&uri);
        let mail = Mail {
            from: "me@example.com".into(),
            to: vec!["friend@example.com".into()],
            subject: "Spotify recommendation list".into(),
            html_content: "<table></table>".into(),
        };
        SendGrid::with_base_url(&gw, uri.as_str()).send_mail(&mail)
    })
    .await
    .unwrap()
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_token_endpoint_failure_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spotify/key"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let gw = gateway(&uri);
        Spotify::with_base_url(&gw, format!("{uri}/v1")).genres()
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, Error::Status { status: 401, .. }));
    let message = err.to_string();
    assert!(!message.contains(MASTER_TOKEN), "token leaked: {message}");
    assert!(message.contains("/spotify/key?auth_manager_token=***"));
}

#[test]
fn test_refused_connection_hides_master_token() {
    // Reserve a port, then close it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base = format!("http://127.0.0.1:{port}");
    let gw = gateway(&base);
    let err = Spotify::with_base_url(&gw, format!("{base}/v1"))
        .genres()
        .unwrap_err();

    assert!(matches!(err, Error::Request { .. }));
    let mut chain = err.to_string();
    let mut source = StdError::source(&err);
    while let Some(cause) = source {
        chain.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    assert!(!chain.contains(MASTER_TOKEN), "token leaked: {chain}");
    assert!(chain.contains("auth_manager_token=***"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_youtube_key_is_masked_in_status_errors() {
    let server = MockServer::start().await;
    mount_token(&server, "youtube", "yt-secret-key").await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quota"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let gw = gateway(&uri);
        YouTube::with_base_url(&gw, uri.as_str()).search_videos("cats")
    })
    .await
    .unwrap()
    .unwrap_err();

    let message = err.to_string();
    assert!(!message.contains("yt-secret-key"), "key leaked: {message}");
    assert!(message.contains("&key=***"));
}
