use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use trakt_api::endpoints::oauth::DeviceTokenOutcome;
use trakt_api::endpoints::progress::LastActivity;
use trakt_api::endpoints::sync::{RatingItem, RatingItems};
use trakt_api::endpoints::{Ids, MediaType, Period};
use trakt_api::{Client, Request, StatusCode, TraktApiError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Client {
    Client::builder("client-123")
        .base_url(server.uri())
        .build()
        .expect("client")
}

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

fn poll(client: &Client) -> trakt_api::endpoints::oauth::PollDeviceToken {
    Request::oauth().device_token(secret("device-1"), client.client_id(), secret("shh"))
}

#[tokio::test]
async fn every_call_carries_trakt_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shows/trending"))
        .and(header("trakt-api-version", "2"))
        .and(header("trakt-api-key", "client-123"))
        .and(header("content-type", "application/json"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"watchers": 10, "show": {"title": "Andor", "year": 2022, "ids": {"trakt": 1}}},
            {"watchers": 4, "show": {"title": "Shogun", "year": 2024, "ids": {"trakt": 2}}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let shows = client(&server)
        .send(Request::shows().trending().limit(2u32))
        .await
        .expect("trending");

    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0].show.title, "Andor");
}

#[tokio::test]
async fn bearer_is_attached_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sync/watched/movies"))
        .and(header("authorization", "Bearer access-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let authed = client(&server).with_bearer(secret("access-abc"));
    let movies = authed
        .send(Request::sync().watched_movies())
        .await
        .expect("watched");

    assert!(movies.is_empty());
}

#[tokio::test]
async fn authenticated_endpoint_without_bearer_fails_fast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .send(Request::sync().watched_shows())
        .await
        .unwrap_err();

    assert!(matches!(err, TraktApiError::Unauthenticated));
}

#[tokio::test]
async fn non_success_keeps_status_and_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shows/nope/ratings"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "not_found",
            "error_description": "Show not found"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .send(Request::shows().ratings("nope"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.to_string().contains("Show not found"));
}

#[tokio::test]
async fn malformed_body_is_a_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/arrival-2016/ratings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"rating\": \"high\"}"))
        .mount(&server)
        .await;

    let err = client(&server)
        .send(Request::movies().ratings("arrival-2016"))
        .await
        .unwrap_err();

    assert!(matches!(err, TraktApiError::Deserialization(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let client = Client::builder("client-123")
        .base_url("http://127.0.0.1:9")
        .build()
        .expect("client");

    let err = client.send(Request::shows().popular()).await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn pagination_headers_are_read() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/watched/yearly"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Pagination-Page", "2")
                .insert_header("X-Pagination-Limit", "1")
                .insert_header("X-Pagination-Page-Count", "3")
                .insert_header("X-Pagination-Item-Count", "3")
                .set_body_json(json!([
                    {"watcher_count": 5, "play_count": 8, "movie": {"title": "Heat", "year": 1995}}
                ])),
        )
        .mount(&server)
        .await;

    let page = client(&server)
        .send_paginated(
            Request::movies()
                .watched()
                .period(Period::Yearly)
                .page(2u32)
                .limit(1u32),
        )
        .await
        .expect("page");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pagination.page, 2);
    assert!(page.pagination.has_next_page());
    assert!(page.pagination.has_previous_page());
}

#[tokio::test]
async fn missing_pagination_headers_yield_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/show"))
        .and(query_param("query", "office"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "show", "score": 100.0, "show": {"title": "The Office", "year": 2005}}
        ])))
        .mount(&server)
        .await;

    let page = client(&server)
        .send_paginated(Request::search().shows("office"))
        .await
        .expect("search");

    assert_eq!(page.pagination.page_count, 1);
    assert_eq!(page.pagination.item_count, 1);
    assert!(!page.pagination.has_next_page());
}

#[tokio::test]
async fn device_code_request_posts_client_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/device/code"))
        .and(body_json(json!({"client_id": "client-123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_code": "device-1",
            "user_code": "ABCD1234",
            "verification_url": "https://trakt.tv/activate",
            "expires_in": 600,
            "interval": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let code = client
        .send(Request::oauth().device_code(client.client_id()))
        .await
        .expect("device code");

    assert_eq!(code.user_code, "ABCD1234");
    assert_eq!(code.device_code.expose_secret(), "device-1");
    assert_eq!(code.interval, 5);
}

#[tokio::test]
async fn device_token_success_is_granted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/device/token"))
        .and(body_json(json!({
            "code": "device-1",
            "client_id": "client-123",
            "client_secret": "shh"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-abc",
            "token_type": "bearer",
            "expires_in": 7776000,
            "refresh_token": "refresh-xyz",
            "scope": "public",
            "created_at": 1700000000
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let outcome = client.poll_device_token(poll(&client)).await.expect("poll");

    match outcome {
        DeviceTokenOutcome::Granted(token) => {
            assert_eq!(token.access_token.expose_secret(), "access-abc");
            assert_eq!(token.created_at, 1700000000);
        }
        other => panic!("expected grant, got {}", other.name()),
    }
}

#[tokio::test]
async fn device_token_statuses_map_to_outcomes() {
    let cases: [(u16, &str); 6] = [
        (400, "pending"),
        (429, "slow_down"),
        (418, "denied"),
        (409, "denied"),
        (404, "expired"),
        (410, "expired"),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/device/token"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = client(&server);
        let outcome = client.poll_device_token(poll(&client)).await.expect("poll");
        assert_eq!(outcome.name(), expected, "status {}", status);
    }
}

#[tokio::test]
async fn device_token_unexpected_status_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/device/token"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.poll_device_token(poll(&client)).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn revoke_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/revoke"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client
        .send(Request::oauth().revoke(secret("access-abc"), client.client_id(), secret("shh")))
        .await
        .expect("revoke");
}

#[tokio::test]
async fn delete_with_no_content_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/sync/playback/13"))
        .and(header("authorization", "Bearer access-abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .with_bearer(secret("access-abc"))
        .send(Request::sync().remove_playback(13))
        .await
        .expect("remove playback");
}

#[tokio::test]
async fn add_ratings_posts_typed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sync/ratings"))
        .and(body_json(json!({"movies": [{"rating": 9, "ids": {"trakt": 481}}]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "added": {"movies": 1, "shows": 0, "seasons": 0, "episodes": 0},
            "not_found": {"movies": [], "shows": [], "seasons": [], "episodes": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = RatingItem {
        rating: Some(9),
        ids: Ids::lookup("481"),
        ..RatingItem::default()
    };
    let summary = client(&server)
        .with_bearer(secret("access-abc"))
        .send(Request::sync().add_ratings(RatingItems::of(MediaType::Movies, vec![item])))
        .await
        .expect("add ratings");

    assert_eq!(summary.added.unwrap().get(MediaType::Movies), 1);
}

#[tokio::test]
async fn show_progress_sends_every_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shows/breaking-bad/progress/watched"))
        .and(query_param("hidden", "false"))
        .and(query_param("specials", "false"))
        .and(query_param("count_specials", "true"))
        .and(query_param("last_activity", "watched"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aired": 62, "completed": 10, "last_watched_at": null, "seasons": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let progress = client(&server)
        .with_bearer(secret("access-abc"))
        .send(
            Request::shows()
                .progress("breaking-bad")
                .last_activity(LastActivity::Watched),
        )
        .await
        .expect("progress");

    assert_eq!(progress.completed, 10);
    assert!(progress.next_episode.is_none());
}
