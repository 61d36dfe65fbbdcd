//! ChannelClient against a throwaway in-process backend.
//!
//! Each test binds an axum router on 127.0.0.1:0 that mimics the channel
//! backend closely enough to check query encoding and failure mapping.

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chanview_proto::client::{ApiError, ChannelClient};
use chanview_proto::config::BackendConfig;
use chanview_proto::protocol::{Channel, ChannelQuery};

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: String) -> ChannelClient {
    ChannelClient::new(&BackendConfig {
        base_url,
        ..BackendConfig::default()
    })
    .unwrap()
}

/// Echoes the received query parameters back as channel names, sorted by key.
async fn echo_params(Query(params): Query<HashMap<String, String>>) -> Json<Vec<Channel>> {
    let mut keys: Vec<_> = params.keys().cloned().collect();
    keys.sort();
    Json(
        keys.into_iter()
            .map(|k| {
                let v = params[&k].clone();
                Channel::new(format!("{}={}", k, v), "", "http://echo")
            })
            .collect(),
    )
}

#[tokio::test]
async fn test_page_returns_channels_in_backend_order() {
    let router = Router::new().route(
        "/channels",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            assert_eq!(params.get("page").map(String::as_str), Some("1"));
            Json(vec![
                Channel::new("Jazz FM", "Miles Davis - So What", "http://jazz.example/stream"),
                Channel::new("Alpha", "News", "http://alpha.example/live"),
            ])
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let channels = client.fetch(&ChannelQuery::Page(1)).await.unwrap();
    let names: Vec<_> = channels.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Jazz FM", "Alpha"]);
    assert_eq!(channels[0].url, "http://jazz.example/stream");
}

#[tokio::test]
async fn test_sort_and_group_are_forwarded() {
    let router = Router::new().route("/channels", get(echo_params));
    let base_url = spawn_backend(router).await;
    let client = ChannelClient::new(&BackendConfig {
        base_url,
        sort_by: Some("name".to_string()),
        group_by: Some("group_title".to_string()),
        timeout_secs: Some(5),
    })
    .unwrap();

    let channels = client.fetch_page(3).await.unwrap();
    let names: Vec<_> = channels.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["group_by=group_title", "page=3", "sort_by=name"]);
}

#[tokio::test]
async fn test_search_query_is_encoded() {
    let router = Router::new().route("/search", get(echo_params));
    let client = client_for(spawn_backend(router).await);

    let query = "rock & roll #1?";
    let channels = client
        .fetch(&ChannelQuery::Search(query.to_string()))
        .await
        .unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].name, format!("query={}", query));
}

#[tokio::test]
async fn test_non_ok_status_is_an_error() {
    let router = Router::new()
        .route(
            "/channels",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }),
        )
        .route(
            "/search",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE.into_response() }),
        );
    let client = client_for(spawn_backend(router).await);

    match client.fetch_page(1).await {
        Err(ApiError::Status(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {:?}", other),
    }
    match client.search("jazz").await {
        Err(ApiError::Status(status)) => assert_eq!(status.as_u16(), 503),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let router = Router::new().route("/channels", get(|| async { "<html>oops</html>" }));
    let client = client_for(spawn_backend(router).await);

    assert!(matches!(
        client.fetch_page(1).await,
        Err(ApiError::Decode(_))
    ));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}", addr));
    assert!(matches!(
        client.fetch_page(1).await,
        Err(ApiError::Transport(_))
    ));
}
