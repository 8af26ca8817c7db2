#![allow(dead_code)]

use bookshelf::storage::BookRepository;
use bookshelf::transport;
use bookshelf::AppConfig;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "SECRET_KEY" => Some(TEST_SECRET.to_string()),
        _ => None,
    })
}

/// Starts the router on an ephemeral port and returns its base URL.
pub async fn spawn_app(
    repo: Arc<dyn BookRepository>,
    seed: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let app_state = transport::http::AppState::new(test_config(), repo);
    app_state.library.initialize(seed).await;
    let router = transport::http::create_router(app_state);

    // Bind to an ephemeral port to avoid conflicts between tests.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

/// Client that leaves redirects alone so tests can inspect them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .unwrap()
}

/// `name=value` pair from the response's `Set-Cookie` headers, if any.
pub fn set_cookie(resp: &reqwest::Response, name: &str) -> Option<String> {
    resp.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", name)))
        .map(|v| v.to_string())
}

/// Just the cookie value part of a `Set-Cookie` header.
pub fn cookie_value(header: &str) -> String {
    header
        .split(';')
        .next()
        .and_then(|kv| kv.split_once('='))
        .map(|(_, v)| v.to_string())
        .unwrap_or_default()
}

pub fn book_form<'a>(
    title: &'a str,
    year: &'a str,
    status: &'a str,
    rating: &'a str,
) -> Vec<(&'static str, &'a str)> {
    vec![
        ("title", title),
        ("author", "Test Author"),
        ("genre", "Testing"),
        ("year", year),
        ("status", status),
        ("rating", rating),
        ("image_url", ""),
    ]
}
