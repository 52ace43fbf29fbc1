//! Integration tests for the Levure storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p levure-integration-tests
//! ```
//!
//! Each test boots the real router (bundled content, templates, static
//! files, full middleware stack) on an ephemeral local port and talks to
//! it with a cookie-keeping `reqwest` client, so the session carries the
//! visitor's cart between requests exactly as a browser would.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use levure_storefront::{app, config::StorefrontConfig, content::ContentStore, state::AppState};
use reqwest::{Client, Response, redirect::Policy};

/// Storefront crate directory, for bundled content and static files.
fn storefront_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront")
}

/// Configuration pointing at the bundled content, with overrides.
///
/// # Panics
///
/// Panics if an override is invalid.
#[must_use]
pub fn test_config(overrides: &[(&str, &str)]) -> StorefrontConfig {
    let content = storefront_dir().join("content").display().to_string();
    let assets = storefront_dir().join("static").display().to_string();
    StorefrontConfig::from_lookup(|key| {
        overrides
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_string())
            .or_else(|| match key {
                "LEVURE_CONTENT_DIR" => Some(content.clone()),
                "LEVURE_STATIC_DIR" => Some(assets.clone()),
                _ => None,
            })
    })
    .expect("test configuration is valid")
}

/// A running storefront and a browser-like client for it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Boot the storefront with default test configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config(&[])).await
    }

    /// Boot the storefront with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if content fails to load or no port can be bound.
    pub async fn spawn_with(config: StorefrontConfig) -> Self {
        let content = ContentStore::load(&config.content_dir).expect("bundled content loads");
        let router = app(AppState::new(config, content));

        let listener = tokio::net::TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");
        tokio::spawn(async move {
            axum_serve(listener, router).await;
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Plain GET, as a full page load.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// GET issued by HTMX.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn htmx_get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .header("HX-Request", "true")
            .send()
            .await
            .expect("HTMX GET request failed")
    }

    /// Form POST issued by HTMX.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("HTMX POST request failed")
    }

    /// Form POST from a browser without JavaScript.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn plain_post(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }
}

async fn axum_serve(listener: tokio::net::TcpListener, router: axum::Router) {
    if let Err(err) = axum::serve(listener, router).await {
        panic!("test server failed: {err}");
    }
}

/// Text body of a response.
///
/// # Panics
///
/// Panics if the body cannot be read.
pub async fn body_text(response: Response) -> String {
    response.text().await.expect("response body is text")
}
