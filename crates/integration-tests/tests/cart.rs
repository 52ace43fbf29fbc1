//! Cart flows over HTMX and plain form posts.

#![allow(clippy::unwrap_used)]

use levure_integration_tests::{TestContext, body_text};
use reqwest::{Response, StatusCode};
use serde_json::Value;

fn cart_updated(resp: &Response) -> Value {
    let raw = resp
        .headers()
        .get("hx-trigger")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    let value: Value = serde_json::from_str(raw).unwrap();
    value["cart-updated"].clone()
}

#[tokio::test]
async fn test_add_opens_panel_and_announces_totals() {
    let ctx = TestContext::spawn().await;

    let resp = ctx.htmx_post("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let totals = cart_updated(&resp);
    assert_eq!(totals["items"], 1);
    assert_eq!(totals["total"], "$8.00");

    let panel = body_text(resp).await;
    assert!(panel.contains("Your Cart (1)"));
    assert!(panel.contains("Golden Crust Sourdough"));
    assert!(panel.contains("load delay:2000ms"));

    let resp = ctx.htmx_post("/cart/add", &[("product_id", "1")]).await;
    let totals = cart_updated(&resp);
    assert_eq!(totals["items"], 2);
    assert_eq!(totals["total"], "$16.00");
}

#[tokio::test]
async fn test_cart_survives_across_requests() {
    let ctx = TestContext::spawn().await;
    ctx.htmx_post("/cart/add", &[("product_id", "5")]).await;
    ctx.htmx_post("/cart/add", &[("product_id", "15")]).await;

    let count = body_text(ctx.htmx_get("/cart/count").await).await;
    assert!(count.contains(">2</span>"));

    let page = body_text(ctx.get("/").await).await;
    assert!(page.contains("Butter Believer Croissant"));
    assert!(page.contains("$8.00"));
}

#[tokio::test]
async fn test_update_and_remove() {
    let ctx = TestContext::spawn().await;
    ctx.htmx_post("/cart/add", &[("product_id", "9")]).await;

    let resp = ctx
        .htmx_post("/cart/update", &[("product_id", "9"), ("quantity", "3")])
        .await;
    let totals = cart_updated(&resp);
    assert_eq!(totals["items"], 3);
    assert_eq!(totals["total"], "$84.00");

    let resp = ctx
        .htmx_post("/cart/update", &[("product_id", "9"), ("quantity", "0")])
        .await;
    assert_eq!(cart_updated(&resp)["items"], 0);
    assert!(body_text(resp).await.contains("Your cart is empty"));

    // Removing a line that is not there changes nothing, so no event fires.
    let resp = ctx.htmx_post("/cart/remove", &[("product_id", "9")]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("hx-trigger").is_none());
}

#[tokio::test]
async fn test_toggle_and_close() {
    let ctx = TestContext::spawn().await;

    let open = body_text(ctx.htmx_post("/cart/toggle", &[]).await).await;
    assert!(open.contains("Your cart is empty"));
    assert!(!open.contains("load delay"));

    let closed = body_text(ctx.htmx_post("/cart/toggle", &[]).await).await;
    assert!(!closed.contains("cart-dropdown"));

    ctx.htmx_get("/cart").await;
    let closed = body_text(ctx.htmx_post("/cart/close", &[]).await).await;
    assert!(closed.trim().is_empty());
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.htmx_post("/cart/add", &[("product_id", "999")]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let count = body_text(ctx.htmx_get("/cart/count").await).await;
    assert!(count.contains("is-empty"));
}

#[tokio::test]
async fn test_malformed_form_is_rejected() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.htmx_post("/cart/add", &[("product_id", "sourdough")]).await;
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_plain_post_redirects_back() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.plain_post("/cart/add", &[("product_id", "2")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/#products");

    let page = body_text(ctx.get("/").await).await;
    assert!(page.contains("Your Cart (1)"));
    assert!(page.contains("Crumb Queen Ciabatta"));
}

#[tokio::test]
async fn test_concurrent_adds_are_all_counted() {
    let ctx = TestContext::spawn().await;
    ctx.htmx_post("/cart/add", &[("product_id", "1")]).await;

    let mut adds = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let client = ctx.client.clone();
        let url = ctx.url("/cart/add");
        adds.spawn(async move {
            client
                .post(url)
                .header("HX-Request", "true")
                .form(&[("product_id", "1")])
                .send()
                .await
        });
    }
    while let Some(resp) = adds.join_next().await {
        assert_eq!(resp.unwrap().unwrap().status(), StatusCode::OK);
    }

    let count = body_text(ctx.htmx_get("/cart/count").await).await;
    assert!(count.contains(">9</span>"), "{count}");
}
