//! Category carousel and product overlay flows.

#![allow(clippy::unwrap_used)]

use levure_integration_tests::{TestContext, body_text};
use reqwest::StatusCode;

#[tokio::test]
async fn test_next_and_prev_wrap() {
    let ctx = TestContext::spawn().await;

    let section = body_text(ctx.htmx_post("/carousel/next", &[]).await).await;
    assert!(section.starts_with("<div id=\"category-carousel\""));
    assert!(section.contains("data-category=\"pastries\""));
    assert!(section.contains("Butter Believer Croissant"));

    ctx.htmx_post("/carousel/prev", &[]).await;
    let section = body_text(ctx.htmx_post("/carousel/prev", &[]).await).await;
    assert!(section.contains("data-category=\"cookies\""));
    assert!(section.contains("Chocolate Chunk"));
}

#[tokio::test]
async fn test_select_by_handle() {
    let ctx = TestContext::spawn().await;

    let section = body_text(ctx.htmx_post("/carousel/select", &[("handle", "cakes")]).await).await;
    assert!(section.contains("data-category=\"cakes\""));
    assert!(section.contains("Celebration Cakes"));

    let section = body_text(ctx.htmx_post("/carousel/select", &[("handle", "pies")]).await).await;
    assert!(section.contains("data-category=\"cakes\""));

    let page = body_text(ctx.get("/").await).await;
    assert!(page.contains("data-category=\"cakes\""));
}

#[tokio::test]
async fn test_hover_sets_and_clears() {
    let ctx = TestContext::spawn().await;

    let resp = ctx.htmx_post("/carousel/hover", &[("index", "2")]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("tier-hovered"));

    let section = body_text(ctx.htmx_post("/carousel/hover", &[]).await).await;
    assert!(!section.contains("tier-hovered"));

    let resp = ctx.htmx_post("/carousel/hover", &[("index", "left")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plain_carousel_post_redirects() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.plain_post("/carousel/next", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/#products");
}

#[tokio::test]
async fn test_product_overlay() {
    let ctx = TestContext::spawn().await;

    let resp = ctx.htmx_get("/products/7").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let overlay = body_text(resp).await;
    assert!(overlay.contains("Swirl Seeker Cinnamon Roll"));
    assert!(overlay.contains("$4.75"));

    let page = body_text(ctx.get("/").await).await;
    assert!(page.contains("product-overlay-card"));

    let closed = body_text(ctx.htmx_post("/products/close", &[]).await).await;
    assert!(closed.is_empty());
    let page = body_text(ctx.get("/").await).await;
    assert!(!page.contains("product-overlay-card"));

    assert_eq!(ctx.htmx_get("/products/404").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overlapping_posts_keep_every_change() {
    for _ in 0..8 {
        let ctx = TestContext::spawn().await;
        ctx.htmx_post("/carousel/hover", &[]).await;

        let (hover, select) = tokio::join!(
            ctx.htmx_post("/carousel/hover", &[("index", "3")]),
            ctx.htmx_post("/carousel/select", &[("handle", "sandwiches")]),
        );
        assert_eq!(hover.status(), StatusCode::OK);
        assert_eq!(select.status(), StatusCode::OK);

        let section = body_text(ctx.htmx_post("/carousel/next", &[]).await).await;
        assert!(section.contains("data-category=\"cookies\""));
    }
}
