//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page (state from session)
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Open the cart preview (cart_panel fragment)
//! POST /cart/add               - Add one unit (cart_panel, triggers cart-updated)
//! POST /cart/update            - Set quantity (cart_panel, triggers cart-updated)
//! POST /cart/remove            - Remove line (cart_panel, triggers cart-updated)
//! POST /cart/toggle            - Flip preview visibility (cart_panel)
//! POST /cart/close             - Hide preview (cart_panel)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Carousel (HTMX fragments)
//! POST /carousel/next          - Next category (carousel_section)
//! POST /carousel/prev          - Previous category (carousel_section)
//! POST /carousel/select        - Jump to a category handle (carousel_section)
//! POST /carousel/hover         - Set or clear hovered item (carousel_section)
//!
//! # Products
//! GET  /products/{id}          - Detail overlay (fragment)
//! POST /products/close         - Hide overlay
//! ```
//!
//! Every mutating route answers plain (non-HTMX) requests with a
//! `303 See Other` back to the page anchor.

pub mod carousel;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use levure_core::{PageEvent, PageState, Transition};
use tower_sessions::Session;

use crate::content::Section;
use crate::error::Result;
use crate::models::{load_page, save_page};
use crate::state::AppState;

/// Header HTMX sets on every request it issues.
pub const HX_REQUEST: &str = "hx-request";

/// Header carrying client-side events to fire after a swap.
pub const HX_TRIGGER: &str = "HX-Trigger";

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/toggle", post(cart::toggle))
        .route("/close", post(cart::close))
        .route("/count", get(cart::count))
}

/// Create the carousel routes router.
pub fn carousel_routes() -> Router<AppState> {
    Router::new()
        .route("/next", post(carousel::next))
        .route("/prev", post(carousel::prev))
        .route("/select", post(carousel::select))
        .route("/hover", post(carousel::hover))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/close", post(products::close))
        .route("/{id}", get(products::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .nest("/carousel", carousel_routes())
        .nest("/products", product_routes())
}

/// Whether the request was issued by HTMX.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Redirect a plain form post back to a page section.
#[must_use]
pub fn back_to(section: Section) -> Response {
    Redirect::to(&section.href()).into_response()
}

/// Load the visitor's page state, apply one event, and store it back.
///
/// Runs under the session lock layer, so no other request from the same
/// visitor reads the state between the load and the write.
pub(crate) async fn dispatch(
    state: &AppState,
    session: &Session,
    event: PageEvent,
) -> Result<(PageState, Transition)> {
    let mut page = load_page(session).await;
    let transition = page.apply(event, state.catalog());
    save_page(session, &page).await?;
    Ok((page, transition))
}
