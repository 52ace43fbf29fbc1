//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's [`PageState`]; every mutation
//! answers with the re-rendered cart panel and, when totals changed, an
//! `HX-Trigger: cart-updated` event carrying them.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Response},
};
use levure_core::{Cart, CartLine, CartTotals, PageEvent, PageState, ProductId, Transition};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{HX_TRIGGER, back_to, dispatch, is_htmx};
use crate::content::Section;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::load_page;
use crate::state::AppState;

/// Client-side event fired whenever cart totals change.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// Quantity the minus button submits; zero removes the line.
    pub decrement: u32,
    pub increment: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let quantity = line.quantity();
        Self {
            product_id: line.product_id.as_i32(),
            name: line.name.clone(),
            image: line.image.clone(),
            quantity,
            decrement: quantity.saturating_sub(1),
            increment: quantity.saturating_add(1),
            price: line.unit_price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: totals.price.to_string(),
            item_count: totals.items,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart preview panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
    pub cart_open: bool,
    /// When set, the panel schedules its own close after this many ms.
    pub auto_close_ms: Option<u64>,
}

impl CartPanelTemplate {
    #[must_use]
    pub fn new(page: &PageState, auto_close_ms: Option<u64>) -> Self {
        Self {
            cart: CartView::from(&page.cart),
            cart_open: page.cart_open,
            auto_close_ms: auto_close_ms.filter(|_| page.cart_open),
        }
    }
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart_count: u32,
}

/// `HX-Trigger` value announcing new totals.
#[must_use]
pub fn cart_updated_trigger(totals: CartTotals) -> String {
    serde_json::json!({
        CART_UPDATED_EVENT: {
            "items": totals.items,
            "total": totals.price.to_string(),
        }
    })
    .to_string()
}

/// Render the panel, attaching the trigger when the cart changed.
fn panel_response(
    headers: &HeaderMap,
    page: &PageState,
    transition: Transition,
    auto_close_ms: Option<u64>,
    fallback: Section,
) -> Response {
    if !is_htmx(headers) {
        return back_to(fallback);
    }

    let panel = CartPanelTemplate::new(page, auto_close_ms);
    match transition.cart {
        Some(totals) => (
            AppendHeaders([(HX_TRIGGER, cart_updated_trigger(totals))]),
            panel,
        )
            .into_response(),
        None => panel.into_response(),
    }
}

/// Open the cart preview.
#[instrument(skip(state, session, headers))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let (page, transition) = dispatch(&state, &session, PageEvent::OpenCart).await?;
    Ok(panel_response(&headers, &page, transition, None, Section::Hero))
}

/// Add one unit of a product (HTMX).
///
/// Opens the cart preview and schedules it to close again after the
/// configured delay.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .product(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let id_str = id.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", id_str.as_str()), ("name", product.name.as_str())]),
    );

    let (page, transition) = dispatch(&state, &session, PageEvent::AddToCart(id)).await?;
    if let Some(totals) = transition.cart {
        tracing::info!(
            product_id = %id,
            items = totals.items,
            total = %totals.price,
            "Added to cart"
        );
    }

    Ok(panel_response(
        &headers,
        &page,
        transition,
        Some(state.config().cart_preview_ms),
        Section::Products,
    ))
}

/// Set a line's quantity (HTMX). Quantities below one remove the line.
#[instrument(skip(state, session, headers))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let (page, transition) =
        dispatch(&state, &session, PageEvent::SetQuantity(id, form.quantity)).await?;
    if transition.cart.is_some() {
        let id_str = id.to_string();
        let quantity = form.quantity.to_string();
        add_breadcrumb(
            "cart",
            "Updated quantity",
            Some(&[("product_id", id_str.as_str()), ("quantity", quantity.as_str())]),
        );
    }
    Ok(panel_response(&headers, &page, transition, None, Section::Hero))
}

/// Remove a line (HTMX).
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let (page, transition) = dispatch(&state, &session, PageEvent::RemoveFromCart(id)).await?;
    if transition.cart.is_some() {
        let id_str = id.to_string();
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id_str.as_str())]));
    }
    Ok(panel_response(&headers, &page, transition, None, Section::Hero))
}

/// Flip the cart preview open or closed (the header cart button).
#[instrument(skip(state, session, headers))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let (page, transition) = dispatch(&state, &session, PageEvent::ToggleCart).await?;
    Ok(panel_response(&headers, &page, transition, None, Section::Hero))
}

/// Hide the cart preview (close button and the auto-close timer).
#[instrument(skip(state, session, headers))]
pub async fn close(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let (page, transition) = dispatch(&state, &session, PageEvent::CloseCart).await?;
    Ok(panel_response(&headers, &page, transition, None, Section::Hero))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let page = load_page(&session).await;
    CartCountTemplate {
        cart_count: page.cart.total_items(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use levure_core::Price;

    use super::*;

    #[test]
    fn test_trigger_carries_totals() {
        let trigger = cart_updated_trigger(CartTotals {
            items: 3,
            price: Price::from_cents(2050),
        });
        let value: serde_json::Value = serde_json::from_str(&trigger).unwrap();
        assert_eq!(value[CART_UPDATED_EVENT]["items"], 3);
        assert_eq!(value[CART_UPDATED_EVENT]["total"], "$20.50");
    }

    #[test]
    fn test_closed_panel_never_schedules_close() {
        let page = PageState::default();
        let panel = CartPanelTemplate::new(&page, Some(2000));
        assert!(!panel.cart_open);
        assert_eq!(panel.auto_close_ms, None);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.item_count, 0);
    }
}
