//! Product route handlers.
//!
//! Products are shown as cards under the active carousel category and in a
//! detail overlay opened from those cards.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use levure_core::{Availability, PageEvent, Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use super::{back_to, dispatch, is_htmx};
use crate::content::Section;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub tag: Option<String>,
    pub availability: &'static str,
    pub availability_class: &'static str,
    pub notes: Vec<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            tag: product.tag.clone(),
            availability: product.availability.label(),
            availability_class: availability_class(product.availability),
            notes: product.notes.clone(),
        }
    }
}

const fn availability_class(availability: Availability) -> &'static str {
    match availability {
        Availability::FreshOut => "availability-fresh",
        Availability::Ready => "availability-ready",
        Availability::RisingSoon => "availability-rising",
    }
}

/// Product detail overlay fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: ProductCardView,
}

/// Open the detail overlay for a product.
#[instrument(skip(state, session, headers))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Response> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .product(id)
        .map(ProductCardView::from)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    add_breadcrumb("navigation", "Viewed product", Some(&[("name", product.name.as_str())]));
    dispatch(&state, &session, PageEvent::OpenProduct(id)).await?;

    if !is_htmx(&headers) {
        return Ok(back_to(Section::Products));
    }
    Ok(ProductDetailTemplate { product }.into_response())
}

/// Hide the detail overlay.
#[instrument(skip(state, session, headers))]
pub async fn close(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    dispatch(&state, &session, PageEvent::CloseProduct).await?;

    if !is_htmx(&headers) {
        return Ok(back_to(Section::Products));
    }
    Ok(Html("").into_response())
}
