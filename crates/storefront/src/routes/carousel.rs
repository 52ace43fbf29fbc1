//! Category carousel route handlers.
//!
//! Each handler moves the visitor's carousel and re-renders the products
//! section: the positioned category cards, the pagination bar, and the
//! first few products of the active category.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use levure_core::{Carousel, CarouselItem, Catalog, PageEvent, PageState};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::products::ProductCardView;
use super::{back_to, dispatch, is_htmx};
use crate::content::Section;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Products shown under the active category.
pub const FEATURED_PRODUCTS: usize = 3;

/// One positioned category card.
#[derive(Clone)]
pub struct CarouselItemView {
    pub index: usize,
    pub handle: String,
    pub name: String,
    pub image: String,
    pub is_active: bool,
    pub tier_class: &'static str,
    pub ring_class: String,
    pub accent_text: &'static str,
    /// Custom properties the stylesheet turns into transform, opacity,
    /// stacking, size, and blur.
    pub style: String,
}

impl From<&CarouselItem<'_>> for CarouselItemView {
    fn from(item: &CarouselItem<'_>) -> Self {
        let tier = item.tier;
        let (width, height) = tier.card_size_px();
        Self {
            index: item.index,
            handle: item.category.handle.clone(),
            name: item.category.name.clone(),
            image: item.category.image.clone(),
            is_active: item.is_active(),
            tier_class: tier.css_class(),
            ring_class: item.ring_class(),
            accent_text: item.category.accent.style().text,
            style: format!(
                "--offset: {offset}px; --scale: {scale}; --opacity: {opacity}; --z: {z}; \
                 --width: {width}px; --height: {height}px; --blur: {blur}px;",
                offset = item.offset_px(),
                scale = tier.scale(),
                opacity = tier.opacity(),
                z = item.z_index(),
                blur = tier.blur_px(),
            ),
        }
    }
}

/// Carousel display data for templates.
#[derive(Clone)]
pub struct CarouselView {
    pub items: Vec<CarouselItemView>,
    pub active_name: String,
    pub active_description: String,
    pub active_handle: String,
    pub active_swatch: &'static str,
    /// Inline width and offset of the pagination bar.
    pub indicator_style: String,
}

impl From<&Carousel<'_>> for CarouselView {
    fn from(carousel: &Carousel<'_>) -> Self {
        let active = carousel.active_category();
        let indicator = carousel.indicator();
        Self {
            items: carousel.items().iter().map(CarouselItemView::from).collect(),
            active_name: active.name.clone(),
            active_description: active.description.clone(),
            active_handle: active.handle.clone(),
            active_swatch: active.accent.style().swatch,
            indicator_style: format!(
                "width: {:.2}%; left: {:.2}%;",
                indicator.width_pct, indicator.offset_pct
            ),
        }
    }
}

/// Products section fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/carousel.html")]
pub struct CarouselSectionTemplate {
    pub carousel: CarouselView,
    pub featured: Vec<ProductCardView>,
}

impl CarouselSectionTemplate {
    /// Render data for the visitor's carousel position.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the catalog has no categories.
    pub fn for_page(page: &PageState, catalog: &Catalog) -> Result<Self> {
        let carousel = page
            .carousel(catalog)
            .ok_or_else(|| AppError::Internal("catalog has no categories".to_string()))?;
        let featured = catalog
            .featured(&carousel.active_category().handle, FEATURED_PRODUCTS)
            .into_iter()
            .map(ProductCardView::from)
            .collect();
        Ok(Self {
            carousel: CarouselView::from(&carousel),
            featured,
        })
    }
}

/// Select category form data.
#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub handle: String,
}

/// Hover form data. A missing or empty index clears the hover.
#[derive(Debug, Deserialize)]
pub struct HoverForm {
    #[serde(default)]
    pub index: Option<String>,
}

impl HoverForm {
    fn index(&self) -> Result<Option<usize>> {
        match self.index.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::BadRequest(format!("invalid carousel index '{raw}'"))),
        }
    }
}

async fn move_carousel(
    state: &AppState,
    session: &Session,
    headers: &HeaderMap,
    event: PageEvent,
) -> Result<Response> {
    let (page, transition) = dispatch(state, session, event).await?;
    if transition.carousel_moved {
        tracing::debug!(
            active_index = page.carousel.active_index,
            hovered_index = ?page.carousel.hovered_index,
            "Carousel moved"
        );
    }

    if !is_htmx(headers) {
        return Ok(back_to(Section::Products));
    }
    Ok(CarouselSectionTemplate::for_page(&page, state.catalog())?.into_response())
}

/// Advance to the next category.
#[instrument(skip(state, session, headers))]
pub async fn next(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    move_carousel(&state, &session, &headers, PageEvent::NextCategory).await
}

/// Step back to the previous category.
#[instrument(skip(state, session, headers))]
pub async fn prev(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    move_carousel(&state, &session, &headers, PageEvent::PrevCategory).await
}

/// Jump to a category by handle. Unknown handles leave the carousel as is.
#[instrument(skip(state, session, headers))]
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<SelectForm>,
) -> Result<Response> {
    add_breadcrumb("carousel", "Selected category", Some(&[("handle", form.handle.as_str())]));
    move_carousel(&state, &session, &headers, PageEvent::SelectCategory(form.handle)).await
}

/// Set or clear the hovered category card.
#[instrument(skip(state, session, headers))]
pub async fn hover(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<HoverForm>,
) -> Result<Response> {
    let index = form.index()?;
    move_carousel(&state, &session, &headers, PageEvent::HoverCategory(index)).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use levure_core::{Accent, Category};

    use super::*;

    fn categories() -> Vec<Category> {
        ["bread", "pastries", "cakes"]
            .into_iter()
            .map(|handle| Category {
                handle: handle.to_string(),
                name: handle.to_uppercase(),
                description: String::new(),
                image: format!("/static/images/{handle}.png"),
                accent: Accent::Rose,
            })
            .collect()
    }

    #[test]
    fn test_view_positions_items() {
        let categories = categories();
        let mut carousel = Carousel::new(&categories).unwrap();
        carousel.next();
        let view = CarouselView::from(&carousel);

        assert_eq!(view.active_handle, "pastries");
        assert_eq!(view.items.len(), 3);
        assert!(view.items[1].is_active);
        assert!(view.items[0].style.contains("--offset: -300px;"));
        assert!(view.items[1].style.contains("--z: 20;"));
        assert!(view.items[1].style.contains("--width: 400px;"));
        assert!(view.items[1].style.contains("--blur: 0px;"));
        assert!(view.items[2].style.contains("--scale: 0.7;"));
        assert_eq!(view.items[1].ring_class, "ring ring-4 ring-rose-400");
        assert_eq!(view.indicator_style, "width: 33.33%; left: 33.33%;");
    }

    #[test]
    fn test_hover_form_parsing() {
        let form = |index: Option<&str>| HoverForm {
            index: index.map(String::from),
        };
        assert_eq!(form(None).index().unwrap(), None);
        assert_eq!(form(Some("")).index().unwrap(), None);
        assert_eq!(form(Some(" 2 ")).index().unwrap(), Some(2));
        assert!(matches!(
            form(Some("left")).index(),
            Err(AppError::BadRequest(_))
        ));
    }
}
