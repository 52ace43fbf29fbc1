//! Landing page handler.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use levure_core::PageState;
use tower_sessions::Session;
use tracing::instrument;

use super::carousel::{CarouselSectionTemplate, CarouselView};
use super::cart::CartView;
use super::products::ProductCardView;
use crate::content::{PageContent, Section};
use crate::error::Result;
use crate::filters;
use crate::middleware::{CspNonce, Viewport};
use crate::models::load_page;
use crate::state::AppState;

/// Thumbnails shown under the hero copy.
const HERO_THUMBNAILS: usize = 2;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nonce: String,
    /// Narrow viewport layout (< 768 px).
    pub narrow: bool,
    pub sections: &'static [Section],
    pub content: Arc<PageContent>,
    /// First products of the first category.
    pub hero_products: Vec<ProductCardView>,
    pub carousel: CarouselView,
    pub featured: Vec<ProductCardView>,
    pub cart: CartView,
    pub cart_open: bool,
    pub auto_close_ms: Option<u64>,
    pub cart_count: u32,
    /// Product in the detail overlay, if open.
    pub overlay: Option<ProductCardView>,
}

impl HomeTemplate {
    /// Assemble the page for one visitor.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the catalog has no categories.
    pub fn build(
        state: &AppState,
        page: &PageState,
        nonce: String,
        viewport: Viewport,
    ) -> Result<Self> {
        let catalog = state.catalog();
        let CarouselSectionTemplate { carousel, featured } =
            CarouselSectionTemplate::for_page(page, catalog)?;

        let hero_products = catalog
            .categories()
            .first()
            .map(|first| {
                catalog
                    .featured(&first.handle, HERO_THUMBNAILS)
                    .into_iter()
                    .map(ProductCardView::from)
                    .collect()
            })
            .unwrap_or_default();

        let overlay = page
            .selected_product
            .and_then(|id| catalog.product(id))
            .map(ProductCardView::from);

        Ok(Self {
            nonce,
            narrow: viewport.is_narrow(),
            sections: &Section::ALL,
            content: state.content().page_arc(),
            hero_products,
            carousel,
            featured,
            cart: CartView::from(&page.cart),
            cart_open: page.cart_open,
            auto_close_ms: None,
            cart_count: page.cart.total_items(),
            overlay,
        })
    }
}

/// Display the landing page.
#[instrument(skip(state, session, nonce))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
    viewport: Viewport,
) -> Result<HomeTemplate> {
    let page = load_page(&session).await;
    HomeTemplate::build(&state, &page, nonce, viewport)
}
