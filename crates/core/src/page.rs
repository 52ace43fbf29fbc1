//! Page-level controller state.
//!
//! Everything a visitor can change on the landing page lives in one owned
//! [`PageState`], mutated by one [`PageEvent`] at a time through
//! [`PageState::apply`]. The storefront loads it from the session, applies
//! the event of the current request, and stores it back.

use serde::{Deserialize, Serialize};

use crate::carousel::{Carousel, CarouselState};
use crate::cart::{Cart, CartTotals};
use crate::catalog::Catalog;
use crate::types::ProductId;

/// A single UI interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
    SetQuantity(ProductId, i64),
    NextCategory,
    PrevCategory,
    SelectCategory(String),
    HoverCategory(Option<usize>),
    OpenProduct(ProductId),
    CloseProduct,
    OpenCart,
    CloseCart,
    ToggleCart,
}

/// What an event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    /// New cart totals, present only when the cart changed.
    pub cart: Option<CartTotals>,
    /// Whether the active or hovered carousel item changed.
    pub carousel_moved: bool,
}

/// Per-visitor landing page state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    #[serde(default)]
    pub cart: Cart,
    #[serde(default)]
    pub carousel: CarouselState,
    /// Whether the cart preview panel is showing.
    #[serde(default)]
    pub cart_open: bool,
    /// Product shown in the detail overlay.
    #[serde(default)]
    pub selected_product: Option<ProductId>,
}

impl PageState {
    /// Apply one event against the catalog.
    ///
    /// Events naming unknown products or categories change nothing.
    pub fn apply(&mut self, event: PageEvent, catalog: &Catalog) -> Transition {
        match event {
            PageEvent::AddToCart(id) => {
                let Some(product) = catalog.product(id) else {
                    return Transition::default();
                };
                let totals = self.cart.add(product);
                self.cart_open = true;
                self.selected_product = None;
                Transition {
                    cart: Some(totals),
                    carousel_moved: false,
                }
            }
            PageEvent::RemoveFromCart(id) => {
                let changed = self.cart.remove(id);
                self.cart_changed(changed)
            }
            PageEvent::SetQuantity(id, quantity) => {
                let changed = self.cart.set_quantity(id, quantity);
                self.cart_changed(changed)
            }
            PageEvent::NextCategory => self.move_carousel(catalog, |c| {
                c.next();
            }),
            PageEvent::PrevCategory => self.move_carousel(catalog, |c| {
                c.prev();
            }),
            PageEvent::SelectCategory(handle) => self.move_carousel(catalog, |c| {
                c.select(&handle);
            }),
            PageEvent::HoverCategory(index) => self.move_carousel(catalog, |c| c.hover(index)),
            PageEvent::OpenProduct(id) => {
                if catalog.product(id).is_some() {
                    self.selected_product = Some(id);
                }
                Transition::default()
            }
            PageEvent::CloseProduct => {
                self.selected_product = None;
                Transition::default()
            }
            PageEvent::OpenCart => {
                self.cart_open = true;
                Transition::default()
            }
            PageEvent::CloseCart => {
                self.cart_open = false;
                Transition::default()
            }
            PageEvent::ToggleCart => {
                self.cart_open = !self.cart_open;
                Transition::default()
            }
        }
    }

    /// Carousel controller over the catalog's categories.
    ///
    /// Returns `None` only for a catalog without categories, which
    /// `Catalog::new` refuses to build.
    #[must_use]
    pub fn carousel<'a>(&self, catalog: &'a Catalog) -> Option<Carousel<'a>> {
        Carousel::restore(catalog.categories(), self.carousel).ok()
    }

    fn cart_changed(&self, changed: bool) -> Transition {
        Transition {
            cart: changed.then(|| self.cart.totals()),
            carousel_moved: false,
        }
    }

    fn move_carousel(
        &mut self,
        catalog: &Catalog,
        step: impl FnOnce(&mut Carousel<'_>),
    ) -> Transition {
        let Some(mut carousel) = self.carousel(catalog) else {
            return Transition::default();
        };
        let before = carousel.state();
        step(&mut carousel);
        self.carousel = carousel.state();
        Transition {
            cart: None,
            carousel_moved: before != self.carousel,
        }
    }
}
