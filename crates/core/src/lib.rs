//! Levure Core - pure state machines and types for the bakery storefront.
//!
//! This crate holds everything the landing page mutates or derives, with no
//! I/O, no HTTP, and no templates:
//!
//! - [`cart`] - the visitor's cart store (add / remove / set quantity / totals)
//! - [`carousel`] - category carousel controller and its presentation tiers
//! - [`catalog`] - the validated, ordered menu of categories and products
//! - [`page`] - the single per-visitor [`PageState`] and its event reducer
//! - [`types`] - newtype IDs, decimal prices, and the accent style table
//!
//! The storefront crate owns rendering and sessions; it only calls into the
//! operations exposed here.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carousel;
pub mod cart;
pub mod catalog;
pub mod page;
pub mod types;

pub use carousel::{Carousel, CarouselError, CarouselItem, CarouselState, Indicator, Tier};
pub use cart::{Cart, CartLine, CartTotals, MAX_LINE_QUANTITY};
pub use catalog::{Availability, Catalog, CatalogError, Category, Product};
pub use page::{PageEvent, PageState, Transition};
pub use types::*;
