//! The bakery menu: an ordered list of categories and the products in them.
//!
//! A [`Catalog`] is built once at startup through [`Catalog::new`], which
//! checks the structural invariants the cart and carousel rely on. After
//! that it is read-only.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Accent, CurrencyCode, Price, ProductId};

/// Errors found while validating a catalog.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No categories were supplied.
    #[error("catalog must contain at least one category")]
    NoCategories,
    /// Two categories share a handle.
    #[error("duplicate category handle: {0}")]
    DuplicateCategory(String),
    /// Two products share an ID.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
    /// A product references a category that does not exist.
    #[error("product {product} references unknown category '{category}'")]
    UnknownCategory {
        /// The offending product.
        product: ProductId,
        /// The handle it referenced.
        category: String,
    },
    /// A product is priced in a different currency from the rest of the menu.
    #[error("product {product} is priced in {found:?}, menu currency is {expected:?}")]
    MixedCurrency {
        /// The offending product.
        product: ProductId,
        /// Currency of the first product on the menu.
        expected: CurrencyCode,
        /// Currency of the offending product.
        found: CurrencyCode,
    },
}

/// How soon a product comes out of the oven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    FreshOut,
    #[default]
    Ready,
    RisingSoon,
}

impl Availability {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FreshOut => "Fresh Out",
            Self::Ready => "Ready",
            Self::RisingSoon => "Rising Soon",
        }
    }
}

/// A carousel category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier (e.g. `bread`).
    pub handle: String,
    pub name: String,
    pub description: String,
    /// Image path relative to the static root.
    pub image: String,
    #[serde(default)]
    pub accent: Accent,
}

/// A product on the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    /// Handle of the owning category.
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    /// Optional badge such as "Bestseller" or "New".
    pub tag: Option<String>,
    pub availability: Availability,
    /// Short flavour notes shown on the product card.
    pub notes: Vec<String>,
}

/// Validated, ordered bakery menu.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, checking handle/id uniqueness, category references,
    /// and that the whole menu shares one currency (cart totals add prices).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the category list is empty, a handle or
    /// product id repeats, a product points at a missing category, or
    /// prices mix currencies.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }

        let mut handles = HashSet::new();
        for category in &categories {
            if !handles.insert(category.handle.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.handle.clone()));
            }
        }

        let currency = products.first().map(|p| p.price.currency_code);
        let mut ids = HashSet::new();
        for product in &products {
            if !ids.insert(product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
            if !handles.contains(product.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    product: product.id,
                    category: product.category.clone(),
                });
            }
            let found = product.price.currency_code;
            if let Some(expected) = currency.filter(|&expected| expected != found) {
                return Err(CatalogError::MixedCurrency {
                    product: product.id,
                    expected,
                    found,
                });
            }
        }

        Ok(Self {
            categories,
            products,
        })
    }

    /// Categories in carousel order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All products in menu order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a category by handle.
    #[must_use]
    pub fn category(&self, handle: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.handle == handle)
    }

    /// The first `limit` products of a category, in menu order.
    #[must_use]
    pub fn featured(&self, handle: &str, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == handle)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn category(handle: &str) -> Category {
        Category {
            handle: handle.to_string(),
            name: handle.to_uppercase(),
            description: format!("All about {handle}"),
            image: format!("/static/images/{handle}.png"),
            accent: Accent::Amber,
        }
    }

    pub fn product(id: i32, category: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            category: category.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents),
            image: format!("/static/images/{id}.png"),
            tag: None,
            availability: Availability::Ready,
            notes: Vec::new(),
        }
    }

    /// Five categories with a handful of products, shaped like the real menu.
    pub fn bakery() -> Catalog {
        let categories = ["bread", "pastries", "cakes", "sandwiches", "cookies"]
            .into_iter()
            .map(category)
            .collect();
        let products = vec![
            product(1, "bread", 800),
            product(2, "bread", 400),
            product(3, "bread", 700),
            product(4, "bread", 900),
            product(5, "pastries", 450),
            product(9, "cakes", 2800),
        ];
        match Catalog::new(categories, products) {
            Ok(catalog) => catalog,
            Err(e) => panic!("fixture catalog is invalid: {e}"),
        }
    }
}
