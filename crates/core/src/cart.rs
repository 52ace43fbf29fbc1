//! Shopping cart store.
//!
//! The cart is an ordered list of [`CartLine`]s, one per product. All
//! operations are total: unknown products are no-ops and out-of-range
//! quantities are normalized rather than rejected.
//!
//! ```text
//! add(p)            line exists ? qty += 1 : push(qty = 1)
//! remove(id)        drop line if present
//! set_quantity(n)   n < 1 ? remove : qty = min(n, MAX_LINE_QUANTITY)
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{CurrencyCode, Price, ProductId};

/// Upper bound for a single line's quantity.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// One product-with-quantity entry.
///
/// Name, image, and unit price are frozen when the product is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub unit_price: Price,
    quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Current quantity, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Snapshot of cart totals, handed to observers after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub items: u32,
    pub price: Price,
}

/// The visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`, creating its line on first add.
    ///
    /// Returns the new totals. A line already at [`MAX_LINE_QUANTITY`] is
    /// left unchanged.
    pub fn add(&mut self, product: &Product) -> CartTotals {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY),
            None => self.lines.push(CartLine::from_product(product)),
        }
        self.totals()
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line.
    ///
    /// `quantity < 1` removes the line; values above [`MAX_LINE_QUANTITY`]
    /// are clamped. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove(product_id);
        }

        let clamped = u32::try_from(quantity)
            .unwrap_or(MAX_LINE_QUANTITY)
            .min(MAX_LINE_QUANTITY);
        match self.line_mut(product_id) {
            Some(line) if line.quantity != clamped => {
                line.quantity = clamped;
                true
            }
            _ => false,
        }
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Sum of line totals. Display rounds to two decimals.
    #[must_use]
    pub fn total_price(&self) -> Price {
        let currency = self
            .lines
            .first()
            .map_or(CurrencyCode::default(), |line| line.unit_price.currency_code);
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Price::zero(currency), |acc, line| acc + line)
    }

    /// Items and price together.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            items: self.total_items(),
            price: self.total_price(),
        }
    }

    /// Lines in the order their products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    #[test]
    fn test_repeated_add_keeps_one_line() {
        let sourdough = product(1, "bread", 800);
        let mut cart = Cart::new();
        for expected in 1..=7 {
            let totals = cart.add(&sourdough);
            assert_eq!(totals.items, expected);
        }
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_items(), 7);
    }

    #[test]
    fn test_add_add_add_scenario() {
        let a = product(1, "bread", 800);
        let b = product(5, "pastries", 450);
        let mut cart = Cart::new();
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line(a.id).unwrap().quantity(), 2);
        assert_eq!(cart.line(b.id).unwrap().quantity(), 1);
        assert_eq!(cart.lines()[0].product_id, a.id);
    }

    #[test]
    fn test_total_price_rounds_to_cents() {
        let mut cart = Cart::new();
        let sourdough = product(1, "bread", 800);
        cart.add(&sourdough);
        cart.add(&sourdough);
        cart.add(&product(5, "pastries", 450));
        assert_eq!(cart.total_price().to_string(), "$20.50");
        assert_eq!(Cart::new().total_price().to_string(), "$0.00");
    }

    #[test]
    fn test_set_quantity_zero_removes_then_noops() {
        let sourdough = product(1, "bread", 800);
        let mut cart = Cart::new();
        cart.add(&sourdough);

        assert!(cart.set_quantity(sourdough.id, 0));
        assert!(cart.is_empty());
        assert!(!cart.set_quantity(sourdough.id, 3));
        assert!(!cart.remove(sourdough.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let sourdough = product(1, "bread", 800);
        let mut cart = Cart::new();
        cart.add(&sourdough);
        assert!(cart.set_quantity(sourdough.id, -4));
        assert!(cart.line(sourdough.id).is_none());
    }

    #[test]
    fn test_set_quantity_updates_and_clamps() {
        let sourdough = product(1, "bread", 800);
        let mut cart = Cart::new();
        cart.add(&sourdough);

        assert!(cart.set_quantity(sourdough.id, 4));
        assert_eq!(cart.total_items(), 4);
        assert!(!cart.set_quantity(sourdough.id, 4));

        assert!(cart.set_quantity(sourdough.id, i64::MAX));
        assert_eq!(cart.total_items(), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_add_saturates_at_max() {
        let sourdough = product(1, "bread", 800);
        let mut cart = Cart::new();
        cart.add(&sourdough);
        cart.set_quantity(sourdough.id, i64::from(MAX_LINE_QUANTITY));
        let totals = cart.add(&sourdough);
        assert_eq!(totals.items, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, "bread", 800));
        assert!(!cart.remove(ProductId::new(42)));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_line_freezes_product_snapshot() {
        let mut croissant = product(5, "pastries", 450);
        let mut cart = Cart::new();
        cart.add(&croissant);

        croissant.price = Price::from_cents(999);
        croissant.name = "Renamed".to_string();
        cart.add(&croissant);

        let line = cart.line(croissant.id).unwrap();
        assert_eq!(line.name, "Product 5");
        assert_eq!(line.line_total().to_string(), "$9.00");
    }

    #[test]
    fn test_cart_survives_serde() {
        let mut cart = Cart::new();
        cart.add(&product(1, "bread", 800));
        cart.add(&product(9, "cakes", 2800));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
