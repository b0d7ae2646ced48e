//! Cart line items.

use rocket_shoes_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One product entry in the cart with its requested quantity.
///
/// Uniquely keyed by `id` within the cart. Quantity changes produce a new
/// value via [`LineItem::with_amount`] rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    /// Requested quantity, always at least 1.
    pub amount: u32,
}

impl LineItem {
    /// First unit of a product entering the cart.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }

    /// Copy of this line with a different quantity.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// Price of the full line (`price * amount`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Tenis".to_string(),
            price: Price::new(Decimal::new(1799, 1)),
            image: "tenis1.jpg".to_string(),
        }
    }

    #[test]
    fn test_new_item_starts_at_one() {
        let item = LineItem::new(product());
        assert_eq!(item.amount, 1);
        assert_eq!(item.id, ProductId::new(1));
    }

    #[test]
    fn test_with_amount_preserves_other_fields() {
        let item = LineItem::new(product());
        let bumped = item.with_amount(4);
        assert_eq!(bumped.amount, 4);
        assert_eq!(bumped.title, item.title);
        assert_eq!(bumped.price, item.price);
        assert_eq!(bumped.image, item.image);
        // original untouched
        assert_eq!(item.amount, 1);
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new(product()).with_amount(2);
        assert_eq!(item.line_total().display(), "$359.80");
    }
}
