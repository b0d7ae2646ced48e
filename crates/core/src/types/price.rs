//! Type-safe price representation using decimal arithmetic.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store's single currency.
///
/// Serializes as a bare JSON number, matching both the catalog API
/// payloads and the persisted cart snapshot.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_display_pads_cents() {
        let price = Price::new(Decimal::new(1799, 1)); // 179.9
        assert_eq!(price.display(), "$179.90");
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Price::new(Decimal::new(1050, 2)); // 10.50
        let line = unit.times(3);
        assert_eq!(line, Price::new(Decimal::new(3150, 2)));

        let total: Price = [unit, line].into_iter().sum();
        assert_eq!(total, Price::new(Decimal::new(4200, 2)));
    }

    #[test]
    fn test_serde_as_number() {
        let price = Price::new(Decimal::new(1799, 1));
        let json = serde_json::to_string(&price).expect("serialize");
        assert_eq!(json, "179.9");
        let back: Price = serde_json::from_str("179.9").expect("deserialize");
        assert_eq!(back, price);
    }
}
