//! Wire records returned by the catalog API.

use rocket_shoes_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// A catalog product record, returned by `GET products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

/// Available stock for a product, returned by `GET stock/{id}`.
///
/// This is the authoritative upper bound for the product's cart quantity.
/// It is read fresh for every validation and never cached locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub id: ProductId,
    pub amount: u32,
}
