//! Cart operation errors.

use rocket_shoes_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::slot::SlotError;

/// Errors surfaced by cart mutations.
///
/// Every variant is terminal for its single operation only: the store
/// stays usable afterwards and the persisted snapshot stays consistent,
/// because persistence only happens after a fully validated mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested amount exceeds the remotely available stock.
    #[error("requested amount for product {id} exceeds available stock ({available})")]
    StockExhausted { id: ProductId, available: u32 },

    /// The target product is absent from the cart.
    #[error("product {0} is not in the cart")]
    NotFound(ProductId),

    /// Remote catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart snapshot failed.
    #[error("slot error: {0}")]
    Slot(#[from] SlotError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NotFound(ProductId::new(5));
        assert_eq!(err.to_string(), "product 5 is not in the cart");

        let err = CartError::StockExhausted {
            id: ProductId::new(2),
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "requested amount for product 2 exceeds available stock (3)"
        );
    }

    #[test]
    fn test_catalog_error_converts() {
        let err: CartError = CatalogError::NotFound(ProductId::new(1)).into();
        assert!(matches!(err, CartError::Catalog(_)));
    }
}
