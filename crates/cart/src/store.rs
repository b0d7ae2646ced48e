//! The cart state container.
//!
//! `CartStore` owns the ordered cart, validates quantity changes against
//! fresh stock reads, persists every successful mutation to the slot, and
//! emits user-visible notifications on failures.

use rocket_shoes_core::{Price, ProductId};
use tracing::{instrument, warn};

use crate::catalog::CatalogApi;
use crate::error::CartError;
use crate::item::LineItem;
use crate::notify::{Notification, Notifier};
use crate::slot::{CART_SLOT_KEY, SlotError, SlotStore};

/// Shopping-cart state container.
///
/// Mutations take `&mut self`, so overlapping in-flight mutations are
/// unrepresentable and every read-modify-write of the cart is serialized
/// by construction. All mutations are copy-on-write: the replacement cart
/// is built, persisted, and only then committed to memory, so the slot
/// and the in-memory state never diverge once a mutation completes.
pub struct CartStore<C, S, N> {
    catalog: C,
    slot: S,
    notifier: N,
    cart: Vec<LineItem>,
}

impl<C: CatalogApi, S: SlotStore, N: Notifier> CartStore<C, S, N> {
    /// Open a store over the persisted slot.
    ///
    /// The slot is read once; an absent, unreadable, or unparseable
    /// snapshot starts an empty cart (with a warning for the latter two).
    pub async fn open(catalog: C, slot: S, notifier: N) -> Self {
        let cart = match slot.read(CART_SLOT_KEY).await {
            Ok(Some(snapshot)) => match serde_json::from_str(&snapshot) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(error = %e, "Discarding unparseable cart snapshot");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read cart snapshot");
                Vec::new()
            }
        };

        Self {
            catalog,
            slot,
            notifier,
            cart,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Current cart contents, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.cart
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.iter().map(LineItem::line_total).sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product_id` to the cart.
    ///
    /// A product not yet in the cart enters with amount 1; an existing
    /// line is incremented by 1. The requested quantity is validated
    /// against a fresh stock read first.
    ///
    /// # Errors
    ///
    /// Returns an error (and emits a notification) if the stock is
    /// exhausted, the product has no catalog record, a remote call fails,
    /// or the snapshot cannot be persisted. The cart is left in its prior
    /// state on every error path.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        match self.try_add(product_id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.notifier.notify(match &e {
                    CartError::StockExhausted { .. } => Notification::OutOfStock,
                    _ => Notification::AddFailed,
                });
                Err(e)
            }
        }
    }

    /// Remove `product_id` from the cart entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] (and emits a notification) if the
    /// product is not in the cart; the remaining items keep their
    /// relative order.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        match self.try_remove(product_id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.notifier.notify(Notification::RemoveFailed);
                Err(e)
            }
        }
    }

    /// Set the quantity of `product_id` to `amount`.
    ///
    /// Amounts of zero or less are ignored without error or notification.
    /// A product not in the cart also leaves the cart unchanged without
    /// error (unlike [`remove_product`](Self::remove_product), which
    /// reports the miss).
    ///
    /// # Errors
    ///
    /// Returns an error (and emits a notification) if the amount exceeds
    /// the available stock, the stock lookup fails, or the snapshot
    /// cannot be persisted. The cart is left unchanged on every error
    /// path.
    #[instrument(skip(self), fields(product_id = %product_id, amount))]
    pub async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        let Ok(amount) = u32::try_from(amount) else {
            return Ok(());
        };
        if amount == 0 {
            return Ok(());
        }

        match self.try_update(product_id, amount).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.notifier.notify(match &e {
                    CartError::StockExhausted { .. } => Notification::OutOfStock,
                    _ => Notification::UpdateFailed,
                });
                Err(e)
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn find(&self, product_id: ProductId) -> Option<&LineItem> {
        self.cart.iter().find(|item| item.id == product_id)
    }

    async fn try_add(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let stock = self.catalog.stock(product_id).await?;

        if let Some(item) = self.find(product_id)
            && item.amount >= stock.amount
        {
            return Err(CartError::StockExhausted {
                id: product_id,
                available: stock.amount,
            });
        }

        let product = self.catalog.product(product_id).await?;

        let next = if self.find(product_id).is_some() {
            self.cart
                .iter()
                .map(|item| {
                    if item.id == product_id {
                        item.with_amount(item.amount + 1)
                    } else {
                        item.clone()
                    }
                })
                .collect()
        } else {
            let mut next = self.cart.clone();
            next.push(LineItem::new(product));
            next
        };

        self.commit(next).await
    }

    async fn try_remove(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if self.find(product_id).is_none() {
            return Err(CartError::NotFound(product_id));
        }

        let next = self
            .cart
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();

        self.commit(next).await
    }

    async fn try_update(&mut self, product_id: ProductId, amount: u32) -> Result<(), CartError> {
        let stock = self.catalog.stock(product_id).await?;

        if amount > stock.amount {
            return Err(CartError::StockExhausted {
                id: product_id,
                available: stock.amount,
            });
        }

        let next = self
            .cart
            .iter()
            .map(|item| {
                if item.id == product_id {
                    item.with_amount(amount)
                } else {
                    item.clone()
                }
            })
            .collect();

        self.commit(next).await
    }

    /// Persist `next`, then adopt it as the in-memory cart.
    ///
    /// Ordering matters: a failed slot write leaves both the slot and the
    /// in-memory cart on the previous snapshot.
    async fn commit(&mut self, next: Vec<LineItem>) -> Result<(), CartError> {
        let snapshot = serde_json::to_string(&next).map_err(SlotError::from)?;
        self.slot.write(CART_SLOT_KEY, &snapshot).await?;
        self.cart = next;
        Ok(())
    }
}
