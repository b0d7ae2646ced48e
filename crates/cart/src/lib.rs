//! RocketShoes cart state container.
//!
//! # Architecture
//!
//! - [`store::CartStore`] holds the ordered cart and applies all mutations
//! - [`catalog`] talks to the remote catalog API (`products/{id}`, `stock/{id}`)
//! - [`slot`] persists the cart snapshot across restarts
//! - [`notify`] surfaces user-visible notifications on failures
//!
//! The store is constructed with injected collaborators, so tests (and
//! alternative front ends) substitute any of them. Quantity changes are
//! validated against a fresh stock read before they are admitted, and the
//! persisted snapshot is only overwritten after a fully validated mutation.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::{CartStore, HttpCatalog, JsonFileSlot, TracingNotifier};
//! use rocket_shoes_core::ProductId;
//!
//! let catalog = HttpCatalog::new("http://localhost:3333/");
//! let slot = JsonFileSlot::new(".rocketshoes");
//! let mut store = CartStore::open(catalog, slot, TracingNotifier).await;
//!
//! store.add_product(ProductId::new(1)).await?;
//! store.update_product_amount(ProductId::new(1), 3).await?;
//! println!("{}", store.total().display());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod error;
pub mod item;
pub mod notify;
pub mod slot;
pub mod store;

pub use catalog::{CatalogApi, CatalogError, HttpCatalog, Product, StockInfo};
pub use error::CartError;
pub use item::LineItem;
pub use notify::{Notification, Notifier, NullNotifier, TracingNotifier};
pub use slot::{CART_SLOT_KEY, JsonFileSlot, MemorySlot, SlotError, SlotStore};
pub use store::CartStore;
