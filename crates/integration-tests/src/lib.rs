//! Integration tests for RocketShoes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocket-shoes-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - End-to-end cart scenarios over substituted backends
//! - `slot_persistence` - File-backed slot behavior across restarts
//!
//! This crate's library provides the substituted backends: a scripted
//! catalog with adjustable stock, a notifier that records every event,
//! and a slot whose writes can be made to fail.

use std::collections::HashMap;
use std::io::Error as IoError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rocket_shoes_cart::{
    CatalogApi, CatalogError, Notification, Notifier, Product, SlotError, SlotStore, StockInfo,
};
use rocket_shoes_core::{Price, ProductId};
use rust_decimal::Decimal;

/// Catalog serving fixed product records with adjustable stock.
///
/// Stock can be changed mid-scenario to simulate other shoppers draining
/// it between operations. Stock reads are counted so tests can assert
/// that validation always goes back to the source.
#[derive(Default)]
pub struct ScriptedCatalog {
    products: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, u32>>,
    stock_reads: AtomicUsize,
}

impl ScriptedCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with its price (in cents) and starting stock.
    #[must_use]
    pub fn with_product(self, id: i32, title: &str, price_cents: i64, stock: u32) -> Self {
        let id = ProductId::new(id);
        lock(&self.products).insert(
            id,
            Product {
                id,
                title: title.to_string(),
                price: Price::new(Decimal::new(price_cents, 2)),
                image: format!("{title}.jpg"),
            },
        );
        lock(&self.stock).insert(id, stock);
        self
    }

    /// Change the remotely available stock for a product.
    pub fn set_stock(&self, id: i32, amount: u32) {
        lock(&self.stock).insert(ProductId::new(id), amount);
    }

    /// Number of stock lookups served so far.
    #[must_use]
    pub fn stock_reads(&self) -> usize {
        self.stock_reads.load(Ordering::SeqCst)
    }
}

impl CatalogApi for ScriptedCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        lock(&self.products)
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError> {
        self.stock_reads.fetch_add(1, Ordering::SeqCst);
        lock(&self.stock)
            .get(&id)
            .map(|&amount| StockInfo { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }
}

/// Notifier recording every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications emitted so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<Notification> {
        lock(&self.events).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        lock(&self.events).push(notification);
    }
}

/// Slot whose writes fail on demand; reads always succeed.
#[derive(Debug, Default)]
pub struct FlakySlot {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl FlakySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        *lock(&self.fail_writes) = fail;
    }
}

impl SlotStore for FlakySlot {
    async fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        if *lock(&self.fail_writes) {
            return Err(SlotError::Io(IoError::other("slot write refused")));
        }
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
