//! Cart subcommands.
//!
//! # Usage
//!
//! ```bash
//! rocket-cli cart show
//! rocket-cli cart add 1
//! rocket-cli cart remove 1
//! rocket-cli cart set 1 3
//! ```

use rocket_shoes_cart::{
    CartError, CartStore, HttpCatalog, JsonFileSlot, Notification, Notifier,
};
use rocket_shoes_core::ProductId;

use crate::config::CliConfig;

/// Notifier printing user-facing messages to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    #[allow(clippy::print_stderr)]
    fn notify(&self, notification: Notification) {
        eprintln!("{notification}");
    }
}

type Store = CartStore<HttpCatalog, JsonFileSlot, ConsoleNotifier>;

async fn open_store(config: &CliConfig) -> Store {
    CartStore::open(
        HttpCatalog::new(config.api_url.clone()),
        JsonFileSlot::new(&config.data_dir),
        ConsoleNotifier,
    )
    .await
}

/// Print the cart contents and total.
#[allow(clippy::print_stdout)]
pub async fn show(config: &CliConfig) -> Result<(), CartError> {
    let store = open_store(config).await;

    if store.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }

    for item in store.items() {
        println!(
            "{:>4} x {:<40} {:>10} {:>12}",
            item.amount,
            item.title,
            item.price.display(),
            item.line_total().display()
        );
    }
    println!("Total: {}", store.total().display());

    Ok(())
}

/// Add one unit of a product to the cart.
pub async fn add(config: &CliConfig, product_id: ProductId) -> Result<(), CartError> {
    let mut store = open_store(config).await;
    store.add_product(product_id).await
}

/// Remove a product from the cart entirely.
pub async fn remove(config: &CliConfig, product_id: ProductId) -> Result<(), CartError> {
    let mut store = open_store(config).await;
    store.remove_product(product_id).await
}

/// Set a product's quantity.
pub async fn set(config: &CliConfig, product_id: ProductId, amount: i64) -> Result<(), CartError> {
    let mut store = open_store(config).await;
    store.update_product_amount(product_id, amount).await
}
