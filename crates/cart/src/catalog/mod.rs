//! Catalog API client.
//!
//! The remote catalog is a plain REST API with two read endpoints:
//! `GET products/{id}` and `GET stock/{id}`. Product records change
//! rarely and are cached via `moka` (5-minute TTL); stock is the
//! authoritative bound for quantity validation and always bypasses the
//! cache.

mod types;

pub use types::{Product, StockInfo};

use std::time::Duration;

use moka::future::Cache;
use rocket_shoes_core::ProductId;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No catalog record for the product.
    #[error("No catalog record for product {0}")]
    NotFound(ProductId),

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Read access to the remote catalog.
///
/// The store is generic over this trait so tests substitute a scripted
/// catalog for the HTTP one.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// Fetch the product record for `id`.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the currently available stock for `id`.
    ///
    /// Implementations must return the remote's current number; serving a
    /// stale value would let the cart exceed real stock.
    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError>;
}

impl<T: CatalogApi> CatalogApi for std::sync::Arc<T> {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        (**self).product(id).await
    }

    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError> {
        (**self).stock(id).await
    }
}

/// Client for the RocketShoes catalog API.
#[derive(Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
    products: Cache<ProductId, Product>,
}

impl HttpCatalog {
    /// Create a new catalog client for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            client: reqwest::Client::new(),
            base_url,
            products,
        }
    }

    /// Execute a GET against `{base_url}{path}/{id}` and decode the body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = format!("{}{path}/{id}", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.products.invalidate(&id).await;
    }
}

impl CatalogApi for HttpCatalog {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.products.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self.get_json("products", id).await?;

        self.products.insert(id, product.clone()).await;

        Ok(product)
    }

    // Stock deliberately skips the cache: it is checked at mutation time
    // against the remote's current numbers.
    #[instrument(skip(self), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<StockInfo, CatalogError> {
        self.get_json("stock", id).await
    }
}
