pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;
pub mod render;
pub mod views;

use application::cart_store::CartStore;
use application::storefront::{FetchedReceiver, Storefront};
use config::AppConfig;
use infrastructure::catalog_client::HttpCatalogClient;
use infrastructure::storage::FileStorage;

pub use application::commands::{CategoryFilter, Command, UiEvent};
pub use errors::{AppError, Result};

pub type AppStorefront = Storefront<HttpCatalogClient, FileStorage>;

/// Wire the HTTP catalog client and file-backed cart store described by
/// `config` into a coordinator. The saved cart is loaded immediately; catalog
/// data is fetched by [`Storefront::start`] and arrives on the returned
/// receiver.
pub fn build_storefront(config: &AppConfig) -> Result<(AppStorefront, FetchedReceiver)> {
    let catalog = HttpCatalogClient::new(&config.catalog_api_url, config.catalog_timeout)?;
    let cart = CartStore::load(
        FileStorage::new(config.data_dir.clone()),
        config.cart_storage_key.clone(),
    );
    Ok(Storefront::new(catalog, cart))
}
