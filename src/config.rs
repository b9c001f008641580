use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenvy::dotenv;

use crate::errors::{AppError, Result};

pub const DEFAULT_CATALOG_API_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_DATA_DIR: &str = ".storefront";
pub const DEFAULT_CART_STORAGE_KEY: &str = "swiftcart_cart";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub catalog_api_url: String,
    pub data_dir: PathBuf,
    pub cart_storage_key: String,
    /// `None` leaves catalog requests without a deadline.
    pub catalog_timeout: Option<Duration>,
}

impl AppConfig {
    /// Reads the process environment after loading an optional `.env` file.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let config = Self::from_lookup(|name| env::var(name).ok())?;
        log::info!("Configuration loaded (catalog: {})", config.catalog_api_url);
        Ok(config)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let catalog_api_url = get("CATALOG_API_URL")
            .unwrap_or_else(|| DEFAULT_CATALOG_API_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !(catalog_api_url.starts_with("http://") || catalog_api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "CATALOG_API_URL must be an http(s) URL, got '{}'",
                catalog_api_url
            )));
        }

        let data_dir = PathBuf::from(
            get("STOREFRONT_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );
        let cart_storage_key =
            get("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_CART_STORAGE_KEY.to_string());

        let catalog_timeout = get("CATALOG_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| {
                        AppError::Config(format!("Invalid CATALOG_TIMEOUT_SECS '{}': {}", raw, e))
                    })
            })
            .transpose()?;

        Ok(Self {
            catalog_api_url,
            data_dir,
            cart_storage_key,
            catalog_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).expect("defaults are valid");

        assert_eq!(config.catalog_api_url, "https://fakestoreapi.com");
        assert_eq!(config.data_dir, PathBuf::from(".storefront"));
        assert_eq!(config.cart_storage_key, "swiftcart_cart");
        assert_eq!(config.catalog_timeout, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("CATALOG_API_URL", "http://localhost:9000/"),
            ("STOREFRONT_DATA_DIR", "/tmp/shop"),
            ("CART_STORAGE_KEY", "cart_v2"),
            ("CATALOG_TIMEOUT_SECS", "15"),
        ])
        .expect("valid config");

        assert_eq!(config.catalog_api_url, "http://localhost:9000");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.cart_storage_key, "cart_v2");
        assert_eq!(config.catalog_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn rejects_non_http_catalog_url() {
        let err = load(&[("CATALOG_API_URL", "ftp://example.com")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = load(&[("CATALOG_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("CATALOG_TIMEOUT_SECS"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("CART_STORAGE_KEY", "  ")]).expect("valid config");
        assert_eq!(config.cart_storage_key, "swiftcart_cart");
    }
}
