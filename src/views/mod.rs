//! Pure view models for the storefront page. Nothing here touches the network
//! or storage; the coordinator builds these from its state and a renderer
//! turns them into output.

pub mod cart;
pub mod format;
pub mod product;

use serde::Serialize;

use crate::application::commands::{CategoryFilter, Command};

pub use cart::{render_cart_panel, CartBody, CartPanel, CartRow};
pub use format::{Star, StarRating};
pub use product::{
    render_product_card, render_product_detail, render_product_grid, render_top_rated,
    ProductCard, ProductDetail,
};

/// A clickable control and the command it dispatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordance {
    pub label: String,
    pub command: Command,
}

impl Affordance {
    pub fn new(label: &str, command: Command) -> Self {
        Self {
            label: label.to_string(),
            command,
        }
    }
}

/// A page region whose content arrives asynchronously.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Section<T> {
    Loading,
    Ready(T),
    /// Loaded, but nothing to show.
    Empty(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryControl {
    pub label: String,
    pub filter: CategoryFilter,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBar {
    pub controls: Vec<CategoryControl>,
    /// Set when the category list could not be fetched.
    pub error: Option<String>,
}

/// Everything a renderer needs to draw the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub categories: CategoryBar,
    pub products_section_visible: bool,
    pub loading: bool,
    pub grid: Section<Vec<ProductCard>>,
    pub top_rated: Section<Vec<ProductCard>>,
    pub detail: Option<ProductDetail>,
    pub cart_badge: u64,
    pub cart_open: bool,
    pub cart: CartPanel,
    pub mobile_menu_open: bool,
}
