use serde::Serialize;

/// Which slice of the catalog the product grid shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    All,
    Named(String),
}

impl CategoryFilter {
    /// Only the exact literal `all` means every product, so a catalog
    /// category spelled `All` stays selectable.
    pub fn from_name(name: &str) -> Self {
        if name == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(name.to_string())
        }
    }
}

/// Every user interaction the page can raise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "arg", rename_all = "snake_case")]
pub enum Command {
    SelectCategory(CategoryFilter),
    ShowDetails(u64),
    CloseDetails,
    /// A click that landed outside the detail overlay's content.
    ClickOverlayBackdrop,
    AddToCart(u64),
    BuyNow(u64),
    IncrementQuantity(u64),
    DecrementQuantity(u64),
    RemoveFromCart(u64),
    OpenCart,
    CloseCart,
    ToggleMobileMenu,
    SubscribeNewsletter(String),
    /// In-page anchor such as `#products`.
    Navigate(String),
}

/// Transient feedback produced by a command, shown once and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum UiEvent {
    Notification(String),
    Alert(String),
    CheckoutRequested,
}
