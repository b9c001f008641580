use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::cart::QuantityChange;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CatalogGateway, KeyValueStore};
use crate::domain::product::Product;
use crate::views::format::capitalize_first_letter;
use crate::views::product::{select_top_rated, TOP_RATED_COUNT};
use crate::views::{
    render_cart_panel, render_product_detail, render_product_grid, render_top_rated, CategoryBar,
    CategoryControl, PageView, Section,
};

use super::cart_store::CartStore;
use super::commands::{CategoryFilter, Command, UiEvent};

pub const PRODUCTS_ERROR: &str = "Error loading products. Please try again later.";
pub const CATEGORIES_ERROR: &str = "Error loading categories.";
pub const TOP_RATED_ERROR: &str = "Error loading top rated products.";
pub const DETAILS_ERROR: &str = "Error loading product details. Please try again.";
pub const ADDED_TO_CART: &str = "Product added to cart!";
pub const CHECKOUT_MESSAGE: &str = "Proceeding to checkout...";
pub const EMPTY_EMAIL_MESSAGE: &str = "Please enter an email address.";
pub const ALL_PRODUCTS_LABEL: &str = "All Products";

/// Page state owned by the coordinator.
#[derive(Debug, Clone)]
struct AppState {
    /// Full catalog from the startup load; backs "all" and add-to-cart lookups.
    all_products: Vec<Product>,
    categories: Vec<String>,
    categories_error: Option<String>,
    current_category: CategoryFilter,
    grid: Section<Vec<Product>>,
    top_rated: Section<Vec<Product>>,
    loading: bool,
    detail: Option<Product>,
    cart_open: bool,
    mobile_menu_open: bool,
    products_section_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            all_products: Vec::new(),
            categories: Vec::new(),
            categories_error: None,
            current_category: CategoryFilter::All,
            grid: Section::Loading,
            top_rated: Section::Loading,
            loading: false,
            detail: None,
            cart_open: false,
            mobile_menu_open: false,
            products_section_visible: true,
        }
    }
}

/// A catalog response on its way back to the coordinator.
#[derive(Debug)]
pub enum Fetched {
    Categories(Result<Vec<String>, DomainError>),
    Products(Result<Vec<Product>, DomainError>),
    TopRated(Result<Vec<Product>, DomainError>),
    Category(String, Result<Vec<Product>, DomainError>),
    Details(u64, Result<Product, DomainError>),
}

pub type FetchedReceiver = mpsc::UnboundedReceiver<Fetched>;

/// Orchestrates the catalog, the cart store and the view builders.
///
/// Catalog calls run as spawned tasks and report back through the
/// [`FetchedReceiver`] handed out by [`Storefront::new`]; the owner feeds each
/// response to [`Storefront::apply`]. Commands never wait on the network, and
/// responses are applied in the order they resolve.
pub struct Storefront<C, S> {
    catalog: Arc<C>,
    cart: CartStore<S>,
    state: AppState,
    fetched_tx: mpsc::UnboundedSender<Fetched>,
    in_flight: usize,
    grid_fetches: usize,
}

impl<C: CatalogGateway, S: KeyValueStore> Storefront<C, S> {
    pub fn new(catalog: C, cart: CartStore<S>) -> (Self, FetchedReceiver) {
        let (fetched_tx, fetched_rx) = mpsc::unbounded_channel();
        let storefront = Self {
            catalog: Arc::new(catalog),
            cart,
            state: AppState::default(),
            fetched_tx,
            in_flight: 0,
            grid_fetches: 0,
        };
        (storefront, fetched_rx)
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Catalog requests issued but not yet applied.
    pub fn pending_fetches(&self) -> usize {
        self.in_flight
    }

    /// Startup sequence. Each load degrades its own panel on failure.
    pub fn start(&mut self) {
        log::info!("Loading storefront");
        self.load_categories();
        self.load_products();
        self.load_top_rated();
    }

    fn load_categories(&mut self) {
        self.spawn_fetch(|catalog| async move {
            Fetched::Categories(catalog.list_categories().await)
        });
    }

    fn load_products(&mut self) {
        self.begin_grid_fetch();
        self.spawn_fetch(|catalog| async move { Fetched::Products(catalog.list_products().await) });
    }

    /// Fetches the full list again and ranks it independently of the cache.
    fn load_top_rated(&mut self) {
        self.spawn_fetch(|catalog| async move { Fetched::TopRated(catalog.list_products().await) });
    }

    /// Names missing from the loaded category list are ignored, so exactly
    /// one category control stays active.
    pub fn select_category(&mut self, filter: CategoryFilter) {
        if let CategoryFilter::Named(name) = &filter {
            if !self.state.categories.contains(name) {
                log::warn!("Ignoring unknown category '{}'", name);
                return;
            }
        }
        self.state.current_category = filter.clone();
        match filter {
            CategoryFilter::All => {
                self.state.grid = Section::Ready(self.state.all_products.clone());
            }
            CategoryFilter::Named(category) => {
                self.begin_grid_fetch();
                self.spawn_fetch(move |catalog| async move {
                    let result = catalog.list_products_by_category(&category).await;
                    Fetched::Category(category, result)
                });
            }
        }
    }

    /// Always a fresh fetch, even when the product is already cached.
    pub fn show_details(&mut self, product_id: u64) {
        self.spawn_fetch(move |catalog| async move {
            Fetched::Details(product_id, catalog.get_product(product_id).await)
        });
    }

    /// Folds one catalog response into the page state.
    pub fn apply(&mut self, fetched: Fetched) -> Vec<UiEvent> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match fetched {
            Fetched::Categories(Ok(categories)) => {
                log::debug!("Loaded {} categories", categories.len());
                self.state.categories = categories;
                self.state.categories_error = None;
            }
            Fetched::Categories(Err(e)) => {
                log::error!("Error loading categories: {}", e);
                self.state.categories_error = Some(CATEGORIES_ERROR.to_string());
            }
            Fetched::Products(result) => {
                self.end_grid_fetch();
                let showing_all = self.state.current_category == CategoryFilter::All;
                match result {
                    Ok(products) => {
                        log::debug!("Loaded {} products", products.len());
                        if showing_all {
                            self.state.grid = Section::Ready(products.clone());
                        }
                        self.state.all_products = products;
                    }
                    Err(e) => {
                        log::error!("Error loading products: {}", e);
                        if showing_all {
                            self.state.grid = Section::Failed(PRODUCTS_ERROR.to_string());
                        }
                    }
                }
            }
            Fetched::TopRated(Ok(products)) => {
                let top = select_top_rated(&products, TOP_RATED_COUNT)
                    .into_iter()
                    .cloned()
                    .collect();
                self.state.top_rated = Section::Ready(top);
            }
            Fetched::TopRated(Err(e)) => {
                log::error!("Error loading top rated products: {}", e);
                self.state.top_rated = Section::Failed(TOP_RATED_ERROR.to_string());
            }
            Fetched::Category(category, result) => {
                self.end_grid_fetch();
                let selected = &self.state.current_category;
                if !matches!(selected, CategoryFilter::Named(c) if *c == category) {
                    log::debug!("Discarding products for '{}': no longer selected", category);
                    return Vec::new();
                }
                match result {
                    Ok(products) => {
                        log::debug!("Loaded {} products in '{}'", products.len(), category);
                        self.state.grid = Section::Ready(products);
                    }
                    Err(e) => {
                        log::error!("Error loading products for '{}': {}", category, e);
                        self.state.grid = Section::Failed(PRODUCTS_ERROR.to_string());
                    }
                }
            }
            Fetched::Details(_, Ok(product)) => {
                self.state.detail = Some(product);
            }
            Fetched::Details(product_id, Err(e)) => {
                log::error!("Error loading product details for {}: {}", product_id, e);
                return vec![UiEvent::Alert(DETAILS_ERROR.to_string())];
            }
        }
        Vec::new()
    }

    pub fn close_details(&mut self) {
        self.state.detail = None;
    }

    /// Looks the product up in the cached catalog, then in the open detail
    /// overlay. Unknown ids leave the cart untouched.
    pub fn add_to_cart(&mut self, product_id: u64) -> Vec<UiEvent> {
        let product = self
            .state
            .all_products
            .iter()
            .chain(self.state.detail.iter())
            .find(|p| p.id == product_id);
        let Some(product) = product else {
            log::warn!("Add to cart ignored: product {} is not loaded", product_id);
            return Vec::new();
        };
        let quantity = self.cart.add_item(product);
        log::info!("Added product {} to cart (quantity {})", product_id, quantity);
        self.state.cart_open = true;
        vec![UiEvent::Notification(ADDED_TO_CART.to_string())]
    }

    pub fn buy_now(&mut self, product_id: u64) -> Vec<UiEvent> {
        let mut events = self.add_to_cart(product_id);
        self.state.detail = None;
        self.state.cart_open = true;
        events.push(UiEvent::Alert(CHECKOUT_MESSAGE.to_string()));
        events.push(UiEvent::CheckoutRequested);
        events
    }

    pub fn change_quantity(&mut self, product_id: u64, delta: i64) -> QuantityChange {
        self.cart.update_quantity(product_id, delta)
    }

    pub fn remove_from_cart(&mut self, product_id: u64) -> bool {
        self.cart.remove_item(product_id)
    }

    pub fn subscribe_newsletter(&self, email: &str) -> Vec<UiEvent> {
        let email = email.trim();
        if email.is_empty() {
            return vec![UiEvent::Alert(EMPTY_EMAIL_MESSAGE.to_string())];
        }
        log::info!("Newsletter subscription acknowledged locally");
        vec![UiEvent::Alert(format!("Thank you for subscribing with {}!", email))]
    }

    /// `#products` reveals the product section, `#about` and `#contact` hide
    /// it. Any known anchor closes the mobile menu.
    pub fn navigate(&mut self, anchor: &str) {
        match anchor {
            "#products" => self.state.products_section_visible = true,
            "#about" | "#contact" => self.state.products_section_visible = false,
            "#home" => {}
            other => {
                log::debug!("Ignoring navigation to unknown anchor '{}'", other);
                return;
            }
        }
        self.state.mobile_menu_open = false;
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<UiEvent> {
        log::debug!("Dispatching {:?}", command);
        match command {
            Command::SelectCategory(filter) => {
                self.select_category(filter);
                Vec::new()
            }
            Command::ShowDetails(id) => {
                self.show_details(id);
                Vec::new()
            }
            Command::CloseDetails | Command::ClickOverlayBackdrop => {
                self.close_details();
                Vec::new()
            }
            Command::AddToCart(id) => self.add_to_cart(id),
            Command::BuyNow(id) => self.buy_now(id),
            Command::IncrementQuantity(id) => {
                self.change_quantity(id, 1);
                Vec::new()
            }
            Command::DecrementQuantity(id) => {
                self.change_quantity(id, -1);
                Vec::new()
            }
            Command::RemoveFromCart(id) => {
                self.remove_from_cart(id);
                Vec::new()
            }
            Command::OpenCart => {
                self.state.cart_open = true;
                Vec::new()
            }
            Command::CloseCart => {
                self.state.cart_open = false;
                Vec::new()
            }
            Command::ToggleMobileMenu => {
                self.state.mobile_menu_open = !self.state.mobile_menu_open;
                Vec::new()
            }
            Command::SubscribeNewsletter(email) => self.subscribe_newsletter(&email),
            Command::Navigate(anchor) => {
                self.navigate(&anchor);
                Vec::new()
            }
        }
    }

    fn begin_grid_fetch(&mut self) {
        self.grid_fetches += 1;
        self.state.loading = true;
        self.state.grid = Section::Loading;
    }

    fn end_grid_fetch(&mut self) {
        self.grid_fetches = self.grid_fetches.saturating_sub(1);
        self.state.loading = self.grid_fetches > 0;
    }

    fn spawn_fetch<F, Fut>(&mut self, fetch: F)
    where
        F: FnOnce(Arc<C>) -> Fut,
        Fut: Future<Output = Fetched> + Send + 'static,
    {
        self.in_flight += 1;
        let fetched_tx = self.fetched_tx.clone();
        let request = fetch(Arc::clone(&self.catalog));
        tokio::spawn(async move {
            if fetched_tx.send(request.await).is_err() {
                log::debug!("Catalog response dropped: storefront is gone");
            }
        });
    }

    fn category_bar(&self) -> CategoryBar {
        let current = &self.state.current_category;
        let mut controls = vec![CategoryControl {
            label: ALL_PRODUCTS_LABEL.to_string(),
            filter: CategoryFilter::All,
            active: *current == CategoryFilter::All,
        }];
        controls.extend(self.state.categories.iter().map(|name| {
            let filter = CategoryFilter::Named(name.clone());
            CategoryControl {
                label: capitalize_first_letter(name),
                active: *current == filter,
                filter,
            }
        }));
        CategoryBar {
            controls,
            error: self.state.categories_error.clone(),
        }
    }

    pub fn page(&self) -> PageView {
        let grid = match &self.state.grid {
            Section::Ready(products) => render_product_grid(products),
            Section::Loading => Section::Loading,
            Section::Empty(msg) => Section::Empty(msg.clone()),
            Section::Failed(msg) => Section::Failed(msg.clone()),
        };
        let top_rated = match &self.state.top_rated {
            Section::Ready(products) => Section::Ready(render_top_rated(products)),
            Section::Loading => Section::Loading,
            Section::Empty(msg) => Section::Empty(msg.clone()),
            Section::Failed(msg) => Section::Failed(msg.clone()),
        };
        PageView {
            categories: self.category_bar(),
            products_section_visible: self.state.products_section_visible,
            loading: self.state.loading,
            grid,
            top_rated,
            detail: self.state.detail.as_ref().map(render_product_detail),
            cart_badge: self.cart.total_item_count(),
            cart_open: self.state.cart_open,
            cart: render_cart_panel(self.cart.cart()),
            mobile_menu_open: self.state.mobile_menu_open,
        }
    }
}
