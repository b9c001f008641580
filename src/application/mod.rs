pub mod cart_store;
pub mod commands;
pub mod storefront;
