pub mod catalog_client;
pub mod models;
pub mod storage;
