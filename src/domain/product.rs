use bigdecimal::BigDecimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    /// Average score in `[0, 5]`.
    pub rate: f64,
    pub count: u64,
}

/// A catalog entry. Read-only to the storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: BigDecimal,
    pub category: String,
    pub image: String,
    pub description: String,
    pub rating: Rating,
}
