use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::domain::cart::{Cart, CartLine};
use crate::domain::errors::DomainError;
use crate::domain::product::{Product, Rating};

// ── Decimal (de)serialization ────────────────────────────────────────────────

/// Prices travel as JSON numbers from the catalog and as strings in the
/// persisted cart. Numbers go through their shortest decimal text so that
/// `109.95` is stored as exactly `109.95`.
mod decimal {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Repr::deserialize(deserializer)? {
            Repr::Number(n) if n.is_finite() => n.to_string(),
            Repr::Number(n) => return Err(D::Error::custom(format!("invalid price {}", n))),
            Repr::Text(s) => s,
        };
        BigDecimal::from_str(text.trim())
            .map_err(|e| D::Error::custom(format!("invalid price '{}': {}", text, e)))
    }

    pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}

// ── Catalog wire format ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingDto {
    pub rate: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: u64,
    pub title: String,
    #[serde(with = "decimal")]
    pub price: BigDecimal,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: RatingDto,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Product {
            id: dto.id,
            title: dto.title,
            price: dto.price,
            category: dto.category,
            image: dto.image,
            description: dto.description,
            rating: Rating {
                rate: dto.rating.rate,
                count: dto.rating.count,
            },
        }
    }
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            id: p.id,
            title: p.title.clone(),
            price: p.price.clone(),
            category: p.category.clone(),
            image: p.image.clone(),
            description: p.description.clone(),
            rating: RatingDto {
                rate: p.rating.rate,
                count: p.rating.count,
            },
        }
    }
}

// ── Persisted cart format ────────────────────────────────────────────────────

/// One element of the stored JSON array. Field names follow the format the
/// storefront has always written, so carts saved by earlier versions load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCartLine {
    pub id: u64,
    pub title: String,
    #[serde(with = "decimal")]
    pub price: BigDecimal,
    #[serde(default)]
    pub image: String,
    pub quantity: i64,
}

impl From<&CartLine> for StoredCartLine {
    fn from(line: &CartLine) -> Self {
        StoredCartLine {
            id: line.product_id,
            title: line.title.clone(),
            price: line.price.clone(),
            image: line.image.clone(),
            quantity: i64::from(line.quantity),
        }
    }
}

impl From<StoredCartLine> for CartLine {
    fn from(s: StoredCartLine) -> Self {
        CartLine {
            product_id: s.id,
            title: s.title,
            price: s.price,
            image: s.image,
            // Non-positive quantities become 0 and are dropped by `Cart::from_lines`.
            quantity: u32::try_from(s.quantity.max(0)).unwrap_or(u32::MAX),
        }
    }
}

pub fn encode_cart(cart: &Cart) -> Result<String, DomainError> {
    let lines: Vec<StoredCartLine> = cart.lines().iter().map(StoredCartLine::from).collect();
    serde_json::to_string(&lines).map_err(|e| DomainError::Storage(e.to_string()))
}

pub fn decode_cart(raw: &str) -> Result<Cart, DomainError> {
    let lines: Vec<StoredCartLine> =
        serde_json::from_str(raw).map_err(|e| DomainError::StorageDecode(e.to_string()))?;
    Ok(Cart::from_lines(lines.into_iter().map(CartLine::from)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::tests::product;

    #[test]
    fn product_price_number_keeps_decimal_text() {
        let json = r#"{
            "id": 1,
            "title": "Backpack",
            "price": 109.95,
            "category": "men's clothing",
            "image": "https://img.example/1.png",
            "description": "Fits laptops",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str::<ProductDto>(json)
            .expect("valid product")
            .into();

        assert_eq!(product.price, BigDecimal::from_str("109.95").unwrap());
        assert_eq!(product.price.to_string(), "109.95");
        assert_eq!(product.rating.count, 120);
    }

    #[test]
    fn product_without_rating_defaults_to_zero() {
        let json = r#"{"id": 2, "title": "T", "price": 5, "category": "c"}"#;

        let product: Product = serde_json::from_str::<ProductDto>(json)
            .expect("valid product")
            .into();

        assert_eq!(product.rating.rate, 0.0);
        assert_eq!(product.price, BigDecimal::from(5));
    }

    #[test]
    fn cart_round_trips() {
        let mut cart = Cart::new();
        cart.add(&product(1, "19.99"));
        cart.add(&product(1, "19.99"));
        cart.add(&product(7, "10.005"));

        let raw = encode_cart(&cart).expect("encode");
        let decoded = decode_cart(&raw).expect("decode");

        assert_eq!(decoded, cart);
    }

    #[test]
    fn decode_accepts_numeric_prices() {
        let raw = r#"[{"id":3,"title":"Ring","price":9.99,"image":"i.png","quantity":2}]"#;

        let cart = decode_cart(raw).expect("decode");

        assert_eq!(cart.lines()[0].price, BigDecimal::from_str("9.99").unwrap());
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn decode_drops_non_positive_quantities() {
        let raw = r#"[
            {"id":1,"title":"A","price":"1.00","image":"","quantity":0},
            {"id":2,"title":"B","price":"1.00","image":"","quantity":-3},
            {"id":3,"title":"C","price":"1.00","image":"","quantity":1}
        ]"#;

        let cart = decode_cart(raw).expect("decode");

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product_id, 3);
    }

    #[test]
    fn decode_rejects_malformed_input() {
        let inputs = [
            "not json",
            "{\"id\":1}",
            "[{\"id\":\"x\"}]",
            "[{\"id\":1,\"title\":\"A\",\"price\":\"abc\",\"quantity\":1}]",
        ];
        for raw in inputs {
            let err = decode_cart(raw).expect_err("should fail");
            assert!(matches!(err, DomainError::StorageDecode(_)), "{raw}");
        }
    }
}
