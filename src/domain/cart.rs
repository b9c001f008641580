use bigdecimal::{BigDecimal, RoundingMode};

use super::product::Product;

/// One product/quantity pairing. Title, price and image are captured when the
/// product is first added and do not follow later catalog changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: u64,
    pub title: String,
    pub price: BigDecimal,
    pub image: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn snapshot(product: &Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            quantity: 1,
        }
    }

    pub fn subtotal(&self) -> BigDecimal {
        self.price.clone() * BigDecimal::from(self.quantity)
    }
}

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line for that product.
    Missing,
    Updated(u32),
    Removed,
}

/// Ordered line items, unique by product id, every quantity >= 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from previously stored lines, merging duplicate
    /// product ids and dropping non-positive quantities.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.position(line.product_id) {
                Some(idx) => {
                    let existing = &mut cart.lines[idx];
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: u64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    fn position(&self, product_id: u64) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }

    /// Increments the matching line or appends a new one with quantity 1.
    /// Returns the resulting quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        match self.position(product.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines.push(CartLine::snapshot(product));
                1
            }
        }
    }

    /// Returns `true` when a line was removed.
    pub fn remove(&mut self, product_id: u64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    pub fn update_quantity(&mut self, product_id: u64, delta: i64) -> QuantityChange {
        let Some(idx) = self.position(product_id) else {
            return QuantityChange::Missing;
        };
        let next = i64::from(self.lines[idx].quantity).saturating_add(delta);
        if next <= 0 {
            self.lines.remove(idx);
            return QuantityChange::Removed;
        }
        let quantity = u32::try_from(next).unwrap_or(u32::MAX);
        self.lines[idx].quantity = quantity;
        QuantityChange::Updated(quantity)
    }

    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of price x quantity, rounded half-up to cents.
    pub fn total_price(&self) -> BigDecimal {
        self.lines
            .iter()
            .fold(BigDecimal::from(0), |acc, line| acc + line.subtotal())
            .with_scale_round(2, RoundingMode::HalfUp)
    }
}
