use serde::Serialize;

use crate::application::commands::Command;
use crate::domain::cart::{Cart, CartLine};

use super::format::format_money;
use super::Affordance;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRow {
    pub product_id: u64,
    pub thumbnail: String,
    pub title: String,
    pub price: String,
    pub quantity: u32,
    /// Decrement, increment, remove.
    pub controls: Vec<Affordance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum CartBody {
    Empty(String),
    Rows(Vec<CartRow>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartPanel {
    pub item_count: u64,
    pub body: CartBody,
    pub total: String,
}

fn render_row(line: &CartLine) -> CartRow {
    let id = line.product_id;
    CartRow {
        product_id: id,
        thumbnail: line.image.clone(),
        title: line.title.clone(),
        price: format_money(&line.price),
        quantity: line.quantity,
        controls: vec![
            Affordance::new("-", Command::DecrementQuantity(id)),
            Affordance::new("+", Command::IncrementQuantity(id)),
            Affordance::new("Remove", Command::RemoveFromCart(id)),
        ],
    }
}

pub fn render_cart_panel(cart: &Cart) -> CartPanel {
    let body = if cart.is_empty() {
        CartBody::Empty(EMPTY_CART_MESSAGE.to_string())
    } else {
        CartBody::Rows(cart.lines().iter().map(render_row).collect())
    };
    CartPanel {
        item_count: cart.total_item_count(),
        body,
        total: format_money(&cart.total_price()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::tests::product;

    #[test]
    fn empty_cart_panel() {
        let panel = render_cart_panel(&Cart::new());

        assert_eq!(panel.body, CartBody::Empty("Your cart is empty".to_string()));
        assert_eq!(panel.total, "$0.00");
        assert_eq!(panel.item_count, 0);
    }

    #[test]
    fn rows_follow_cart_order_with_stepper_controls() {
        let mut cart = Cart::new();
        cart.add(&product(2, "19.99"));
        cart.add(&product(1, "5"));
        cart.add(&product(2, "19.99"));

        let panel = render_cart_panel(&cart);

        let CartBody::Rows(rows) = &panel.body else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id, 2);
        assert_eq!(rows[0].quantity, 2);
        assert_eq!(rows[1].price, "$5.00");
        assert_eq!(
            rows[0].controls.iter().map(|c| c.command.clone()).collect::<Vec<_>>(),
            vec![
                Command::DecrementQuantity(2),
                Command::IncrementQuantity(2),
                Command::RemoveFromCart(2),
            ]
        );
        assert_eq!(panel.total, "$44.98");
        assert_eq!(panel.item_count, 3);
    }
}
