use std::cmp::Ordering;

use serde::Serialize;

use crate::application::commands::Command;
use crate::domain::product::Product;

use super::format::{format_money, truncate_text, StarRating};
use super::{Affordance, Section};

pub const CARD_TITLE_MAX_CHARS: usize = 50;
pub const TOP_RATED_COUNT: usize = 3;
pub const NO_PRODUCTS_MESSAGE: &str = "No products found.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub product_id: u64,
    pub category: String,
    pub image: String,
    /// Possibly truncated title shown on the card.
    pub title: String,
    /// Untruncated title for the tooltip / accessible label.
    pub full_title: String,
    pub stars: StarRating,
    pub rating_count: u64,
    pub price: String,
    pub actions: Vec<Affordance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product_id: u64,
    pub category: String,
    pub image: String,
    pub title: String,
    pub description: String,
    pub stars: StarRating,
    pub rating_rate: f64,
    pub rating_count: u64,
    pub price: String,
    pub actions: Vec<Affordance>,
}

fn details_action(id: u64) -> Affordance {
    Affordance::new("Details", Command::ShowDetails(id))
}

fn card(product: &Product, title: String, actions: Vec<Affordance>) -> ProductCard {
    ProductCard {
        product_id: product.id,
        category: product.category.clone(),
        image: product.image.clone(),
        title,
        full_title: product.title.clone(),
        stars: StarRating::from_rate(product.rating.rate),
        rating_count: product.rating.count,
        price: format_money(&product.price),
        actions,
    }
}

/// Grid card: truncated title, details and add-to-cart actions.
pub fn render_product_card(product: &Product) -> ProductCard {
    let (title, _) = truncate_text(&product.title, CARD_TITLE_MAX_CHARS);
    card(
        product,
        title,
        vec![
            details_action(product.id),
            Affordance::new("Add to Cart", Command::AddToCart(product.id)),
        ],
    )
}

pub fn render_product_detail(product: &Product) -> ProductDetail {
    ProductDetail {
        product_id: product.id,
        category: product.category.clone(),
        image: product.image.clone(),
        title: product.title.clone(),
        description: product.description.clone(),
        stars: StarRating::from_rate(product.rating.rate),
        rating_rate: product.rating.rate,
        rating_count: product.rating.count,
        price: format_money(&product.price),
        actions: vec![
            Affordance::new("Add to Cart", Command::AddToCart(product.id)),
            Affordance::new("Buy Now", Command::BuyNow(product.id)),
        ],
    }
}

pub fn render_product_grid(products: &[Product]) -> Section<Vec<ProductCard>> {
    if products.is_empty() {
        return Section::Empty(NO_PRODUCTS_MESSAGE.to_string());
    }
    Section::Ready(products.iter().map(render_product_card).collect())
}

/// Highest `rating.rate` first; equal rates fall back to ascending id.
fn by_rating_desc(a: &Product, b: &Product) -> Ordering {
    b.rating
        .rate
        .total_cmp(&a.rating.rate)
        .then_with(|| a.id.cmp(&b.id))
}

pub fn select_top_rated(products: &[Product], count: usize) -> Vec<&Product> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| by_rating_desc(a, b));
    ranked.truncate(count);
    ranked
}

/// The three best-rated products as compact cards with a details action only.
pub fn render_top_rated(products: &[Product]) -> Vec<ProductCard> {
    select_top_rated(products, TOP_RATED_COUNT)
        .into_iter()
        .map(|p| card(p, p.title.clone(), vec![details_action(p.id)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::tests::product;

    fn rated(id: u64, rate: f64) -> Product {
        let mut p = product(id, "1.00");
        p.rating.rate = rate;
        p
    }

    #[test]
    fn card_truncates_long_title_and_keeps_full_one() {
        let mut p = product(1, "109.95");
        p.title = "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops".to_string();

        let card = render_product_card(&p);

        assert_eq!(card.title, "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Lapt...");
        assert_eq!(card.full_title, p.title);
        assert_eq!(card.price, "$109.95");
        assert_eq!(
            card.actions.iter().map(|a| &a.command).collect::<Vec<_>>(),
            vec![&Command::ShowDetails(1), &Command::AddToCart(1)]
        );
    }

    #[test]
    fn card_stars_sum_to_five_for_all_rates() {
        for tenth in 0..=50 {
            let card = render_product_card(&rated(1, f64::from(tenth) / 10.0));
            assert_eq!(card.stars.symbols().len(), 5);
        }
    }

    #[test]
    fn detail_has_add_and_buy_actions() {
        let p = product(8, "22.3");
        let detail = render_product_detail(&p);

        assert_eq!(detail.price, "$22.30");
        assert_eq!(detail.description, p.description);
        assert_eq!(
            detail.actions.iter().map(|a| a.label.as_str()).collect::<Vec<_>>(),
            vec!["Add to Cart", "Buy Now"]
        );
        assert_eq!(detail.actions[1].command, Command::BuyNow(8));
    }

    #[test]
    fn empty_grid_shows_message() {
        assert_eq!(
            render_product_grid(&[]),
            Section::Empty("No products found.".to_string())
        );
    }

    #[test]
    fn top_rated_picks_three_highest_with_id_tie_break() {
        let products = vec![
            rated(1, 4.9),
            rated(2, 3.2),
            rated(3, 4.9),
            rated(4, 5.0),
            rated(5, 1.0),
        ];

        let top = render_top_rated(&products);

        let ids: Vec<u64> = top.iter().map(|c| c.product_id).collect();
        assert_eq!(ids, vec![4, 1, 3]);
        assert!(top.iter().all(|c| {
            c.actions.len() == 1 && c.actions[0].command == Command::ShowDetails(c.product_id)
        }));
    }

    #[test]
    fn top_rated_with_fewer_products() {
        let products = vec![rated(9, 2.0)];
        assert_eq!(render_top_rated(&products).len(), 1);
        assert!(render_top_rated(&[]).is_empty());
    }
}
