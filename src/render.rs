//! Plain-text rendering of [`PageView`] for the terminal driver.

use std::fmt;

use crate::application::commands::UiEvent;
use crate::views::{CartBody, PageView, ProductCard, Section, Star, StarRating};

pub fn stars(rating: &StarRating) -> String {
    rating
        .symbols()
        .into_iter()
        .map(|s| match s {
            Star::Full => '★',
            Star::Half => '⯪',
            Star::Empty => '☆',
        })
        .collect()
}

fn card_line(f: &mut fmt::Formatter<'_>, card: &ProductCard) -> fmt::Result {
    writeln!(
        f,
        "  [{}] {} ({}) {} ({}) {}",
        card.product_id,
        card.title,
        card.category,
        stars(&card.stars),
        card.rating_count,
        card.price
    )
}

fn section(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    section: &Section<Vec<ProductCard>>,
) -> fmt::Result {
    writeln!(f, "== {} ==", heading)?;
    match section {
        Section::Loading => writeln!(f, "  Loading..."),
        Section::Ready(cards) => cards.iter().try_for_each(|c| card_line(f, c)),
        Section::Empty(msg) | Section::Failed(msg) => writeln!(f, "  {}", msg),
    }
}

/// Terminal layout of a [`PageView`].
struct PageText<'a>(&'a PageView);

impl fmt::Display for PageText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;

        let labels: Vec<String> = page
            .categories
            .controls
            .iter()
            .map(|c| {
                if c.active {
                    format!("[{}]", c.label)
                } else {
                    c.label.clone()
                }
            })
            .collect();
        writeln!(f, "Categories: {}", labels.join(" | "))?;
        if let Some(err) = &page.categories.error {
            writeln!(f, "  {}", err)?;
        }
        writeln!(f, "Cart: {} item(s)", page.cart_badge)?;
        if page.mobile_menu_open {
            writeln!(f, "Menu: Home | Products | About | Contact")?;
        }

        if page.products_section_visible {
            if page.loading {
                writeln!(f, "(loading)")?;
            }
            section(f, "Products", &page.grid)?;
        }
        section(f, "Top Rated", &page.top_rated)?;

        if let Some(detail) = &page.detail {
            writeln!(f, "== {} ==", detail.title)?;
            writeln!(f, "  {}", detail.category)?;
            writeln!(f, "  {} ({} reviews)", stars(&detail.stars), detail.rating_count)?;
            writeln!(f, "  {}", detail.description)?;
            writeln!(f, "  {}", detail.price)?;
            let actions: Vec<&str> = detail.actions.iter().map(|a| a.label.as_str()).collect();
            writeln!(f, "  [{}]", actions.join("] ["))?;
        }

        if page.cart_open {
            writeln!(f, "== Shopping Cart ==")?;
            match &page.cart.body {
                CartBody::Empty(msg) => writeln!(f, "  {}", msg)?,
                CartBody::Rows(rows) => {
                    for row in rows {
                        writeln!(
                            f,
                            "  [{}] {} {} x{}",
                            row.product_id, row.title, row.price, row.quantity
                        )?;
                    }
                }
            }
            writeln!(f, "  Total: {}", page.cart.total)?;
        }
        Ok(())
    }
}

pub fn render_page(page: &PageView) -> String {
    PageText(page).to_string()
}

pub fn render_event(event: &UiEvent) -> String {
    match event {
        UiEvent::Notification(msg) => format!("✔ {}", msg),
        UiEvent::Alert(msg) => format!("! {}", msg),
        UiEvent::CheckoutRequested => "→ checkout".to_string(),
    }
}
