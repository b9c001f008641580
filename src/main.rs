use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};

use storefront::config::AppConfig;
use storefront::render::{render_event, render_page};
use storefront::{build_storefront, AppError, AppStorefront, CategoryFilter, Command};

const HELP: &str = "commands: all | category <name> | details <id> | close | add <id> | buy <id> | \
inc <id> | dec <id> | remove <id> | cart | close-cart | menu | subscribe <email> | nav <#anchor> | \
json | help | quit";

/// Parses one input line. `Ok(None)` means the line is not a page command.
fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };
    let id = || {
        arg.parse::<u64>()
            .map_err(|_| format!("'{}' expects a product id, got '{}'", verb, arg))
    };
    let command = match verb {
        "all" => Command::SelectCategory(CategoryFilter::All),
        "category" if !arg.is_empty() => Command::SelectCategory(CategoryFilter::from_name(arg)),
        "details" => Command::ShowDetails(id()?),
        "close" => Command::CloseDetails,
        "add" => Command::AddToCart(id()?),
        "buy" => Command::BuyNow(id()?),
        "inc" => Command::IncrementQuantity(id()?),
        "dec" => Command::DecrementQuantity(id()?),
        "remove" => Command::RemoveFromCart(id()?),
        "cart" => Command::OpenCart,
        "close-cart" => Command::CloseCart,
        "menu" => Command::ToggleMobileMenu,
        "subscribe" => Command::SubscribeNewsletter(arg.to_string()),
        "nav" if !arg.is_empty() => Command::Navigate(arg.to_string()),
        _ => return Ok(None),
    };
    Ok(Some(command))
}

/// Handles one input line. `Ok(false)` ends the session.
fn handle_line(
    shop: &mut AppStorefront,
    line: &str,
    out: &mut impl Write,
) -> Result<bool, AppError> {
    match line.trim() {
        "" => return Ok(true),
        "quit" | "exit" => return Ok(false),
        "help" => {
            writeln!(out, "{}", HELP)?;
            return Ok(true);
        }
        "json" => {
            match serde_json::to_string_pretty(&shop.page()) {
                Ok(json) => writeln!(out, "{}", json)?,
                Err(e) => log::error!("Could not encode page: {}", e),
            }
            return Ok(true);
        }
        _ => {}
    }
    match parse_command(line) {
        Ok(Some(command)) => {
            for event in shop.dispatch(command) {
                writeln!(out, "{}", render_event(&event))?;
            }
            writeln!(out, "{}", render_page(&shop.page()))?;
        }
        Ok(None) => writeln!(out, "unknown command; {}", HELP)?,
        Err(msg) => writeln!(out, "{}", msg)?,
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;
    let (mut shop, mut fetched) = build_storefront(&config)?;
    shop.start();

    let mut out = io::stdout();
    writeln!(out, "{}", render_page(&shop.page()))?;
    writeln!(out, "{}", HELP)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut shop, &line, &mut out)? {
                    break;
                }
            }
            Some(response) = fetched.recv() => {
                for event in shop.apply(response) {
                    writeln!(out, "{}", render_event(&event))?;
                }
                writeln!(out, "{}", render_page(&shop.page()))?;
            }
        }
    }

    if shop.pending_fetches() > 0 {
        log::info!("Leaving {} catalog request(s) unanswered", shop.pending_fetches());
    }
    log::info!("Goodbye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_ids() {
        assert_eq!(parse_command("add 3"), Ok(Some(Command::AddToCart(3))));
        assert_eq!(parse_command(" dec  7 "), Ok(Some(Command::DecrementQuantity(7))));
        assert!(parse_command("buy x").is_err());
    }

    #[test]
    fn parses_category_names_with_spaces() {
        assert_eq!(
            parse_command("category men's clothing"),
            Ok(Some(Command::SelectCategory(CategoryFilter::Named(
                "men's clothing".to_string()
            ))))
        );
        assert_eq!(
            parse_command("category all"),
            Ok(Some(Command::SelectCategory(CategoryFilter::All)))
        );
    }

    #[test]
    fn unknown_verbs_are_not_commands() {
        assert_eq!(parse_command("dance"), Ok(None));
        assert_eq!(parse_command("nav"), Ok(None));
    }
}
