use bigdecimal::{BigDecimal, RoundingMode};
use serde::Serialize;

pub const STAR_SLOTS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Star {
    Full,
    Half,
    Empty,
}

/// A five-slot star visualization of a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// `floor(rate)` full stars, one half star when the fractional part is at
    /// least 0.5, and the remaining slots empty. Rates outside `[0, 5]` are
    /// clamped first.
    pub fn from_rate(rate: f64) -> Self {
        let rate = if rate.is_finite() {
            rate.clamp(0.0, f64::from(STAR_SLOTS))
        } else {
            0.0
        };
        let full = rate.floor() as u8;
        let half = rate % 1.0 >= 0.5;
        let empty = STAR_SLOTS - full - u8::from(half);
        Self { full, half, empty }
    }

    pub fn symbols(&self) -> Vec<Star> {
        let mut out = Vec::with_capacity(usize::from(STAR_SLOTS));
        out.extend(std::iter::repeat(Star::Full).take(usize::from(self.full)));
        if self.half {
            out.push(Star::Half);
        }
        out.extend(std::iter::repeat(Star::Empty).take(usize::from(self.empty)));
        out
    }
}

/// Cuts `text` to `max_chars` characters and appends `...` when anything was
/// cut. Returns the display text and whether it was shortened.
pub fn truncate_text(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (format!("{}...", &text[..byte_idx]), true),
        None => (text.to_string(), false),
    }
}

/// `$` followed by the amount rounded half-up to exactly two decimals.
pub fn format_money(amount: &BigDecimal) -> String {
    let rounded = amount.with_scale_round(2, RoundingMode::HalfUp);
    let sign = if rounded < BigDecimal::from(0) { "-" } else { "" };
    let (digits, _scale) = rounded.abs().as_bigint_and_exponent();
    let cents = format!("{:0>3}", digits.to_string());
    let (whole, frac) = cents.split_at(cents.len() - 2);
    format!("{}${}.{}", sign, whole, frac)
}

pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
