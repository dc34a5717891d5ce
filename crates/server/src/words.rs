//! Amounts in words for the quotation document, Indian numbering system
//! (crore, lakh, thousand).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const ONES: [&str; 10] =
    ["", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine"];
const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];
const TENS: [&str; 10] =
    ["", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety"];

fn push_word(result: &mut String, word: &str) {
    if !word.is_empty() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
}

fn hundreds_in_words(mut n: u64) -> String {
    let mut result = String::new();

    if n >= 100 {
        push_word(&mut result, ONES[(n / 100) as usize]);
        push_word(&mut result, "Hundred");
        n %= 100;
    }
    if n >= 20 {
        push_word(&mut result, TENS[(n / 10) as usize]);
        n %= 10;
    }
    if n >= 10 {
        push_word(&mut result, TEENS[(n - 10) as usize]);
        n = 0;
    }
    if n > 0 {
        push_word(&mut result, ONES[n as usize]);
    }

    result
}

/// Renders an amount as words, rounded to whole rupees first. Zero stays
/// a bare "Zero"; everything else gets the "Rupees" suffix.
pub fn amount_in_words(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .to_u64()
        .unwrap_or(0);

    if rounded == 0 {
        return "Zero".to_string();
    }

    let mut result = String::new();
    let mut number = rounded;

    if number >= 10_000_000 {
        push_word(&mut result, &hundreds_in_words(number / 10_000_000));
        push_word(&mut result, "Crore");
        number %= 10_000_000;
    }
    if number >= 100_000 {
        push_word(&mut result, &hundreds_in_words(number / 100_000));
        push_word(&mut result, "Lakh");
        number %= 100_000;
    }
    if number >= 1_000 {
        push_word(&mut result, &hundreds_in_words(number / 1_000));
        push_word(&mut result, "Thousand");
        number %= 1_000;
    }
    push_word(&mut result, &hundreds_in_words(number));

    push_word(&mut result, "Rupees");
    result
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::amount_in_words;

    #[test]
    fn zero_is_a_bare_word() {
        assert_eq!(amount_in_words(Decimal::ZERO), "Zero");
    }

    #[test]
    fn small_amounts_spell_out_directly() {
        assert_eq!(amount_in_words(Decimal::from(15)), "Fifteen Rupees");
        assert_eq!(amount_in_words(Decimal::from(42)), "Forty Two Rupees");
        assert_eq!(amount_in_words(Decimal::from(300)), "Three Hundred Rupees");
    }

    #[test]
    fn lakh_scale_reads_in_indian_grouping() {
        assert_eq!(
            amount_in_words(Decimal::from(202_488)),
            "Two Lakh Two Thousand Four Hundred Eighty Eight Rupees"
        );
    }

    #[test]
    fn crore_scale_reads_in_indian_grouping() {
        assert_eq!(amount_in_words(Decimal::from(10_000_000)), "One Crore Rupees");
        assert_eq!(
            amount_in_words(Decimal::from(23_456_789)),
            "Two Crore Thirty Four Lakh Fifty Six Thousand Seven Hundred Eighty Nine Rupees"
        );
    }

    #[test]
    fn paise_round_to_the_nearest_rupee() {
        assert_eq!(amount_in_words(Decimal::new(9_950, 2)), "One Hundred Rupees");
        assert_eq!(amount_in_words(Decimal::new(9_949, 2)), "Ninety Nine Rupees");
    }
}
