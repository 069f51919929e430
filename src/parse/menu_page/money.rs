use std::{cmp::Ordering, fmt::Display};

use rusty_money::{iso, Money};

use crate::parse::clean::price_parts;

/// A price in Czech crowns as printed on the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Czk(Money<'static, iso::Currency>);

impl Czk {
    /// `minor` is in hellers (1/100 CZK).
    pub fn from_minor(minor: i64) -> Self {
        Self(Money::from_minor(minor, iso::CZK))
    }

    /// Reads the first `whole,fraction` amount out of menu text like `"85,00 Kč"`.
    pub fn from_menu_text(text: &str) -> Option<Self> {
        let (whole, fraction) = price_parts(text)?;
        let whole: i64 = whole.parse().ok()?;
        // the menu always prints two decimals, but pad or cut anything else
        let cents: String = fraction.chars().chain("00".chars()).take(2).collect();
        let cents: i64 = cents.parse().ok()?;
        whole
            .checked_mul(100)
            .and_then(|x| x.checked_add(cents))
            .map(Self::from_minor)
    }
}

impl PartialOrd for Czk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Czk {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.amount().cmp(other.0.amount())
    }
}

impl Display for Czk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_czk_from_menu_text() {
        let czk = Czk::from_menu_text("85,00 Kč").unwrap();
        assert_eq!(czk.to_string(), "85.00");
        assert_eq!(czk, Czk::from_minor(8500));
    }

    #[test]
    fn test_czk_short_fraction() {
        assert_eq!(Czk::from_menu_text("12,5"), Some(Czk::from_minor(1250)));
    }

    #[test]
    fn test_czk_without_amount() {
        assert_eq!(Czk::from_menu_text("Kč"), None);
    }

    #[test]
    fn test_czk_ordering() {
        let cheap = Czk::from_minor(3900);
        let pricey = Czk::from_minor(11950);
        assert!(cheap < pricey);
        assert_eq!(
            [pricey.clone(), cheap].into_iter().max(),
            Some(pricey)
        );
    }
}
