use scraper::{ElementRef, Html};

use super::meal::MealRecord;
use crate::parse::text_from_selection::text_from_selection;
use crate::static_selector;

pub const UNKNOWN_SECTION: &str = "Neznámá sekce";

/// Everything the monitor needs from one menu page for a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyMenu {
    meals: Vec<MealRecord>,
    logged_in: bool,
}

impl DailyMenu {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self::from_html_element(document.root_element())
    }

    /// Soups are left out; every other article becomes a record.
    pub fn from_html_element(element: ElementRef<'_>) -> Self {
        static_selector!(SECTION_SELECTOR <- "section");
        static_selector!(HEADER_SELECTOR <- "header");
        static_selector!(TITLE_SELECTOR <- "h1");
        static_selector!(ARTICLE_SELECTOR <- "article");

        let mut meals = vec![];
        for section in element.select(&SECTION_SELECTOR) {
            let Some(header) = section.select(&HEADER_SELECTOR).next() else {
                continue;
            };
            let title = text_from_selection(&TITLE_SELECTOR, header)
                .unwrap_or_else(|| UNKNOWN_SECTION.to_string());

            // soups are served with the meal and cannot be ordered on their own
            let articles = section
                .select(&ARTICLE_SELECTOR)
                .filter(|a| !a.value().classes().any(|class| class == "pol"));
            meals.extend(articles.map(|article| MealRecord::from_html_element(&title, article)));
        }

        Self {
            meals,
            logged_in: is_logged_in(element),
        }
    }

    pub fn meals(&self) -> &[MealRecord] {
        &self.meals
    }

    pub fn into_meals(self) -> Vec<MealRecord> {
        self.meals
    }

    #[inline]
    #[must_use]
    pub const fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn available_count(&self) -> usize {
        self.meals.iter().filter(|m| m.available()).count()
    }
}

/// The logout link only renders for an authenticated session.
fn is_logged_in(element: ElementRef<'_>) -> bool {
    static_selector!(LOGOUT_SELECTOR <- r#"a[href="/odhlasit/"]"#);
    element.select(&LOGOUT_SELECTOR).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{Czk, OrderId};
    use std::fs;

    fn day() -> DailyMenu {
        let html = fs::read_to_string("./src/parse/html_examples/menu_page/day.html").unwrap();
        DailyMenu::parse(&html)
    }

    #[test]
    fn test_from_html_element() {
        let menu = day();
        assert!(menu.logged_in());
        let names: Vec<&str> = menu.meals().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Kuřecí řízek, bramborová kaše",
                "Vepřový guláš, houskový knedlík",
                "Zeleninové rizoto",
                "Smažený sýr, hranolky",
            ]
        );
        assert_eq!(menu.available_count(), 2);
    }

    #[test]
    fn test_sections_and_soups() {
        let menu = day();
        let sections: Vec<&str> = menu.meals().iter().map(|m| m.section.as_str()).collect();
        assert_eq!(sections, ["Obědy", "Obědy", "Obědy", "Večeře"]);
        assert!(menu.meals().iter().all(|m| !m.name.contains("Polévka")));
    }

    #[test]
    fn test_records_keep_availability_invariant() {
        for meal in day().meals() {
            assert_eq!(meal.available(), meal.order_id.is_some());
        }
        let menu = day();
        let goulash = &menu.meals()[1];
        assert_eq!(goulash.order_id, Some(OrderId::new("48213")));
        assert_eq!(goulash.price, Some(Czk::from_minor(8900)));
    }

    #[test]
    fn test_malformed_canteen_id_is_kept() {
        let menu = DailyMenu::parse(
            r#"<section><header><h1>Obědy</h1></header>
                <article data-canteen-id="x" data-menu-id="1"></article>
                <article data-canteen-id="1" data-menu-id="2"></article>
            </section>"#,
        );
        let ids: Vec<_> = menu.meals().iter().map(|m| (m.canteen_id, m.menu_id.as_deref())).collect();
        assert_eq!(ids, [(None, Some("1")), (Some(1), Some("2"))]);
    }

    #[test]
    fn test_logged_out_page() {
        let menu = DailyMenu::parse(r#"<html><body><a href="/prihlasit/">Přihlásit</a></body></html>"#);
        assert!(!menu.logged_in());
        assert!(menu.meals().is_empty());
    }

    #[test]
    fn test_section_without_title() {
        let menu = DailyMenu::parse(
            r#"<section><header></header><article data-menu-id="5"></article></section>"#,
        );
        assert_eq!(menu.meals()[0].section, UNKNOWN_SECTION);
    }
}
