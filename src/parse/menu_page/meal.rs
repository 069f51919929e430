use std::fmt::{self, Display, Formatter};

use scraper::ElementRef;

use super::money::Czk;
use crate::parse::clean::strip_portion_size;
use crate::parse::text_from_selection::{element_text, text_from_selection};
use crate::parse::Error;
use crate::static_selector;

pub const UNKNOWN_NUMBER: &str = "N/A";
pub const UNKNOWN_NAME: &str = "Neznámé jídlo";

/// Identity the ordering form needs to place an order for a meal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key that identifies the same offering across polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MealKey<'a> {
    pub section: &'a str,
    pub menu_id: Option<&'a str>,
    pub number: &'a str,
}

/// One orderable item as observed on a single fetch of the menu page.
///
/// There is no stored availability flag: a meal is available exactly when the
/// page hands out an [`OrderId`] for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRecord {
    pub section: String,
    pub canteen_id: Option<u8>,
    pub menu_id: Option<String>,
    pub order_id: Option<OrderId>,
    pub number: String,
    pub name: String,
    pub price: Option<Czk>,
}

impl MealRecord {
    #[inline]
    #[must_use]
    pub const fn available(&self) -> bool {
        self.order_id.is_some()
    }

    #[must_use]
    pub fn key(&self) -> MealKey<'_> {
        MealKey {
            section: &self.section,
            menu_id: self.menu_id.as_deref(),
            number: &self.number,
        }
    }

    /// Price for display, `"N/A"` when the menu shows none.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.price
            .as_ref()
            .map_or_else(|| UNKNOWN_NUMBER.to_string(), Czk::to_string)
    }

    /// Builds a record from an `<article>` of a menu section.
    ///
    /// A malformed canteen id is only informational, so it is logged and the
    /// meal is still returned.
    pub fn from_html_element(section: &str, article: ElementRef<'_>) -> Self {
        let canteen_id = match parse_canteen_id(article.attr("data-canteen-id")) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("{e} in section {section:?}, keeping the meal");
                None
            }
        };
        let menu_id = article
            .attr("data-menu-id")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        // the site only exposes an id while the meal can be ordered
        let order_id = menu_id.clone().map(OrderId::new);

        let mut number = UNKNOWN_NUMBER.to_string();
        let mut name = UNKNOWN_NAME.to_string();
        let mut price = None;

        static_selector!(ROW_SELECTOR <- "table tr");
        static_selector!(CELL_SELECTOR <- "td");
        static_selector!(NAME_SELECTOR <- "h1");
        static_selector!(PRICE_SELECTOR <- "span");
        // later rows overwrite earlier ones, matching how the page lays out a single meal
        for row in article.select(&ROW_SELECTOR) {
            let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
            if cells.len() < 5 {
                continue;
            }
            let cell_number = element_text(cells[0]);
            number = if cell_number.is_empty() {
                UNKNOWN_NUMBER.to_string()
            } else {
                cell_number
            };
            name = text_from_selection(&NAME_SELECTOR, cells[1]).map_or_else(
                || UNKNOWN_NAME.to_string(),
                |n| strip_portion_size(&n).to_string(),
            );
            price = text_from_selection(&PRICE_SELECTOR, cells[4])
                .as_deref()
                .and_then(Czk::from_menu_text);
        }

        Self {
            section: section.to_string(),
            canteen_id,
            menu_id,
            order_id,
            number,
            name,
            price,
        }
    }
}

fn parse_canteen_id(raw: Option<&str>) -> Result<Option<u8>, Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => id
            .parse()
            .map(Some)
            .map_err(|_| Error::attribute_error("data-canteen-id", id)),
    }
}
