mod clean;
mod error;
mod menu_page;
pub mod static_selector;
mod text_from_selection;

pub use error::Error;
pub use menu_page::{Czk, DailyMenu, MealKey, MealRecord, OrderId};

#[cfg(test)]
pub(crate) use menu_page::fixtures;

use crate::monitor::MealExtractor;

/// Reads meal records out of the canteen's HTML menu page.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlExtractor;

impl MealExtractor for HtmlExtractor {
    fn extract(&self, page: &str) -> Vec<MealRecord> {
        DailyMenu::parse(page).into_meals()
    }
}
