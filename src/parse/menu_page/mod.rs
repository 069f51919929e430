mod daily_menu;
mod meal;
mod money;

pub use daily_menu::DailyMenu;
pub use meal::{MealKey, MealRecord, OrderId};
pub use money::Czk;

#[cfg(test)]
pub(crate) use meal::fixtures;
