//! Everything the operator sees: the meal listing, prompts and status lines.

mod prompt;

use std::io::{self, Write};

use chrono::NaiveTime;

use crate::monitor::{MonitorEvent, Outcome};
use crate::parse::{Czk, MealRecord};

pub use prompt::Prompt;

const RULE_WIDTH: usize = 50;

/// Prints `meals` grouped by section, numbered from 1 in listing order.
pub fn write_listing(out: &mut impl Write, meals: &[MealRecord]) -> io::Result<()> {
    if meals.is_empty() {
        return writeln!(out, "\nNo meals found.");
    }
    let rule = "=".repeat(RULE_WIDTH);
    let mut section: Option<&str> = None;
    for (i, meal) in meals.iter().enumerate() {
        if section != Some(meal.section.as_str()) {
            section = Some(meal.section.as_str());
            writeln!(out, "\n{rule}\n {}\n{rule}", meal.section)?;
        }
        let availability = match &meal.order_id {
            Some(id) => format!("AVAILABLE (ID: {id})"),
            None => "SOLD OUT".to_string(),
        };
        writeln!(out, "\n[{}] {} - {}", i + 1, meal.number, meal.name)?;
        writeln!(out, "   Price: {} Kč | {availability}", meal.price_label())?;
        writeln!(out, "{}", "-".repeat(30))?;
    }
    Ok(())
}

pub fn write_summary(out: &mut impl Write, total: usize, available: usize) -> io::Result<()> {
    writeln!(
        out,
        "\nSummary: {total} meals found, {available} available to order."
    )
}

pub fn write_exposure(out: &mut impl Write, max_price: Option<&Czk>) -> io::Result<()> {
    match max_price {
        Some(price) => writeln!(out, "\nHighest meal price: {price} Kč")?,
        None => writeln!(out, "\nHighest meal price: unknown")?,
    }
    writeln!(out, "Make sure your canteen account has enough credit.")
}

/// One status line, stamped with the local wall-clock time `at`.
pub fn event_line(event: &MonitorEvent, at: NaiveTime) -> String {
    let stamp = at.format("%H:%M:%S");
    match event {
        MonitorEvent::FetchFailed(reason) => {
            format!("[{stamp}] Could not load the menu page: {reason}")
        }
        MonitorEvent::Available { name, order_id } => {
            format!("\n[{stamp}] Meal available: {name} (ID: {order_id})")
        }
        MonitorEvent::Ordered { name } => format!("[{stamp}] Ordered: {name}"),
        MonitorEvent::OrderFailed { name, reason } => {
            format!("[{stamp}] Could not order {name}: {reason}")
        }
        MonitorEvent::Waiting { name } => format!("[{stamp}] Waiting for: {name}"),
    }
}

pub fn outcome_line(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::AllOrdered => "\nAll selected meals have been ordered!",
        Outcome::StoppedAfterOrder => "\nA meal has been ordered, stopping.",
        Outcome::Cancelled => "\nMonitoring stopped by user.",
    }
}
