//! The linear console session: pick a day and canteen, pick meals, watch them.

use std::io::{self, Write};

use chrono::Local;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::console::{self, Prompt};
use crate::fetch::MenzaClient;
use crate::monitor::{Monitor, Outcome};
use crate::parse::{DailyMenu, HtmlExtractor};
use crate::selection::max_exposure;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Finished(Outcome),
    /// The operator chose no meals.
    NothingSelected,
}

pub async fn run(config: &Config) -> crate::Result<SessionEnd> {
    let client = MenzaClient::new(config)?;
    let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
    let mut out = io::stdout();

    let date = prompt.date(Local::now().date_naive())?;
    let canteen = prompt.canteen()?;

    let page = client.fetch_day_page(date, canteen).await?;
    let menu = DailyMenu::parse(&page);
    if !menu.logged_in() {
        return Err(crate::Error::NotLoggedIn);
    }
    writeln!(out, "Login successful!")?;
    if menu
        .meals()
        .iter()
        .any(|m| m.canteen_id.is_some_and(|id| id != canteen.id()))
    {
        log::warn!("Menu page for {canteen} lists meals of another canteen");
    }

    console::write_listing(&mut out, menu.meals())?;
    console::write_summary(&mut out, menu.meals().len(), menu.available_count())?;

    let Some(mut targets) = prompt.targets(menu.meals())? else {
        return Ok(SessionEnd::NothingSelected);
    };
    console::write_exposure(&mut out, max_exposure(&targets).as_ref())?;

    writeln!(out, "\nStarting to watch the selected meals...")?;
    writeln!(out, "Press Ctrl+C to stop.")?;
    let cancel = CancellationToken::new();
    let trip = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => trip.cancel(),
            Err(e) => log::error!("Cannot listen for Ctrl+C: {e}"),
        }
    });

    let outcome = Monitor::new(&client, &HtmlExtractor, &client, date, canteen)
        .interval(config.poll_interval)
        .policy(config.order_policy)
        .run(&mut targets, &cancel, |event| {
            println!("{}", console::event_line(&event, Local::now().time()));
        })
        .await;
    writeln!(out, "{}", console::outcome_line(outcome))?;

    Ok(SessionEnd::Finished(outcome))
}
