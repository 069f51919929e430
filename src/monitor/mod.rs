//! Polls the menu page and orders pinned meals as soon as they can be ordered.

mod matcher;
mod target;

use std::time::Duration;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use crate::canteen::Canteen;
use crate::config::DEFAULT_POLL_INTERVAL;
use crate::fetch;
use crate::parse::{MealRecord, OrderId};

pub use matcher::find_match;
pub use target::{TargetMeal, TargetState};

/// Source of the raw menu page for one canteen and day.
pub trait PageSource {
    async fn fetch(&self, date: NaiveDate, canteen: Canteen) -> Result<String, fetch::Error>;
}

/// Turns a raw menu page into meal records. Must not have side effects.
pub trait MealExtractor {
    fn extract(&self, page: &str) -> Vec<MealRecord>;
}

/// Places an order. Retrying after a failure is assumed not to double charge.
pub trait OrderSubmitter {
    async fn submit(
        &self,
        order_id: &OrderId,
        canteen: Canteen,
        date: NaiveDate,
    ) -> Result<(), fetch::Error>;
}

/// What to do after the first order goes through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderPolicy {
    /// Stop right away, even if other targets are still pending.
    #[default]
    StopOnFirst,
    /// Keep going until every target is ordered.
    OrderAll,
}

/// Status updates for the operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MonitorEvent {
    FetchFailed(String),
    Available { name: String, order_id: OrderId },
    Ordered { name: String },
    OrderFailed { name: String, reason: String },
    Waiting { name: String },
}

/// Result of a single poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Page could not be fetched; nothing was matched.
    FetchFailed,
    Pending,
    AllOrdered,
    StoppedAfterOrder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    AllOrdered,
    StoppedAfterOrder,
    Cancelled,
}

pub struct Monitor<'a, S, E, O> {
    source: &'a S,
    extractor: &'a E,
    submitter: &'a O,
    date: NaiveDate,
    canteen: Canteen,
    interval: Duration,
    policy: OrderPolicy,
}

impl<'a, S, E, O> Monitor<'a, S, E, O>
where
    S: PageSource,
    E: MealExtractor,
    O: OrderSubmitter,
{
    pub fn new(
        source: &'a S,
        extractor: &'a E,
        submitter: &'a O,
        date: NaiveDate,
        canteen: Canteen,
    ) -> Self {
        Self {
            source,
            extractor,
            submitter,
            date,
            canteen,
            interval: DEFAULT_POLL_INTERVAL,
            policy: OrderPolicy::StopOnFirst,
        }
    }

    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: OrderPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Polls until the targets are dealt with or `cancel` fires.
    ///
    /// Cancellation is checked before every poll and while waiting between
    /// polls. A submission that has started always runs to completion.
    pub async fn run(
        &self,
        targets: &mut [TargetMeal],
        cancel: &CancellationToken,
        mut on_event: impl FnMut(MonitorEvent),
    ) -> Outcome {
        let mut ticks: u64 = 0;
        let outcome = loop {
            if cancel.is_cancelled() {
                break Outcome::Cancelled;
            }
            ticks += 1;
            match self.tick(targets, &mut on_event).await {
                Tick::AllOrdered => break Outcome::AllOrdered,
                Tick::StoppedAfterOrder => break Outcome::StoppedAfterOrder,
                Tick::FetchFailed | Tick::Pending => {}
            }
            tokio::select! {
                biased;
                () = cancel.cancelled() => break Outcome::Cancelled,
                () = tokio::time::sleep(self.interval) => {}
            }
        };
        log::info!("Monitoring ended after {ticks} polls: {outcome:?}");
        outcome
    }

    /// One fetch, match and order pass over the targets that are not ordered yet.
    pub async fn tick(
        &self,
        targets: &mut [TargetMeal],
        on_event: &mut impl FnMut(MonitorEvent),
    ) -> Tick {
        if targets.iter().all(TargetMeal::ordered) {
            return Tick::AllOrdered;
        }

        let page = match self.source.fetch(self.date, self.canteen).await {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Fetching menu for {} on {} failed: {e}", self.canteen, self.date);
                on_event(MonitorEvent::FetchFailed(e.to_string()));
                return Tick::FetchFailed;
            }
        };
        let snapshot = self.extractor.extract(&page);
        log::debug!("Menu page lists {} meals", snapshot.len());

        for target in targets.iter_mut().filter(|t| !t.ordered()) {
            let Some(current) = find_match(&snapshot, target) else {
                // gone from the listing; only the operator can give up on it
                log::debug!("{} is not on the menu page", target.name);
                continue;
            };
            let Some(order_id) = &current.order_id else {
                on_event(MonitorEvent::Waiting {
                    name: target.name.clone(),
                });
                continue;
            };

            target.set_state(TargetState::AvailableDetected);
            on_event(MonitorEvent::Available {
                name: current.name.clone(),
                order_id: order_id.clone(),
            });
            match self.submitter.submit(order_id, self.canteen, self.date).await {
                Ok(()) => {
                    target.set_state(TargetState::Ordered);
                    log::info!("Ordered {} ({order_id})", current.name);
                    on_event(MonitorEvent::Ordered {
                        name: current.name.clone(),
                    });
                    if self.policy == OrderPolicy::StopOnFirst {
                        break;
                    }
                }
                Err(e) => {
                    target.set_state(TargetState::Pending);
                    log::warn!("Ordering {} ({order_id}) failed: {e}", current.name);
                    on_event(MonitorEvent::OrderFailed {
                        name: current.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if targets.iter().all(TargetMeal::ordered) {
            Tick::AllOrdered
        } else if self.policy == OrderPolicy::StopOnFirst && targets.iter().any(TargetMeal::ordered)
        {
            Tick::StoppedAfterOrder
        } else {
            Tick::Pending
        }
    }
}
