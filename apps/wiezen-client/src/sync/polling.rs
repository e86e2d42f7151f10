//! Fixed-cadence state polling.
//!
//! A tick that lands while the table is busy is dropped outright, never
//! queued: the next tick fetches the latest state anyway.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    AutomatedTurn,
    Dwelling,
    /// The previous poll has not answered yet.
    InFlight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollDecision {
    Fetch,
    Skip(SkipReason),
}

#[derive(Debug)]
pub struct PollingLoop {
    ticks: Interval,
    in_flight: bool,
}

impl PollingLoop {
    /// The first tick fires one full period after creation.
    pub fn new(period: Duration) -> Self {
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            ticks,
            in_flight: false,
        }
    }

    pub async fn tick(&mut self) {
        self.ticks.tick().await;
    }

    /// Gate one tick. A `Fetch` marks a poll as in flight until
    /// `completed` is called.
    pub fn decide(&mut self, automated_turn: bool, dwelling: bool) -> PollDecision {
        let decision = if automated_turn {
            PollDecision::Skip(SkipReason::AutomatedTurn)
        } else if dwelling {
            PollDecision::Skip(SkipReason::Dwelling)
        } else if self.in_flight {
            PollDecision::Skip(SkipReason::InFlight)
        } else {
            PollDecision::Fetch
        };

        match decision {
            PollDecision::Fetch => self.in_flight = true,
            PollDecision::Skip(reason) => trace!(?reason, "Poll tick skipped"),
        }
        decision
    }

    pub fn completed(&mut self) {
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}
