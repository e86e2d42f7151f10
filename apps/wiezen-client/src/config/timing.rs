use std::env;
use std::time::Duration;

use crate::error::ClientError;

/// Named delays that pace the table.
///
/// The thinking delays differ on purpose: a card play should look like a
/// harder decision than a bid to whoever watches the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTimings {
    /// Cadence of the state poll.
    pub poll_interval: Duration,
    /// How long a completed trick stays on the table.
    pub trick_dwell: Duration,
    /// Simulated thinking time before an automated bid.
    pub bid_thinking: Duration,
    /// Simulated thinking time before an automated card play.
    pub play_thinking: Duration,
    /// Second re-synchronization after a play that completed a trick.
    pub trick_settle_resync: Duration,
    /// Pause before re-checking the turn once an automated turn finished.
    pub turn_recheck: Duration,
}

impl Default for SyncTimings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(2000),
            trick_dwell: Duration::from_millis(3000),
            bid_thinking: Duration::from_millis(1000),
            play_thinking: Duration::from_millis(1500),
            trick_settle_resync: Duration::from_millis(2000),
            turn_recheck: Duration::from_millis(100),
        }
    }
}

impl SyncTimings {
    /// Zero delays everywhere except the poll cadence, which tokio requires
    /// to be non-zero.
    pub fn immediate() -> Self {
        Self {
            poll_interval: Duration::from_millis(1),
            trick_dwell: Duration::ZERO,
            bid_thinking: Duration::ZERO,
            play_thinking: Duration::ZERO,
            trick_settle_resync: Duration::ZERO,
            turn_recheck: Duration::ZERO,
        }
    }

    /// Reference timings with optional millisecond overrides from the
    /// environment.
    pub fn from_env() -> Result<Self, ClientError> {
        let defaults = Self::default();
        let timings = Self {
            poll_interval: millis_var("WIEZEN_POLL_MS", defaults.poll_interval)?,
            trick_dwell: millis_var("WIEZEN_DWELL_MS", defaults.trick_dwell)?,
            bid_thinking: millis_var("WIEZEN_BID_THINK_MS", defaults.bid_thinking)?,
            play_thinking: millis_var("WIEZEN_PLAY_THINK_MS", defaults.play_thinking)?,
            trick_settle_resync: millis_var(
                "WIEZEN_SETTLE_RESYNC_MS",
                defaults.trick_settle_resync,
            )?,
            turn_recheck: millis_var("WIEZEN_RECHECK_MS", defaults.turn_recheck)?,
        };

        if timings.poll_interval.is_zero() {
            return Err(ClientError::config("WIEZEN_POLL_MS must be greater than zero"));
        }
        Ok(timings)
    }
}

fn millis_var(name: &str, default: Duration) -> Result<Duration, ClientError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().map(Duration::from_millis).map_err(|_| {
            ClientError::config(format!(
                "Environment variable '{name}' must be a number of milliseconds, got '{raw}'"
            ))
        }),
        Err(_) => Ok(default),
    }
}
