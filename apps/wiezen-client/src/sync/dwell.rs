//! Keeps a just-completed trick on the table for a fixed window.

use crate::domain::GameSnapshot;

use super::schedule::Deferred;

/// Identifies one dwell window. Timer events carrying an older token are
/// stale and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DwellToken(u64);

#[derive(Debug)]
struct ActiveDwell {
    token: DwellToken,
    round_number: u32,
    trick_index: u32,
    timer: Option<Deferred>,
}

/// At most one window is open at a time.
#[derive(Debug, Default)]
pub struct DwellScheduler {
    active: Option<ActiveDwell>,
    issued: u64,
}

impl DwellScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window pinned to the given round and trick index. Any window
    /// still open is cancelled first.
    pub fn begin(&mut self, round_number: u32, trick_index: u32) -> DwellToken {
        self.cancel();
        self.issued += 1;
        let token = DwellToken(self.issued);
        self.active = Some(ActiveDwell {
            token,
            round_number,
            trick_index,
            timer: None,
        });
        token
    }

    /// Attach the timer that will close the window opened with `token`.
    pub fn arm(&mut self, token: DwellToken, timer: Deferred) {
        match self.active.as_mut() {
            Some(active) if active.token == token => active.timer = Some(timer),
            _ => timer.cancel(),
        }
    }

    /// Close the window if `token` is the open one. Returns false for stale
    /// tokens.
    pub fn finish(&mut self, token: DwellToken) -> bool {
        match &self.active {
            Some(active) if active.token == token => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(timer) = self.active.take().and_then(|a| a.timer) {
            timer.cancel();
        }
    }

    pub fn is_dwelling(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `snapshot` may be applied right now. Outside a window every
    /// snapshot is admitted; inside one only snapshots of the same round and
    /// trick index are.
    pub fn admits(&self, snapshot: &GameSnapshot) -> bool {
        let Some(active) = &self.active else {
            return true;
        };
        snapshot.round_number() == Some(active.round_number)
            && snapshot.trick_index() == Some(active.trick_index)
    }
}
