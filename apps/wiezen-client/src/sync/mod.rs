//! Synchronization core: keeps the local table in step with the rules
//! engine and drives automated turns.

pub mod differ;
pub mod dwell;
pub mod orchestrator;
pub mod polling;
pub mod schedule;
pub mod session;
pub mod state;
pub mod turn;


pub use differ::{DiffOutcome, SnapshotDiffer};
pub use orchestrator::{TurnPlan, TurnSlot};
pub use session::{Command, SessionConfig, SessionEvent, SessionHandle, TableSession};
pub use state::SyncState;
pub use turn::{acting_party, ActingParty, TurnAction};
