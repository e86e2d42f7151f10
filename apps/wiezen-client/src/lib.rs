#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod remote;
pub mod render;
pub mod sync;
pub mod telemetry;
pub mod transition;
pub mod view;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{RemoteConfig, SyncTimings};
pub use domain::{Bid, CardId, GameSnapshot, Phase, Player, PlayerId, Roster, Suit};
pub use error::ClientError;
pub use remote::{HttpRemote, RemoteGame};
pub use render::{RenderFrame, Renderer};
pub use sync::{Command, SessionConfig, SessionHandle, TableSession};
pub use transition::{TableLayout, TrickAreaUpdate};
pub use view::TableView;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
