//! Test-only helpers shared by the client's integration tests.

pub mod logging;
