pub mod remote;
pub mod timing;

pub use remote::RemoteConfig;
pub use timing::SyncTimings;
