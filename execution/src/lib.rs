pub mod achievements;
pub mod auth;
pub mod config;
pub mod controller;
pub mod payout;
pub mod persistence;
pub mod progression;
pub mod reels;
pub mod store;
pub mod ui;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
mod integration_tests;

pub use auth::{AuthError, AuthService, User};
pub use config::GameConfig;
pub use controller::{Controller, PendingSpin, SpinReport};
pub use persistence::Gateway;
pub use reels::{ReelTable, RngSource, UniformSource};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use ui::{Delay, UiCommand, UiSink};
