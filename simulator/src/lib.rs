//! Terminal front end for the reelquest slot game.
//!
//! Wires the game controller to a JSON file store, a local identity, a
//! text renderer and the tokio timer, and drives it from line commands.

use rand::{rngs::StdRng, SeedableRng};
use reelquest_execution::{Controller, RngSource, StoreError};

pub mod auth;
pub mod config;
pub mod repl;
pub mod store;
pub mod terminal;

pub use auth::LocalAuth;
pub use config::{Config, ConfigError};
pub use repl::{Command, CommandError};
pub use store::FileStore;
pub use terminal::{Terminal, TokioDelay};

/// A game session playing in the terminal.
pub type Game = Controller<FileStore, LocalAuth, Terminal, RngSource<StdRng>, TokioDelay>;

/// Assemble a session from configuration. The store is opened but nothing
/// is loaded until the session initializes.
pub async fn build(config: &Config) -> Result<Game, StoreError> {
    let store = FileStore::open(&config.store_path).await?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(Controller::new(
        config.game.clone(),
        store,
        LocalAuth::new(config.player_name.as_str()),
        Terminal::stdout(),
        RngSource(rng),
        TokioDelay::new(config.animate),
    ))
}
