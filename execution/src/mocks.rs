use crate::{
    auth::{AuthError, AuthService, User},
    config::GameConfig,
    controller::Controller,
    reels::UniformSource,
    store::{KeyValueStore, MemoryStore, StoreError},
    ui::{Delay, UiCommand},
};
use std::{cell::Cell, time::Duration};

/// Replays a fixed list of uniform values, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct Sequence {
    values: Vec<f64>,
    index: usize,
}

impl Sequence {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "sequence needs at least one value");
        Self { values, index: 0 }
    }

    /// Number of values consumed so far
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl UniformSource for Sequence {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}

/// Uniform values that land on each catalog symbol, for building outcomes.
pub mod draws {
    // Midpoints of each symbol's slice of the default table (total weight 45)
    pub const DRAGON: f64 = 0.5 / 45.0;
    pub const CROWN: f64 = 2.0 / 45.0;
    pub const WIZARD: f64 = 4.5 / 45.0;
    pub const DIAMOND: f64 = 8.0 / 45.0;
    pub const CRYSTAL_BALL: f64 = 12.5 / 45.0;
    pub const SWORD: f64 = 18.0 / 45.0;
    pub const CASTLE: f64 = 24.5 / 45.0;
    pub const SHIELD: f64 = 32.0 / 45.0;
    pub const BLADE: f64 = 40.5 / 45.0;
}

/// Returns immediately, counting how often it was asked to wait.
#[derive(Debug, Default)]
pub struct NoDelay {
    waits: Cell<usize>,
}

impl NoDelay {
    pub fn waits(&self) -> usize {
        self.waits.get()
    }
}

impl Delay for NoDelay {
    async fn sleep(&self, _: Duration) {
        self.waits.set(self.waits.get() + 1);
    }
}

/// Scriptable identity provider.
#[derive(Clone, Debug)]
pub struct MockAuth {
    pub signed_in: bool,
    pub name: String,
    /// Every call fails with [AuthError::Unavailable]
    pub offline: bool,
    /// Interactive sign-in is dismissed by the player
    pub cancel_sign_in: bool,
}

impl MockAuth {
    pub fn signed_out(name: &str) -> Self {
        Self {
            signed_in: false,
            name: name.to_string(),
            offline: false,
            cancel_sign_in: false,
        }
    }

    pub fn signed_in(name: &str) -> Self {
        Self {
            signed_in: true,
            ..Self::signed_out(name)
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::signed_out("")
        }
    }

    fn check(&self) -> Result<(), AuthError> {
        if self.offline {
            return Err(AuthError::Unavailable("mock offline".to_string()));
        }
        Ok(())
    }
}

impl AuthService for MockAuth {
    async fn is_signed_in(&self) -> Result<bool, AuthError> {
        self.check()?;
        Ok(self.signed_in)
    }

    async fn current_user(&self) -> Result<User, AuthError> {
        self.check()?;
        if !self.signed_in {
            return Err(AuthError::NotSignedIn);
        }
        Ok(User::new(self.name.clone()))
    }

    async fn sign_in_interactive(&mut self) -> Result<(), AuthError> {
        self.check()?;
        if self.cancel_sign_in {
            return Err(AuthError::Cancelled);
        }
        self.signed_in = true;
        Ok(())
    }

    async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.check()?;
        self.signed_in = false;
        Ok(())
    }
}

/// A store whose backend is always down.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    async fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("mock failure".to_string()))
    }

    async fn set(&mut self, _: &str, _: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("mock failure".to_string()))
    }
}

pub type TestController<S = MemoryStore> =
    Controller<S, MockAuth, Vec<UiCommand>, Sequence, NoDelay>;

/// Creates a controller with scripted draws and a recording UI
pub fn create_controller(auth: MockAuth, draws: Vec<f64>) -> TestController {
    create_controller_with_store(MemoryStore::default(), auth, draws)
}

/// Creates a controller over a specific store
pub fn create_controller_with_store<S: KeyValueStore>(
    store: S,
    auth: MockAuth,
    draws: Vec<f64>,
) -> TestController<S> {
    Controller::new(
        GameConfig::default(),
        store,
        auth,
        Vec::new(),
        Sequence::new(draws),
        NoDelay::default(),
    )
}

/// Log lines dispatched to a recording UI
pub fn logs(commands: &[UiCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|command| match command {
            UiCommand::Log(line) => Some(line.as_str()),
            _ => None,
        })
        .collect()
}

/// Whether any log line contains `needle`
pub fn logged(commands: &[UiCommand], needle: &str) -> bool {
    logs(commands).iter().any(|line| line.contains(needle))
}
