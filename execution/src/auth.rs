use std::future::Future;
use thiserror::Error;

/// Failures reported by the identity provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
    #[error("sign-in cancelled")]
    Cancelled,
    #[error("no user is signed in")]
    NotSignedIn,
}

/// The signed-in player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    display_name: String,
}

impl User {
    /// Blank names fall back to "Player".
    pub fn new(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        let trimmed = display_name.trim();
        Self {
            display_name: if trimmed.is_empty() {
                "Player".to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// External identity provider.
pub trait AuthService {
    fn is_signed_in(&self) -> impl Future<Output = Result<bool, AuthError>>;
    fn current_user(&self) -> impl Future<Output = Result<User, AuthError>>;
    fn sign_in_interactive(&mut self) -> impl Future<Output = Result<(), AuthError>>;
    fn sign_out(&mut self) -> impl Future<Output = Result<(), AuthError>>;
}
