use reelquest_execution::{AuthError, AuthService, User};

/// Local identity: signing in always succeeds as the configured player.
///
/// Sessions start signed out, so progress is only loaded and saved after an
/// explicit `login`.
#[derive(Clone, Debug)]
pub struct LocalAuth {
    name: String,
    signed_in: bool,
}

impl LocalAuth {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signed_in: false,
        }
    }
}

impl AuthService for LocalAuth {
    async fn is_signed_in(&self) -> Result<bool, AuthError> {
        Ok(self.signed_in)
    }

    async fn current_user(&self) -> Result<User, AuthError> {
        if !self.signed_in {
            return Err(AuthError::NotSignedIn);
        }
        Ok(User::new(self.name.as_str()))
    }

    async fn sign_in_interactive(&mut self) -> Result<(), AuthError> {
        self.signed_in = true;
        Ok(())
    }

    async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.signed_in = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session() {
        let mut auth = LocalAuth::new("mira");
        assert!(!auth.is_signed_in().await.unwrap());
        assert_eq!(auth.current_user().await, Err(AuthError::NotSignedIn));

        auth.sign_in_interactive().await.unwrap();
        assert_eq!(auth.current_user().await.unwrap().display_name(), "mira");

        auth.sign_out().await.unwrap();
        assert!(!auth.is_signed_in().await.unwrap());
    }
}
