//! Authentication session
//!
//! One `Session` is created when the app starts and handed by reference to
//! whatever needs it. Logging in happens after the login form validates;
//! credential exchange with the server is not part of this client.

use crate::credentials::CredentialStore;

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<String>,
    has_stored_token: bool,
}

impl Session {
    /// Start a session, noting whether a token is already stored
    pub fn start(credentials: &dyn CredentialStore) -> Self {
        let has_stored_token = credentials.get_token().is_some();
        tracing::info!(has_stored_token, "session started");
        Self {
            user: None,
            has_stored_token,
        }
    }

    /// Establish the session for `email`
    pub fn login(&mut self, email: &str) {
        tracing::info!("login as {email}");
        self.user = Some(email.to_string());
    }

    /// Tear the session down
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("logout {user}");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn has_stored_token(&self) -> bool {
        self.has_stored_token
    }
}
