//! Session credentials shared with the upstream HTTP client.

use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::info;

type UnauthorizedCallback = Arc<dyn Fn() + Send + Sync>;

/// Capability interface the HTTP client needs from the session.
pub trait SessionAuth: Send + Sync + fmt::Debug {
    /// Bearer token to attach, if logged in.
    fn token(&self) -> Option<String>;

    /// Drop the stored credentials.
    fn clear_session(&self);

    /// Register a callback fired when the backend rejects the credentials.
    fn on_unauthorized(&self, callback: Box<dyn Fn() + Send + Sync>);

    /// Handle a 401: clear the session, then notify every registered callback.
    fn handle_unauthorized(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// In-process session holding an optional bearer token.
#[derive(Default)]
pub struct AuthContext {
    token: RwLock<Option<String>>,
    callbacks: RwLock<Vec<UnauthorizedCallback>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
            callbacks: RwLock::new(Vec::new()),
        }
    }

}

impl SessionAuth for AuthContext {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn clear_session(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    fn on_unauthorized(&self, callback: Box<dyn Fn() + Send + Sync>) {
        if let Ok(mut guard) = self.callbacks.write() {
            guard.push(Arc::from(callback));
        }
    }

    fn handle_unauthorized(&self) {
        info!("Upstream rejected credentials, clearing session");
        self.clear_session();

        // Clone out of the lock so callbacks may re-register.
        let callbacks: Vec<UnauthorizedCallback> = match self.callbacks.read() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        for callback in callbacks {
            callback();
        }
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
