//! services/client/src/dashboard/auth.rs
//!
//! Session state: who is signed in, and the login/logout entry points.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use tutorials_core::domain::User;
use tutorials_core::ports::{AuthService, PortResult};

#[derive(Clone)]
pub struct AuthManager {
    service: Arc<dyn AuthService>,
    user: Arc<RwLock<Option<User>>>,
    loading: Arc<RwLock<bool>>,
}

impl AuthManager {
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self {
            service,
            user: Arc::new(RwLock::new(None)),
            loading: Arc::new(RwLock::new(true)),
        }
    }

    /// Asks the backend who is signed in. A failed check leaves the client
    /// unauthenticated.
    pub async fn load(&self) -> Option<User> {
        *self.loading.write().await = true;
        let status = self.service.auth_status().await;
        let user = if status.authenticated { status.user } else { None };
        match &user {
            Some(u) => info!(username = %u.username, "Authenticated"),
            None => info!("Not authenticated"),
        }
        *self.user.write().await = user.clone();
        *self.loading.write().await = false;
        user
    }

    pub async fn user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    pub async fn is_loading(&self) -> bool {
        *self.loading.read().await
    }

    pub fn login_url(&self) -> String {
        self.service.login_url()
    }

    /// Ends the backend session; the cached user is dropped only on success.
    pub async fn logout(&self) -> PortResult<()> {
        match self.service.logout().await {
            Ok(()) => {
                *self.user.write().await = None;
                info!("Logged out");
                Ok(())
            }
            Err(e) => {
                error!("Logout failed: {}", e);
                Err(e)
            }
        }
    }
}
