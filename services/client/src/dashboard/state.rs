//! services/client/src/dashboard/state.rs
//!
//! Defines the dashboard's shared state: one manager per resource, wired to a
//! single backend and a single notification slot.

use crate::adapters::{CookieCredentials, HttpApiAdapter};
use crate::config::Config;
use crate::error::ClientError;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tutorials_core::ports::{AuthService, ConfirmationPrompt, TranscriptService, TutorialService};

use super::auth::AuthManager;
use super::notifications::Notifier;
use super::transcripts::TranscriptsManager;
use super::tutorials::TutorialsManager;
use super::upload::UploadManager;

//=========================================================================================
// Dashboard (Shared Across All Actions)
//=========================================================================================

/// Created once at startup; cloning is cheap and every clone shares state.
#[derive(Clone)]
pub struct Dashboard {
    pub auth: AuthManager,
    pub transcripts: TranscriptsManager,
    pub tutorials: TutorialsManager,
    pub uploads: UploadManager,
    pub notifier: Notifier,
}

impl Dashboard {
    /// Wires every manager to `api`.
    pub fn new<A>(api: Arc<A>, confirm: Arc<dyn ConfirmationPrompt>, ttl: Duration) -> Self
    where
        A: AuthService + TranscriptService + TutorialService + 'static,
    {
        let notifier = Notifier::new(ttl);
        let auth = AuthManager::new(api.clone());
        let tutorials = TutorialsManager::new(api.clone(), notifier.clone(), confirm);
        let transcripts = TranscriptsManager::new(api.clone(), tutorials.clone(), notifier.clone());
        let uploads = UploadManager::new(api, transcripts.clone(), notifier.clone());
        Self {
            auth,
            transcripts,
            tutorials,
            uploads,
            notifier,
        }
    }

    /// Builds a dashboard talking to the backend named in `config`.
    pub fn connect(config: &Config, confirm: Arc<dyn ConfirmationPrompt>) -> Result<Self, ClientError> {
        let credentials = Arc::new(CookieCredentials::new(
            config.session_cookies.clone(),
            config.csrf_cookie_name.clone(),
        ));
        let api = Arc::new(HttpApiAdapter::new(config.api_base_url.clone(), credentials)?);
        info!(base_url = %api.base_url(), "Backend adapter ready");
        Ok(Self::new(api, confirm, config.notification_ttl))
    }

    /// Loads both collections once, concurrently.
    pub async fn mount(&self) {
        tokio::join!(self.transcripts.mount(), self.tutorials.mount());
    }
}
