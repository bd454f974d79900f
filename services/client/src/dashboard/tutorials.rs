//! services/client/src/dashboard/tutorials.rs
//!
//! Owns the tutorial collection and the open-tutorial selection, and exposes
//! the save, delete and export actions. Every mutation is followed by a full
//! refetch, and the selection is reconciled after each refetch that lands.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use tutorials_core::domain::Tutorial;
use tutorials_core::markdown::MediaLinks;
use tutorials_core::ports::{ConfirmationPrompt, TutorialService};

use super::collection::Collection;
use super::notifications::Notifier;
use super::selection::Selection;
use crate::error::ClientError;
use crate::export;

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this tutorial? This action cannot be undone.";

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    Deleted,
    Failed,
}

#[derive(Clone)]
pub struct TutorialsManager {
    service: Arc<dyn TutorialService>,
    tutorials: Collection<Tutorial>,
    selection: Arc<RwLock<Selection>>,
    notifier: Notifier,
    confirm: Arc<dyn ConfirmationPrompt>,
}

impl TutorialsManager {
    pub fn new(
        service: Arc<dyn TutorialService>,
        notifier: Notifier,
        confirm: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        Self {
            service,
            tutorials: Collection::new("tutorials"),
            selection: Arc::new(RwLock::new(Selection::Closed)),
            notifier,
            confirm,
        }
    }

    //=====================================================================================
    // Collection
    //=====================================================================================

    pub async fn mount(&self) {
        let service = Arc::clone(&self.service);
        self.tutorials
            .mount_with(|| async move { service.list_tutorials().await })
            .await;
        self.reconcile_selection().await;
    }

    /// Reloads the collection; on success the open tutorial is reconciled.
    pub async fn refetch(&self) -> bool {
        let service = Arc::clone(&self.service);
        let replaced = self
            .tutorials
            .refetch_with(|| async move { service.list_tutorials().await })
            .await;
        if replaced {
            self.reconcile_selection().await;
        }
        replaced
    }

    pub async fn tutorials(&self) -> Vec<Tutorial> {
        self.tutorials.items().await
    }

    pub async fn is_loading(&self) -> bool {
        self.tutorials.is_loading().await
    }

    pub async fn find(&self, id: &str) -> Option<Tutorial> {
        self.tutorials.find(|t| t.id == id).await
    }

    async fn reconcile_selection(&self) {
        let items = self.tutorials.items().await;
        if self.selection.write().await.reconcile(&items) {
            info!("Open tutorial refreshed from the collection");
        }
    }

    //=====================================================================================
    // Selection
    //=====================================================================================

    /// Opens the tutorial `id` from the current collection.
    pub async fn open(&self, id: &str) -> bool {
        let items = self.tutorials.items().await;
        self.selection.write().await.open(id, &items)
    }

    pub async fn close(&self) {
        self.selection.write().await.close();
    }

    pub async fn selected(&self) -> Option<Tutorial> {
        self.selection.read().await.current().cloned()
    }

    //=====================================================================================
    // Actions
    //=====================================================================================

    /// Submits a locally edited tutorial.
    ///
    /// On success the open tutorial (if it is this one) shows the submitted
    /// version at once, then the collection is refetched.
    pub async fn save(&self, tutorial: Tutorial) -> bool {
        match self.service.update_tutorial(&tutorial).await {
            Ok(()) => {
                self.selection.write().await.apply_optimistic(&tutorial);
                self.notifier.success("Tutorial updated successfully");
                self.refetch().await;
                true
            }
            Err(e) => {
                error!(tutorial_id = %tutorial.id, "Tutorial update failed: {}", e);
                self.notifier.error("Tutorial update failed");
                false
            }
        }
    }

    /// Deletes a tutorial after interactive confirmation.
    pub async fn remove(&self, tutorial_id: &str) -> DeleteOutcome {
        if !self.confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        match self.service.delete_tutorial(tutorial_id).await {
            Ok(()) => {
                self.selection.write().await.close_if(tutorial_id);
                self.notifier.success("Tutorial deleted successfully");
                self.refetch().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(tutorial_id, "Tutorial deletion failed: {}", e);
                self.notifier.error("Tutorial deletion failed");
                DeleteOutcome::Failed
            }
        }
    }

    /// Writes the Markdown rendering of `tutorial` into `dir`. No network call.
    pub async fn export_markdown(
        &self,
        tutorial: &Tutorial,
        dir: &Path,
        media: &MediaLinks,
    ) -> Option<PathBuf> {
        match export::write_markdown(tutorial, dir, media).await {
            Ok(path) => Some(path),
            Err(e) => {
                error!(tutorial_id = %tutorial.id, "Markdown export failed: {}", e);
                self.notifier.error("Markdown export failed");
                None
            }
        }
    }

    /// Downloads the packaged archive and saves it into `dir`.
    pub async fn export_archive(&self, tutorial_id: &str, dir: &Path) -> Option<PathBuf> {
        let result: Result<PathBuf, ClientError> = async {
            let bytes = self.service.download_archive(tutorial_id).await?;
            export::write_archive(&bytes, tutorial_id, dir).await
        }
        .await;

        match result {
            Ok(path) => Some(path),
            Err(e) => {
                error!(tutorial_id, "Archive export failed: {}", e);
                self.notifier.error("Archive export failed");
                None
            }
        }
    }
}
