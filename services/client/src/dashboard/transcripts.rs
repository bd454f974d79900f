//! services/client/src/dashboard/transcripts.rs
//!
//! Owns the transcript collection and the tutorial generation action.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error};
use tutorials_core::domain::Transcript;
use tutorials_core::ports::TranscriptService;

use super::collection::Collection;
use super::notifications::Notifier;
use super::tutorials::TutorialsManager;

#[derive(Clone)]
pub struct TranscriptsManager {
    service: Arc<dyn TranscriptService>,
    transcripts: Collection<Transcript>,
    /// Transcript ids with a generation request in flight.
    generating: Arc<Mutex<HashSet<String>>>,
    tutorials: TutorialsManager,
    notifier: Notifier,
}

impl TranscriptsManager {
    /// `tutorials` is refetched whenever a generation succeeds.
    pub fn new(
        service: Arc<dyn TranscriptService>,
        tutorials: TutorialsManager,
        notifier: Notifier,
    ) -> Self {
        Self {
            service,
            transcripts: Collection::new("transcripts"),
            generating: Arc::new(Mutex::new(HashSet::new())),
            tutorials,
            notifier,
        }
    }

    pub async fn mount(&self) {
        let service = Arc::clone(&self.service);
        self.transcripts
            .mount_with(|| async move { service.list_transcripts().await })
            .await;
    }

    pub async fn refetch(&self) -> bool {
        let service = Arc::clone(&self.service);
        self.transcripts
            .refetch_with(|| async move { service.list_transcripts().await })
            .await
    }

    pub async fn transcripts(&self) -> Vec<Transcript> {
        self.transcripts.items().await
    }

    pub async fn is_loading(&self) -> bool {
        self.transcripts.is_loading().await
    }

    pub fn is_generating(&self, transcript_id: &str) -> bool {
        self.markers().contains(transcript_id)
    }

    pub fn generating_ids(&self) -> HashSet<String> {
        self.markers().clone()
    }

    /// Requests a tutorial for `transcript_id`.
    ///
    /// Only that transcript is marked busy, so requests for different
    /// transcripts may run side by side. A second request for an id that is
    /// already in flight is ignored.
    pub async fn generate(&self, transcript_id: &str) -> bool {
        if !self.markers().insert(transcript_id.to_string()) {
            debug!(transcript_id, "Generation already in progress");
            return false;
        }

        let result = self.service.generate_tutorial(transcript_id).await;
        self.markers().remove(transcript_id);

        match result {
            Ok(()) => {
                self.notifier.success("Tutorial generated successfully");
                self.tutorials.refetch().await;
                true
            }
            Err(e) => {
                error!(transcript_id, "Tutorial generation failed: {}", e);
                self.notifier.error("Tutorial generation failed");
                false
            }
        }
    }

    fn markers(&self) -> MutexGuard<'_, HashSet<String>> {
        self.generating
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
