//! services/client/src/dashboard/upload.rs
//!
//! Sends a transcript (and optionally its recording) to the backend.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};
use tutorials_core::domain::{FileUpload, TranscriptUpload};
use tutorials_core::ports::{FailureKind, TranscriptService};

use super::notifications::Notifier;
use super::transcripts::TranscriptsManager;
use crate::error::ClientError;

#[derive(Clone)]
pub struct UploadManager {
    service: Arc<dyn TranscriptService>,
    transcripts: TranscriptsManager,
    notifier: Notifier,
    uploading: Arc<AtomicBool>,
}

impl UploadManager {
    pub fn new(
        service: Arc<dyn TranscriptService>,
        transcripts: TranscriptsManager,
        notifier: Notifier,
    ) -> Self {
        Self {
            service,
            transcripts,
            notifier,
            uploading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::SeqCst)
    }

    /// Uploads `transcript` with an optional `video`. On success the
    /// transcript list is refetched so the new entry shows up first.
    pub async fn upload(&self, transcript: FileUpload, video: Option<FileUpload>) -> bool {
        if self.uploading.swap(true, Ordering::SeqCst) {
            info!("An upload is already in progress");
            return false;
        }

        let with_video = video.is_some();
        info!(
            file_name = %transcript.file_name,
            with_video,
            "Uploading transcript"
        );
        let result = self
            .service
            .upload_transcript(TranscriptUpload { transcript, video })
            .await;
        self.uploading.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                self.notifier.success(if with_video {
                    "Transcript and video uploaded successfully"
                } else {
                    "Transcript uploaded successfully"
                });
                self.transcripts.refetch().await;
                true
            }
            Err(e) => {
                error!("Transcript upload failed: {}", e);
                match e.failure_kind() {
                    FailureKind::Conflict => self.notifier.error("Transcript already exists"),
                    FailureKind::Failed => self.notifier.error("Upload failed"),
                }
                false
            }
        }
    }
}

/// Reads a local file into an upload part named after the file.
pub async fn read_upload(path: &Path) -> Result<FileUpload, ClientError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ClientError::Internal(format!("Not a file path: {}", path.display())))?
        .to_string();
    Ok(FileUpload {
        content_type: content_type_for(path).to_string(),
        file_name,
        bytes,
    })
}

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") => "application/json",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        _ => "application/octet-stream",
    }
}
