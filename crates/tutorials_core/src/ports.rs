//! crates/tutorials_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the client's core logic.
//! The REST backend, the credential store and the interactive prompt all sit
//! behind these traits, so the dashboard layer never depends on a concrete
//! transport.

use crate::domain::{AuthStatus, Transcript, TranscriptUpload, Tutorial};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
    /// The request never completed (connection refused, DNS, TLS, ...).
    #[error("Request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status. `body` is the raw text.
    #[error("Request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
    /// The id cannot be used as a single URL path segment.
    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// How a failed action is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The resource already exists on the backend.
    Conflict,
    Failed,
}

const CONFLICT_MARKERS: [&str; 3] = ["duplicate", "unique", "already exists"];

impl PortError {
    /// Heuristic classification on the error text; the backend has no
    /// dedicated conflict status.
    pub fn failure_kind(&self) -> FailureKind {
        let text = match self {
            PortError::Rejected { body, .. } => body.as_str(),
            PortError::NotFound(msg) | PortError::Unexpected(msg) => msg.as_str(),
            PortError::Transport(_) | PortError::Unauthorized | PortError::InvalidId(_) => {
                return FailureKind::Failed
            }
        };
        if CONFLICT_MARKERS.iter().any(|m| text.contains(m)) {
            FailureKind::Conflict
        } else {
            FailureKind::Failed
        }
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Never fails hard: an unreachable backend reports "not authenticated".
    async fn auth_status(&self) -> AuthStatus;

    /// Browser navigation target that starts the OAuth flow.
    fn login_url(&self) -> String;

    async fn logout(&self) -> PortResult<()>;
}

#[async_trait]
pub trait TranscriptService: Send + Sync {
    async fn list_transcripts(&self) -> PortResult<Vec<Transcript>>;

    async fn upload_transcript(&self, upload: TranscriptUpload) -> PortResult<()>;

    /// Asks the backend to generate a tutorial from the transcript.
    async fn generate_tutorial(&self, transcript_id: &str) -> PortResult<()>;
}

#[async_trait]
pub trait TutorialService: Send + Sync {
    async fn list_tutorials(&self) -> PortResult<Vec<Tutorial>>;

    /// Sends the mutable fields of `tutorial`; id and timestamps are never sent.
    async fn update_tutorial(&self, tutorial: &Tutorial) -> PortResult<()>;

    async fn delete_tutorial(&self, tutorial_id: &str) -> PortResult<()>;

    /// Downloads the packaged archive (Markdown plus clips) for a tutorial.
    async fn download_archive(&self, tutorial_id: &str) -> PortResult<Vec<u8>>;
}

/// Supplies per-request credentials to the API gateway.
pub trait CredentialProvider: Send + Sync {
    /// CSRF token attached to every mutating request.
    fn csrf_token(&self) -> Option<String>;

    /// Session credentials replayed as a `Cookie` header.
    fn session_cookies(&self) -> Option<String>;
}

/// Interactive confirmation for irreversible actions.
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}
