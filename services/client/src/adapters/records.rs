//! services/client/src/adapters/records.rs
//!
//! Wire representations of the backend's JSON payloads. Every record converts
//! into its core domain type with `to_domain()`; this is the only place where
//! legacy or loosely-typed shapes (plain-string steps, nested vs. id
//! references, `examples` vs. `tips`) are normalised.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tutorials_core::domain::{
    AuthStatus, Phrase, Step, Transcript, Tutorial, User, VideoClip,
};

//=========================================================================================
// Users and Authentication
//=========================================================================================

#[derive(Debug, Deserialize)]
pub struct UserRecord {
    id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    github_id: String,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    profile_url: Option<String>,
}
impl UserRecord {
    pub fn to_domain(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            github_id: self.github_id,
            avatar_url: self.avatar_url.filter(|u| !u.is_empty()),
            profile_url: self.profile_url.filter(|u| !u.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthStatusRecord {
    #[serde(default)]
    authenticated: bool,
    #[serde(default)]
    user: Option<UserRecord>,
    #[serde(default)]
    login_url: Option<String>,
}
impl AuthStatusRecord {
    pub fn to_domain(self) -> AuthStatus {
        AuthStatus {
            authenticated: self.authenticated,
            user: self.user.map(UserRecord::to_domain),
            login_url: self.login_url,
        }
    }
}

/// The owner of a transcript is either nested or referenced by id. A bare id
/// carries nothing the client shows, so it is skipped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserRef {
    Nested(UserRecord),
    Id(IgnoredAny),
}

//=========================================================================================
// Transcripts
//=========================================================================================

#[derive(Debug, Deserialize)]
pub struct PhraseRecord {
    #[serde(default)]
    text: String,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}
impl PhraseRecord {
    fn to_domain(self) -> Phrase {
        Phrase {
            text: self.text,
            locale: self.locale,
            confidence: self.confidence,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranscriptRecord {
    id: String,
    #[serde(default)]
    user: Option<UserRef>,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    video_file: Option<String>,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    duration_in_ticks: i64,
    #[serde(default)]
    phrases: Vec<PhraseRecord>,
    created_at: DateTime<Utc>,
}
impl TranscriptRecord {
    pub fn to_domain(self) -> Transcript {
        let owner = match self.user {
            Some(UserRef::Nested(user)) => Some(user.to_domain()),
            Some(UserRef::Id(_)) | None => None,
        };
        Transcript {
            id: self.id,
            owner,
            filename: self.filename,
            video_url: self.video_file.filter(|v| !v.is_empty()),
            timestamp: self.timestamp,
            duration_in_ticks: self.duration_in_ticks,
            phrases: self.phrases.into_iter().map(PhraseRecord::to_domain).collect(),
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// Tutorials
//=========================================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoClipRecord {
    #[serde(default)]
    start: f64,
    #[serde(default)]
    end: f64,
    #[serde(default)]
    file_url: Option<String>,
}
impl VideoClipRecord {
    fn to_domain(self) -> VideoClip {
        VideoClip {
            start: self.start,
            end: self.end,
            file_url: self.file_url.filter(|u| !u.is_empty()),
        }
    }

    fn from_domain(clip: &VideoClip) -> Self {
        Self {
            start: clip.start,
            end: clip.end,
            file_url: clip.file_url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StructuredStepRecord {
    #[serde(default)]
    index: Option<u32>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    timestamp: Option<f64>,
    #[serde(default)]
    video_clip: Option<VideoClipRecord>,
}

/// Older tutorials store steps as bare strings; newer ones as objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StepRecord {
    Text(String),
    Structured(StructuredStepRecord),
    Other(Value),
}
impl StepRecord {
    /// `position` is the 1-based slot used when the record carries no index.
    fn to_domain(self, position: u32) -> Step {
        match self {
            StepRecord::Text(text) => Step::new(position, text),
            StepRecord::Structured(s) => Step {
                index: s.index.filter(|i| *i > 0).unwrap_or(position),
                text: s.text.unwrap_or_default(),
                timestamp: s.timestamp,
                video_clip: s.video_clip.map(VideoClipRecord::to_domain),
            },
            StepRecord::Other(Value::Null) => Step::new(position, ""),
            StepRecord::Other(value) => Step::new(position, value.to_string()),
        }
    }
}

/// The source transcript is either nested or referenced by id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptRef {
    Nested(Box<TranscriptRecord>),
    Id(String),
}

#[derive(Debug, Deserialize)]
pub struct TutorialRecord {
    id: String,
    transcript: TranscriptRef,
    #[serde(default)]
    title: String,
    #[serde(default)]
    introduction: String,
    #[serde(default)]
    steps: Vec<StepRecord>,
    #[serde(default, alias = "examples")]
    tips: Vec<String>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    duration_estimate: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}
impl TutorialRecord {
    pub fn to_domain(self) -> Tutorial {
        let (transcript_id, transcript_filename) = match self.transcript {
            TranscriptRef::Nested(t) => (t.id, Some(t.filename).filter(|f| !f.is_empty())),
            TranscriptRef::Id(id) => (id, None),
        };
        let steps = self
            .steps
            .into_iter()
            .zip(1u32..)
            .map(|(record, position)| record.to_domain(position))
            .collect();
        Tutorial {
            id: self.id,
            transcript_id,
            transcript_filename,
            title: self.title,
            introduction: self.introduction,
            steps,
            tips: self.tips,
            summary: self.summary,
            duration_estimate: self.duration_estimate.filter(|d| !d.is_empty()),
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

//=========================================================================================
// Outgoing Payloads
//=========================================================================================

#[derive(Debug, Serialize)]
pub struct StepUpdateRecord<'a> {
    index: u32,
    text: &'a str,
    timestamp: Option<f64>,
    video_clip: Option<VideoClipRecord>,
}

/// PATCH body for a tutorial: only the user-editable fields.
#[derive(Debug, Serialize)]
pub struct TutorialUpdateRecord<'a> {
    title: &'a str,
    introduction: &'a str,
    steps: Vec<StepUpdateRecord<'a>>,
    tips: &'a [String],
    summary: &'a str,
    duration_estimate: &'a str,
    tags: &'a [String],
}
impl<'a> TutorialUpdateRecord<'a> {
    pub fn from_domain(tutorial: &'a Tutorial) -> Self {
        Self {
            title: &tutorial.title,
            introduction: &tutorial.introduction,
            steps: tutorial
                .steps
                .iter()
                .map(|s| StepUpdateRecord {
                    index: s.index,
                    text: &s.text,
                    timestamp: s.timestamp,
                    video_clip: s.video_clip.as_ref().map(VideoClipRecord::from_domain),
                })
                .collect(),
            tips: &tutorial.tips,
            summary: &tutorial.summary,
            duration_estimate: tutorial.duration_estimate.as_deref().unwrap_or(""),
            tags: &tutorial.tags,
        }
    }
}
