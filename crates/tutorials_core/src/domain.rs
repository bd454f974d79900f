//! crates/tutorials_core/src/domain.rs
//!
//! Defines the pure, core data structures for the tutorials client.
//! These structs are independent of any transport or serialization format;
//! identifiers are opaque strings assigned by the backend.

use chrono::{DateTime, Utc};

/// The authenticated account, as reported by the backend's OAuth provider.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub github_id: String,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
}

/// Result of an authentication status check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub user: Option<User>,
    pub login_url: Option<String>,
}

/// A single recognised phrase inside a transcript.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Phrase {
    pub text: String,
    pub locale: Option<String>,
    pub confidence: Option<f64>,
}

/// An uploaded conversation transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub id: String,
    pub owner: Option<User>,
    pub filename: String,
    pub video_url: Option<String>,
    /// When the source conversation was recorded.
    pub timestamp: DateTime<Utc>,
    /// 10,000,000 ticks = 1 second.
    pub duration_in_ticks: i64,
    pub phrases: Vec<Phrase>,
    /// When the transcript was uploaded.
    pub created_at: DateTime<Utc>,
}

impl Transcript {
    /// Sort key: collections list the most recently uploaded first.
    pub fn recency(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A segment of the source video attached to a step, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoClip {
    pub start: f64,
    pub end: f64,
    pub file_url: Option<String>,
}

/// One instruction of a tutorial. `index` is the 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub index: u32,
    pub text: String,
    pub timestamp: Option<f64>,
    pub video_clip: Option<VideoClip>,
}

impl Step {
    pub fn new(index: u32, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            timestamp: None,
            video_clip: None,
        }
    }
}

/// A tutorial generated from exactly one transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Tutorial {
    pub id: String,
    pub transcript_id: String,
    /// Filename of the source transcript, when the backend nests it.
    pub transcript_filename: Option<String>,
    pub title: String,
    pub introduction: String,
    pub steps: Vec<Step>,
    pub tips: Vec<String>,
    pub summary: String,
    /// Human readable read time, e.g. "5 minutes".
    pub duration_estimate: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Tutorial {
    /// Sort key: collections list the most recently updated first.
    pub fn recency(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Appends an empty step at the end.
    pub fn add_step(&mut self) -> &mut Step {
        let index = self.steps.len() as u32 + 1;
        self.steps.push(Step::new(index, ""));
        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    /// Removes the step at the zero-based `position` and renumbers the rest
    /// so indices stay contiguous from 1.
    pub fn remove_step(&mut self, position: usize) -> Option<Step> {
        if position >= self.steps.len() {
            return None;
        }
        let removed = self.steps.remove(position);
        self.renumber_steps();
        Some(removed)
    }

    /// Detaches the video clip from the step at the zero-based `position`.
    pub fn remove_video(&mut self, position: usize) -> Option<VideoClip> {
        self.steps.get_mut(position).and_then(|s| s.video_clip.take())
    }

    pub fn renumber_steps(&mut self) {
        for (position, step) in self.steps.iter_mut().enumerate() {
            step.index = position as u32 + 1;
        }
    }

    pub fn has_video_content(&self) -> bool {
        self.steps
            .iter()
            .any(|s| s.video_clip.as_ref().is_some_and(|c| c.file_url.is_some()))
    }

    /// Every clip URL carried by a step, paired with its file name.
    pub fn video_clips(&self) -> Vec<ClipFile> {
        self.steps
            .iter()
            .filter_map(|s| s.video_clip.as_ref()?.file_url.as_deref())
            .map(|url| ClipFile {
                file_name: clip_file_name(url).to_string(),
                url: url.to_string(),
            })
            .collect()
    }
}

/// A clip referenced by a tutorial step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipFile {
    pub file_name: String,
    pub url: String,
}

/// Last path segment of a clip URL, or the URL itself when it has none.
pub fn clip_file_name(url: &str) -> &str {
    match url.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => url,
    }
}

/// Whether `id` is safe to splice into a URL path or a file name: non-empty
/// and made only of ASCII letters, digits, `-` and `_`. Backend ids are UUIDs.
pub fn is_plain_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A local file about to be sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Multipart upload: a required transcript JSON and an optional video.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptUpload {
    pub transcript: FileUpload,
    pub video: Option<FileUpload>,
}
