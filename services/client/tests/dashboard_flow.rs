//! End-to-end dashboard behaviour against an in-memory backend.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use client_lib::dashboard::{Dashboard, DeleteOutcome, NotificationKind};
use tutorials_core::markdown::{generate_markdown, MediaLinks};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tutorials_core::domain::{
    AuthStatus, FileUpload, Step, Transcript, TranscriptUpload, Tutorial, User,
};
use tutorials_core::ports::{
    AuthService, ConfirmationPrompt, PortError, PortResult, TranscriptService, TutorialService,
};

//=========================================================================================
// In-memory backend
//=========================================================================================

#[derive(Default)]
struct BackendState {
    transcripts: Vec<Transcript>,
    tutorials: Vec<Tutorial>,
    calls: Vec<String>,
    clock: i64,
    next_id: usize,
    fail_generation: bool,
    fail_listing: bool,
    /// Listing starts failing once an update has been accepted.
    fail_listing_after_update: bool,
    signed_in: bool,
}

impl BackendState {
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap() + ChronoDuration::seconds(self.clock)
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

#[derive(Default)]
struct FakeBackend {
    state: Mutex<BackendState>,
    /// When set, generation waits for a permit before answering.
    gate: Option<Semaphore>,
}

impl FakeBackend {
    fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    fn calls(&self) -> Vec<String> {
        self.with_state(|s| s.calls.clone())
    }
}

#[async_trait]
impl AuthService for FakeBackend {
    async fn auth_status(&self) -> AuthStatus {
        self.with_state(|s| AuthStatus {
            authenticated: s.signed_in,
            user: s.signed_in.then(|| User {
                id: "u-1".to_string(),
                username: "octo".to_string(),
                email: "octo@example.com".to_string(),
                github_id: "583231".to_string(),
                avatar_url: None,
                profile_url: None,
            }),
            login_url: None,
        })
    }

    fn login_url(&self) -> String {
        "http://backend.test/auth/login/github/".to_string()
    }

    async fn logout(&self) -> PortResult<()> {
        self.with_state(|s| s.signed_in = false);
        Ok(())
    }
}

#[async_trait]
impl TranscriptService for FakeBackend {
    async fn list_transcripts(&self) -> PortResult<Vec<Transcript>> {
        self.with_state(|s| {
            s.calls.push("list_transcripts".to_string());
            if s.fail_listing {
                return Err(PortError::Transport("connection refused".to_string()));
            }
            Ok(s.transcripts.clone())
        })
    }

    async fn upload_transcript(&self, upload: TranscriptUpload) -> PortResult<()> {
        self.with_state(|s| {
            s.calls.push(format!("upload {}", upload.transcript.file_name));
            if s.transcripts.iter().any(|t| t.filename == upload.transcript.file_name) {
                return Err(PortError::Rejected {
                    status: 400,
                    body: r#"{"filename":["transcript with this filename already exists."]}"#
                        .to_string(),
                });
            }
            let id = s.next_id("tr");
            let at = s.tick();
            s.transcripts.push(Transcript {
                id,
                owner: None,
                filename: upload.transcript.file_name,
                video_url: upload.video.map(|v| format!("/media/videos/{}", v.file_name)),
                timestamp: at,
                duration_in_ticks: 600_000_000,
                phrases: vec![],
                created_at: at,
            });
            Ok(())
        })
    }

    async fn generate_tutorial(&self, transcript_id: &str) -> PortResult<()> {
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .forget();
        }
        self.with_state(|s| {
            s.calls.push(format!("generate {}", transcript_id));
            if s.fail_generation {
                return Err(PortError::Rejected {
                    status: 500,
                    body: "model unavailable".to_string(),
                });
            }
            let filename = s
                .transcripts
                .iter()
                .find(|t| t.id == transcript_id)
                .map(|t| t.filename.clone())
                .ok_or_else(|| PortError::NotFound(transcript_id.to_string()))?;
            let id = s.next_id("tut");
            let at = s.tick();
            s.tutorials.push(Tutorial {
                id,
                transcript_id: transcript_id.to_string(),
                transcript_filename: Some(filename.clone()),
                title: format!("Walkthrough of {}", filename),
                introduction: "Intro".to_string(),
                steps: vec![Step::new(1, "Open the project"), Step::new(2, "Run it")],
                tips: vec![],
                summary: "Summary".to_string(),
                duration_estimate: Some("3 minutes".to_string()),
                tags: vec![],
                created_at: Some(at),
                updated_at: at,
            });
            Ok(())
        })
    }
}

#[async_trait]
impl TutorialService for FakeBackend {
    async fn list_tutorials(&self) -> PortResult<Vec<Tutorial>> {
        self.with_state(|s| {
            s.calls.push("list_tutorials".to_string());
            if s.fail_listing {
                return Err(PortError::Transport("connection refused".to_string()));
            }
            Ok(s.tutorials.clone())
        })
    }

    async fn update_tutorial(&self, tutorial: &Tutorial) -> PortResult<()> {
        self.with_state(|s| {
            s.calls.push(format!("update {}", tutorial.id));
            let at = s.tick();
            let stored = s
                .tutorials
                .iter_mut()
                .find(|t| t.id == tutorial.id)
                .ok_or_else(|| PortError::NotFound(tutorial.id.clone()))?;
            *stored = Tutorial {
                updated_at: at,
                ..tutorial.clone()
            };
            if s.fail_listing_after_update {
                s.fail_listing = true;
            }
            Ok(())
        })
    }

    async fn delete_tutorial(&self, tutorial_id: &str) -> PortResult<()> {
        self.with_state(|s| {
            s.calls.push(format!("delete {}", tutorial_id));
            let before = s.tutorials.len();
            s.tutorials.retain(|t| t.id != tutorial_id);
            if s.tutorials.len() == before {
                return Err(PortError::NotFound(tutorial_id.to_string()));
            }
            Ok(())
        })
    }

    async fn download_archive(&self, tutorial_id: &str) -> PortResult<Vec<u8>> {
        self.with_state(|s| s.calls.push(format!("download {}", tutorial_id)));
        Ok(b"PK\x05\x06".to_vec())
    }
}

//=========================================================================================
// Helpers
//=========================================================================================

struct ScriptedPrompt {
    answer: bool,
    asked: AtomicUsize,
}

impl ScriptedPrompt {
    fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            asked: AtomicUsize::new(0),
        })
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn confirm(&self, _message: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

fn dashboard(backend: &Arc<FakeBackend>, prompt: Arc<ScriptedPrompt>) -> Dashboard {
    Dashboard::new(backend.clone(), prompt, Duration::from_secs(3))
}

fn json_file(name: &str) -> FileUpload {
    FileUpload {
        file_name: name.to_string(),
        content_type: "application/json".to_string(),
        bytes: br#"{"phrases":[]}"#.to_vec(),
    }
}

fn notification(dashboard: &Dashboard) -> (String, NotificationKind) {
    let current = dashboard.notifier.current().expect("a notification is showing");
    (current.message, current.kind)
}

//=========================================================================================
// Tests
//=========================================================================================

#[tokio::test]
async fn upload_generate_edit_delete_round_trip() {
    let backend = Arc::new(FakeBackend::default());
    let prompt = ScriptedPrompt::answering(true);
    let dashboard = dashboard(&backend, prompt.clone());
    dashboard.mount().await;
    assert!(dashboard.transcripts.transcripts().await.is_empty());

    // An older transcript is already there; the new upload must list first.
    assert!(dashboard.uploads.upload(json_file("older.json"), None).await);
    assert!(dashboard.uploads.upload(json_file("demo.json"), None).await);
    assert_eq!(
        notification(&dashboard),
        ("Transcript uploaded successfully".to_string(), NotificationKind::Success)
    );
    let transcripts = dashboard.transcripts.transcripts().await;
    assert_eq!(transcripts[0].filename, "demo.json");
    let t1 = transcripts[0].id.clone();

    assert!(dashboard.transcripts.generate(&t1).await);
    assert!(!dashboard.transcripts.is_generating(&t1));
    assert_eq!(notification(&dashboard).0, "Tutorial generated successfully");
    let tutorials = dashboard.tutorials.tutorials().await;
    assert_eq!(tutorials.len(), 1);
    assert_eq!(tutorials[0].transcript_id, t1);

    let tutorial_id = tutorials[0].id.clone();
    assert!(dashboard.tutorials.open(&tutorial_id).await);
    let mut edited = dashboard.tutorials.selected().await.unwrap();
    edited.title = "New Title".to_string();
    assert!(dashboard.tutorials.save(edited).await);
    assert_eq!(notification(&dashboard).0, "Tutorial updated successfully");
    assert_eq!(dashboard.tutorials.selected().await.unwrap().title, "New Title");
    assert_eq!(dashboard.tutorials.find(&tutorial_id).await.unwrap().title, "New Title");

    assert_eq!(dashboard.tutorials.remove(&tutorial_id).await, DeleteOutcome::Deleted);
    assert_eq!(prompt.asked.load(Ordering::SeqCst), 1);
    assert_eq!(notification(&dashboard).0, "Tutorial deleted successfully");
    assert!(dashboard.tutorials.find(&tutorial_id).await.is_none());
    assert!(dashboard.tutorials.selected().await.is_none());
}

#[tokio::test]
async fn upload_with_video_uses_its_own_message() {
    let backend = Arc::new(FakeBackend::default());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    let video = FileUpload {
        file_name: "demo.mp4".to_string(),
        content_type: "video/mp4".to_string(),
        bytes: vec![0, 0, 0, 24],
    };

    assert!(dashboard.uploads.upload(json_file("demo.json"), Some(video)).await);

    assert_eq!(notification(&dashboard).0, "Transcript and video uploaded successfully");
    let listed = dashboard.transcripts.transcripts().await;
    assert_eq!(listed[0].video_url.as_deref(), Some("/media/videos/demo.mp4"));
    assert!(!dashboard.uploads.is_uploading());
}

#[tokio::test]
async fn duplicate_upload_reports_existing_transcript() {
    let backend = Arc::new(FakeBackend::default());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    assert!(dashboard.uploads.upload(json_file("demo.json"), None).await);

    assert!(!dashboard.uploads.upload(json_file("demo.json"), None).await);

    assert_eq!(
        notification(&dashboard),
        ("Transcript already exists".to_string(), NotificationKind::Error)
    );
    assert_eq!(dashboard.transcripts.transcripts().await.len(), 1);
}

#[tokio::test]
async fn failed_generation_notifies_and_clears_the_marker() {
    let backend = Arc::new(FakeBackend::default());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    dashboard.uploads.upload(json_file("demo.json"), None).await;
    let id = dashboard.transcripts.transcripts().await[0].id.clone();
    backend.with_state(|s| s.fail_generation = true);

    assert!(!dashboard.transcripts.generate(&id).await);

    assert_eq!(
        notification(&dashboard),
        ("Tutorial generation failed".to_string(), NotificationKind::Error)
    );
    assert!(!dashboard.transcripts.is_generating(&id));
    // No tutorial refetch after a failure.
    assert!(!backend.calls().contains(&"list_tutorials".to_string()));
}

#[tokio::test]
async fn concurrent_generation_is_tracked_per_transcript() {
    let backend = Arc::new(FakeBackend::gated());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    dashboard.uploads.upload(json_file("a.json"), None).await;
    dashboard.uploads.upload(json_file("b.json"), None).await;
    let ids: Vec<String> = dashboard
        .transcripts
        .transcripts()
        .await
        .into_iter()
        .map(|t| t.id)
        .collect();

    let handles: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let transcripts = dashboard.transcripts.clone();
            tokio::spawn(async move { transcripts.generate(&id).await })
        })
        .collect();
    while dashboard.transcripts.generating_ids().len() < 2 {
        tokio::task::yield_now().await;
    }

    assert!(ids.iter().all(|id| dashboard.transcripts.is_generating(id)));
    // A repeated click on an in-flight row is ignored.
    assert!(!dashboard.transcripts.generate(&ids[0]).await);

    backend.gate.as_ref().unwrap().add_permits(2);
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert!(dashboard.transcripts.generating_ids().is_empty());
    assert_eq!(dashboard.tutorials.tutorials().await.len(), 2);
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let backend = Arc::new(FakeBackend::default());
    let prompt = ScriptedPrompt::answering(false);
    let dashboard = dashboard(&backend, prompt.clone());
    dashboard.uploads.upload(json_file("demo.json"), None).await;
    let transcript_id = dashboard.transcripts.transcripts().await[0].id.clone();
    dashboard.transcripts.generate(&transcript_id).await;
    let tutorial_id = dashboard.tutorials.tutorials().await[0].id.clone();
    dashboard.tutorials.open(&tutorial_id).await;

    assert_eq!(dashboard.tutorials.remove(&tutorial_id).await, DeleteOutcome::Cancelled);

    assert_eq!(prompt.asked.load(Ordering::SeqCst), 1);
    assert!(!backend.calls().iter().any(|c| c.starts_with("delete")));
    assert!(dashboard.tutorials.selected().await.is_some());
}

#[tokio::test]
async fn refetch_reconciles_the_open_tutorial() {
    let backend = Arc::new(FakeBackend::default());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    dashboard.uploads.upload(json_file("demo.json"), None).await;
    let transcript_id = dashboard.transcripts.transcripts().await[0].id.clone();
    dashboard.transcripts.generate(&transcript_id).await;
    let tutorial_id = dashboard.tutorials.tutorials().await[0].id.clone();
    dashboard.tutorials.open(&tutorial_id).await;

    // Another session renames it.
    backend.with_state(|s| s.tutorials[0].title = "Renamed elsewhere".to_string());
    assert!(dashboard.tutorials.refetch().await);
    assert_eq!(
        dashboard.tutorials.selected().await.unwrap().title,
        "Renamed elsewhere"
    );

    // Another session deletes it; the viewer stays on the last known version.
    backend.with_state(|s| s.tutorials.clear());
    assert!(dashboard.tutorials.refetch().await);
    assert!(dashboard.tutorials.tutorials().await.is_empty());
    assert_eq!(
        dashboard.tutorials.selected().await.map(|t| t.id),
        Some(tutorial_id)
    );
}

#[tokio::test]
async fn failed_refetch_keeps_previous_items() {
    let backend = Arc::new(FakeBackend::default());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    dashboard.uploads.upload(json_file("demo.json"), None).await;
    backend.with_state(|s| s.fail_listing = true);

    assert!(!dashboard.transcripts.refetch().await);

    assert_eq!(dashboard.transcripts.transcripts().await.len(), 1);
    assert!(!dashboard.transcripts.is_loading().await);
}

#[tokio::test]
async fn failed_save_leaves_the_viewer_untouched() {
    let backend = Arc::new(FakeBackend::default());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    dashboard.uploads.upload(json_file("demo.json"), None).await;
    let transcript_id = dashboard.transcripts.transcripts().await[0].id.clone();
    dashboard.transcripts.generate(&transcript_id).await;
    let original = dashboard.tutorials.tutorials().await[0].clone();
    dashboard.tutorials.open(&original.id).await;
    backend.with_state(|s| s.tutorials.clear());

    let edited = Tutorial {
        title: "Lost edit".to_string(),
        ..original.clone()
    };
    assert!(!dashboard.tutorials.save(edited).await);

    assert_eq!(
        notification(&dashboard),
        ("Tutorial update failed".to_string(), NotificationKind::Error)
    );
    assert_eq!(dashboard.tutorials.selected().await, Some(original));
}

#[tokio::test]
async fn archive_export_writes_the_downloaded_bytes() {
    let backend = Arc::new(FakeBackend::default());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    let dir = tempfile::tempdir().unwrap();

    let path = dashboard
        .tutorials
        .export_archive("tut-7", dir.path())
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("tutorial_tut-7.zip"));
    assert_eq!(std::fs::read(path).unwrap(), b"PK\x05\x06");
}

#[tokio::test]
async fn auth_tracks_the_signed_in_user() {
    let backend = Arc::new(FakeBackend::default());
    backend.with_state(|s| s.signed_in = true);
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));

    assert!(dashboard.auth.is_loading().await);
    let user = dashboard.auth.load().await.unwrap();
    assert_eq!(user.username, "octo");
    assert!(dashboard.auth.is_authenticated().await);
    assert!(!dashboard.auth.is_loading().await);

    dashboard.auth.logout().await.unwrap();
    assert!(!dashboard.auth.is_authenticated().await);
    assert_eq!(
        dashboard.auth.login_url(),
        "http://backend.test/auth/login/github/"
    );
}

#[tokio::test]
async fn saved_edit_shows_before_the_refetch_lands() {
    let backend = Arc::new(FakeBackend::default());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    dashboard.uploads.upload(json_file("demo.json"), None).await;
    let transcript_id = dashboard.transcripts.transcripts().await[0].id.clone();
    dashboard.transcripts.generate(&transcript_id).await;
    let original = dashboard.tutorials.tutorials().await[0].clone();
    dashboard.tutorials.open(&original.id).await;
    backend.with_state(|s| s.fail_listing_after_update = true);

    let edited = Tutorial {
        title: "Submitted Title".to_string(),
        ..original.clone()
    };
    assert!(dashboard.tutorials.save(edited).await);

    assert_eq!(notification(&dashboard).0, "Tutorial updated successfully");
    // The follow-up refetch failed, so only the submitted object can explain this.
    assert_eq!(
        dashboard.tutorials.selected().await.unwrap().title,
        "Submitted Title"
    );
    assert_eq!(
        dashboard.tutorials.find(&original.id).await.unwrap().title,
        original.title
    );
}

#[tokio::test]
async fn markdown_export_renders_local_state_without_network() {
    let backend = Arc::new(FakeBackend::default());
    let dashboard = dashboard(&backend, ScriptedPrompt::answering(true));
    dashboard.uploads.upload(json_file("demo.json"), None).await;
    let transcript_id = dashboard.transcripts.transcripts().await[0].id.clone();
    dashboard.transcripts.generate(&transcript_id).await;
    let mut draft = dashboard.tutorials.tutorials().await[0].clone();
    draft.title = "Local draft: v2".to_string();
    let calls_before = backend.calls();
    let dir = tempfile::tempdir().unwrap();
    let media = MediaLinks::absolute("http://backend.test");

    let path = dashboard
        .tutorials
        .export_markdown(&draft, dir.path(), &media)
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("Local_draft__v2.md"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, generate_markdown(&draft, &media));
    assert!(written.starts_with("# Local draft: v2"));
    assert_eq!(backend.calls(), calls_before);
}
