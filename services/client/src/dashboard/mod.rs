pub mod auth;
pub mod collection;
pub mod notifications;
pub mod selection;
pub mod state;
pub mod transcripts;
pub mod tutorials;
pub mod upload;

pub use auth::AuthManager;
pub use notifications::{Notification, NotificationKind, Notifier};
pub use selection::Selection;
pub use state::Dashboard;
pub use transcripts::TranscriptsManager;
pub use tutorials::{DeleteOutcome, TutorialsManager, DELETE_PROMPT};
pub use upload::{read_upload, UploadManager};
