pub mod domain;
pub mod formatters;
pub mod markdown;
pub mod ports;

pub use domain::{
    is_plain_id, AuthStatus, ClipFile, FileUpload, Phrase, Step, Transcript, TranscriptUpload,
    Tutorial, User, VideoClip,
};
pub use markdown::{generate_markdown, MediaLinks};
pub use ports::{
    AuthService, ConfirmationPrompt, CredentialProvider, FailureKind, PortError, PortResult,
    TranscriptService, TutorialService,
};
