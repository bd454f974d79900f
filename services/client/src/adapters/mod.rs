pub mod credentials;
pub mod http_api;
pub mod prompt;
pub mod records;

pub use credentials::CookieCredentials;
pub use http_api::HttpApiAdapter;
pub use prompt::{AssumeYes, StdinPrompt};
