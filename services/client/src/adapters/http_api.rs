//! services/client/src/adapters/http_api.rs
//!
//! The API gateway: the concrete implementation of the `AuthService`,
//! `TranscriptService` and `TutorialService` ports over the backend's REST
//! interface, using `reqwest`.
//!
//! Every request replays the session cookies supplied by the injected
//! `CredentialProvider`; mutating requests also carry the CSRF token. A
//! failed call is never retried.

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use tutorials_core::domain::{
    is_plain_id, AuthStatus, FileUpload, Transcript, TranscriptUpload, Tutorial,
};
use tutorials_core::ports::{
    AuthService, CredentialProvider, PortError, PortResult, TranscriptService, TutorialService,
};

use super::records::{AuthStatusRecord, TranscriptRecord, TutorialRecord, TutorialUpdateRecord};

/// Header the backend reads the CSRF token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

#[derive(Clone)]
pub struct HttpApiAdapter {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpApiAdapter {
    /// Creates a new adapter for the backend at `base_url`.
    ///
    /// Redirects are not followed: the backend answers logout and expired
    /// sessions with a redirect to the browser front end.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> PortResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(Self::with_client(client, base_url, credentials))
    }

    /// Creates an adapter reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mutating = !matches!(method, Method::GET | Method::HEAD | Method::OPTIONS);
        debug!(%method, path, "Sending request");

        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(cookies) = self.credentials.session_cookies() {
            builder = builder.header(COOKIE, cookies);
        }
        if mutating {
            if let Some(token) = self.credentials.csrf_token() {
                builder = builder.header(CSRF_HEADER, token);
            }
        }
        builder
    }

    async fn send(builder: RequestBuilder) -> PortResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;
        Self::ensure_success(response).await
    }

    /// Maps a non-2xx response to a `PortError` carrying the raw body text.
    async fn ensure_success(response: Response) -> PortResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized,
            StatusCode::NOT_FOUND => PortError::NotFound(body),
            _ => PortError::Rejected {
                status: status.as_u16(),
                body,
            },
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> PortResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Unexpected(format!("Malformed response body: {}", e)))
    }

    /// Refuses ids that would not stay a single path segment.
    fn id_segment(id: &str) -> PortResult<&str> {
        if is_plain_id(id) {
            Ok(id)
        } else {
            Err(PortError::InvalidId(id.to_string()))
        }
    }

    fn file_part(file: FileUpload) -> PortResult<Part> {
        Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl AuthService for HttpApiAdapter {
    async fn auth_status(&self) -> AuthStatus {
        let result = async {
            let response = Self::send(self.request(Method::GET, "/api/auth/status/")).await?;
            Self::parse_json::<AuthStatusRecord>(response).await
        }
        .await;

        match result {
            Ok(record) => record.to_domain(),
            Err(e) => {
                warn!("Auth status check failed: {}", e);
                AuthStatus::default()
            }
        }
    }

    fn login_url(&self) -> String {
        format!("{}/auth/login/github/", self.base_url)
    }

    async fn logout(&self) -> PortResult<()> {
        let response = self
            .request(Method::GET, "/logout/")
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;
        // The backend redirects to the front end once the session is cleared.
        if response.status().is_redirection() {
            return Ok(());
        }
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl TranscriptService for HttpApiAdapter {
    async fn list_transcripts(&self) -> PortResult<Vec<Transcript>> {
        let response = Self::send(self.request(Method::GET, "/api/transcripts/")).await?;
        let records: Vec<TranscriptRecord> = Self::parse_json(response).await?;
        Ok(records.into_iter().map(TranscriptRecord::to_domain).collect())
    }

    async fn upload_transcript(&self, upload: TranscriptUpload) -> PortResult<()> {
        let mut form = Form::new().part("file", Self::file_part(upload.transcript)?);
        if let Some(video) = upload.video {
            form = form.part("video_file", Self::file_part(video)?);
        }
        Self::send(self.request(Method::POST, "/api/transcripts/").multipart(form)).await?;
        Ok(())
    }

    async fn generate_tutorial(&self, transcript_id: &str) -> PortResult<()> {
        let path = format!("/api/transcripts/{}/generate/", Self::id_segment(transcript_id)?);
        Self::send(self.request(Method::POST, &path)).await?;
        Ok(())
    }
}

#[async_trait]
impl TutorialService for HttpApiAdapter {
    async fn list_tutorials(&self) -> PortResult<Vec<Tutorial>> {
        let response = Self::send(self.request(Method::GET, "/api/tutorials/")).await?;
        let records: Vec<TutorialRecord> = Self::parse_json(response).await?;
        Ok(records.into_iter().map(TutorialRecord::to_domain).collect())
    }

    async fn update_tutorial(&self, tutorial: &Tutorial) -> PortResult<()> {
        let path = format!("/api/tutorials/{}/", Self::id_segment(&tutorial.id)?);
        let body = TutorialUpdateRecord::from_domain(tutorial);
        Self::send(self.request(Method::PATCH, &path).json(&body)).await?;
        Ok(())
    }

    async fn delete_tutorial(&self, tutorial_id: &str) -> PortResult<()> {
        let path = format!("/api/tutorials/{}/", Self::id_segment(tutorial_id)?);
        Self::send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn download_archive(&self, tutorial_id: &str) -> PortResult<Vec<u8>> {
        let path = format!("/api/tutorials/{}/download_zip/", Self::id_segment(tutorial_id)?);
        let response = Self::send(self.request(Method::GET, &path)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
