use std::time::Duration;

use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};
use jobwatch_core::search::SearchRequest;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::types::{
    JobDraft, JobListQuery, JobPage, OkResponse, RegisterRequest, Resume, ResumeUpdate,
    TokenResponse, TrackStatus, TrackedEntry, TrackedJob, UserProfile,
};

/// The streaming search response: a lazy, finite sequence of byte chunks.
/// Dropping it aborts the underlying connection.
pub type SearchStream = BoxStream<'static, Result<Bytes>>;

/// Typed HTTP client for the jobwatch backend.
///
/// Provides high-level methods for each REST endpoint (using the stored auth
/// token) and [`ApiClient::open_search_stream`] for the long-lived streaming
/// search response.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    /// Applied per CRUD request. The streaming GET is exempt: a long-running
    /// search must be able to outlive any fixed request deadline.
    timeout: Duration,
}

impl ApiClient {
    /// Create a new client with the given base URL and CRUD timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
            timeout,
        })
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn set_auth(&mut self, token: String) {
        self.auth_token = Some(token);
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Access the underlying `reqwest::Client`.
    pub fn reqwest_client(&self) -> &reqwest::Client {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token_or_err(&self) -> Result<&str> {
        self.auth_token.as_deref().ok_or(ApiError::MissingAuth)
    }

    // ─── Auth ─────────────────────────────────────────────────────────────

    /// Exchange credentials for a bearer token (form-encoded, OAuth2 style).
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let resp = self
            .client
            .post(self.url("/auth/token"))
            .timeout(self.timeout)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<UserProfile> {
        let resp = self
            .client
            .post(self.url("/auth/register"))
            .timeout(self.timeout)
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn me(&self) -> Result<UserProfile> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .get(self.url("/auth/users/me"))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ─── Streaming search ─────────────────────────────────────────────────

    /// Open the long-lived search stream.
    ///
    /// Issues one GET carrying the search parameters; the auth token travels
    /// as a query parameter because the streamed response is consumed by
    /// clients that cannot set custom headers. A non-success status fails
    /// here, before any chunk is yielded; the caller must not read after
    /// that. Chunk exhaustion signals normal stream end.
    pub async fn open_search_stream(&self, request: &SearchRequest) -> Result<SearchStream> {
        request.validate()?;
        let token = self.token_or_err()?;

        let resp = self
            .client
            .get(self.url("/search/stream"))
            .query(&request.query_pairs())
            .query(&[("token", token)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        debug!("search stream opened ({status})");
        Ok(resp.bytes_stream().map_err(ApiError::from).boxed())
    }

    // ─── Tracking ─────────────────────────────────────────────────────────

    /// Track a job (upsert keyed by `job_url` server-side). Re-tracking an
    /// already-tracked job updates its status.
    pub async fn track_job(&self, draft: &JobDraft, status: TrackStatus) -> Result<TrackedJob> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .post(self.url("/jobs/track"))
            .timeout(self.timeout)
            .query(&[("status", status.as_str())])
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn tracking(&self) -> Result<Vec<TrackedEntry>> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .get(self.url("/tracking"))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn delete_tracking(&self, id: i64) -> Result<OkResponse> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .delete(self.url(&format!("/tracking/{id}")))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn clear_tracking(&self) -> Result<OkResponse> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .delete(self.url("/tracking/all/delete"))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ─── Scraped jobs ─────────────────────────────────────────────────────

    pub async fn jobs(&self, query: &JobListQuery) -> Result<JobPage> {
        let token = self.token_or_err()?;

        let mut params = Vec::new();
        params.push(("limit", query.limit.to_string()));
        params.push(("offset", query.offset.to_string()));
        if let Some(ref s) = query.search {
            params.push(("search", s.clone()));
        }
        if let Some(ref l) = query.location {
            params.push(("location", l.clone()));
        }

        let resp = self
            .client
            .get(self.url("/jobs"))
            .timeout(self.timeout)
            .query(&params)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn delete_job(&self, id: i64) -> Result<OkResponse> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .delete(self.url(&format!("/jobs/{id}")))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn clear_jobs(&self) -> Result<OkResponse> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .delete(self.url("/jobs/all/delete"))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ─── Resumes ──────────────────────────────────────────────────────────

    pub async fn resumes(&self) -> Result<Vec<Resume>> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .get(self.url("/resumes"))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn active_resume(&self) -> Result<Resume> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .get(self.url("/resumes/active"))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn activate_resume(&self, id: i64) -> Result<OkResponse> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .post(self.url(&format!("/resumes/{id}/activate")))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn update_resume(&self, id: i64, update: &ResumeUpdate) -> Result<Resume> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .put(self.url(&format!("/resumes/{id}")))
            .timeout(self.timeout)
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn delete_resume(&self, id: i64) -> Result<OkResponse> {
        let token = self.token_or_err()?;
        let resp = self
            .client
            .delete(self.url(&format!("/resumes/{id}")))
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// Upload a resume PDF. The server extracts text, skills and titles and
    /// activates the new resume.
    pub async fn upload_resume(&self, filename: &str, content: Vec<u8>) -> Result<Resume> {
        let token = self.token_or_err()?;

        let part = reqwest::multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .client
            .post(self.url("/resumes/upload"))
            .timeout(self.timeout)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        parse_response(resp).await
    }
}

/// Parse an HTTP response: return the deserialized body on 2xx,
/// or an error carrying the status and body text.
async fn parse_response<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }
    Ok(resp.json().await?)
}
