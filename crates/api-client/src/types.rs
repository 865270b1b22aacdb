//! Request/response types for the jobwatch REST surface.

use jobwatch_core::JobRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Auth ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
}

// ─── Tracking ────────────────────────────────────────────────────────────────

/// Application pipeline status for a tracked job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackStatus {
    Saved,
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl TrackStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackStatus::Saved => "Saved",
            TrackStatus::Applied => "Applied",
            TrackStatus::Interviewing => "Interviewing",
            TrackStatus::Offer => "Offer",
            TrackStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "saved" => Ok(TrackStatus::Saved),
            "applied" => Ok(TrackStatus::Applied),
            "interviewing" => Ok(TrackStatus::Interviewing),
            "offer" => Ok(TrackStatus::Offer),
            "rejected" => Ok(TrackStatus::Rejected),
            other => Err(format!("unknown tracking status: {other}")),
        }
    }
}

/// Job payload sent when tracking a streamed result.
/// Mirrors what the server persists; missing producer fields get defaults.
#[derive(Debug, Clone, Serialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_url: String,
    pub description: String,
    pub site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    pub match_score: u32,
}

impl From<&JobRecord> for JobDraft {
    fn from(job: &JobRecord) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone().unwrap_or_default(),
            job_url: job.job_url.clone(),
            description: job.description.clone().unwrap_or_default(),
            site: job.site.clone(),
            date_posted: job.date_posted.clone(),
            match_score: job.match_score.unwrap_or(0),
        }
    }
}

/// A job as persisted server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredJob {
    pub id: i64,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub job_url: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default)]
    pub description_snippet: Option<String>,
    #[serde(default)]
    pub match_score: i64,
    #[serde(default)]
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Re-tracking an already-stored job goes through the same upsert endpoint.
impl From<&StoredJob> for JobDraft {
    fn from(job: &StoredJob) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_url: job.job_url.clone(),
            description: job.description.clone(),
            site: job.site.clone(),
            date_posted: job.date_posted.clone(),
            match_score: job.match_score.clamp(0, 100) as u32,
        }
    }
}

/// One tracking row.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackedJob {
    pub id: i64,
    pub user_id: i64,
    pub job_id: i64,
    pub status: TrackStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Tracking row with the persisted job embedded, as `GET /tracking` returns.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackedEntry {
    #[serde(flatten)]
    pub tracked: TrackedJob,
    pub job: StoredJob,
}

// ─── Scraped jobs ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct JobListQuery {
    pub limit: u32,
    pub offset: u32,
    pub search: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobPage {
    pub items: Vec<StoredJob>,
    pub total: i64,
}

// ─── Resumes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub extracted_skills: Vec<String>,
    #[serde(default)]
    pub parsed_titles: Vec<String>,
    #[serde(default)]
    pub search_preferences: serde_json::Value,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub upload_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResumeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_titles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_preferences: Option<serde_json::Value>,
}

// ─── Misc ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}
