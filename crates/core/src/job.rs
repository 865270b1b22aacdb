use serde::{Deserialize, Serialize};

/// One job posting as emitted by the remote search producer.
///
/// Producer fields are never mutated on the client; the canonical `job_url`
/// is the unique key within a session and the correlation key for tracking.
/// Optional fields default so that sparsely-populated records from individual
/// site scrapers still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub job_url: String,
    /// Source site identifier, e.g. "linkedin"
    pub site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_snippet: Option<String>,
    /// Posting date as the producer formats it (ISO date string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    /// Resume-based matching score (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub is_remote: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_deserializes() {
        let json = r#"{"title":"Rust Developer","company":"Acme","job_url":"https://x/1","site":"indeed"}"#;
        let job: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(job.title, "Rust Developer");
        assert_eq!(job.location, None);
        assert!(job.matching_skills.is_empty());
        assert!(!job.is_remote);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{"title":"T","company":"C","job_url":"u","site":"s","salary_min":100,"emails":null}"#;
        let job: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(job.company, "C");
    }

    #[test]
    fn test_full_record_roundtrip() {
        let json = r#"{
            "title":"Backend Engineer","company":"Globex","job_url":"https://x/2",
            "site":"linkedin","location":"Remote","date_posted":"2025-06-01",
            "match_score":72,"matching_skills":["rust","sql"],"is_remote":true
        }"#;
        let job: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(job.match_score, Some(72));
        assert_eq!(job.matching_skills, vec!["rust", "sql"]);

        let back = serde_json::to_string(&job).unwrap();
        let again: JobRecord = serde_json::from_str(&back).unwrap();
        assert_eq!(job, again);
    }
}
