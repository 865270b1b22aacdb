use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platform ceiling for `results_wanted`.
pub const MAX_RESULTS_WANTED: u32 = 200;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("no sites selected")]
    NoSites,
    #[error("results_wanted must be between 1 and {MAX_RESULTS_WANTED}, got {got}")]
    ResultsOutOfRange { got: u32 },
    #[error("unknown site: {0}")]
    UnknownSite(String),
    #[error("unknown job type: {0}")]
    UnknownJobType(String),
    #[error("unknown experience level: {0}")]
    UnknownExperience(String),
    #[error("unknown date-posted window: {0}")]
    UnknownDatePosted(String),
}

/// Fixed catalog of searchable job boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Linkedin,
    Indeed,
    Glassdoor,
    ZipRecruiter,
    Google,
    Bayt,
    Naukri,
    Bdjobs,
}

impl Site {
    pub const ALL: [Site; 8] = [
        Site::Linkedin,
        Site::Indeed,
        Site::Glassdoor,
        Site::ZipRecruiter,
        Site::Google,
        Site::Bayt,
        Site::Naukri,
        Site::Bdjobs,
    ];

    /// Wire identifier as the producer expects it in the `sites` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Site::Linkedin => "linkedin",
            Site::Indeed => "indeed",
            Site::Glassdoor => "glassdoor",
            Site::ZipRecruiter => "zip_recruiter",
            Site::Google => "google",
            Site::Bayt => "bayt",
            Site::Naukri => "naukri",
            Site::Bdjobs => "bdjobs",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Site::ALL
            .into_iter()
            .find(|site| site.as_str() == s.trim())
            .ok_or_else(|| RequestError::UnknownSite(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Fulltime,
    Parttime,
    Contract,
    Internship,
    Temporary,
    Freelance,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::Fulltime => "fulltime",
            JobType::Parttime => "parttime",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Temporary => "temporary",
            JobType::Freelance => "freelance",
        }
    }
}

impl FromStr for JobType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fulltime" => Ok(JobType::Fulltime),
            "parttime" => Ok(JobType::Parttime),
            "contract" => Ok(JobType::Contract),
            "internship" => Ok(JobType::Internship),
            "temporary" => Ok(JobType::Temporary),
            "freelance" => Ok(JobType::Freelance),
            other => Err(RequestError::UnknownJobType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "entry" => Ok(ExperienceLevel::Entry),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            other => Err(RequestError::UnknownExperience(other.to_string())),
        }
    }
}

/// Date-posted window, using the producer's wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePosted {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "3days")]
    Past3Days,
    #[serde(rename = "week")]
    PastWeek,
    #[serde(rename = "month")]
    PastMonth,
}

impl DatePosted {
    pub fn as_str(self) -> &'static str {
        match self {
            DatePosted::Today => "today",
            DatePosted::Past3Days => "3days",
            DatePosted::PastWeek => "week",
            DatePosted::PastMonth => "month",
        }
    }
}

impl FromStr for DatePosted {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "today" => Ok(DatePosted::Today),
            "3days" => Ok(DatePosted::Past3Days),
            "week" => Ok(DatePosted::PastWeek),
            "month" => Ok(DatePosted::PastMonth),
            other => Err(RequestError::UnknownDatePosted(other.to_string())),
        }
    }
}

/// Optional refinement filters. Empty/unset filters are omitted from the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub remote_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<DatePosted>,
    #[serde(default)]
    pub easy_apply: bool,
}

/// Immutable description of one search invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub location: String,
    pub sites: Vec<Site>,
    pub results_wanted: u32,
    /// Job market / country code, e.g. "usa", "india"
    pub country: String,
    #[serde(default)]
    pub filters: SearchFilters,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
            sites: vec![Site::Linkedin, Site::Indeed],
            results_wanted: 20,
            country: "usa".to_string(),
            filters: SearchFilters::default(),
        }
    }

    /// A request is dispatchable only with at least one site and a result
    /// budget within the platform ceiling.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.sites.is_empty() {
            return Err(RequestError::NoSites);
        }
        if self.results_wanted == 0 || self.results_wanted > MAX_RESULTS_WANTED {
            return Err(RequestError::ResultsOutOfRange {
                got: self.results_wanted,
            });
        }
        Ok(())
    }

    /// Query parameters for the streaming endpoint, in wire form.
    /// The auth token is appended by the transport, not here.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let sites = self
            .sites
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let mut pairs = vec![
            ("search_term", self.query.clone()),
            ("location", self.location.clone()),
            ("sites", sites),
            ("results_wanted", self.results_wanted.to_string()),
            ("country", self.country.clone()),
            ("is_remote", self.filters.remote_only.to_string()),
            ("easy_apply", self.filters.easy_apply.to_string()),
        ];
        if let Some(job_type) = self.filters.job_type {
            pairs.push(("job_type", job_type.as_str().to_string()));
        }
        if let Some(experience) = self.filters.experience {
            pairs.push(("experience", experience.as_str().to_string()));
        }
        if let Some(window) = self.filters.date_posted {
            pairs.push(("date_posted", window.as_str().to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_sites() {
        let mut req = SearchRequest::new("rust", "Berlin");
        req.sites.clear();
        assert_eq!(req.validate(), Err(RequestError::NoSites));
    }

    #[test]
    fn test_validate_result_budget_bounds() {
        let mut req = SearchRequest::new("rust", "Berlin");
        req.results_wanted = 0;
        assert_eq!(
            req.validate(),
            Err(RequestError::ResultsOutOfRange { got: 0 })
        );
        req.results_wanted = MAX_RESULTS_WANTED + 1;
        assert!(req.validate().is_err());
        req.results_wanted = MAX_RESULTS_WANTED;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_site_wire_names_roundtrip() {
        for site in Site::ALL {
            assert_eq!(site.as_str().parse::<Site>().unwrap(), site);
        }
        assert_eq!("zip_recruiter".parse::<Site>().unwrap(), Site::ZipRecruiter);
        assert!(matches!(
            "monster".parse::<Site>(),
            Err(RequestError::UnknownSite(_))
        ));
    }

    #[test]
    fn test_query_pairs_omit_unset_filters() {
        let req = SearchRequest::new("Python Developer", "India");
        let pairs = req.query_pairs();
        assert!(pairs.iter().any(|(k, v)| *k == "sites" && v == "linkedin,indeed"));
        assert!(pairs.iter().any(|(k, v)| *k == "is_remote" && v == "false"));
        assert!(!pairs.iter().any(|(k, _)| *k == "job_type"));
        assert!(!pairs.iter().any(|(k, _)| *k == "date_posted"));
    }

    #[test]
    fn test_query_pairs_include_set_filters() {
        let mut req = SearchRequest::new("rust", "Remote");
        req.filters.remote_only = true;
        req.filters.job_type = Some(JobType::Contract);
        req.filters.experience = Some(ExperienceLevel::Senior);
        req.filters.date_posted = Some(DatePosted::Past3Days);

        let pairs = req.query_pairs();
        assert!(pairs.iter().any(|(k, v)| *k == "is_remote" && v == "true"));
        assert!(pairs.iter().any(|(k, v)| *k == "job_type" && v == "contract"));
        assert!(pairs.iter().any(|(k, v)| *k == "experience" && v == "senior"));
        assert!(pairs.iter().any(|(k, v)| *k == "date_posted" && v == "3days"));
    }
}
