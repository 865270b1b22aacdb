use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use jobwatch_api_client::retry::{retry_post, RetryConfig};
use jobwatch_api_client::types::JobDraft;
use jobwatch_core::search::{DatePosted, ExperienceLevel, JobType, SearchRequest, Site};
use jobwatch_core::session::{LogEntry, LogLevel, SearchPhase, SearchSession};
use jobwatch_core::JobRecord;
use jobwatch_session::{HttpSearchTransport, SearchController};

use crate::config::{api_client, load_config};

#[derive(Args)]
pub struct SearchArgs {
    /// Keywords, e.g. "Python Developer"
    #[arg(short, long)]
    pub query: String,

    /// Location, e.g. "San Francisco, CA"
    #[arg(short, long, default_value = "")]
    pub location: String,

    /// Comma-separated sites: linkedin, indeed, glassdoor, zip_recruiter,
    /// google, bayt, naukri, bdjobs
    #[arg(long, default_value = "linkedin,indeed")]
    pub sites: String,

    /// Result budget
    #[arg(long, default_value_t = 20)]
    pub results: u32,

    /// Job market country code
    #[arg(long, default_value = "usa")]
    pub country: String,

    /// Remote jobs only
    #[arg(long)]
    pub remote: bool,

    /// fulltime | parttime | contract | internship | temporary | freelance
    #[arg(long)]
    pub job_type: Option<JobType>,

    /// entry | mid | senior
    #[arg(long)]
    pub experience: Option<ExperienceLevel>,

    /// today | 3days | week | month
    #[arg(long)]
    pub date_posted: Option<DatePosted>,

    /// Easy-apply listings only
    #[arg(long)]
    pub easy_apply: bool,

    /// Track every unique result as Saved once the search completes
    #[arg(long)]
    pub save_all: bool,
}

fn build_request(args: &SearchArgs) -> Result<SearchRequest> {
    let sites = args
        .sites
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Site>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut request = SearchRequest::new(args.query.clone(), args.location.clone());
    request.sites = sites;
    request.results_wanted = args.results;
    request.country = args.country.clone();
    request.filters.remote_only = args.remote;
    request.filters.job_type = args.job_type;
    request.filters.experience = args.experience;
    request.filters.date_posted = args.date_posted;
    request.filters.easy_apply = args.easy_apply;
    request.validate()?;
    Ok(request)
}

/// Run one streaming search and render it live. Ctrl-C cancels the stream
/// without killing the process, so the partial session can still be shown.
pub async fn run_search(args: SearchArgs) -> Result<()> {
    let config = load_config()?;
    let request = build_request(&args)?;

    let api = api_client(&config)?;
    let token = api.auth_token().map(str::to_string);
    let http_client = api.reqwest_client().clone();

    let mut controller = SearchController::new(Arc::new(HttpSearchTransport::new(api)));
    controller.start(request).await;

    let mut rx = controller.subscribe();
    let mut printed = 0;
    let final_session = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!();
                eprintln!("Stopping search…");
                controller.stop().await;
                let snapshot = controller.snapshot();
                print_new_entries(&snapshot, &mut printed);
                break snapshot;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break controller.snapshot();
                }
                let snapshot = rx.borrow_and_update().clone();
                print_new_entries(&snapshot, &mut printed);
                if snapshot.phase.is_terminal() {
                    break snapshot;
                }
            }
        }
    };

    match final_session.phase {
        SearchPhase::Completed => {
            let unique = dedup_by_url(&final_session.results);
            println!();
            println!(
                "Search complete: {} result(s), {} unique",
                final_session.result_count,
                unique.len()
            );
            print_results(&unique);
            if args.save_all && !unique.is_empty() {
                save_all(&http_client, &config.server.url, token.as_deref(), &unique).await?;
            }
        }
        SearchPhase::Cancelled => println!("Search cancelled."),
        SearchPhase::Failed => {
            bail!(
                "search failed: {}",
                final_session
                    .last_error
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }
        SearchPhase::Idle | SearchPhase::Running => {
            unreachable!("render loop exits only on a terminal phase")
        }
    }
    Ok(())
}

fn print_new_entries(session: &SearchSession, printed: &mut usize) {
    for entry in &session.log[*printed..] {
        print_log_entry(entry);
    }
    *printed = session.log.len();
}

fn print_log_entry(entry: &LogEntry) {
    let tag = match entry.level {
        LogLevel::Info => "•",
        LogLevel::Success => "✔",
        LogLevel::Error => "✖",
    };
    println!(" {tag} {}", entry.message);
}

/// Presentation-level dedup over the canonical job URL; batches may repeat
/// jobs across search passes.
fn dedup_by_url(results: &[JobRecord]) -> Vec<&JobRecord> {
    let mut seen = HashSet::new();
    results
        .iter()
        .filter(|job| seen.insert(job.job_url.as_str()))
        .collect()
}

fn print_results(jobs: &[&JobRecord]) {
    for (i, job) in jobs.iter().enumerate() {
        let score = job
            .match_score
            .map(|s| format!("  [match {s}%]"))
            .unwrap_or_default();
        println!("{:>3}. {} — {}{}", i + 1, job.title, job.company, score);
        println!(
            "     {} | {} | {}",
            job.location.as_deref().unwrap_or("-"),
            job.site,
            job.job_url
        );
        if !job.matching_skills.is_empty() {
            println!("     skills: {}", job.matching_skills.join(", "));
        }
    }
}

async fn save_all(
    client: &reqwest::Client,
    base_url: &str,
    token: Option<&str>,
    jobs: &[&JobRecord],
) -> Result<()> {
    let token = token.context("auth token not set; run `jobwatch login` first")?;
    let url = format!("{}/jobs/track", base_url.trim_end_matches('/'));
    let retry = RetryConfig::default();

    let mut saved = 0usize;
    for job in jobs {
        let body = serde_json::to_value(JobDraft::from(*job))?;
        let resp = retry_post(
            client,
            &url,
            Some(token),
            &[("status", "Saved")],
            &body,
            &retry,
        )
        .await?;
        if resp.status().is_success() {
            saved += 1;
        } else {
            tracing::warn!("failed to save {} (HTTP {})", job.job_url, resp.status());
        }
    }
    println!("Saved {saved}/{} job(s) to tracking", jobs.len());
    Ok(())
}
