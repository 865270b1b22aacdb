use anyhow::{Context, Result};
use jobwatch_api_client::types::{JobDraft, TrackStatus};

use crate::config::{api_client, load_config};

pub async fn run_list() -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;
    let entries = client.tracking().await?;

    if entries.is_empty() {
        println!("No tracked applications yet.");
        return Ok(());
    }

    println!(
        "{:<6} {:<14} {:<32} {:<22} URL",
        "ID", "STATUS", "TITLE", "COMPANY"
    );
    for entry in &entries {
        println!(
            "{:<6} {:<14} {:<32} {:<22} {}",
            entry.tracked.id,
            entry.tracked.status.as_str(),
            truncate(&entry.job.title, 30),
            truncate(&entry.job.company, 20),
            entry.job.job_url
        );
    }
    println!("{} tracked application(s)", entries.len());
    Ok(())
}

/// Move one tracked application through the pipeline. The server upserts by
/// `job_url`, so re-tracking with a new status is the update path.
pub async fn run_set(id: i64, status: TrackStatus) -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;

    let entries = client.tracking().await?;
    let entry = entries
        .iter()
        .find(|e| e.tracked.id == id)
        .with_context(|| format!("no tracked application with id {id}"))?;

    let draft = JobDraft::from(&entry.job);
    let updated = client.track_job(&draft, status).await?;
    println!("{} → {}", entry.job.title, updated.status);
    Ok(())
}

pub async fn run_delete(id: i64) -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;
    client.delete_tracking(id).await?;
    println!("Removed tracking entry {id}");
    Ok(())
}

pub async fn run_clear() -> Result<()> {
    let confirmed = dialoguer::Confirm::new()
        .with_prompt("Remove ALL tracked applications?")
        .default(false)
        .interact()
        .context("Failed to read confirmation")?;
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    let config = load_config()?;
    let client = api_client(&config)?;
    client.clear_tracking().await?;
    println!("Tracking cleared.");
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
        assert_eq!(truncate("a very long job title", 10), "a very lo…");
    }
}
