use anyhow::{Context, Result};
use jobwatch_api_client::types::JobListQuery;

use crate::config::{api_client, load_config};

pub async fn run_list(
    search: Option<String>,
    location: Option<String>,
    limit: u32,
    offset: u32,
) -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;

    let page = client
        .jobs(&JobListQuery {
            limit,
            offset,
            search,
            location,
        })
        .await?;

    if page.items.is_empty() {
        println!("No scraped jobs stored on the server.");
        return Ok(());
    }

    for job in &page.items {
        let score = if job.match_score > 0 {
            format!("  [match {}%]", job.match_score)
        } else {
            String::new()
        };
        println!("{:>5}  {} — {}{}", job.id, job.title, job.company, score);
        println!("       {} | {} | {}", job.location, job.site, job.job_url);
    }
    println!(
        "Showing {} of {} scraped job(s)",
        page.items.len(),
        page.total
    );
    Ok(())
}

pub async fn run_delete(id: i64) -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;
    client.delete_job(id).await?;
    println!("Deleted scraped job {id}");
    Ok(())
}

pub async fn run_clear() -> Result<()> {
    let confirmed = dialoguer::Confirm::new()
        .with_prompt("Delete ALL scraped jobs (and their tracking entries)?")
        .default(false)
        .interact()
        .context("Failed to read confirmation")?;
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    let config = load_config()?;
    let client = api_client(&config)?;
    client.clear_jobs().await?;
    println!("Scraped jobs cleared.");
    Ok(())
}
