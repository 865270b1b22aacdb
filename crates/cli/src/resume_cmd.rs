use std::path::Path;

use anyhow::{bail, Context, Result};
use jobwatch_api_client::types::ResumeUpdate;

use crate::config::{api_client, load_config};

pub async fn run_list() -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;
    let resumes = client.resumes().await?;

    if resumes.is_empty() {
        println!("No resumes uploaded yet. Use `jobwatch resume upload <file.pdf>`.");
        return Ok(());
    }

    for resume in &resumes {
        let marker = if resume.is_active { "*" } else { " " };
        println!(
            "{marker} {:>4}  {}  ({} skills, {} titles)",
            resume.id,
            resume.filename,
            resume.extracted_skills.len(),
            resume.parsed_titles.len()
        );
    }
    println!("* = active");
    Ok(())
}

pub async fn run_active() -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;
    let resume = client
        .active_resume()
        .await
        .context("No active resume found")?;

    println!("Active resume: {} (id {})", resume.filename, resume.id);
    if !resume.parsed_titles.is_empty() {
        println!("Detected titles: {}", resume.parsed_titles.join(", "));
    }
    if !resume.extracted_skills.is_empty() {
        println!("Key skills: {}", resume.extracted_skills.join(", "));
    }
    Ok(())
}

pub async fn run_upload(file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .context("File name is not valid UTF-8")?;
    if !filename.to_ascii_lowercase().ends_with(".pdf") {
        bail!("Only PDF resumes are supported: {}", file.display());
    }

    let content = std::fs::read(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let config = load_config()?;
    let client = api_client(&config)?;

    println!("Uploading {} ({} bytes)...", filename, content.len());
    let resume = client.upload_resume(filename, content).await?;

    println!("Uploaded and activated resume {} ({})", resume.id, resume.filename);
    println!(
        "Extracted {} skill(s), {} title(s)",
        resume.extracted_skills.len(),
        resume.parsed_titles.len()
    );
    Ok(())
}

pub async fn run_activate(id: i64) -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;
    client.activate_resume(id).await?;
    println!("Resume {id} is now active");
    Ok(())
}

pub async fn run_delete(id: i64) -> Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;
    client.delete_resume(id).await?;
    println!("Deleted resume {id}");
    Ok(())
}

/// Overwrite the extracted skills/titles the server inferred at upload time.
pub async fn run_tag(
    id: i64,
    skills: Option<Vec<String>>,
    titles: Option<Vec<String>>,
) -> Result<()> {
    if skills.is_none() && titles.is_none() {
        bail!("Nothing to update: pass --skills and/or --titles");
    }

    let config = load_config()?;
    let client = api_client(&config)?;
    let resume = client
        .update_resume(
            id,
            &ResumeUpdate {
                extracted_skills: skills,
                parsed_titles: titles,
                search_preferences: None,
            },
        )
        .await?;

    println!("Updated resume {} ({})", resume.id, resume.filename);
    println!("Skills: {}", resume.extracted_skills.join(", "));
    println!("Titles: {}", resume.parsed_titles.join(", "));
    Ok(())
}
