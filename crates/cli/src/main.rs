mod config;
mod config_cmd;
mod jobs_cmd;
mod login;
mod resume_cmd;
mod search_cmd;
mod tracking_cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use jobwatch_api_client::types::TrackStatus;

#[derive(Parser)]
#[command(name = "jobwatch", about = "jobwatch CLI - stream job searches and track applications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the auth token in the config
    Login {
        /// Username (prompted for if omitted)
        #[arg(long)]
        username: Option<String>,
    },

    /// Create an account on the configured server
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },

    /// Show the logged-in user
    Whoami,

    /// Run a streaming job search and render it live
    Search(search_cmd::SearchArgs),

    /// Manage tracked applications
    Tracking {
        #[command(subcommand)]
        action: TrackingAction,
    },

    /// Browse and prune scraped jobs on the server
    Jobs {
        #[command(subcommand)]
        action: JobsAction,
    },

    /// Manage resumes
    Resume {
        #[command(subcommand)]
        action: ResumeAction,
    },

    /// Show or set configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        server: Option<String>,

        /// Set the auth token
        #[arg(long)]
        token: Option<String>,
    },
}

#[derive(Subcommand)]
enum TrackingAction {
    /// List tracked applications
    List,
    /// Move a tracked application to a new status
    Set {
        /// Tracking entry id (from `tracking list`)
        id: i64,
        /// One of: saved, applied, interviewing, offer, rejected
        status: TrackStatus,
    },
    /// Stop tracking one application
    Delete { id: i64 },
    /// Stop tracking everything
    Clear,
}

#[derive(Subcommand)]
enum JobsAction {
    /// List scraped jobs stored on the server
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Delete one scraped job (and its tracking entries)
    Delete { id: i64 },
    /// Delete all scraped jobs
    Clear,
}

#[derive(Subcommand)]
enum ResumeAction {
    /// List uploaded resumes
    List,
    /// Show the active resume with extracted skills and titles
    Active,
    /// Upload a resume PDF and make it active
    Upload { file: PathBuf },
    /// Make an uploaded resume the active one
    Activate { id: i64 },
    /// Delete an uploaded resume
    Delete { id: i64 },
    /// Overwrite a resume's extracted skills and/or detected titles
    Tag {
        id: i64,
        /// Comma-separated skill list
        #[arg(long, value_delimiter = ',')]
        skills: Option<Vec<String>>,
        /// Comma-separated title list
        #[arg(long, value_delimiter = ',')]
        titles: Option<Vec<String>>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login { username } => login::run_login(username).await,
        Commands::Register { username, email } => login::run_register(username, email).await,
        Commands::Whoami => login::run_whoami().await,
        Commands::Search(args) => search_cmd::run_search(args).await,
        Commands::Tracking { action } => match action {
            TrackingAction::List => tracking_cmd::run_list().await,
            TrackingAction::Set { id, status } => tracking_cmd::run_set(id, status).await,
            TrackingAction::Delete { id } => tracking_cmd::run_delete(id).await,
            TrackingAction::Clear => tracking_cmd::run_clear().await,
        },
        Commands::Jobs { action } => match action {
            JobsAction::List {
                search,
                location,
                limit,
                offset,
            } => jobs_cmd::run_list(search, location, limit, offset).await,
            JobsAction::Delete { id } => jobs_cmd::run_delete(id).await,
            JobsAction::Clear => jobs_cmd::run_clear().await,
        },
        Commands::Resume { action } => match action {
            ResumeAction::List => resume_cmd::run_list().await,
            ResumeAction::Active => resume_cmd::run_active().await,
            ResumeAction::Upload { file } => resume_cmd::run_upload(&file).await,
            ResumeAction::Activate { id } => resume_cmd::run_activate(id).await,
            ResumeAction::Delete { id } => resume_cmd::run_delete(id).await,
            ResumeAction::Tag { id, skills, titles } => {
                resume_cmd::run_tag(id, skills, titles).await
            }
        },
        Commands::Config { server, token } => {
            if server.is_none() && token.is_none() {
                config_cmd::show_config()
            } else {
                config_cmd::set_config(server, token)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
