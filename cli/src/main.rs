//! GoodJob command-line client
//!
//! Lists and searches jobs, submits applications with a résumé upload and
//! manages applications against a GoodJob backend.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::token::PRIMARY_TOKEN_KEY;
use client::{ClientConfig, GoodJob, MemoryStore, ResourceType, StoredTokens, TokenProvider};
use common::{
    ApplicationStatus, JobListQuery, JobSearchQuery, ResumeFile, StatusFilter, salary_bounds,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "goodjob")]
#[command(version)]
#[command(about = "Command-line client for the GoodJob job board")]
#[command(propagate_version = true)]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
struct ConnectionArgs {
    /// Backend base URL (overrides GOODJOB_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token to send instead of the stored one
    #[arg(long, global = true, env = "GOODJOB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// JSON credential file (overrides GOODJOB_TOKEN_FILE)
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    /// Upload account name (overrides GOODJOB_CLOUD_NAME)
    #[arg(long, global = true)]
    cloud_name: Option<String>,

    /// Upload delivery type: raw, auto or image
    #[arg(long, global = true)]
    upload_resource: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Job listing and search
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Apply for a job with a résumé file
    Apply {
        /// Job ID
        #[arg(long)]
        job_id: i64,

        /// Applicant user ID
        #[arg(long)]
        applicant_id: i64,

        /// Path to the résumé file
        #[arg(long)]
        resume: PathBuf,

        /// Cover letter text
        #[arg(long, default_value = "")]
        cover_letter: String,
    },

    /// Application queries and review actions
    Applications {
        #[command(subcommand)]
        command: ApplicationCommands,
    },
}

#[derive(Subcommand, Debug)]
enum JobCommands {
    /// List jobs page by page
    List {
        #[arg(long, default_value = "0")]
        page: u32,

        #[arg(long, default_value = "8")]
        size: u32,

        /// ALL, PENDING, APPROVED, REJECTED or DELETED
        #[arg(long, default_value = "ALL")]
        status: StatusFilter,
    },

    /// Number of jobs per status
    Count,

    /// Keyword search
    Search {
        keyword: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        size: Option<u32>,

        #[arg(long)]
        status: Option<StatusFilter>,

        /// Salary bracket (UNDER_10M, 10M_20M, 20M_30M, ABOVE_30M); shown
        /// alongside the results, not sent to the backend
        #[arg(long)]
        salary: Option<String>,
    },

    /// Show a single job
    Get { job_id: i64 },

    /// Total views and applies
    Stats,
}

#[derive(Subcommand, Debug)]
enum ApplicationCommands {
    /// Applications submitted by an applicant
    ByApplicant { applicant_id: i64 },

    /// Applications received for a job
    ByJob { job_id: i64 },

    /// Applications received by an employer
    ByEmployer { employer_id: i64 },

    /// Change the review status of an application
    SetStatus {
        application_id: i64,

        #[arg(value_parser = parse_application_status)]
        status: ApplicationStatus,
    },

    /// Mark an application as viewed by the employer
    MarkViewed { application_id: i64 },
}

fn parse_application_status(s: &str) -> Result<ApplicationStatus, String> {
    serde_json::from_value(json!(s.to_ascii_uppercase()))
        .map_err(|_| format!("unknown application status: {s}"))
}

/// Logs go to stderr so stdout stays machine-readable JSON.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(args: &ConnectionArgs) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("invalid GOODJOB_* environment")?;

    if let Some(url) = &args.api_url {
        config.base_url = url.clone();
    }
    if let Some(path) = &args.token_file {
        config.token_file = Some(path.clone());
    }
    if let Some(name) = &args.cloud_name {
        config.upload.cloud_name = name.clone();
    }
    if let Some(kind) = &args.upload_resource {
        config.upload.resource_type = kind.parse::<ResourceType>()?;
    }

    Ok(config)
}

fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

fn read_resume(path: &Path) -> Result<ResumeFile> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());

    let mut file = ResumeFile::new(file_name, bytes);
    if let Some(content_type) = guess_content_type(path) {
        file = file.with_content_type(content_type);
    }
    Ok(file)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_jobs(client: &GoodJob, command: JobCommands) -> Result<()> {
    match command {
        JobCommands::List { page, size, status } => {
            anyhow::ensure!(size > 0, "--size must be positive");
            let query = JobListQuery::new(page, size).with_status(status);
            print_json(&client.jobs.list_jobs(&query).await?)
        }
        JobCommands::Count => print_json(&client.jobs.count_jobs().await?),
        JobCommands::Search {
            keyword,
            page,
            size,
            status,
            salary,
        } => {
            let query = JobSearchQuery {
                keyword,
                page,
                size,
                status,
            };
            let results = client.jobs.search_jobs(&query).await?;
            if salary.is_some() {
                let (min, max) = salary_bounds(salary.as_deref());
                tracing::info!(?min, ?max, "salary filter is not applied by the backend");
            }
            print_json(&results)
        }
        JobCommands::Get { job_id } => print_json(&client.jobs.get_job(job_id).await?),
        JobCommands::Stats => print_json(&client.jobs.job_statistics().await?),
    }
}

async fn run_applications(client: &GoodJob, command: ApplicationCommands) -> Result<()> {
    let apps = &client.applications;
    match command {
        ApplicationCommands::ByApplicant { applicant_id } => {
            print_json(&apps.get_applications_by_applicant(applicant_id).await?)
        }
        ApplicationCommands::ByJob { job_id } => {
            print_json(&apps.get_applications_by_job(job_id).await?)
        }
        ApplicationCommands::ByEmployer { employer_id } => {
            print_json(&apps.get_applications_by_employer(employer_id).await?)
        }
        ApplicationCommands::SetStatus {
            application_id,
            status,
        } => print_json(&apps.update_application_status(application_id, status).await?),
        ApplicationCommands::MarkViewed { application_id } => {
            print_json(&apps.mark_application_viewed(application_id).await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = build_config(&args.connection)?;
    let tokens = args.connection.token.as_ref().map(|token| {
        Arc::new(StoredTokens::new(
            MemoryStore::new().with(PRIMARY_TOKEN_KEY, token.clone()),
        )) as Arc<dyn TokenProvider>
    });

    tracing::debug!(base_url = %config.base_url, "using backend");
    let client = GoodJob::new(&config, tokens)?;

    match args.command {
        Commands::Jobs { command } => run_jobs(&client, command).await,
        Commands::Apply {
            job_id,
            applicant_id,
            resume,
            cover_letter,
        } => {
            let file = read_resume(&resume)?;
            let application = client
                .applications
                .apply_for_job(job_id, applicant_id, cover_letter, Some(file))
                .await?;
            print_json(&application)
        }
        Commands::Applications { command } => run_applications(&client, command).await,
    }
}
