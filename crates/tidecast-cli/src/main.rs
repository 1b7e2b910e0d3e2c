//! Tidecast CLI: drives the upload pipeline from a terminal.
//!
//! Set TIDECAST_SIGNER_URL, TIDECAST_API_URL, TIDECAST_TOKEN (or
//! TIDECAST_API_KEY), and TIDECAST_USER_ID (a `.env` file is honored).

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tidecast_cli::{human_size, init_tracing};
use tidecast_uploader::{
    AppClient, Auth, AuthContext, ContentKind, Engagement, FileSource, MediaSubmission,
    OptimisticCounter, ProgressSink, PublishOutcome, Publisher, Role, UploadProgress,
    UploaderConfig,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tidecast", about = "Tidecast upload pipeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a media file and create its record
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Content kind: video, photo, audio, podcast
        #[arg(long)]
        kind: String,
        /// Record title
        #[arg(long)]
        title: String,
        /// Record description
        #[arg(long)]
        description: Option<String>,
        /// Optional custom thumbnail image
        #[arg(long)]
        thumbnail: Option<std::path::PathBuf>,
        /// Storage folder for the upload
        #[arg(long)]
        folder: Option<String>,
    },
    /// Show a media record
    Show {
        /// Content kind: video, photo, audio, podcast
        kind: String,
        /// Record UUID
        id: String,
    },
    /// Delete a media record
    Delete {
        /// Content kind: video, photo, audio, podcast
        kind: String,
        /// Record UUID
        id: String,
    },
    /// Like a media record
    Like {
        /// Content kind: video, photo, audio, podcast
        kind: String,
        /// Record UUID
        id: String,
    },
}

/// Renders one transfer's progress as an in-place terminal line.
struct TermProgress {
    label: &'static str,
}

impl ProgressSink for TermProgress {
    fn report(&self, progress: UploadProgress) {
        eprint!(
            "\r{}: {:>3}% [{}]",
            self.label, progress.percent, progress.phase
        );
        if progress.phase.is_terminal() {
            eprintln!();
        }
    }
}

/// Bearer token from TIDECAST_TOKEN, or X-API-Key auth from
/// TIDECAST_API_KEY for service callers.
fn api_auth() -> Result<Auth> {
    if let Ok(token) = std::env::var("TIDECAST_TOKEN") {
        return Ok(Auth::Bearer(token));
    }
    let key = std::env::var("TIDECAST_API_KEY")
        .context("Set TIDECAST_TOKEN or TIDECAST_API_KEY")?;
    Ok(Auth::XApiKey(key))
}

fn auth_context() -> Result<AuthContext> {
    let user_id = std::env::var("TIDECAST_USER_ID").context("TIDECAST_USER_ID must be set")?;
    let user_id = Uuid::parse_str(&user_id).context("TIDECAST_USER_ID must be a UUID")?;
    let role = match std::env::var("TIDECAST_ROLE")
        .unwrap_or_else(|_| "member".to_string())
        .to_lowercase()
        .as_str()
    {
        "admin" => Role::Admin,
        _ => Role::Member,
    };
    Ok(AuthContext::new(user_id, role))
}

fn parse_target(kind: &str, id: &str) -> Result<(ContentKind, Uuid)> {
    let kind: ContentKind = kind.parse()?;
    let id = Uuid::parse_str(id).context("id must be a UUID")?;
    Ok((kind, id))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Upload {
            file,
            kind,
            title,
            description,
            thumbnail,
            folder,
        } => {
            let kind: ContentKind = kind.parse()?;
            let config = UploaderConfig::from_env()?;
            let publisher = Publisher::new(&config, api_auth()?)?;
            let auth = auth_context()?;

            let file = FileSource::from_path(&file)?;
            let thumbnail = match thumbnail {
                Some(path) => Some(FileSource::from_path(path)?),
                None => None,
            };

            eprintln!("Uploading {} ({})", file.filename, human_size(file.len()));
            let submission = MediaSubmission {
                kind,
                file,
                title,
                description,
                folder,
                thumbnail,
            };

            let outcome = publisher
                .publish(
                    &auth,
                    submission,
                    Arc::new(TermProgress { label: "media" }),
                    Arc::new(TermProgress { label: "thumbnail" }),
                )
                .await?;

            match outcome {
                PublishOutcome::Complete(record) => {
                    println!("Published {} ({})", record.id, record.url);
                }
                PublishOutcome::ThumbnailFailed { record, error } => {
                    println!("Published {} ({})", record.id, record.url);
                    eprintln!("Thumbnail was not attached: {}", error.client_message());
                }
            }
        }
        Commands::Show { kind, id } => {
            let (kind, id) = parse_target(&kind, &id)?;
            let app = AppClient::new(&UploaderConfig::from_env()?, api_auth()?)?;
            let record = app.get_record(kind, id).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Delete { kind, id } => {
            let (kind, id) = parse_target(&kind, &id)?;
            let app = AppClient::new(&UploaderConfig::from_env()?, api_auth()?)?;
            app.delete_record(kind, id).await?;
            println!("Deleted {}", id);
        }
        Commands::Like { kind, id } => {
            let (kind, id) = parse_target(&kind, &id)?;
            let app = AppClient::new(&UploaderConfig::from_env()?, api_auth()?)?;
            let record = app.get_record(kind, id).await?;

            let engagement = Engagement::new(app);
            let mut counter = OptimisticCounter::new(record.likes_count);
            let count = engagement.like(kind, id, &mut counter).await?;
            println!("{} now has {} likes", record.title, count);
        }
    }

    Ok(())
}
