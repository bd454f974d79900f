//! services/client/src/bin/tutorials.rs
//!
//! Terminal front end for the AI Tutorials dashboard.
//!
//! ```bash
//! tutorials upload standup.json --video standup.mp4
//! tutorials generate <transcript-id> <transcript-id>
//! tutorials edit <tutorial-id> --title "New Title"
//! tutorials export <tutorial-id> --archive --out ./exports
//! ```

use clap::{Args, Parser, Subcommand};
use client_lib::{
    adapters::{AssumeYes, StdinPrompt},
    config::Config,
    dashboard::{read_upload, Dashboard, DeleteOutcome},
    error::ClientError,
    views,
};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tutorials_core::domain::Tutorial;
use tutorials_core::markdown::MediaLinks;
use tutorials_core::ports::ConfirmationPrompt;

#[derive(Parser, Debug)]
#[command(name = "tutorials")]
#[command(about = "Turn uploaded conversation transcripts into step-by-step tutorials")]
struct Cli {
    /// Backend origin
    #[arg(long, global = true, env = "API_BASE_URL", value_name = "URL")]
    api_base_url: Option<String>,

    /// Default directory for exports
    #[arg(long, global = true, env = "EXPORT_DIR", value_name = "DIR")]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Configuration values given on the command line (or through clap's
    /// env fallback), keyed by environment variable name.
    fn config_override(&self, key: &str) -> Option<String> {
        match key {
            "API_BASE_URL" => self.api_base_url.clone(),
            "EXPORT_DIR" => self
                .export_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show who is signed in
    Status,
    /// Print the GitHub login URL
    Login,
    /// End the backend session
    Logout,
    /// List uploaded transcripts, newest first
    Transcripts,
    /// Upload a transcript JSON file, optionally with its recording
    Upload {
        transcript: PathBuf,
        #[arg(long, value_name = "FILE")]
        video: Option<PathBuf>,
    },
    /// Generate tutorials for one or more transcripts concurrently
    Generate {
        #[arg(required = true)]
        transcript_ids: Vec<String>,
    },
    /// List tutorials, most recently updated first
    Tutorials,
    /// Print a tutorial in full
    Show { tutorial_id: String },
    /// Edit fields of a tutorial and save it
    Edit(EditArgs),
    /// Delete a tutorial
    Delete {
        tutorial_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Export a tutorial as Markdown, or download its archive
    Export {
        tutorial_id: String,
        /// Download the server-built archive instead of rendering Markdown
        #[arg(long)]
        archive: bool,
        /// Link clips as `clips/<file>` instead of absolute URLs
        #[arg(long)]
        bundled: bool,
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct EditArgs {
    tutorial_id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    introduction: Option<String>,
    #[arg(long)]
    summary: Option<String>,
    /// Read time, e.g. "5 minutes"; an empty value clears it
    #[arg(long)]
    read_time: Option<String>,
    /// Comma separated; replaces the current tags
    #[arg(long)]
    tags: Option<String>,
    #[arg(long, value_name = "TEXT")]
    add_tip: Vec<String>,
    #[arg(long, value_name = "TEXT")]
    add_step: Vec<String>,
    /// 1-based step number
    #[arg(long, value_name = "N")]
    remove_step: Vec<usize>,
    /// 1-based step number whose clip is detached
    #[arg(long, value_name = "N")]
    remove_video: Vec<usize>,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Parse Arguments, Load Configuration & Set Up Logging ---
    Config::load_dotenv();
    let cli = Cli::parse();
    let config = Config::from_env_with(|key| cli.config_override(key))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- 2. Wire the Dashboard ---
    let assume_yes = matches!(cli.command, Command::Delete { yes: true, .. });
    let confirm: Arc<dyn ConfirmationPrompt> = if assume_yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinPrompt)
    };
    let dashboard = Dashboard::connect(&config, confirm)?;
    info!("Configuration loaded. Running command...");

    // --- 3. Dispatch ---
    run(cli.command, &dashboard, &config).await?;

    if let Some(notification) = dashboard.notifier.current() {
        println!("{}", views::render_notification(&notification));
    }
    Ok(())
}

async fn run(command: Command, dashboard: &Dashboard, config: &Config) -> Result<(), ClientError> {
    match command {
        Command::Status => {
            let user = dashboard.auth.load().await;
            println!(
                "{}",
                views::render_user_header(user.as_ref(), &dashboard.auth.login_url())
            );
        }
        Command::Login => println!("{}", dashboard.auth.login_url()),
        Command::Logout => match dashboard.auth.logout().await {
            Ok(()) => println!("Logged out."),
            Err(e) => println!("Logout failed: {}", e),
        },
        Command::Transcripts => {
            dashboard.transcripts.mount().await;
            let transcripts = dashboard.transcripts.transcripts().await;
            println!(
                "{}",
                views::render_transcript_table(&transcripts, &dashboard.transcripts.generating_ids())
            );
        }
        Command::Upload { transcript, video } => {
            let transcript = read_upload(&transcript).await?;
            let video = match video {
                Some(path) => Some(read_upload(&path).await?),
                None => None,
            };
            if dashboard.uploads.upload(transcript, video).await {
                if let Some(newest) = dashboard.transcripts.transcripts().await.first() {
                    println!("{}", views::render_transcript_row(newest, false));
                }
            }
        }
        Command::Generate { transcript_ids } => {
            let requests = transcript_ids.iter().map(|id| {
                let transcripts = dashboard.transcripts.clone();
                async move { (id, transcripts.generate(id).await) }
            });
            for (id, generated) in join_all(requests).await {
                println!("{}: {}", id, if generated { "generated" } else { "failed" });
            }
        }
        Command::Tutorials => {
            dashboard.tutorials.mount().await;
            println!(
                "{}",
                views::render_tutorial_grid(&dashboard.tutorials.tutorials().await)
            );
        }
        Command::Show { tutorial_id } => {
            dashboard.tutorials.mount().await;
            if !dashboard.tutorials.open(&tutorial_id).await {
                println!("No tutorial with id {}", tutorial_id);
                return Ok(());
            }
            if let Some(tutorial) = dashboard.tutorials.selected().await {
                println!("{}", views::render_tutorial(&tutorial, &config.media_origin));
            }
        }
        Command::Edit(args) => {
            dashboard.tutorials.mount().await;
            let Some(mut tutorial) = dashboard.tutorials.find(&args.tutorial_id).await else {
                println!("No tutorial with id {}", args.tutorial_id);
                return Ok(());
            };
            dashboard.tutorials.open(&tutorial.id).await;
            apply_edits(&mut tutorial, &args);
            if dashboard.tutorials.save(tutorial).await {
                if let Some(saved) = dashboard.tutorials.selected().await {
                    println!("{}", views::render_tutorial_card(&saved));
                }
            }
        }
        Command::Delete { tutorial_id, .. } => {
            dashboard.tutorials.mount().await;
            dashboard.tutorials.open(&tutorial_id).await;
            if dashboard.tutorials.remove(&tutorial_id).await == DeleteOutcome::Cancelled {
                println!("Cancelled.");
            }
        }
        Command::Export {
            tutorial_id,
            archive,
            bundled,
            out,
        } => {
            let dir = out.unwrap_or_else(|| config.export_dir.clone());
            let written = if archive {
                dashboard.tutorials.export_archive(&tutorial_id, &dir).await
            } else {
                dashboard.tutorials.mount().await;
                let Some(tutorial) = dashboard.tutorials.find(&tutorial_id).await else {
                    println!("No tutorial with id {}", tutorial_id);
                    return Ok(());
                };
                let media = if bundled {
                    MediaLinks::Bundled
                } else {
                    MediaLinks::absolute(config.media_origin.clone())
                };
                let written = dashboard
                    .tutorials
                    .export_markdown(&tutorial, &dir, &media)
                    .await;
                if bundled && written.is_some() && tutorial.has_video_content() {
                    println!(
                        "{}",
                        views::render_clip_manifest(&tutorial, &config.media_origin)
                    );
                }
                written
            };
            if let Some(path) = written {
                println!("Saved {}", path.display());
            }
        }
    }
    Ok(())
}

/// Applies the requested edits to a local copy. Steps are removed from the
/// highest number down so earlier removals don't shift later ones.
fn apply_edits(tutorial: &mut Tutorial, args: &EditArgs) {
    if let Some(title) = &args.title {
        tutorial.title = title.clone();
    }
    if let Some(introduction) = &args.introduction {
        tutorial.introduction = introduction.clone();
    }
    if let Some(summary) = &args.summary {
        tutorial.summary = summary.clone();
    }
    if let Some(read_time) = &args.read_time {
        let read_time = read_time.trim();
        tutorial.duration_estimate = (!read_time.is_empty()).then(|| read_time.to_string());
    }
    if let Some(tags) = &args.tags {
        tutorial.tags = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }
    tutorial.tips.extend(args.add_tip.iter().cloned());

    for number in &args.remove_video {
        if let Some(position) = number.checked_sub(1) {
            tutorial.remove_video(position);
        }
    }
    let mut removals = args.remove_step.clone();
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    for number in removals {
        if let Some(position) = number.checked_sub(1) {
            tutorial.remove_step(position);
        }
    }

    for text in &args.add_step {
        tutorial.add_step().text = text.clone();
    }
}
