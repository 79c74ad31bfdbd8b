//! # repurpose-cli: A CLI for the blog repurposer
//!
//! Runs the repurposing pipeline from the terminal, keeps a local generation
//! history and exports past results as Markdown.

mod commands;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use repurpose::ToneOption;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Where generation history is kept
    #[arg(
        long,
        global = true,
        env = "REPURPOSE_HISTORY_FILE",
        default_value = "repurpose-history.json"
    )]
    history_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Repurpose a blog post into social and SEO assets
    Generate(GenerateArgs),
    /// Inspect or clear the generation history
    History(HistoryArgs),
    /// Export a history entry as a Markdown file
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// The public URL of the blog post
    url: String,
    /// Tone of the generated content
    #[arg(long, default_value_t = ToneOption::default())]
    tone: ToneOption,
    /// Read the post from this file instead of extracting it from the URL
    #[arg(long)]
    manual_text_file: Option<PathBuf>,
    /// Also generate the newsletter, carousel and content score
    #[arg(long)]
    extended: bool,
    /// Print the raw JSON result instead of Markdown
    #[arg(long)]
    json: bool,
    /// Also write the Markdown export to this path
    #[arg(long)]
    export: Option<PathBuf>,
    #[command(flatten)]
    providers: ProviderArgs,
}

/// Settings for the outbound services.
#[derive(Args, Debug, Clone)]
struct ProviderArgs {
    #[arg(long, env = "AI_PROVIDER", default_value = "local")]
    ai_provider: String,
    #[arg(long, env = "AI_API_URL")]
    ai_api_url: Option<String>,
    #[arg(long, env = "AI_API_KEY", hide_env_values = true)]
    ai_api_key: Option<String>,
    #[arg(long, env = "AI_MODEL", default_value = "google/gemini-2.5-flash")]
    ai_model: String,
    #[arg(long, env = "AI_TIMEOUT_SECS", default_value_t = 90)]
    ai_timeout_secs: u64,
    #[arg(long, env = "JINA_BASE_URL", default_value = repurpose_web::DEFAULT_JINA_BASE_URL)]
    jina_base_url: String,
    #[arg(long, env = "JINA_API_KEY", hide_env_values = true)]
    jina_api_key: Option<String>,
    #[arg(long, env = "EXTRACTION_TIMEOUT_SECS", default_value_t = 30)]
    extraction_timeout_secs: u64,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    #[command(subcommand)]
    command: HistoryCommands,
}

#[derive(Subcommand, Debug)]
enum HistoryCommands {
    /// List recorded generations, most recent first
    List,
    /// Print one recorded generation
    Show {
        /// Position in the list, 0 being the most recent
        #[arg(default_value_t = 0)]
        index: usize,
    },
    /// Remove all recorded generations
    Clear,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Position in the history list, 0 being the most recent
    #[arg(default_value_t = 0)]
    index: usize,
    /// Output path; defaults to a timestamped file name in the current directory
    #[arg(long, short)]
    output: Option<PathBuf>,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Setup logging to a file
    let log_file = File::create("repurpose-cli.log")?;
    let subscriber = fmt::Subscriber::builder()
        .with_writer(log_file)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    commands::dispatch(cli).await
}
