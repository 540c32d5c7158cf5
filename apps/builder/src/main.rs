mod config;
mod errors;
mod export;
mod layout;
mod models;
mod render;
mod session;
mod store;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::AppError;
use crate::export::DocumentExporter;
use crate::layout::{LayoutParams, Viewport};
use crate::models::resume::Resume;
use crate::render::HeadlessSnapshot;
use crate::session::EditorSession;
use crate::store::{CachedStore, HttpStore};

/// Instant Resume Builder core engine: export a resume to a single-page PDF
/// and save/load records against the remote document store.
#[derive(Parser)]
#[command(name = "builder", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export a resume JSON file to a single-page PDF
    Export {
        /// Resume record, JSON
        #[arg(long)]
        input: PathBuf,
        /// Directory the PDF is written into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Save a resume JSON file to the remote store
    Save {
        #[arg(long)]
        input: PathBuf,
        /// Merge into an existing record instead of creating a new one
        #[arg(long)]
        id: Option<String>,
    },
    /// Load a resume from the remote store into a JSON file
    Load {
        #[arg(long)]
        id: String,
        #[arg(long)]
        output: PathBuf,
    },
    /// List recently saved resumes
    Recent {
        #[arg(long, default_value_t = 5)]
        max: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging before anything else can fail.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Instant Resume Builder v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Export { input, out_dir } => run_export(&input, &out_dir).await,
        Command::Save { input, id } => run_save(&input, id).await,
        Command::Load { id, output } => run_load(&id, &output).await,
        Command::Recent { max } => run_recent(max).await,
    }
}

fn read_resume(path: &PathBuf) -> Result<Resume> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading resume file {}", path.display()))?;
    let mut resume: Resume =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    resume.normalize_section_order();
    Ok(resume)
}

/// Builds the store-backed session from environment configuration.
fn remote_session() -> Result<EditorSession<CachedStore<HttpStore>>> {
    let config = Config::from_env()?;
    let store = CachedStore::new(HttpStore::new(&config)?);
    Ok(EditorSession::new(store))
}

async fn run_export(input: &PathBuf, out_dir: &PathBuf) -> Result<()> {
    let resume = read_resume(input)?;

    let params = LayoutParams::compute(&Viewport::default());
    let mut snapshot = HeadlessSnapshot::mounted(&resume, params);
    let mut exporter = DocumentExporter::new();

    let doc = exporter
        .export(&resume, &params, &mut snapshot)
        .await
        .map_err(AppError::from)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let path = out_dir.join(&doc.file_name);
    std::fs::write(&path, &doc.bytes)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        "Exported {} page(s), {} bytes -> {}",
        doc.page_count,
        doc.bytes.len(),
        path.display()
    );
    Ok(())
}

async fn run_save(input: &PathBuf, id: Option<String>) -> Result<()> {
    let resume = read_resume(input)?;
    let mut session = remote_session()?;
    session.replace_resume(resume);
    if let Some(id) = id {
        session.adopt_remote_id(id);
    }

    let ok = session.save_to_cloud().await;
    println!("{}", session.status().unwrap_or_default());
    if !ok {
        bail!("save did not complete");
    }
    Ok(())
}

async fn run_load(id: &str, output: &PathBuf) -> Result<()> {
    let mut session = remote_session()?;
    let ok = session.load_from_cloud(id).await;
    println!("{}", session.status().unwrap_or_default());
    if !ok {
        bail!("load did not complete");
    }

    let json = serde_json::to_string_pretty(session.resume())?;
    std::fs::write(output, json)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Wrote resume {} -> {}", id, output.display());
    Ok(())
}

async fn run_recent(max: usize) -> Result<()> {
    let mut session = remote_session()?;
    session.refresh_recent(max).await;
    if session.recent().is_empty() {
        println!("No recent resumes.");
        return Ok(());
    }
    for record in session.recent() {
        let name = if record.name.is_empty() {
            "Unnamed Resume"
        } else {
            &record.name
        };
        println!("{}  {}  {}", record.id, name, record.created_at);
    }
    Ok(())
}
