//! Ingest Upload CLI - send a file to a data-source endpoint
//!
//! # Commands
//!
//! ```bash
//! ingest-upload sources                          # List configured data sources
//! ingest-upload upload --source ocr scan.pdf     # Upload a document for OCR
//! ingest-upload upload -s gmail credentials.json # Upload credentials, then authorize
//! ```
//!
//! The server defaults to `http://localhost:5000` and can be overridden
//! with `--server` or `INGEST_SERVER_URL` (a `.env` file is honored).

use clap::{Parser, Subcommand};
use ingest_uploader::{
    FollowUp, LocalFile, Outcome, ReqwestTransport, ServerConfig, SourceKind, SystemBrowser,
    UploadController, UploadStatus, SERVER_URL_ENV,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ingest-upload")]
#[command(about = "Upload files to the ingestion backend's data-source endpoints", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = SERVER_URL_ENV)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured data sources
    Sources,

    /// Upload one file through a data source
    Upload {
        /// File to upload
        input: PathBuf,

        /// Data source (gmail, gmail-legacy, ocr)
        #[arg(short, long, default_value = "ocr")]
        source: SourceKind,

        /// Print the authorization URL instead of opening a browser
        #[arg(long)]
        no_browser: bool,

        /// Request timeout in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match server_config(cli.server.as_deref()) {
        Ok(server) => match cli.command {
            Commands::Sources => cmd_sources(&server),
            Commands::Upload {
                input,
                source,
                no_browser,
                timeout,
            } => cmd_upload(&server, source, &input, no_browser, timeout).await,
        },
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn server_config(flag: Option<&str>) -> Result<ServerConfig, ingest_uploader::ConfigError> {
    match flag {
        Some(url) => ServerConfig::new(url),
        None => ServerConfig::from_env(),
    }
}

fn cmd_sources(server: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📋 Data sources on {}:\n", server.base_url());

    for kind in SourceKind::all() {
        let source = kind.config(server);
        println!("  📄 {} ({})", source.title, kind);
        println!("     {}", source.prompt);
        println!("     POST {} [{}]", source.endpoint, source.file_field);
        if let Some(FollowUp::Authorize { token_endpoint }) = &source.follow_up {
            println!("     then GET {} and open authorization_url", token_endpoint);
        }
        if let Some(delay) = source.auto_close() {
            println!("     closes after {}s", delay.as_secs());
        }
        println!();
    }

    Ok(())
}

async fn cmd_upload(
    server: &ServerConfig,
    kind: SourceKind,
    input: &Path,
    no_browser: bool,
    timeout: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = kind.config(server);
    let file = LocalFile::read(input).await?;
    eprintln!("📄 {} → {} ({} bytes)", input.display(), source.endpoint, file.len());

    let transport = ReqwestTransport::with_timeout(Duration::from_secs(timeout))?;
    let controller = UploadController::new(source, transport, SystemBrowser::new(!no_browser));
    controller.select_file(Some(file));

    let submission = controller.submit().await;
    let banner = controller.snapshot().banner;

    match banner.status() {
        UploadStatus::Success => eprintln!("✅ {}", banner.message()),
        UploadStatus::Info => eprintln!("🔑 {}", banner.message()),
        UploadStatus::Warning => eprintln!("⚠️  {}", banner.message()),
        UploadStatus::Danger => eprintln!("❌ {}", banner.message()),
        UploadStatus::Unknown => {}
    }

    match submission.outcome {
        Outcome::Uploaded { .. } | Outcome::Redirected { .. } => Ok(()),
        Outcome::Failed(err) => Err(err.into()),
        Outcome::Rejected | Outcome::Discarded => Err("upload did not complete".into()),
    }
}
