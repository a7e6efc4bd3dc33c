use anyhow::{Context, Result};
use clap::Parser;
use jabaki_atoms::photos::SOURCE_FOLDERS;
use photos_block::auth::{Authenticator, ClientSecrets};
use photos_block::drive::DriveClient;
use photos_block::manifest::{build_manifest, write_manifest};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Scan the studio photo folders on Google Drive and write the id manifest for the front-end
#[derive(Parser, Debug)]
#[command(name = "generate-photos-json", version)]
struct Args {
    /// OAuth client secrets downloaded from the Google Cloud console
    #[arg(long, env = "GOOGLE_CREDENTIALS", default_value = "credentials.json")]
    credentials: PathBuf,

    /// Token cache, created on first login
    #[arg(long, env = "GOOGLE_TOKEN_CACHE", default_value = "token.json")]
    token_cache: PathBuf,

    /// Manifest to write
    #[arg(short, long, default_value = "frontend/src/data/images.json")]
    output: PathBuf,

    /// Drive folder to scan; repeat for several
    #[arg(long = "folder", default_values_t = SOURCE_FOLDERS.map(String::from))]
    folders: Vec<String>,

    /// Photo keys listed first in every folder, comma separated
    #[arg(long, value_delimiter = ',')]
    key_order: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let secrets = ClientSecrets::load(&args.credentials)
        .await
        .with_context(|| format!("loading OAuth client from {}", args.credentials.display()))?;

    let http = reqwest::Client::new();
    let authenticator = Authenticator::new(http.clone(), secrets, args.token_cache.clone());
    let access_token = authenticator
        .access_token()
        .await
        .context("authenticating with Google Drive")?;

    let drive = DriveClient::new(http, access_token);
    let manifest = build_manifest(&drive, &args.folders, &args.key_order)
        .await
        .context("scanning Drive folders")?;

    write_manifest(&args.output, &manifest)
        .await
        .with_context(|| format!("writing {}", args.output.display()))?;

    tracing::info!("✅ Photos JSON generated successfully: {}", args.output.display());
    tracing::info!(
        "Found {} photos across {} folders",
        manifest.photo_count(),
        manifest.folder_count()
    );
    Ok(())
}
