use anyhow::Result;
use cdm_admin_core::{PageSize, env_non_empty, env_parse_with_default};
use cdm_admin_storage::MemoryStorage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

const ENV_HOST: &str = "CDM_ADMIN_HOST";
const ENV_PORT: &str = "CDM_ADMIN_PORT";
const ENV_SEED: &str = "CDM_ADMIN_SEED";
const ENV_DEFAULT_PAGE_SIZE: &str = "CDM_ADMIN_DEFAULT_PAGE_SIZE";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8787;

#[derive(Parser)]
#[command(name = "cdm-admin")]
#[command(about = "Admin dashboard backend for salesman listings", long_about = None)]
struct Cli {
    /// Rows per page when the query does not say (10, 25, 50 or 100)
    #[arg(long, global = true)]
    page_size: Option<PageSize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON API
    Serve {
        #[arg(short = 'H', long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// JSON array of user profiles to serve
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
    /// Print one salesman page for address-bar style parameters
    List {
        #[arg(short, long)]
        seed: Option<PathBuf>,
        /// Query parameter, e.g. `-p page=2 -p sortBy=name`
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Print one user profile
    Profile {
        id: String,
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.trim().is_empty() {
        return Err(format!("empty parameter name in {raw:?}"));
    }
    Ok((key.trim().to_owned(), value.to_owned()))
}

/// Seed path from the flag, then the environment. No seed means an empty store.
fn open_storage(seed: Option<PathBuf>) -> Result<Arc<MemoryStorage>> {
    let seed = seed.or_else(|| env_non_empty(ENV_SEED).map(PathBuf::from));
    let storage = match seed {
        Some(path) => MemoryStorage::from_json_file(&path)?,
        None => {
            tracing::info!("{ENV_SEED} not set, starting with an empty store");
            MemoryStorage::default()
        },
    };
    Ok(Arc::new(storage))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let page_size = cli
        .page_size
        .unwrap_or_else(|| env_parse_with_default(ENV_DEFAULT_PAGE_SIZE, PageSize::default()));

    match cli.command {
        Commands::Serve { host, port, seed } => {
            let host = host.unwrap_or_else(|| {
                env_parse_with_default(ENV_HOST, DEFAULT_HOST.to_owned())
            });
            let port = port.unwrap_or_else(|| env_parse_with_default(ENV_PORT, DEFAULT_PORT));
            commands::serve::run(host, port, seed, page_size).await?;
        },
        Commands::List { seed, params } => {
            commands::query::run_list(seed, params, page_size).await?;
        },
        Commands::Profile { id, seed } => {
            commands::query::run_profile(seed, id).await?;
        },
    }

    Ok(())
}
