use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::routing::get;
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use listings::config::ListingsConfig;
use listings::domain::ports::IdentityProvider;
use listings::domain::service::Service;
use listings::infra::blobs::LocalBlobStore;
use listings::infra::identity::SeaOrmIdentityProvider;
use listings::infra::storage::schema;
use listings::infra::storage::sea_orm_repo::{SeaOrmDirectoryRepository, SeaOrmListingsRepository};

mod config;
use config::AppConfig;

/// Campus Market Server - university marketplace backend
#[derive(Parser)]
#[command(name = "market-server")]
#[command(about = "Campus Market Server - university marketplace backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

/// Expand a relative sqlite DSN so the database directory exists before
/// connecting. Keeps "sqlite::memory:" as-is.
fn prepare_sqlite_dsn(dsn: &str) -> Result<()> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok(());
    }
    let Some(db_path) = dsn.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path_str = match db_path.split_once('?') {
        Some((p, _)) => p,
        None => db_path,
    };
    if let Some(dir) = Path::new(path_str).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

fn init_logging(configured_level: &str, verbose: u8) {
    let level = match verbose {
        0 => configured_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    if let Some(port) = cli.port {
        config.override_port(port)?;
    }

    init_logging(&config.logging.level, cli.verbose);
    tracing::info!("Campus Market Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let dsn = config.database.url.trim().to_owned();
    if dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    prepare_sqlite_dsn(&dsn)?;

    tracing::info!("Connecting to database: {dsn}");
    let mut connect_opts = ConnectOptions::new(dsn);
    if let Some(max_conns) = config.database.max_conns {
        connect_opts.max_connections(max_conns);
    }
    let db = Database::connect(connect_opts).await?;
    schema::create_tables(&db).await?;

    let listings_repo = Arc::new(SeaOrmListingsRepository::new(db.clone()));
    let directory_repo = Arc::new(SeaOrmDirectoryRepository::new(db.clone()));
    let blobs = Arc::new(LocalBlobStore::new(config.server.public_base_url.clone()));
    let listings_config: ListingsConfig = config.listings.clone();

    let service = Arc::new(Service::new(
        listings_repo,
        directory_repo,
        blobs,
        listings_config,
    ));
    let identity: Arc<dyn IdentityProvider> = Arc::new(SeaOrmIdentityProvider::new(db.clone()));

    let app = listings::api::rest::routes::router(service, identity)
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .map_err(|e| anyhow!("Invalid bind_addr '{}': {e}", config.server.bind_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {e}");
    }
    tracing::info!("Shutdown signal received");
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
