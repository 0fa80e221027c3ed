/// Stride Server - exercise tracker API
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use stride_server::{config::ServerConfig, create_router, services::TrackerService, state::AppState};
use stride_storage::LocalStorageContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stride-server")]
#[command(about = "Stride exercise tracker API server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./stride.toml when present)
    #[arg(short, long, global = true, env = "STRIDE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        username: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stride_server=info,stride_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await?,
        Commands::AddUser { username } => add_user(&config, &username).await?,
        Commands::ListUsers => list_users(&config).await?,
    }

    Ok(())
}

async fn open_storage(config: &ServerConfig) -> anyhow::Result<Arc<LocalStorageContext>> {
    ensure_parent_dir(&config.storage.database_url)?;
    let pool = stride_storage::connect(&config.storage.database_url).await?;
    Ok(Arc::new(LocalStorageContext::new(pool)))
}

/// Create the directory of a file-backed `SQLite` URL so first runs work
fn ensure_parent_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Stride Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    if config.api.legacy_responses {
        tracing::info!("Legacy responses enabled: rejections are reported as 200 OK");
    }

    let storage = open_storage(&config).await?;
    tracing::info!("Database connected");

    let tracker = Arc::new(TrackerService::new(storage.clone()));
    let app = create_router(AppState::new(tracker), &config);

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

async fn add_user(config: &ServerConfig, username: &str) -> anyhow::Result<()> {
    let storage = open_storage(config).await?;
    let tracker = TrackerService::new(storage.clone());

    let user = tracker.create_user(username).await?;
    println!("Created user {} - {}", user.id, user.username);

    storage.close().await;
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let storage = open_storage(config).await?;
    let tracker = TrackerService::new(storage.clone());

    let users = tracker.list_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.id, user.username);
    }

    storage.close().await;
    Ok(())
}
