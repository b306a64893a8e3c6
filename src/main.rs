use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stock_search::local_server::CONFIG_FILENAME;
use stock_search::{AppError, ConnectionPool, LocalServer, ServerConfig};

/// Inventory search server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, default_value = CONFIG_FILENAME)]
    config: PathBuf,

    /// Port to listen on, overrides the configuration and PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file, overrides the configuration and DATABASE_PATH
    #[arg(short, long)]
    database: Option<PathBuf>,
}

/// Initialize tracing with `RUST_LOG` filtering, `info` by default
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Configuration file, then environment, then command line
fn build_config(args: &Args) -> Result<ServerConfig, AppError> {
    let mut config = ServerConfig::load(&args.config)?;
    config.apply_env(|key| std::env::var(key).ok())?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = &args.database {
        config.database_path = database.clone();
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let args = Args::parse();
    let config = build_config(&args)?;

    let pool = Arc::new(ConnectionPool::new(
        config.database_path.clone(),
        config.connection_limit,
    ));

    // Fail fast when the database cannot be used
    match pool.run(|db| db.count_stock_groups()).await {
        Ok(groups) => {
            tracing::info!(
                path = %config.database_path.display(),
                "Database connection successful, {} stock groups",
                groups
            );
        }
        Err(e) => {
            tracing::error!(path = %config.database_path.display(), "Database connection error: {}", e);
            return Err(e.into());
        }
    }

    let server = LocalServer::new(config, pool.clone());
    let handle = server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    handle.shutdown();
    pool.close();
    Ok(())
}
