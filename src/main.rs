//! grandline - a terminal analytics dashboard for a Grand Line world
//! database.

use std::sync::Arc;
use std::time::Duration;

use grandline::cli::Cli;
use grandline::config::{Config, ConnectionConfig};
use grandline::error::{GrandlineError, Result};
use grandline::query::Runner;
use grandline::{db, logging, snapshot, tui};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Snapshot mode keeps stdout clean for the rendered page.
    if cli.snapshot {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // A local .env may carry DATABASE_URL.
    dotenvy::dotenv().ok();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(&cli, &config)?.ok_or_else(|| {
        GrandlineError::config(
            "No database connection configured. Pass a connection string, set DATABASE_URL, \
             or add [connections.default] to the config file.",
        )
    })?;

    info!("Connection: {}", connection.display_string());

    // One attempt; an unreachable store aborts startup.
    let client = db::connect(&connection).await?;
    let ttl = cli
        .cache_ttl
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.cache.ttl());
    let runner = Runner::new(Arc::from(client), ttl);

    let result = if cli.snapshot {
        match snapshot::render_page(&runner).await {
            Ok(page) => {
                print!("{page}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    } else {
        tui::run(&runner).await
    };

    runner.close().await?;
    result
}

/// Resolves the final connection configuration from CLI args, config file,
/// and environment.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<Option<ConnectionConfig>> {
    // Start with CLI connection config if provided
    let mut connection = cli.to_connection_config()?;

    // If no CLI connection, try named connection from config
    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(GrandlineError::config(format!(
                    "Connection '{}' not found in config file",
                    name
                )));
            }
        }
    }

    // If still no connection, try default from config
    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    // Last resort: DATABASE_URL from the environment
    if connection.is_none() {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            connection = Some(ConnectionConfig::from_connection_string(&url)?);
        }
    }

    // Apply environment variable defaults and enforce TLS
    if let Some(ref mut conn) = connection {
        conn.apply_env_defaults();
        conn.require_tls()?;
    }

    Ok(connection)
}
