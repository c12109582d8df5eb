use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::{io, path::PathBuf};
use stockroom::{
    config::{database, settings},
    console::Console,
    core::category,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Parser, Debug)]
#[command(name = "stockroom", version, about = "Inventory console with category stock status")]
struct Args {
    /// Database URL (overrides DATABASE_URL and config.toml)
    #[arg(long)]
    database_url: Option<String>,

    /// Path to the settings file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute statistics for every category and exit
    Refresh,
    /// Print the dashboard and exit
    Dashboard,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the menus
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    dotenv().ok();

    let args = Args::parse();

    // A missing default config.toml is fine; an explicit --config must exist
    let required = args.config.is_some();
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let app_config = settings::load_app_configuration(&config_path, required)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    let database_url = settings::resolve_database_url(args.database_url, &app_config);
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to open database {}: {}", database_url, e))?;
    database::create_tables(&db).await?;
    category::seed_categories(&db, &app_config.categories).await?;
    info!("Database ready at {}", database_url);

    match args.command {
        Some(Command::Refresh) => {
            let mut console = Console::new(db, app_config, io::empty(), io::stdout());
            console.refresh_all().await
        }
        Some(Command::Dashboard) => {
            let mut console = Console::new(db, app_config, io::empty(), io::stdout());
            console.show_dashboard().await
        }
        None => {
            let mut console = Console::new(db, app_config, io::stdin().lock(), io::stdout());
            console.run().await
        }
    }
}
