use anyhow::Context;
use clap::{Parser, Subcommand};
use sales_tracking_api::{config, db, migrator::Migrator};
use sea_orm_migration::MigratorTrait;
use tracing::info;

/// Runs the embedded schema migrations against the configured database
#[derive(Debug, Parser)]
#[command(name = "migration", version)]
struct Cli {
    /// Overrides the configured database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations (default)
    Up {
        /// Number of migrations to apply
        #[arg(short, long)]
        num: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        /// Number of migrations to roll back
        #[arg(short, long, default_value_t = 1)]
        num: u32,
    },
    /// Drop every table and reapply all migrations
    Fresh,
    /// Show applied and pending migrations
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(&cfg.log_level, cfg.log_json);
    if let Some(url) = cli.database_url {
        cfg.database_url = url;
    }

    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to the database")?;

    match cli.command.unwrap_or(Command::Up { num: None }) {
        Command::Up { num } => {
            info!("Applying migrations");
            Migrator::up(&pool, num).await?;
        }
        Command::Down { num } => {
            info!(num, "Rolling back migrations");
            Migrator::down(&pool, Some(num)).await?;
        }
        Command::Fresh => {
            info!("Recreating schema");
            Migrator::fresh(&pool).await?;
        }
        Command::Status => Migrator::status(&pool).await?,
    }

    info!("Migration command completed");
    Ok(())
}
