use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use vending_api::{config, db, migrator::Migrator};

#[derive(Parser)]
#[command(name = "migration", about = "Manage the vending-api database schema", version)]
struct Cli {
    /// Overrides the configured database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations (default)
    Up {
        #[arg(long, help = "Apply at most this many migrations")]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        #[arg(long, default_value_t = 1, help = "Number of migrations to roll back")]
        steps: u32,
    },
    /// List applied and pending migrations
    Status,
    /// Drop every table and reapply all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_config().context("failed to load application config")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);
    if let Some(url) = cli.database_url {
        cfg.database_url = url;
    }

    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to database")?;

    match cli.command.unwrap_or(Commands::Up { steps: None }) {
        Commands::Up { steps } => {
            Migrator::up(&pool, steps).await?;
            info!("Migrations applied");
        }
        Commands::Down { steps } => {
            Migrator::down(&pool, Some(steps)).await?;
            info!(steps, "Migrations rolled back");
        }
        Commands::Status => {
            for migration in Migrator::get_applied_migrations(&pool).await? {
                println!("applied  {}", migration.name());
            }
            for migration in Migrator::get_pending_migrations(&pool).await? {
                println!("pending  {}", migration.name());
            }
        }
        Commands::Fresh => {
            Migrator::fresh(&pool).await?;
            info!("Schema recreated");
        }
    }

    db::close_pool(pool).await?;
    Ok(())
}
