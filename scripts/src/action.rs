use clap::{Args, Parser, Subcommand};

use crate::{config, seed, utils};

#[derive(Args, Debug, Clone)]
pub struct RunMigrationsArgs {
    #[arg(short, long)]
    file: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    /// Apply a migration file from ../migrations against the configured db
    RunMigrations(RunMigrationsArgs),
    /// Insert the demo shelter and its sample pets (skips a non-empty db)
    Seed,
}

/// Maintenance commands for the Paw Adopt database
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        let db_pool = utils::setup_sqlite_db_pool(config::APP_CONFIG.is_prod()).await?;

        match &self.action {
            Action::RunMigrations(RunMigrationsArgs { file }) => {
                utils::run_migrations(&db_pool, file).await
            }
            Action::Seed => seed::run(&db_pool).await,
        }
    }
}
