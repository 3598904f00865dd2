//! Seed the ingredient and tag catalogs from files.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sea_orm::Database;
use tracing::info;

use larder_core::config::required;
use larder_core::tracing::{LogFormat, init_tracing};
use larder_recipes::import::{parse_ingredients, parse_tags};
use larder_recipes::infra::db::{DbIngredientRepository, DbTagRepository};
use larder_recipes::usecase::catalog::{ImportIngredientsUseCase, ImportTagsUseCase};

#[derive(Parser)]
#[command(name = "load-data", about = "Load catalog data into the recipes database")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingredients from a JSON array or a `name,measurement_unit` CSV.
    Ingredients {
        /// CSV fields may be wrapped in double quotes but cannot contain
        /// escaped (`""`) quotes.
        #[arg(long)]
        file: PathBuf,
    },
    /// Tags from a JSON array of `{name, color, slug}`.
    Tags {
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());
    let cli = Cli::parse();

    let db = Database::connect(&required("DATABASE_URL")?)
        .await
        .context("failed to connect to database")?;

    let (kind, summary) = match cli.command {
        Command::Ingredients { file } => {
            let contents = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("read {}", file.display()))?;
            let usecase = ImportIngredientsUseCase {
                repo: DbIngredientRepository { db },
            };
            ("ingredients", usecase.execute(parse_ingredients(&contents)?).await?)
        }
        Command::Tags { file } => {
            let contents = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("read {}", file.display()))?;
            let usecase = ImportTagsUseCase {
                repo: DbTagRepository { db },
            };
            ("tags", usecase.execute(parse_tags(&contents)?).await?)
        }
    };

    info!(
        read = summary.read,
        inserted = summary.inserted,
        skipped = (summary.read as u64).saturating_sub(summary.inserted),
        "{kind} loaded"
    );
    Ok(())
}
