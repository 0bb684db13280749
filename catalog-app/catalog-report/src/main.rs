use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};

use catalog_core::repositories::{CategoryRepository, MenuItemRepository};
use catalog_core::services::{AnalysisService, CatalogReport};
use catalog_infrastructure::{
    create_pool, run_migrations, MemoryCatalog, PgCategoryRepository, PgMenuItemRepository,
};
use catalog_shared::config::{AppConfig, StorageBackend};
use catalog_shared::telemetry::init_telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "catalog-report",
    version,
    about = "Menu catalog price and nutrition report"
)]
struct Args {
    /// JSON snapshot to report on; implies the memory backend
    #[arg(long)]
    snapshot: Option<String>,

    /// Also compute the average price of this category
    #[arg(long)]
    category: Option<String>,
}

#[derive(Serialize)]
struct CategoryPrice {
    category: String,
    average_price: Decimal,
}

#[derive(Serialize)]
struct ReportOutput {
    #[serde(flatten)]
    report: CatalogReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_average: Option<CategoryPrice>,
}

async fn run_report<M, C>(
    item_repo: Arc<M>,
    category_repo: Arc<C>,
    category: Option<String>,
) -> Result<ReportOutput>
where
    M: MenuItemRepository,
    C: CategoryRepository,
{
    let analysis = AnalysisService::new(item_repo, category_repo);
    let report = analysis.report().await?;

    let category_average = match category {
        Some(name) => {
            let average_price = analysis.average_price(Some(&name)).await?;
            Some(CategoryPrice {
                category: name,
                average_price,
            })
        }
        None => None,
    };

    Ok(ReportOutput {
        report,
        category_average,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load configuration
    let mut config = AppConfig::load()?;
    if let Some(path) = args.snapshot {
        config.storage.backend = StorageBackend::Memory;
        config.storage.snapshot_path = Some(path);
    }

    // Initialize telemetry; the guard flushes the file writer on drop
    let _log_guard = init_telemetry(&config.log)?;

    info!("{} report starting ({})", config.app.name, config.app.env);

    let output = match config.storage.backend {
        StorageBackend::Memory => {
            let catalog = match &config.storage.snapshot_path {
                Some(path) => {
                    info!("Opening catalog snapshot {}", path);
                    MemoryCatalog::with_snapshot(path).await?
                }
                None => MemoryCatalog::new(),
            };
            run_report(
                Arc::new(catalog.menu_items()),
                Arc::new(catalog.categories()),
                args.category,
            )
            .await?
        }
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database).await.map_err(|e| {
                error!("Failed to connect to database: {}", e);
                e
            })?;
            run_migrations(&pool).await?;
            info!("Database connection established.");

            run_report(
                Arc::new(PgMenuItemRepository::new(pool.clone())),
                Arc::new(PgCategoryRepository::new(pool)),
                args.category,
            )
            .await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
