//! 样例数据写入程序入口

use std::process::ExitCode;

use clap::Parser;

use book_catalog::catalog::{report, sample_books, seeder, CatalogStore, SeedOutcome};
use book_catalog::cli::{parse_args, ConnectionArgs};
use book_catalog::error::CatalogResult;
use book_catalog::{env, logging};

/// Seed the book catalog collection with the sample records
#[derive(Parser, Debug)]
#[command(name = "catalog-seed", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Drop the collection before inserting, so the fixture is not duplicated
    #[arg(long)]
    drop: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_path = env::load_dotenv();
    logging::init();
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let cli: Cli = parse_args();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(category = ?e.category(), "Seeding failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> CatalogResult<()> {
    let config = cli.connection.resolve()?;
    let store = CatalogStore::connect(&config).await?;

    let outcome = seed(&store, cli.drop).await;
    store.close().await;

    let (seeded, total) = outcome?;
    print!("{}", report::render_seed(&seeded, total));
    Ok(())
}

async fn seed(store: &CatalogStore, drop: bool) -> CatalogResult<(SeedOutcome, u64)> {
    if drop {
        seeder::reset_collection(store.books()).await?;
    }
    let seeded = seeder::seed_books(store.books(), &sample_books()).await?;
    let total = seeder::count_books(store.books()).await?;
    Ok((seeded, total))
}
