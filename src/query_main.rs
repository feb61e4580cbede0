//! 查询演示程序入口

use std::process::ExitCode;

use clap::Parser;

use book_catalog::catalog::report::{self, OutputFormat};
use book_catalog::catalog::{run_battery, CatalogStore, RunPlan};
use book_catalog::cli::{parse_args, ConnectionArgs};
use book_catalog::error::CatalogResult;
use book_catalog::{env, logging};

/// Run the query, update, aggregation and index demonstrations against the book catalog
#[derive(Parser, Debug)]
#[command(name = "catalog-query", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Print the results as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Drop the demo indexes first so the "before" plan is a collection scan
    #[arg(long)]
    reset_indexes: bool,
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
            tracing::error!(category = ?e.category(), "Query run failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> CatalogResult<()> {
    let config = cli.connection.resolve()?;
    let plan = RunPlan {
        reset_indexes: cli.reset_indexes,
        ..RunPlan::default()
    };
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let store = CatalogStore::connect(&config).await?;
    let outcome = run_battery(&store, &plan).await;
    store.close().await;

    println!("{}", report::render(&outcome?, format)?);
    Ok(())
}
