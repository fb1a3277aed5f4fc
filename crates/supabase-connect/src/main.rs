use clap::Parser;
use tracing_subscriber::EnvFilter;

use supabase_connect::cli::Cli;
use supabase_connect::{run, TextEntryManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env must be loaded before clap reads env-backed flags
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let manager = TextEntryManager::from_config(cli.config()?)?
        .with_sql_function(cli.sql_function.clone());

    let mut stdout = std::io::stdout();
    run(&manager, &cli.run_options(), &mut stdout).await?;
    Ok(())
}
