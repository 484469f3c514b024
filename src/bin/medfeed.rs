//! medfeed CLI - healthcare CSV-to-MySQL data pipeline
//!
//! `setup` creates the database and tables and runs the full load; `load`
//! runs against an existing database; `check` verifies connectivity.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use medfeed::{Database, DbConfig, Pipeline};

#[derive(Parser)]
#[command(name = "medfeed")]
#[command(version, about = "Healthcare CSV-to-MySQL data pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database if absent, then create tables and load all datasets
    Setup {
        /// Directory containing the CSV datasets
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Print the load report as JSON instead of the summary banner
        #[arg(long)]
        json: bool,
    },

    /// Create tables and load all datasets into an existing database
    Load {
        /// Directory containing the CSV datasets
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Print the load report as JSON instead of the summary banner
        #[arg(long)]
        json: bool,
    },

    /// Test the database connection and exit
    Check,
}

fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match DbConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Setup { data_dir, json } => setup(config, data_dir, true, json),
        Commands::Load { data_dir, json } => setup(config, data_dir, false, json),
        Commands::Check => check(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Run the pipeline, optionally creating the database first.
fn setup(config: DbConfig, data_dir: PathBuf, create_database: bool, json: bool) -> medfeed::Result<()> {
    println!("🏥 medfeed data pipeline");
    println!("  database: {} @ {}:{}", config.database, config.host, config.port);
    println!("  data dir: {}", data_dir.display());
    println!();

    let db = Database::new(config);

    if create_database {
        db.create_database()?;
        println!("  ✓ Database present");
    }

    let mut pipeline = Pipeline::new(db, data_dir);
    let report = pipeline.setup_database()?;

    if json {
        println!("{}", report.to_json_pretty()?);
    } else {
        println!("\n{}", report);
    }
    Ok(())
}

/// Standalone connection test; the process exit code reflects the result.
fn check(config: DbConfig) -> medfeed::Result<()> {
    println!("Testing database connection...");
    println!("  host:     {}", config.host);
    println!("  user:     {}", config.user);
    println!("  database: {}", config.database);
    println!("  port:     {}", config.port);

    let db = Database::new(config);
    if db.test_connection() {
        println!("✓ Connection test PASSED");
        Ok(())
    } else {
        println!("✗ Connection test FAILED");
        process::exit(1);
    }
}
