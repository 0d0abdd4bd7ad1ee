use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use momentum::events::ChangeBus;
use momentum::schema;

#[derive(Parser, Debug)]
#[command(name = "momentum", about = "Personal productivity server")]
struct Args {
    /// Path to the SQLite database file.
    #[arg(long, default_value = "momentum.db")]
    database: PathBuf,
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let connection = Connection::open(&args.database)?;
    schema::create_tables(&connection)?;
    let connection = Arc::new(Mutex::new(connection));

    let bus = Arc::new(ChangeBus::default());

    momentum::rocket(connection, bus).launch().await?;

    Ok(())
}
