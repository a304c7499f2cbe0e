//! Scribe CLI
//!
//! Command-line interface for inspecting and editing a Scribe store.

use std::process;

use clap::{Parser, Subcommand};
use scribe::{Config, Result, Store, SyncStrategy};
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

/// Scribe CLI
#[derive(Parser, Debug)]
#[command(name = "scribe-cli")]
#[command(about = "CLI for the Scribe JSON document store")]
#[command(version)]
struct Args {
    /// Root directory of the store
    #[arg(short, long, default_value = "./scribe_data")]
    dir: String,

    /// fsync every record before it is published
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a record
    Write {
        /// Collection name
        collection: String,

        /// Resource name
        resource: String,

        /// Record body as JSON text
        json: String,
    },

    /// Read a record
    Read {
        /// Collection name
        collection: String,

        /// Resource name
        resource: String,
    },

    /// Print every record of a collection
    ReadAll {
        /// Collection name
        collection: String,
    },

    /// Delete a record, or the whole collection when no resource is given
    Delete {
        /// Collection name
        collection: String,

        /// Resource name
        resource: Option<String>,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scribe=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("Scribe CLI v{}", scribe::VERSION);

    let sync_strategy = if args.sync {
        SyncStrategy::EveryWrite
    } else {
        SyncStrategy::OsBuffered
    };

    let config = Config::builder()
        .data_dir(&args.dir)
        .sync_strategy(sync_strategy)
        .build();

    let store = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&store, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(store: &Store, command: Commands) -> Result<()> {
    match command {
        Commands::Write {
            collection,
            resource,
            json,
        } => {
            let value: Value = serde_json::from_str(&json).map_err(|e| {
                scribe::ScribeError::InvalidArgument(format!("record body is not valid JSON: {}", e))
            })?;
            store.write(&collection, &resource, &value)?;
            tracing::info!("Wrote {}/{}", collection, resource);
        }
        Commands::Read {
            collection,
            resource,
        } => {
            let value: Value = store.read(&collection, &resource)?;
            println!("{}", pretty(&value));
        }
        Commands::ReadAll { collection } => {
            let records: Vec<Value> = store.read_all_as(&collection)?;
            println!("{}", pretty(&Value::Array(records)));
        }
        Commands::Delete {
            collection,
            resource,
        } => {
            let resource = resource.unwrap_or_default();
            store.delete(&collection, &resource)?;
            if resource.is_empty() {
                tracing::info!("Deleted collection {}", collection);
            } else {
                tracing::info!("Deleted {}/{}", collection, resource);
            }
        }
    }

    Ok(())
}

fn pretty(value: &Value) -> String {
    // Serializing a `Value` cannot fail
    serde_json::to_string_pretty(value).unwrap_or_default()
}
