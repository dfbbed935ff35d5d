mod export;
mod trips;

use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use routelog_store::{FileStorage, RecordStore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "routelog")]
#[command(about = "Log driving distances and export them by week")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up the distance between two places and log the trip
    Add {
        /// Where the trip starts
        origin: String,
        /// Where the trip ends
        destination: String,
    },
    /// Show the trips logged in a week
    List {
        /// Any date inside the week (YYYY-MM-DD); defaults to the current week
        #[arg(long, value_parser = parse_week_arg)]
        week: Option<String>,
    },
    /// Show recent weeks with their trip counts
    Weeks {
        /// How many weeks to show, current week first
        #[arg(long, default_value_t = 4)]
        count: usize,
    },
    /// Delete a logged trip by id
    Delete {
        /// Record id as printed by `list`
        id: uuid::Uuid,
    },
    /// Write a week's trips to a spreadsheet (CSV) file
    Export {
        /// Any date inside the week (YYYY-MM-DD); defaults to the current week
        #[arg(long, value_parser = parse_week_arg)]
        week: Option<String>,
        /// Directory for the file; defaults to `ROUTELOG_EXPORT_DIR`
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

/// Accepts any ISO date and normalises it to the key of its week.
fn parse_week_arg(raw: &str) -> Result<String, String> {
    routelog_core::parse_week_key(raw)
        .map(|monday| monday.format(routelog_core::WEEK_KEY_FORMAT).to_string())
        .map_err(|e| e.to_string())
}

fn current_week_key() -> String {
    routelog_core::week_key_of(chrono::Local::now().date_naive())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = routelog_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let store = Mutex::new(RecordStore::load(FileStorage::new(&config.data_dir)));

    match cli.command {
        Commands::Add {
            origin,
            destination,
        } => trips::run_add(&config, &store, &origin, &destination).await,
        Commands::List { week } => {
            let week_key = week.unwrap_or_else(current_week_key);
            trips::run_list(&store, &week_key)
        }
        Commands::Weeks { count } => trips::run_weeks(&store, count),
        Commands::Delete { id } => trips::run_delete(&store, id),
        Commands::Export { week, out_dir } => {
            let week_key = week.unwrap_or_else(current_week_key);
            let out_dir = out_dir.unwrap_or_else(|| config.export_dir.clone());
            export::run_export(&store, &week_key, &out_dir)
        }
    }
}
