use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Terminal console for the vehicle-rental backend
#[derive(Parser, Debug)]
#[command(name = "rental_console", version, about, long_about = None)]
pub struct Cli {
    /// Backend API root, overrides API_BASE_URL
    #[arg(global = true, long = "base-url")]
    pub base_url: Option<String>,

    /// Directory for log files, overrides LOG_DIR
    #[arg(global = true, long = "log-dir")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Open the interactive console (default)
    Tui,

    /// Probe the client, vehicle and reservation endpoints
    Check,

    /// Print a list of entities and exit
    List {
        #[arg(value_enum)]
        entity: ListTarget,

        /// Only reservations with this status (PENDING, CONFIRMEE, ...)
        #[arg(long)]
        status: Option<String>,
    },

    /// Print one vehicle or reservation by id
    Show {
        #[arg(value_enum)]
        entity: ShowTarget,

        id: i64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ListTarget {
    Clients,
    Vehicles,
    AvailableVehicles,
    Reservations,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ShowTarget {
    Vehicle,
    Reservation,
}
