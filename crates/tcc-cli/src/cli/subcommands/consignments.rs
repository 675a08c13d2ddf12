use clap::Subcommand;
use tcc_core::enums::ConsignmentStatus;

use crate::cli::parse;

/// Consignment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConsignmentCommands {
    /// List consignments, newest first.
    List {
        #[arg(long, value_parser = parse::status)]
        status: Option<ConsignmentStatus>,
    },
    /// Get a consignment by ID.
    Get { id: String },
    /// Look up a consignment by tracking number.
    Track { tracking_number: String },
    /// Book a consignment.
    Create {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        sender: String,
        #[arg(long)]
        receiver: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        weight_kg: Option<f64>,
    },
    /// Update a consignment. Status is set as given.
    Update {
        id: String,
        #[arg(long)]
        origin: Option<String>,
        #[arg(long)]
        destination: Option<String>,
        #[arg(long)]
        sender: Option<String>,
        #[arg(long)]
        receiver: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        weight_kg: Option<f64>,
        #[arg(long, value_parser = parse::status)]
        status: Option<ConsignmentStatus>,
    },
    /// Delete a consignment.
    Delete { id: String },
}
