use clap::{Args, Subcommand};
use tcc_core::enums::EntityType;

use crate::cli::parse;
use crate::cli::subcommands::{
    AuthCommands, BranchCommands, ConsignmentCommands, DispatchCommands, ReportCommands,
    TruckCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Check that the API is reachable.
    Health,
    /// Log in, log out, inspect the stored session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Dashboard counters and recent activity.
    Dashboard,
    /// Activity feed, newest first.
    Activity(ActivityArgs),
    /// Branches.
    Branches {
        #[command(subcommand)]
        action: BranchCommands,
    },
    /// Trucks.
    Trucks {
        #[command(subcommand)]
        action: TruckCommands,
    },
    /// Consignments.
    Consignments {
        #[command(subcommand)]
        action: ConsignmentCommands,
    },
    /// Dispatch workflow: assign, deliver, cancel.
    Dispatch {
        #[command(subcommand)]
        action: DispatchCommands,
    },
    /// Consignment and fleet reports.
    Reports {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// User management (admin only).
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ActivityArgs {
    /// Max entries (the server clamps to its configured maximum)
    #[arg(short, long)]
    pub limit: Option<u32>,
    /// Only entries about this entity type
    #[arg(long, value_parser = parse::entity)]
    pub entity: Option<EntityType>,
}
