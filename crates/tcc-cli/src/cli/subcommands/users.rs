use clap::Subcommand;
use tcc_core::enums::Role;

use crate::cli::parse;

/// Admin-only user commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// List users.
    List,
    /// Create a user with a chosen role.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_parser = parse::role, default_value = "user")]
        role: Role,
    },
    /// Delete a user.
    Delete { id: String },
}
