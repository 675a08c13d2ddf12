use clap::Subcommand;

/// Branch commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BranchCommands {
    /// List branches.
    List,
    /// Get a branch by ID.
    Get { id: String },
    /// Create a branch.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
    },
    /// Update a branch.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Delete a branch.
    Delete { id: String },
}
