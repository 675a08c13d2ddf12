use clap::Subcommand;

/// Truck commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TruckCommands {
    /// List trucks.
    List {
        /// Only available (true) or busy (false) trucks
        #[arg(long)]
        available: Option<bool>,
        #[arg(long)]
        branch: Option<String>,
    },
    /// Get a truck by ID.
    Get { id: String },
    /// Register a truck.
    Create {
        #[arg(long)]
        registration: String,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        capacity_kg: Option<f64>,
        #[arg(long)]
        available: Option<bool>,
    },
    /// Update a truck.
    Update {
        id: String,
        #[arg(long)]
        registration: Option<String>,
        #[arg(long, conflicts_with = "clear_branch")]
        branch: Option<String>,
        /// Detach the truck from its branch
        #[arg(long)]
        clear_branch: bool,
        #[arg(long)]
        capacity_kg: Option<f64>,
        #[arg(long)]
        available: Option<bool>,
    },
    /// Delete a truck.
    Delete { id: String },
}
