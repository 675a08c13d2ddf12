use clap::Subcommand;

/// Dispatch workflow commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DispatchCommands {
    /// List dispatched consignments.
    List,
    /// Put a pending consignment on an available truck.
    Assign {
        #[arg(long)]
        consignment: String,
        #[arg(long)]
        truck: String,
    },
    /// Mark a dispatched consignment delivered and free its truck.
    Deliver { consignment_id: String },
    /// Return a dispatched consignment to pending and free its truck.
    Cancel { consignment_id: String },
}
