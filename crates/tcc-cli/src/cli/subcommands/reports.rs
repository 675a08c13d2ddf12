use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::cli::parse;

/// Report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Consignment totals by status and origin branch.
    Consignments {
        /// Created at or after (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse::timestamp)]
        from: Option<DateTime<Utc>>,
        /// Created at or before (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse::timestamp)]
        to: Option<DateTime<Utc>>,
    },
    /// Fleet availability per branch.
    Trucks,
}
