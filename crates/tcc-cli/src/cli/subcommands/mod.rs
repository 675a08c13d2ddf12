mod auth;
mod branches;
mod consignments;
mod dispatch;
mod reports;
mod trucks;
mod users;

pub use auth::AuthCommands;
pub use branches::BranchCommands;
pub use consignments::ConsignmentCommands;
pub use dispatch::DispatchCommands;
pub use reports::ReportCommands;
pub use trucks::TruckCommands;
pub use users::UserCommands;
