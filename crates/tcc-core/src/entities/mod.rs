//! Entity structs for all TCC domain objects.
//!
//! Each entity maps to a table in the libSQL database. API JSON uses camelCase
//! field names; all structs derive `JsonSchema` for response validation.

mod activity;
mod branch;
mod consignment;
mod truck;
mod user;

pub use activity::ActivityLog;
pub use branch::Branch;
pub use consignment::Consignment;
pub use truck::Truck;
pub use user::User;
