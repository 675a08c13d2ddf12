//! Repository modules. Each adds methods to `TccService` via an
//! `impl TccService` block.

pub mod activity;
pub mod branches;
pub mod consignments;
pub mod dashboard;
pub mod dispatch;
pub mod reports;
pub mod trucks;
pub mod users;
