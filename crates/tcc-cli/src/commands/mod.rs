pub mod activity;
pub mod auth;
pub mod branches;
pub mod consignments;
pub mod dashboard;
pub mod dispatch;
pub mod dispatch_flow;
pub mod health;
pub mod reports;
pub mod trucks;
pub mod users;
