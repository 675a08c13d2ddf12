//! # tcc-core
//!
//! Core types shared across all TCC crates:
//! - Entity structs for the transport domain (branches, trucks, consignments, users, activity)
//! - Flat status/role/action enums
//! - ID prefix constants
//! - Request payloads and API response shapes
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod requests;
pub mod responses;
