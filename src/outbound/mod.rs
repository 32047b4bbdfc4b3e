//! Outbound adapters implementing domain ports.
//!
//! Thin translators between domain types and infrastructure. No business
//! logic lives here.
//!
//! - **persistence**: in-memory stores guarded by `RwLock`
//! - **security**: bcrypt password hashing

pub mod persistence;
pub mod security;
