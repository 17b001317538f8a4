//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **memory**: a single in-process store implementing every port, used
//!   when no database is configured.
//!
//! Adapters translate between domain types and storage representations and
//! contain no lifecycle rules.

pub mod memory;
pub mod persistence;
