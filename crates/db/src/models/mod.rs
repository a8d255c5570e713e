//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` create/update DTOs where the resource is writable
//! - Joined read models for list and report queries

pub mod attendance;
pub mod class;
pub mod school;
pub mod session;
pub mod student;
pub mod subject;
pub mod user;
