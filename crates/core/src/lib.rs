//! Moalem Plus domain logic.
//!
//! Pure, I/O-free rules shared by the database and API crates: identifier
//! types, the domain error taxonomy, attendance status and rate math, date
//! parsing, and field rules for classes, students and accounts.

pub mod accounts;
pub mod attendance;
pub mod classes;
pub mod dates;
pub mod error;
pub mod students;
pub mod types;
