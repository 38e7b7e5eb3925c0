//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the request DTOs that write to it.

pub mod business;
pub mod review;
