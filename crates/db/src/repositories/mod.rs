//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod business_repo;
pub mod review_repo;

pub use business_repo::BusinessRepo;
pub use review_repo::ReviewRepo;
