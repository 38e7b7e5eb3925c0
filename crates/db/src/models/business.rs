//! Business profile models.

use revuoo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `businesses` table.
///
/// `slug` is NULL until the business claims its public profile page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Business {
    pub id: DbId,
    pub name: String,
    pub slug: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
