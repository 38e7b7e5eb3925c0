//! Repository for the `businesses` table.

use revuoo_core::notification::BusinessSummary;
use revuoo_core::types::DbId;
use sqlx::PgPool;

use crate::models::business::Business;

/// Column list for businesses queries.
const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Provides read operations for business profiles.
pub struct BusinessRepo;

impl BusinessRepo {
    /// Insert a business, returning the created row.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        slug: Option<&str>,
    ) -> Result<Business, sqlx::Error> {
        let query = format!(
            "INSERT INTO businesses (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Business>(&query)
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    /// Find a business by its public slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Business>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM businesses WHERE slug = $1");
        sqlx::query_as::<_, Business>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Point lookup of the display name and slug used to render a
    /// review notification.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BusinessSummary>, sqlx::Error> {
        let row = sqlx::query_as::<_, (String, Option<String>)>(
            "SELECT name, slug FROM businesses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(name, slug)| BusinessSummary { name, slug }))
    }
}
