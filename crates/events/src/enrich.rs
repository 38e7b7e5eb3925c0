//! Business lookup for qualifying review changes.
//!
//! A change event only carries the business id. Rendering a toast needs the
//! business name and the slug for the profile link, fetched here with one
//! point lookup per qualifying event.

use async_trait::async_trait;
use revuoo_core::notification::{BusinessSummary, EnrichedNotification};
use revuoo_core::review::ReviewChangeEvent;
use revuoo_core::types::DbId;
use revuoo_db::repositories::BusinessRepo;
use revuoo_db::DbPool;

use crate::error::EventError;

/// Source of business display data.
#[async_trait]
pub trait BusinessLookup: Send + Sync {
    /// Fetch the name and slug of a business, or `None` if it does not exist.
    async fn find_business(&self, business_id: DbId)
        -> Result<Option<BusinessSummary>, EventError>;
}

/// [`BusinessLookup`] backed by the `businesses` table.
pub struct PgBusinessLookup {
    pool: DbPool,
}

impl PgBusinessLookup {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessLookup for PgBusinessLookup {
    async fn find_business(
        &self,
        business_id: DbId,
    ) -> Result<Option<BusinessSummary>, EventError> {
        Ok(BusinessRepo::find_summary(&self.pool, business_id).await?)
    }
}

/// Turn a qualifying event into a display-ready notification.
///
/// Returns `None`, without retrying, when the lookup fails, the business is
/// missing, or it has no slug to link to.
pub async fn enrich(
    lookup: &dyn BusinessLookup,
    event: &ReviewChangeEvent,
) -> Option<EnrichedNotification> {
    let business_id = event.business_id();

    let business = match lookup.find_business(business_id).await {
        Ok(Some(business)) => business,
        Ok(None) => {
            tracing::debug!(
                review_id = event.review_id(),
                business_id,
                "Business not found, suppressing review notification"
            );
            return None;
        }
        Err(e) => {
            tracing::debug!(
                review_id = event.review_id(),
                business_id,
                error = %e,
                "Business lookup failed, suppressing review notification"
            );
            return None;
        }
    };

    let notification = EnrichedNotification::from_parts(event, business);
    if notification.is_none() {
        tracing::debug!(
            review_id = event.review_id(),
            business_id,
            "Business has no slug, suppressing review notification"
        );
    }
    notification
}
