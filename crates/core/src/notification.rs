//! Display-ready review approval notifications.

use serde::{Deserialize, Serialize};

use crate::review::ReviewChangeEvent;
use crate::types::DbId;

/// How long a review approval toast stays visible, in seconds.
pub const DEFAULT_TOAST_DURATION_SECS: u64 = 10;

/// Build the public link for a business profile page.
pub fn business_link(slug: &str) -> String {
    format!("/business/{slug}")
}

/// Name and slug of a business, as returned by the enrichment lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessSummary {
    pub name: String,
    pub slug: Option<String>,
}

/// A review approval ready to be rendered as a toast.
///
/// Lives only inside one client session's presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedNotification {
    pub review_id: DbId,
    pub review_title: String,
    pub business_name: String,
    pub business_slug: String,
}

impl EnrichedNotification {
    /// Combine a change event with its business summary.
    ///
    /// Returns `None` when the business has no usable slug, since the toast
    /// cannot link anywhere.
    pub fn from_parts(event: &ReviewChangeEvent, business: BusinessSummary) -> Option<Self> {
        let slug = business.slug.filter(|s| !s.trim().is_empty())?;
        Some(Self {
            review_id: event.review_id(),
            review_title: event.new.title.clone(),
            business_name: business.name,
            business_slug: slug,
        })
    }

    pub fn heading(&self) -> String {
        format!("New Review for {}", self.business_name)
    }

    pub fn link(&self) -> String {
        business_link(&self.business_slug)
    }
}
