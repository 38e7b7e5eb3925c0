//! Review moderation statuses and the review change event.
//!
//! A review is written as `pending`, then a moderator moves it to `approved`
//! or `rejected`. Every update to a review row is captured by the database
//! and delivered as a [`ReviewChangeEvent`] carrying the previous and the new
//! row image.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Review is awaiting moderation.
pub const STATUS_PENDING: &str = "pending";

/// Review has been published.
pub const STATUS_APPROVED: &str = "approved";

/// Review was turned down by a moderator.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid review status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Maximum length for a moderator's rejection reason.
pub const MAX_REJECTION_REASON_LENGTH: usize = 2_000;

/* --------------------------------------------------------------------------
ReviewStatus
-------------------------------------------------------------------------- */

/// Moderation status of a review, stored as text in `reviews.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Pending => STATUS_PENDING,
            ReviewStatus::Approved => STATUS_APPROVED,
            ReviewStatus::Rejected => STATUS_REJECTED,
        }
    }

    /// Whether a moderator may still act on a review in this status.
    pub fn is_moderatable(self) -> bool {
        self == ReviewStatus::Pending
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(ReviewStatus::Pending),
            STATUS_APPROVED => Ok(ReviewStatus::Approved),
            STATUS_REJECTED => Ok(ReviewStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid review status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

/* --------------------------------------------------------------------------
ReviewChangeEvent
-------------------------------------------------------------------------- */

/// The previous image of an updated review row.
///
/// Only the status is captured; the old image is used solely to detect
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldReviewRow {
    pub status: ReviewStatus,
}

/// The new image of an updated review row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReviewRow {
    pub id: DbId,
    pub title: String,
    pub status: ReviewStatus,
    pub business_id: DbId,
}

/// One row-level update on the `reviews` table.
///
/// Wire shape: `{ "old": { "status" }, "new": { "id", "title", "status", "business_id" } }`.
/// Unknown keys are ignored so the capture trigger may add fields freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewChangeEvent {
    pub old: OldReviewRow,
    pub new: NewReviewRow,
}

impl ReviewChangeEvent {
    pub fn review_id(&self) -> DbId {
        self.new.id
    }

    pub fn business_id(&self) -> DbId {
        self.new.business_id
    }

    /// The `(previous, new)` status pair.
    pub fn transition(&self) -> (ReviewStatus, ReviewStatus) {
        (self.old.status, self.new.status)
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a review may move from `current` to `target`.
///
/// Only pending reviews are moderated, and they may only move to a
/// different status.
pub fn validate_transition(current: ReviewStatus, target: ReviewStatus) -> Result<(), CoreError> {
    if !current.is_moderatable() {
        return Err(CoreError::Conflict(format!(
            "Review is already {current}; only pending reviews can be moderated"
        )));
    }
    if current == target {
        return Err(CoreError::Validation(format!(
            "Review is already {current}"
        )));
    }
    Ok(())
}

/// Validate an optional rejection reason.
pub fn validate_rejection_reason(reason: Option<&str>) -> Result<(), CoreError> {
    if let Some(r) = reason {
        if r.len() > MAX_REJECTION_REASON_LENGTH {
            return Err(CoreError::Validation(format!(
                "Rejection reason exceeds maximum length of {MAX_REJECTION_REASON_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_status_round_trips_through_str() {
        for s in VALID_STATUSES {
            let status: ReviewStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), *s);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = "archived".parse::<ReviewStatus>();
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("archived"));
    }

    #[test]
    fn test_change_event_decodes_wire_shape() {
        let event: ReviewChangeEvent = serde_json::from_value(serde_json::json!({
            "operation": "UPDATE",
            "old": { "status": "pending" },
            "new": { "id": 42, "title": "Great service", "status": "approved", "business_id": 7 }
        }))
        .unwrap();

        assert_eq!(event.review_id(), 42);
        assert_eq!(event.business_id(), 7);
        assert_eq!(event.new.title, "Great service");
        assert_eq!(
            event.transition(),
            (ReviewStatus::Pending, ReviewStatus::Approved)
        );
    }

    #[test]
    fn test_change_event_missing_field_rejected() {
        let result = serde_json::from_value::<ReviewChangeEvent>(serde_json::json!({
            "old": { "status": "pending" },
            "new": { "id": 42, "status": "approved", "business_id": 7 }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_pending_review_can_be_approved_or_rejected() {
        assert!(validate_transition(ReviewStatus::Pending, ReviewStatus::Approved).is_ok());
        assert!(validate_transition(ReviewStatus::Pending, ReviewStatus::Rejected).is_ok());
    }

    #[test]
    fn test_moderated_review_is_a_conflict() {
        assert_matches!(
            validate_transition(ReviewStatus::Approved, ReviewStatus::Rejected),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_transition(ReviewStatus::Rejected, ReviewStatus::Approved),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn test_pending_to_pending_rejected() {
        assert_matches!(
            validate_transition(ReviewStatus::Pending, ReviewStatus::Pending),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_rejection_reason_length() {
        assert!(validate_rejection_reason(None).is_ok());
        assert!(validate_rejection_reason(Some("spam")).is_ok());
        let long = "x".repeat(MAX_REJECTION_REASON_LENGTH + 1);
        assert!(validate_rejection_reason(Some(&long)).is_err());
    }
}
