//! Selects the review transitions worth telling users about.

use revuoo_core::review::{ReviewChangeEvent, ReviewStatus};

/// Whether `event` is a review that just left moderation as approved.
///
/// Only `pending -> approved` qualifies. Edits to already-approved reviews,
/// rejections and any other transition do not.
pub fn is_newly_approved(event: &ReviewChangeEvent) -> bool {
    event.transition() == (ReviewStatus::Pending, ReviewStatus::Approved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use revuoo_core::review::{NewReviewRow, OldReviewRow};

    const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Pending,
        ReviewStatus::Approved,
        ReviewStatus::Rejected,
    ];

    fn event(old: ReviewStatus, new: ReviewStatus) -> ReviewChangeEvent {
        ReviewChangeEvent {
            old: OldReviewRow { status: old },
            new: NewReviewRow {
                id: 42,
                title: "Great service".to_string(),
                status: new,
                business_id: 7,
            },
        }
    }

    #[test]
    fn pending_to_approved_qualifies() {
        assert!(is_newly_approved(&event(
            ReviewStatus::Pending,
            ReviewStatus::Approved
        )));
    }

    #[test]
    fn every_other_transition_is_discarded() {
        for old in ALL {
            for new in ALL {
                if (old, new) == (ReviewStatus::Pending, ReviewStatus::Approved) {
                    continue;
                }
                assert!(
                    !is_newly_approved(&event(old, new)),
                    "{old} -> {new} must not qualify"
                );
            }
        }
    }
}
