//! Moderation transitions and their failure mapping.

use eventhub_core::error::{AppError, ConflictKind};
use eventhub_core::result::AppResult;
use eventhub_database::TransitionOutcome;
use eventhub_entity::event::{ApprovalStatus, EventListing, Transition};

/// The conflict raised when `transition` is refused in state `from`.
pub fn guard_conflict(transition: Transition, from: ApprovalStatus) -> AppError {
    match transition {
        Transition::Approve => AppError::conflict(
            ConflictKind::AlreadyApproved,
            "Event is already approved",
        ),
        Transition::Reject => AppError::conflict(
            ConflictKind::AlreadyUnapproved,
            format!("Event is not approved (currently {from})"),
        ),
    }
}

/// Turn a store outcome into the workflow result.
pub fn settle(transition: Transition, outcome: TransitionOutcome) -> AppResult<EventListing> {
    match outcome {
        TransitionOutcome::Applied(listing) => Ok(listing),
        TransitionOutcome::GuardFailed(status) => Err(guard_conflict(transition, status)),
        TransitionOutcome::NotFound => Err(AppError::not_found("Event not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_core::ErrorKind;

    #[test]
    fn test_settle_maps_guard_failures() {
        let err = settle(
            Transition::Approve,
            TransitionOutcome::GuardFailed(ApprovalStatus::Approved),
        )
        .unwrap_err();
        assert!(err.is_conflict(ConflictKind::AlreadyApproved));

        let err = settle(
            Transition::Reject,
            TransitionOutcome::GuardFailed(ApprovalStatus::Pending),
        )
        .unwrap_err();
        assert!(err.is_conflict(ConflictKind::AlreadyUnapproved));
        assert!(err.message.contains("pending"));

        let err = settle(Transition::Reject, TransitionOutcome::NotFound).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
