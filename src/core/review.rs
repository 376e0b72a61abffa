//! Pending → terminal review transitions shared by leave requests,
//! resignation requests and reward/punishment records.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, Local};
use tracing::info;
use uuid::Uuid;

use crate::{
    core::error::{HrError, HrResult},
    model::{
        leave_request::LeaveRequest,
        resignation_request::ResignationRequest,
        review_status::{ApprovalDecision, ResignationDecision},
        reward_punishment::RewardPunishment,
    },
    store::HrStore,
};

/// A status with one initial `PENDING` state and terminal states reachable
/// only through a `Decision`.
pub trait ReviewStatus: Copy + PartialEq + Display + Send + Sync {
    type Decision: Copy + Display + Send + Sync;

    const PENDING: Self;

    fn decided(decision: Self::Decision) -> Self;

    fn is_pending(&self) -> bool {
        *self == Self::PENDING
    }
}

pub type DecisionOf<R> = <<R as Reviewable>::Status as ReviewStatus>::Decision;

pub trait Reviewable: Clone + Send + Sync {
    type Status: ReviewStatus;

    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
    fn status(&self) -> Self::Status;
    fn record_review(&mut self, status: Self::Status, review: &Review<DecisionOf<Self>>);
}

/// A reviewer's decision, written to the record as one update.
#[derive(Clone, Debug)]
pub struct Review<D> {
    pub decision: D,
    pub reviewer_id: Uuid,
    pub notes: Option<String>,
    pub reviewed_date: DateTime<FixedOffset>,
}

impl<D> Review<D> {
    pub fn new(decision: D, reviewer_id: Uuid, notes: Option<String>) -> Self {
        Self {
            decision,
            reviewer_id,
            notes: notes
                .map(|x| x.trim().to_string())
                .filter(|x| !x.is_empty()),
            reviewed_date: Local::now().fixed_offset(),
        }
    }
}

pub fn ensure_pending<R: Reviewable>(record: &R) -> HrResult<()> {
    if record.status().is_pending() {
        return Ok(());
    }
    Err(HrError::InvalidStateTransition {
        entity: R::ENTITY,
        id: record.id().to_string(),
        status: record.status().to_string(),
    })
}

/// Returns the reviewed copy of `record`; `record` itself is left untouched.
pub fn apply_review<R: Reviewable>(record: &R, review: &Review<DecisionOf<R>>) -> HrResult<R> {
    ensure_pending(record)?;
    let mut reviewed = record.clone();
    let status = <R::Status as ReviewStatus>::decided(review.decision);
    reviewed.record_review(status, review);
    Ok(reviewed)
}

async fn ensure_reviewer(store: &dyn HrStore, reviewer_id: &Uuid) -> HrResult<()> {
    match store.get_user_by_id(reviewer_id).await? {
        Some(_) => Ok(()),
        None => Err(HrError::not_found("user", reviewer_id)),
    }
}

pub async fn review_leave_request(
    store: &dyn HrStore,
    id: &Uuid,
    decision: ApprovalDecision,
    reviewer_id: &Uuid,
    notes: Option<String>,
) -> HrResult<LeaveRequest> {
    ensure_reviewer(store, reviewer_id).await?;
    let review = Review::new(decision, *reviewer_id, notes);
    let reviewed = store.review_leave_request(id, &review).await?;
    info!(
        "leave_request {} reviewed as {} by {}",
        id, reviewed.status, reviewer_id
    );
    Ok(reviewed)
}

pub async fn review_resignation_request(
    store: &dyn HrStore,
    id: &Uuid,
    decision: ResignationDecision,
    reviewer_id: &Uuid,
    notes: Option<String>,
) -> HrResult<ResignationRequest> {
    ensure_reviewer(store, reviewer_id).await?;
    let review = Review::new(decision, *reviewer_id, notes);
    let reviewed = store.review_resignation_request(id, &review).await?;
    info!(
        "resignation_request {} reviewed as {} by {}",
        id, reviewed.status, reviewer_id
    );
    Ok(reviewed)
}

pub async fn review_reward_punishment(
    store: &dyn HrStore,
    id: &Uuid,
    decision: ApprovalDecision,
    reviewer_id: &Uuid,
    notes: Option<String>,
) -> HrResult<RewardPunishment> {
    ensure_reviewer(store, reviewer_id).await?;
    let review = Review::new(decision, *reviewer_id, notes);
    let reviewed = store.review_reward_punishment(id, &review).await?;
    info!(
        "reward_punishment {} reviewed as {} by {}",
        id, reviewed.status, reviewer_id
    );
    Ok(reviewed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        factory::{leave_request::LeaveRequestFactory, user::UserFactory},
        model::{review_status::ApprovalStatus, role::Role, user::User},
        store::memory::MemoryStore,
    };

    async fn reviewer(store: &MemoryStore) -> User {
        let mut factory = UserFactory::<Role>::new();
        factory.modified_one(|x, role| User {
            role,
            ..x.clone()
        });
        factory.generate_one(store, Role::Hr).await.unwrap()
    }

    #[tokio::test]
    async fn test_review_leave_request_once() {
        let store = MemoryStore::new();
        let reviewer = reviewer(&store).await;
        let leave_request = LeaveRequestFactory::new()
            .generate_one(&store, ())
            .await
            .unwrap();

        let reviewed = review_leave_request(
            &store,
            &leave_request.id,
            ApprovalDecision::Approved,
            &reviewer.id,
            Some("looks good".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(reviewed.status, ApprovalStatus::Approved);
        assert_eq!(reviewed.reviewed_by, Some(reviewer.id));
        assert!(reviewed.reviewed_date.is_some());
        assert_eq!(reviewed.admin_notes, Some("looks good".to_string()));

        let res = review_leave_request(
            &store,
            &leave_request.id,
            ApprovalDecision::Rejected,
            &reviewer.id,
            Some("changed my mind".to_string()),
        )
        .await;
        assert!(matches!(res, Err(HrError::InvalidStateTransition { .. })));

        let stored = store
            .get_leave_request_by_id(&leave_request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ApprovalStatus::Approved);
        assert_eq!(stored.reviewed_by, reviewed.reviewed_by);
        assert_eq!(stored.reviewed_date, reviewed.reviewed_date);
        assert_eq!(stored.admin_notes, Some("looks good".to_string()));
    }

    #[tokio::test]
    async fn test_review_unknown_reviewer_or_request() {
        let store = MemoryStore::new();
        let reviewer = reviewer(&store).await;
        let leave_request = LeaveRequestFactory::new()
            .generate_one(&store, ())
            .await
            .unwrap();

        let res = review_leave_request(
            &store,
            &leave_request.id,
            ApprovalDecision::Approved,
            &Uuid::now_v7(),
            None,
        )
        .await;
        assert!(matches!(res, Err(HrError::NotFound { entity: "user", .. })));

        let res = review_leave_request(
            &store,
            &Uuid::now_v7(),
            ApprovalDecision::Approved,
            &reviewer.id,
            None,
        )
        .await;
        assert!(matches!(
            res,
            Err(HrError::NotFound {
                entity: "leave_request",
                ..
            })
        ));

        let stored = store
            .get_leave_request_by_id(&leave_request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ApprovalStatus::Pending);
        assert!(stored.reviewed_by.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_reviews_single_winner() {
        let store = Arc::new(MemoryStore::new());
        let reviewer = reviewer(&store).await;
        let leave_request = LeaveRequestFactory::new()
            .generate_one(store.as_ref(), ())
            .await
            .unwrap();

        let (id, reviewer_id) = (leave_request.id, reviewer.id);
        let mut handles = vec![];
        for idx in 0..8 {
            let store = store.clone();
            let decision = if idx % 2 == 0 {
                ApprovalDecision::Approved
            } else {
                ApprovalDecision::Rejected
            };
            handles.push(tokio::spawn(async move {
                review_leave_request(store.as_ref(), &id, decision, &reviewer_id, None).await
            }));
        }
        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(err) => assert!(matches!(err, HrError::InvalidStateTransition { .. })),
            }
        }
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_apply_review_leaves_original_untouched() {
        let leave_request = LeaveRequestFactory::<()>::dummy();
        let review = Review::new(
            ApprovalDecision::Rejected,
            Uuid::now_v7(),
            Some("   ".to_string()),
        );
        let reviewed = apply_review(&leave_request, &review).unwrap();
        assert_eq!(reviewed.status, ApprovalStatus::Rejected);
        assert!(reviewed.admin_notes.is_none());
        assert_eq!(leave_request.status, ApprovalStatus::Pending);
        assert!(apply_review(&reviewed, &review).is_err());
    }
}
