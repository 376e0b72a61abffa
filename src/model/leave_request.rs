use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

use super::review_status::{ApprovalDecision, ApprovalStatus};
use crate::core::review::{Review, Reviewable};

pub const TABLE_NAME: &str = "public.leave_request";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_requested: i32,
    pub reason: Option<String>,
    pub status: ApprovalStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_date: Option<DateTime<FixedOffset>>,
    pub admin_notes: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
}

impl Reviewable for LeaveRequest {
    type Status = ApprovalStatus;
    const ENTITY: &'static str = "leave_request";

    fn id(&self) -> Uuid {
        self.id
    }

    fn status(&self) -> ApprovalStatus {
        self.status
    }

    fn record_review(&mut self, status: ApprovalStatus, review: &Review<ApprovalDecision>) {
        self.status = status;
        self.reviewed_by = Some(review.reviewer_id);
        self.reviewed_date = Some(review.reviewed_date);
        self.admin_notes = review.notes.clone();
    }
}

/// Filters accepted by leave request listings.
#[derive(Clone, Debug, Default)]
pub struct LeaveRequestFilter {
    pub status: Option<ApprovalStatus>,
    pub employee_id: Option<Uuid>,
}
