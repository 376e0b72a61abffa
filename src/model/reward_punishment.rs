use chrono::{DateTime, FixedOffset, NaiveDate};
use fake::Dummy;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use super::review_status::{ApprovalDecision, ApprovalStatus};
use crate::{
    core::review::{Review, Reviewable},
    text_enum,
};

pub const TABLE_NAME: &str = "public.reward_punishment";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Dummy)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Reward,
    Punishment,
}

text_enum!(RecordType, "record type" {
    Reward => "reward",
    Punishment => "punishment",
});

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct RewardPunishment {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub record_type: RecordType,
    pub category: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub award_date: NaiveDate,
    pub status: ApprovalStatus,
    pub awarded_by: Option<Uuid>,
    pub incident_id: Option<Uuid>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_date: Option<DateTime<FixedOffset>>,
    pub admin_notes: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
}

impl Reviewable for RewardPunishment {
    type Status = ApprovalStatus;
    const ENTITY: &'static str = "reward_punishment";

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

#[derive(Clone, Debug, Default)]
pub struct RewardPunishmentFilter {
    pub record_type: Option<RecordType>,
    pub status: Option<ApprovalStatus>,
    pub employee_id: Option<Uuid>,
}
