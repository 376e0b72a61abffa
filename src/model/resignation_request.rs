use chrono::{DateTime, FixedOffset, NaiveDate};
use fake::Dummy;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use super::review_status::{ResignationDecision, ResignationStatus};
use crate::{
    core::review::{Review, Reviewable},
    text_enum,
};

pub const TABLE_NAME: &str = "public.resignation_request";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Dummy)]
#[serde(rename_all = "lowercase")]
pub enum ResignationType {
    Resignation,
    Termination,
}

text_enum!(ResignationType, "request type" {
    Resignation => "resignation",
    Termination => "termination",
});

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct ResignationRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub request_type: ResignationType,
    pub years_of_service: i32,
    pub request_date: NaiveDate,
    pub description: String,
    pub document_url: Option<String>,
    pub status: ResignationStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_date: Option<DateTime<FixedOffset>>,
    pub admin_notes: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
}

impl Reviewable for ResignationRequest {
    type Status = ResignationStatus;
    const ENTITY: &'static str = "resignation_request";

    fn id(&self) -> Uuid {
        self.id
    }

    fn status(&self) -> ResignationStatus {
        self.status
    }

    fn record_review(&mut self, status: ResignationStatus, review: &Review<ResignationDecision>) {
        self.status = status;
        self.reviewed_by = Some(review.reviewer_id);
        self.reviewed_date = Some(review.reviewed_date);
        self.admin_notes = review.notes.clone();
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResignationRequestFilter {
    pub status: Option<ResignationStatus>,
    pub employee_id: Option<Uuid>,
}
