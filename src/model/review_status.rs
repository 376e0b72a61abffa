use fake::Dummy;
use serde::{Deserialize, Serialize};

use crate::{core::review::ReviewStatus, text_enum};

/// Status of leave requests and reward/punishment records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Dummy)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

text_enum!(ApprovalStatus, "approval status" {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

text_enum!(ApprovalDecision, "approval decision" {
    Approved => "approved",
    Rejected => "rejected",
});

impl ReviewStatus for ApprovalStatus {
    type Decision = ApprovalDecision;
    const PENDING: Self = ApprovalStatus::Pending;

    fn decided(decision: ApprovalDecision) -> Self {
        match decision {
            ApprovalDecision::Approved => ApprovalStatus::Approved,
            ApprovalDecision::Rejected => ApprovalStatus::Rejected,
        }
    }
}

/// Status of resignation and termination requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Dummy)]
#[serde(rename_all = "lowercase")]
pub enum ResignationStatus {
    Pending,
    Valid,
    Invalid,
}

text_enum!(ResignationStatus, "resignation status" {
    Pending => "pending",
    Valid => "valid",
    Invalid => "invalid",
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResignationDecision {
    Valid,
    Invalid,
}

text_enum!(ResignationDecision, "resignation decision" {
    Valid => "valid",
    Invalid => "invalid",
});

impl ReviewStatus for ResignationStatus {
    type Decision = ResignationDecision;
    const PENDING: Self = ResignationStatus::Pending;

    fn decided(decision: ResignationDecision) -> Self {
        match decision {
            ResignationDecision::Valid => ResignationStatus::Valid,
            ResignationDecision::Invalid => ResignationStatus::Invalid,
        }
    }
}
