use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::{
    core::utils::{date_to_string, datetime_to_string_opt},
    model::reward_punishment::RewardPunishment,
};

use super::common::{
    BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize)]
pub struct RewardDetail {
    pub id: String,
    pub employee_id: String,
    pub record_type: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub award_date: String,
    pub status: String,
    pub awarded_by: Option<String>,
    pub incident_id: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_date: Option<String>,
    pub admin_notes: Option<String>,
    pub created_date: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct RewardCreateRequest {
    pub employee_id: String,
    /// reward / punishment
    pub record_type: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub award_date: String,
    pub incident_id: Option<String>,
}

#[derive(ApiResponse)]
pub enum PaginateRewardResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<RewardDetail>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum RewardCreateResponses {
    #[oai(status = 201)]
    Ok(Json<RewardDetail>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum RewardReviewResponses {
    #[oai(status = 200)]
    Ok(Json<RewardDetail>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl From<RewardPunishment> for RewardDetail {
    fn from(record: RewardPunishment) -> Self {
        Self {
            id: record.id.to_string(),
            employee_id: record.employee_id.to_string(),
            record_type: record.record_type.to_string(),
            category: record.category,
            description: record.description,
            amount: record.amount,
            award_date: date_to_string(record.award_date),
            status: record.status.to_string(),
            awarded_by: record.awarded_by.map(|x| x.to_string()),
            incident_id: record.incident_id.map(|x| x.to_string()),
            reviewed_by: record.reviewed_by.map(|x| x.to_string()),
            reviewed_date: datetime_to_string_opt(record.reviewed_date),
            admin_notes: record.admin_notes,
            created_date: datetime_to_string_opt(record.created_date),
        }
    }
}
