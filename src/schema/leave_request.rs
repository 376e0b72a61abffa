use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::{
    core::utils::{date_to_string, datetime_to_string_opt, working_days},
    model::leave_request::LeaveRequest,
};

use super::common::{
    BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize)]
pub struct LeaveRequestDetail {
    pub id: String,
    pub employee_id: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub days_requested: i32,
    /// Monday to Friday dates between start and end, for display only
    pub working_days: u32,
    pub reason: Option<String>,
    pub status: String,
    pub reviewed_by: Option<String>,
    pub reviewed_date: Option<String>,
    pub admin_notes: Option<String>,
    pub created_date: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct LeaveRequestCreateRequest {
    pub employee_id: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub days_requested: i32,
    pub reason: Option<String>,
}

#[derive(ApiResponse)]
pub enum PaginateLeaveRequestResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<LeaveRequestDetail>>),

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
pub enum LeaveRequestDetailResponses {
    #[oai(status = 200)]
    Ok(Json<LeaveRequestDetail>),

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
pub enum LeaveRequestCreateResponses {
    #[oai(status = 201)]
    Ok(Json<LeaveRequestDetail>),

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
pub enum LeaveRequestReviewResponses {
    #[oai(status = 200)]
    Ok(Json<LeaveRequestDetail>),

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

impl From<LeaveRequest> for LeaveRequestDetail {
    fn from(leave_request: LeaveRequest) -> Self {
        Self {
            id: leave_request.id.to_string(),
            employee_id: leave_request.employee_id.to_string(),
            leave_type: leave_request.leave_type,
            start_date: date_to_string(leave_request.start_date),
            end_date: date_to_string(leave_request.end_date),
            days_requested: leave_request.days_requested,
            working_days: working_days(leave_request.start_date, leave_request.end_date),
            reason: leave_request.reason,
            status: leave_request.status.to_string(),
            reviewed_by: leave_request.reviewed_by.map(|x| x.to_string()),
            reviewed_date: datetime_to_string_opt(leave_request.reviewed_date),
            admin_notes: leave_request.admin_notes,
            created_date: datetime_to_string_opt(leave_request.created_date),
        }
    }
}
