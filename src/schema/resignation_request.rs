use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::{
    core::utils::{date_to_string, datetime_to_string_opt},
    model::resignation_request::ResignationRequest,
};

use super::common::{
    BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize)]
pub struct ResignationRequestDetail {
    pub id: String,
    pub employee_id: String,
    pub request_type: String,
    pub years_of_service: i32,
    pub request_date: String,
    pub description: String,
    pub document_url: Option<String>,
    pub status: String,
    pub reviewed_by: Option<String>,
    pub reviewed_date: Option<String>,
    pub admin_notes: Option<String>,
    pub created_date: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct ResignationRequestCreateRequest {
    pub employee_id: String,
    /// resignation / termination
    pub request_type: String,
    pub description: String,
    /// reference to an already uploaded document
    pub document_url: Option<String>,
}

#[derive(ApiResponse)]
pub enum PaginateResignationRequestResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<ResignationRequestDetail>>),

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
pub enum ResignationRequestDetailResponses {
    #[oai(status = 200)]
    Ok(Json<ResignationRequestDetail>),

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
pub enum ResignationRequestCreateResponses {
    #[oai(status = 201)]
    Ok(Json<ResignationRequestDetail>),

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
pub enum ResignationRequestReviewResponses {
    #[oai(status = 200)]
    Ok(Json<ResignationRequestDetail>),

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

impl From<ResignationRequest> for ResignationRequestDetail {
    fn from(request: ResignationRequest) -> Self {
        Self {
            id: request.id.to_string(),
            employee_id: request.employee_id.to_string(),
            request_type: request.request_type.to_string(),
            years_of_service: request.years_of_service,
            request_date: date_to_string(request.request_date),
            description: request.description,
            document_url: request.document_url,
            status: request.status.to_string(),
            reviewed_by: request.reviewed_by.map(|x| x.to_string()),
            reviewed_date: datetime_to_string_opt(request.reviewed_date),
            admin_notes: request.admin_notes,
            created_date: datetime_to_string_opt(request.created_date),
        }
    }
}
