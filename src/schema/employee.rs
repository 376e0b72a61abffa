use chrono::NaiveDate;
use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::{
    core::utils::{date_to_string, datetime_to_string_opt, years_of_service},
    model::employee::Employee,
};
use super::common::{
    BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
    NotFoundResponse, PaginateResponse, UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize)]
pub struct EmployeeDetail {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub start_date: String,
    pub years_of_service: i32,
    pub created_date: Option<String>,
    pub updated_date: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct EmployeeCreateRequest {
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    /// YYYY-MM-DD
    pub start_date: String,
}

#[derive(ApiResponse)]
pub enum PaginateEmployeeResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<EmployeeDetail>>),

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
pub enum EmployeeDetailResponses {
    #[oai(status = 200)]
    Ok(Json<EmployeeDetail>),

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
pub enum EmployeeCreateResponses {
    #[oai(status = 201)]
    Ok(Json<EmployeeDetail>),

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

impl EmployeeDetail {
    pub fn new(employee: Employee, today: NaiveDate) -> Self {
        Self {
            id: employee.id.to_string(),
            full_name: employee.full_name,
            email: employee.email,
            department: employee.department,
            position: employee.position,
            start_date: date_to_string(employee.start_date),
            years_of_service: years_of_service(employee.start_date, today),
            created_date: datetime_to_string_opt(employee.created_date),
            updated_date: datetime_to_string_opt(employee.updated_date),
        }
    }
}
